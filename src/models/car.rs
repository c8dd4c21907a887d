use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

use super::trip::Trip;

/// Size categories a car may be registered under.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CarSize {
    #[serde(rename = "s")]
    Small,
    #[serde(rename = "m")]
    Medium,
    #[serde(rename = "l")]
    Large,
}

impl CarSize {
    pub const ALL: [CarSize; 3] = [CarSize::Small, CarSize::Medium, CarSize::Large];

    pub fn as_str(&self) -> &'static str {
        match self {
            CarSize::Small => "s",
            CarSize::Medium => "m",
            CarSize::Large => "l",
        }
    }
}

impl fmt::Display for CarSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CarSize {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CarSize::ALL
            .into_iter()
            .find(|size| size.as_str() == s)
            .ok_or_else(|| {
                let mut err = ValidationError::new("car_size");
                err.message = Some("size must be one of: s, m, l".into());
                err
            })
    }
}

/// A car row as stored.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct Car {
    pub id: i64,
    pub size: String,
    pub fuel: String,
    pub doors: i64,
    pub transmission: String,
}

/// Accepted body for creating or replacing a car.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq, Eq)]
pub struct CarInput {
    #[validate(custom = "validate_size")]
    pub size: String,
    #[validate(length(min = 1, message = "fuel must not be empty"))]
    pub fuel: String,
    #[validate(range(min = 0, message = "doors must not be negative"))]
    pub doors: i64,
    #[validate(length(min = 1, message = "transmission must not be empty"))]
    pub transmission: String,
}

fn validate_size(size: &str) -> Result<(), ValidationError> {
    size.parse::<CarSize>().map(|_| ())
}

/// A car together with its trips, returned when a single car is fetched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CarOutput {
    pub id: i64,
    pub size: String,
    pub fuel: String,
    pub doors: i64,
    pub transmission: String,
    pub trips: Vec<Trip>,
}

impl CarOutput {
    pub fn new(car: Car, trips: Vec<Trip>) -> Self {
        Self {
            id: car.id,
            size: car.size,
            fuel: car.fuel,
            doors: car.doors,
            transmission: car.transmission,
            trips,
        }
    }
}

/// Query-string filters for listing cars. `doors` is a lower bound.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CarFilter {
    pub size: Option<String>,
    pub doors: Option<i64>,
}

impl CarFilter {
    /// An empty size matches everything.
    pub fn size(&self) -> Option<&str> {
        self.size.as_deref().filter(|size| !size.is_empty())
    }

    /// Zero doors is no constraint at all.
    pub fn min_doors(&self) -> Option<i64> {
        self.doors.filter(|doors| *doors != 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(size: &str, doors: i64) -> CarInput {
        CarInput {
            size: size.into(),
            fuel: "gasoline".into(),
            doors,
            transmission: "manual".into(),
        }
    }

    #[test]
    fn accepts_known_sizes() {
        for size in CarSize::ALL {
            assert!(input(size.as_str(), 4).validate().is_ok(), "{size}");
        }
    }

    #[test]
    fn rejects_unknown_size() {
        let errors = input("xl", 4).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("size"));
    }

    #[test]
    fn rejects_negative_doors() {
        let errors = input("m", -1).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("doors"));
    }

    #[test]
    fn rejects_blank_fuel() {
        let mut car = input("s", 2);
        car.fuel.clear();
        let errors = car.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("fuel"));
    }

    #[test]
    fn filter_ignores_empty_size_and_zero_doors() {
        let filter = CarFilter {
            size: Some(String::new()),
            doors: Some(0),
        };
        assert_eq!(filter.size(), None);
        assert_eq!(filter.min_doors(), None);

        let filter = CarFilter {
            size: Some("l".into()),
            doors: Some(3),
        };
        assert_eq!(filter.size(), Some("l"));
        assert_eq!(filter.min_doors(), Some(3));
    }
}
