use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Trip {
    pub id: i64,
    pub car_id: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub distance: f64,
}

/// Accepted body for recording a trip. The owning car comes from the path;
/// a `car_id` in the body is ignored.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
#[validate(schema(function = "validate_trip_window"))]
pub struct TripInput {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Kilometres driven.
    #[validate(range(min = 0.0, message = "distance must not be negative"))]
    pub distance: f64,
}

fn validate_trip_window(trip: &TripInput) -> Result<(), ValidationError> {
    if trip.end_time < trip.start_time {
        let mut err = ValidationError::new("trip_window");
        err.message = Some("end_time must not precede start_time".into());
        return Err(err);
    }
    Ok(())
}
