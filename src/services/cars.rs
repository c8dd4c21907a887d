use sqlx::{Connection, QueryBuilder, Sqlite, SqliteConnection};
use tracing::{debug, info};

use crate::{
    error::AppError,
    models::car::{Car, CarFilter, CarInput, CarOutput},
    services::trips::trips_for_car,
};

const CAR_COLUMNS: &str = "id, size, fuel, doors, transmission";

pub async fn list_cars(
    conn: &mut SqliteConnection,
    filter: &CarFilter,
) -> Result<Vec<Car>, AppError> {
    let mut query =
        QueryBuilder::<Sqlite>::new(format!("SELECT {CAR_COLUMNS} FROM car WHERE 1 = 1"));
    if let Some(size) = filter.size() {
        query.push(" AND size = ").push_bind(size);
    }
    if let Some(min_doors) = filter.min_doors() {
        query.push(" AND doors >= ").push_bind(min_doors);
    }
    debug!(sql = query.sql(), "listing cars");

    let cars = query.build_query_as::<Car>().fetch_all(&mut *conn).await?;
    Ok(cars)
}

pub async fn find_car(conn: &mut SqliteConnection, id: i64) -> Result<Option<Car>, AppError> {
    let car = sqlx::query_as::<_, Car>(&format!("SELECT {CAR_COLUMNS} FROM car WHERE id = ?1"))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(car)
}

pub async fn get_car(conn: &mut SqliteConnection, id: i64) -> Result<Car, AppError> {
    find_car(conn, id).await?.ok_or(AppError::CarNotFound(id))
}

/// Loads a car together with its trips.
pub async fn get_car_with_trips(
    conn: &mut SqliteConnection,
    id: i64,
) -> Result<CarOutput, AppError> {
    let car = get_car(conn, id).await?;
    let trips = trips_for_car(conn, id).await?;
    Ok(CarOutput::new(car, trips))
}

pub async fn create_car(conn: &mut SqliteConnection, input: &CarInput) -> Result<Car, AppError> {
    let car = sqlx::query_as::<_, Car>(&format!(
        "INSERT INTO car (size, fuel, doors, transmission) VALUES (?1, ?2, ?3, ?4) \
         RETURNING {CAR_COLUMNS}"
    ))
    .bind(&input.size)
    .bind(&input.fuel)
    .bind(input.doors)
    .bind(&input.transmission)
    .fetch_one(&mut *conn)
    .await?;
    info!(car_id = car.id, "car created");
    Ok(car)
}

/// Replaces every attribute of an existing car with the given input.
pub async fn update_car(
    conn: &mut SqliteConnection,
    id: i64,
    input: &CarInput,
) -> Result<Car, AppError> {
    let car = sqlx::query_as::<_, Car>(&format!(
        "UPDATE car SET fuel = ?1, transmission = ?2, size = ?3, doors = ?4 WHERE id = ?5 \
         RETURNING {CAR_COLUMNS}"
    ))
    .bind(&input.fuel)
    .bind(&input.transmission)
    .bind(&input.size)
    .bind(input.doors)
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?
    .ok_or(AppError::CarNotFound(id))?;
    info!(car_id = id, "car updated");
    Ok(car)
}

/// Deletes a car and, in the same transaction, every trip recorded against it.
pub async fn delete_car(conn: &mut SqliteConnection, id: i64) -> Result<Car, AppError> {
    let mut tx = conn.begin().await?;

    let Some(car) = find_car(&mut tx, id).await? else {
        return Err(AppError::CarNotFound(id));
    };
    let trips = sqlx::query("DELETE FROM trip WHERE car_id = ?1")
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();
    sqlx::query("DELETE FROM car WHERE id = ?1")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    info!(car_id = id, trips, "car deleted");
    Ok(car)
}
