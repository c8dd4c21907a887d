use sqlx::SqliteConnection;
use tracing::info;

use crate::{
    error::AppError,
    models::trip::{Trip, TripInput},
    services::cars::find_car,
};

const TRIP_COLUMNS: &str = "id, car_id, start_time, end_time, distance";

/// All trips recorded against `car_id`, oldest first.
pub async fn trips_for_car(
    conn: &mut SqliteConnection,
    car_id: i64,
) -> Result<Vec<Trip>, AppError> {
    let trips = sqlx::query_as::<_, Trip>(&format!(
        "SELECT {TRIP_COLUMNS} FROM trip WHERE car_id = ?1 ORDER BY id"
    ))
    .bind(car_id)
    .fetch_all(&mut *conn)
    .await?;
    Ok(trips)
}

/// Records a trip for an existing car. The car id always comes from the
/// caller, never from the input.
pub async fn create_trip(
    conn: &mut SqliteConnection,
    car_id: i64,
    input: &TripInput,
) -> Result<Trip, AppError> {
    if find_car(conn, car_id).await?.is_none() {
        return Err(AppError::CarNotFound(car_id));
    }

    let trip = sqlx::query_as::<_, Trip>(&format!(
        "INSERT INTO trip (car_id, start_time, end_time, distance) VALUES (?1, ?2, ?3, ?4) \
         RETURNING {TRIP_COLUMNS}"
    ))
    .bind(car_id)
    .bind(input.start_time)
    .bind(input.end_time)
    .bind(input.distance)
    .fetch_one(&mut *conn)
    .await?;
    info!(car_id, trip_id = trip.id, "trip recorded");
    Ok(trip)
}
