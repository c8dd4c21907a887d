use axum::{http::StatusCode, routing::post, Json, Router};

use crate::{
    db::DbSession,
    error::AppError,
    extract::{PathParams, ValidatedJson},
    models::trip::{Trip, TripInput},
    services::trips,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    // Shares the `:id` segment name with the car routes so the paths can coexist.
    Router::new()
        .route("/api/cars/:id/trips", post(create_trip))
        .route("/api/cars/:id/trips/", post(create_trip))
}

async fn create_trip(
    mut session: DbSession,
    PathParams(car_id): PathParams<i64>,
    ValidatedJson(input): ValidatedJson<TripInput>,
) -> Result<(StatusCode, Json<Trip>), AppError> {
    let trip = trips::create_trip(&mut session, car_id, &input).await?;
    Ok((StatusCode::CREATED, Json(trip)))
}
