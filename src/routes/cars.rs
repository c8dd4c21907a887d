use axum::{http::StatusCode, routing::get, Json, Router};
use tracing::debug;

use crate::{
    db::DbSession,
    error::AppError,
    extract::{PathParams, QueryParams, ValidatedJson},
    models::car::{Car, CarFilter, CarInput, CarOutput},
    services::cars,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/cars", get(list_cars).post(create_car))
        .route("/api/cars/", get(list_cars).post(create_car))
        .route(
            "/api/cars/:id",
            get(get_car).put(update_car).delete(delete_car),
        )
}

async fn list_cars(
    mut session: DbSession,
    QueryParams(filter): QueryParams<CarFilter>,
) -> Result<Json<Vec<Car>>, AppError> {
    let cars = cars::list_cars(&mut session, &filter).await?;
    debug!(count = cars.len(), "cars listed");
    Ok(Json(cars))
}

async fn get_car(
    mut session: DbSession,
    PathParams(id): PathParams<i64>,
) -> Result<Json<CarOutput>, AppError> {
    let car = cars::get_car_with_trips(&mut session, id).await?;
    Ok(Json(car))
}

async fn create_car(
    mut session: DbSession,
    ValidatedJson(input): ValidatedJson<CarInput>,
) -> Result<(StatusCode, Json<Car>), AppError> {
    let car = cars::create_car(&mut session, &input).await?;
    Ok((StatusCode::CREATED, Json(car)))
}

async fn update_car(
    mut session: DbSession,
    PathParams(id): PathParams<i64>,
    ValidatedJson(input): ValidatedJson<CarInput>,
) -> Result<Json<Car>, AppError> {
    let car = cars::update_car(&mut session, id, &input).await?;
    Ok(Json(car))
}

async fn delete_car(
    mut session: DbSession,
    PathParams(id): PathParams<i64>,
) -> Result<Json<Car>, AppError> {
    let car = cars::delete_car(&mut session, id).await?;
    Ok(Json(car))
}
