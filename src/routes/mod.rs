pub mod cars;
pub mod trips;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(cars::router())
        .merge(trips::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
