use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("No car with id={0}.")]
    CarNotFound(i64),
    #[error("{0}")]
    Validation(#[from] ValidationErrors),
    #[error("{message}")]
    InvalidBody { status: StatusCode, message: String },
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Config(_)
            | AppError::Io(_)
            | AppError::Database(_)
            | AppError::Migration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::CarNotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::InvalidBody { status, .. } => *status,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = if status.is_server_error() {
            error!("request failed: {self:?}");
            "internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
