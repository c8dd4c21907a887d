use async_trait::async_trait;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        FromRequest, FromRequestParts, Path, Query, Request,
    },
    http::{request::Parts, StatusCode},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::AppError;

/// Extracts the request body exactly like `axum::Json<T>`, then runs `T`'s
/// validation rules. The handler only ever sees a checked value.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| AppError::InvalidBody {
                status: rejection.status(),
                message: rejection.body_text(),
            })?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

/// `axum::extract::Query` whose rejections answer with a 422 JSON error.
#[derive(Debug, Clone)]
pub struct QueryParams<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection: QueryRejection| AppError::InvalidBody {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                message: rejection.body_text(),
            })?;
        Ok(QueryParams(value))
    }
}

/// `axum::extract::Path` whose rejections answer with a JSON error; a
/// segment that does not parse is a 422.
#[derive(Debug, Clone, Copy)]
pub struct PathParams<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for PathParams<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection: PathRejection| {
                let status = match rejection {
                    PathRejection::FailedToDeserializePathParams(_) => {
                        StatusCode::UNPROCESSABLE_ENTITY
                    }
                    _ => rejection.status(),
                };
                AppError::InvalidBody {
                    status,
                    message: rejection.body_text(),
                }
            })?;
        Ok(PathParams(value))
    }
}
