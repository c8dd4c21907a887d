use std::{
    ops::{Deref, DerefMut},
    str::FromStr,
};

use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Sqlite, SqliteConnection, SqlitePool};
use tracing::debug;

use crate::{error::AppError, state::AppState};

pub type DbPool = SqlitePool;

pub async fn init_pool(database_url: &str, max_connections: u32) -> Result<DbPool, AppError> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;
    Ok(pool)
}

/// Creates the `car` and `trip` tables when they are missing. Safe to run on
/// every startup.
pub async fn init_schema(pool: &DbPool) -> Result<(), AppError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// A pooled connection owned by a single request.
///
/// Extracting it acquires a connection from the pool; dropping it (when the
/// handler returns, on success or failure) hands the connection back.
pub struct DbSession(PoolConnection<Sqlite>);

impl DbSession {
    pub async fn acquire(pool: &DbPool) -> Result<Self, AppError> {
        let conn = pool.acquire().await?;
        debug!("session acquired");
        Ok(Self(conn))
    }
}

impl Deref for DbSession {
    type Target = SqliteConnection;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for DbSession {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

#[async_trait]
impl FromRequestParts<AppState> for DbSession {
    type Rejection = AppError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        DbSession::acquire(&state.db).await
    }
}
