use std::{env, net::SocketAddr};

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub listen_addr: SocketAddr,
    pub max_connections: u32,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://carsharing.db".to_string());
        let listen_addr: SocketAddr = env::var("APP_LISTEN_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8000".to_string())
            .parse()
            .map_err(|err| AppError::Config(format!("invalid APP_LISTEN_ADDR: {err}")))?;

        let max_connections = match env::var("DATABASE_MAX_CONNECTIONS") {
            Ok(raw) => parse_max_connections(&raw)?,
            Err(_) => 10,
        };

        Ok(Self {
            database_url,
            listen_addr,
            max_connections,
        })
    }
}

fn parse_max_connections(raw: &str) -> Result<u32, AppError> {
    match raw.trim().parse::<u32>() {
        Ok(0) => Err(AppError::Config(
            "DATABASE_MAX_CONNECTIONS must be at least 1".into(),
        )),
        Ok(value) => Ok(value),
        Err(err) => Err(AppError::Config(format!(
            "invalid DATABASE_MAX_CONNECTIONS: {err}"
        ))),
    }
}
