//! Process configuration, read once at startup and passed down explicitly.

pub mod server;

use std::env;

use db_infra::DbSettings;

pub use server::ServerConfig;

use crate::error::AppError;

/// Everything the server needs to start
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub db: DbSettings,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server = ServerConfig::from_lookup(&lookup)?;
        let db = DbSettings::from_lookup(&lookup)?;
        Ok(Self { server, db })
    }
}
