//! Shared database configuration and connection infrastructure.
//! Used by the bookshelf server and the migration CLI.

pub mod config;
pub mod error;
pub mod infra;

pub use config::db;
pub use config::db::{DbKind, DbSettings};
pub use error::DbInfraError;
pub use infra::db::{close, connect, connect_admin, sanitize_db_url};
