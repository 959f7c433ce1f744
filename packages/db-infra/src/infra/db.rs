use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::{debug, warn};

use crate::config::db::DbSettings;
use crate::error::DbInfraError;

/// Open a single-connection handle for one unit of work (one page request).
///
/// Fails fast: there is no retry, and the connect step is bounded by
/// `settings.connect_timeout`.
pub async fn connect(settings: &DbSettings) -> Result<DatabaseConnection, DbInfraError> {
    open(settings, settings.url()).await
}

/// Like [`connect`], but allowed to create a missing SQLite file.
/// Used by schema management, never by the page.
pub async fn connect_admin(settings: &DbSettings) -> Result<DatabaseConnection, DbInfraError> {
    open(settings, settings.admin_url()).await
}

async fn open(settings: &DbSettings, url: String) -> Result<DatabaseConnection, DbInfraError> {
    let safe_url = sanitize_db_url(&url);

    let mut opt = ConnectOptions::new(url);
    opt.min_connections(1)
        .max_connections(1)
        .connect_timeout(settings.connect_timeout)
        .acquire_timeout(settings.connect_timeout)
        .sqlx_logging(false);

    match Database::connect(opt).await {
        Ok(conn) => {
            debug!(url = %safe_url, "db_connect=ok");
            Ok(conn)
        }
        Err(source) => {
            warn!(url = %safe_url, error = %source, "db_connect=failed");
            Err(DbInfraError::Connect {
                url: safe_url,
                source,
            })
        }
    }
}

/// Release a connection obtained from [`connect`] or [`connect_admin`].
pub async fn close(conn: DatabaseConnection) -> Result<(), DbInfraError> {
    conn.close()
        .await
        .map_err(|source| DbInfraError::Close { source })
}

/// Sanitize database URL by masking the password in connection strings.
pub fn sanitize_db_url(url: &str) -> String {
    let Some((auth_part, host_part)) = url.rsplit_once('@') else {
        return url.to_string();
    };
    let Some((scheme, credentials)) = auth_part.split_once("://") else {
        return url.to_string();
    };

    match credentials.split_once(':') {
        Some((user, _password)) => format!("{scheme}://{user}:***@{host_part}"),
        None => url.to_string(),
    }
}
