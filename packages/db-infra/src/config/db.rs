use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::error::DbInfraError;

/// Characters left as-is when embedding credentials in a connection URL.
const CREDENTIAL_SET: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Database engine backing the `books` table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbKind {
    MySql,
    Postgres,
    /// `name` is a file path
    Sqlite,
}

impl DbKind {
    pub fn default_port(self) -> Option<u16> {
        match self {
            DbKind::MySql => Some(3306),
            DbKind::Postgres => Some(5432),
            DbKind::Sqlite => None,
        }
    }

    fn scheme(self) -> &'static str {
        match self {
            DbKind::MySql => "mysql",
            DbKind::Postgres => "postgresql",
            DbKind::Sqlite => "sqlite",
        }
    }
}

impl FromStr for DbKind {
    type Err = DbInfraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mysql" | "mariadb" => Ok(DbKind::MySql),
            "postgres" | "postgresql" => Ok(DbKind::Postgres),
            "sqlite" => Ok(DbKind::Sqlite),
            other => Err(DbInfraError::config(format!(
                "Unsupported database kind '{other}' (expected mysql, postgres or sqlite)"
            ))),
        }
    }
}

/// Connection parameters for the books database.
///
/// Built once at startup and handed to whoever needs to open a connection;
/// nothing reads credentials from globals after that.
#[derive(Clone, PartialEq)]
pub struct DbSettings {
    pub kind: DbKind,
    pub host: String,
    pub port: Option<u16>,
    pub user: String,
    pub password: String,
    pub name: String,
    pub connect_timeout: Duration,
}

impl DbSettings {
    pub fn new(
        kind: DbKind,
        host: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            host: host.into(),
            port: kind.default_port(),
            user: user.into(),
            password: password.into(),
            name: name.into(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    /// Settings for a SQLite database stored at `path`
    pub fn sqlite_file(path: impl Into<String>) -> Self {
        Self::new(DbKind::Sqlite, "", "", "", path)
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Load settings from `BOOKS_DB_*` environment variables
    pub fn from_env() -> Result<Self, DbInfraError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load settings through an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DbInfraError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let must_var = |name: &str| {
            var(name).ok_or_else(|| {
                DbInfraError::config(format!("Required environment variable '{name}' is not set"))
            })
        };

        let kind = match var("BOOKS_DB_KIND") {
            Some(raw) => raw.parse::<DbKind>()?,
            None => DbKind::MySql,
        };
        let name = must_var("BOOKS_DB_NAME")?;

        let mut settings = match kind {
            DbKind::Sqlite => Self::sqlite_file(name),
            DbKind::MySql | DbKind::Postgres => {
                let host = var("BOOKS_DB_HOST").unwrap_or_else(|| "localhost".to_string());
                let user = must_var("BOOKS_DB_USER")?;
                let password = must_var("BOOKS_DB_PASSWORD")?;
                Self::new(kind, host, user, password, name)
            }
        };

        if let Some(raw) = var("BOOKS_DB_PORT") {
            let port = raw.trim().parse::<u16>().map_err(|_| {
                DbInfraError::config(format!("BOOKS_DB_PORT must be a valid port number, got '{raw}'"))
            })?;
            settings.port = Some(port);
        }

        if let Some(raw) = var("BOOKS_DB_CONNECT_TIMEOUT_SECS") {
            let secs = raw.trim().parse::<u64>().map_err(|_| {
                DbInfraError::config(format!(
                    "BOOKS_DB_CONNECT_TIMEOUT_SECS must be a whole number of seconds, got '{raw}'"
                ))
            })?;
            settings.connect_timeout = Duration::from_secs(secs);
        }

        Ok(settings)
    }

    /// Connection URL used by the page. A missing SQLite file is a
    /// connection failure rather than a fresh empty database.
    pub fn url(&self) -> String {
        match self.kind {
            DbKind::Sqlite => format!("sqlite://{}", self.name),
            DbKind::MySql | DbKind::Postgres => self.server_url(),
        }
    }

    /// Connection URL for schema management; creates the SQLite file if needed.
    pub fn admin_url(&self) -> String {
        match self.kind {
            DbKind::Sqlite => format!("sqlite://{}?mode=rwc", self.name),
            DbKind::MySql | DbKind::Postgres => self.server_url(),
        }
    }

    fn server_url(&self) -> String {
        let user = utf8_percent_encode(&self.user, CREDENTIAL_SET);
        let password = utf8_percent_encode(&self.password, CREDENTIAL_SET);
        let host = &self.host;
        let db_name = &self.name;
        let scheme = self.kind.scheme();

        match self.port {
            Some(port) => format!("{scheme}://{user}:{password}@{host}:{port}/{db_name}"),
            None => format!("{scheme}://{user}:{password}@{host}/{db_name}"),
        }
    }
}

impl fmt::Debug for DbSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbSettings")
            .field("kind", &self.kind)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"***")
            .field("name", &self.name)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}
