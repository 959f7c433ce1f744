use crate::error::AppError;

/// HTTP bind address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    /// Reads `BOOKSHELF_HOST` and `BOOKSHELF_PORT`, both optional
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = lookup("BOOKSHELF_HOST")
            .filter(|h| !h.trim().is_empty())
            .unwrap_or(defaults.host);

        let port = match lookup("BOOKSHELF_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| {
                AppError::config(format!("BOOKSHELF_PORT must be a valid port number, got '{raw}'"))
            })?,
            None => defaults.port,
        };

        Ok(Self { host, port })
    }
}
