use db_infra::DbSettings;

/// Application state shared with every handler.
///
/// Holds connection settings, not a connection: each page request opens and
/// closes its own.
#[derive(Debug, Clone)]
pub struct AppState {
    db: DbSettings,
}

impl AppState {
    pub fn new(db: DbSettings) -> Self {
        Self { db }
    }

    pub fn db_settings(&self) -> &DbSettings {
        &self.db
    }
}
