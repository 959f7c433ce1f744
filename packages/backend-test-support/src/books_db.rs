//! Disposable SQLite databases for page and repository tests.
//!
//! The page opens and closes its own connection per request, so an in-memory
//! database would vanish between fixture setup and the request. Each
//! `TempBooksDb` is a file inside its own temp directory instead, removed on drop.

use std::error::Error;

use db_infra::{close, connect_admin, DbSettings};
use migration::{insert_books, migrate, MigrationCommand, NewBook};
use sea_orm::ConnectionTrait;
use tempfile::TempDir;

pub type FixtureResult<T> = Result<T, Box<dyn Error + Send + Sync>>;

pub struct TempBooksDb {
    _dir: TempDir,
    settings: DbSettings,
}

impl TempBooksDb {
    /// A database with the `books` schema applied and no rows
    pub async fn new() -> FixtureResult<Self> {
        let db = Self::without_schema().await?;
        let conn = connect_admin(&db.settings).await?;
        migrate(&conn, MigrationCommand::Up).await?;
        close(conn).await?;
        Ok(db)
    }

    /// A database with the schema applied and `books` inserted
    pub async fn with_books(books: &[NewBook]) -> FixtureResult<Self> {
        let db = Self::new().await?;
        db.insert(books).await?;
        Ok(db)
    }

    /// An existing but empty database file: connecting works, querying
    /// `books` fails because the table was never created.
    pub async fn without_schema() -> FixtureResult<Self> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("books.db");
        let settings = DbSettings::sqlite_file(path.to_string_lossy().to_string());

        let conn = connect_admin(&settings).await?;
        close(conn).await?;

        Ok(Self {
            _dir: dir,
            settings,
        })
    }

    /// A database whose `books` table comes from hand-written DDL instead of
    /// the migrator, for schemas the application does not create itself.
    pub async fn with_ddl(ddl: &str) -> FixtureResult<Self> {
        let db = Self::without_schema().await?;
        let conn = connect_admin(&db.settings).await?;
        conn.execute_unprepared(ddl).await?;
        close(conn).await?;
        Ok(db)
    }

    pub async fn insert(&self, books: &[NewBook]) -> FixtureResult<()> {
        let conn = connect_admin(&self.settings).await?;
        insert_books(&conn, books).await?;
        close(conn).await?;
        Ok(())
    }

    pub fn settings(&self) -> &DbSettings {
        &self.settings
    }
}

/// `n` books with ids `1..=n`, each titled `Book {id}` and ranked by `rank(id)`
pub fn numbered_books(n: i64, rank: impl Fn(i64) -> i32) -> Vec<NewBook> {
    (1..=n)
        .map(|id| {
            NewBook::new(
                id,
                format!("Book {id}"),
                format!("Author {id}"),
                format!("Description {id}"),
                rank(id),
            )
        })
        .collect()
}
