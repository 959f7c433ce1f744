//! Backend test support utilities
//!
//! Temp-file SQLite databases carrying the real `books` schema, assertions
//! over rendered pages, and unified logging initialization.

pub mod books_db;
pub mod logging;
pub mod page_assertions;

pub use books_db::TempBooksDb;
pub use migration::NewBook;
