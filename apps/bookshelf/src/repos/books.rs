//! Book repository functions (generic over ConnectionTrait).

use sea_orm::{ConnectionTrait, DbErr};
use tracing::{error, info};

use crate::adapters::books_sea::{self as books_adapter, BookRow};

/// Most books the page ever lists
pub const TOP_BOOKS_LIMIT: u64 = 10;

/// Book domain model: what the page displays.
/// `sales_rank` only orders the query and is not carried here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub description: String,
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            author: row.author,
            description: row.description,
        }
    }
}

/// Up to [`TOP_BOOKS_LIMIT`] books by ascending `(sales_rank, id)`.
///
/// Keeps "the query failed" (`Err`) apart from "there are no books" (`Ok(vec![])`).
pub async fn try_fetch_top_books<C: ConnectionTrait>(conn: &C) -> Result<Vec<Book>, DbErr> {
    let rows = books_adapter::find_top_by_sales_rank(conn, TOP_BOOKS_LIMIT).await?;
    Ok(rows.into_iter().map(Book::from).collect())
}

/// Like [`try_fetch_top_books`], but a failed query yields an empty list.
/// The failure is logged for operators; callers cannot tell it from an empty table.
pub async fn fetch_top_books<C: ConnectionTrait>(conn: &C) -> Vec<Book> {
    match try_fetch_top_books(conn).await {
        Ok(books) => {
            if books.is_empty() {
                info!("books_query=empty");
            }
            books
        }
        Err(e) => {
            error!(error = %e, "books_query=failed");
            Vec::new()
        }
    }
}
