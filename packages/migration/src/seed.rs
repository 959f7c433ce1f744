//! Book rows for local development and tests.
//!
//! The served page never writes; these helpers exist for operators filling a
//! fresh database and for test fixtures.

use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{ConnectionTrait, DatabaseConnection};

use crate::m20261017_000001_create_books::Books;

/// A row to insert into `books`
#[derive(Debug, Clone, PartialEq)]
pub struct NewBook {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub description: String,
    pub sales_rank: i32,
}

impl NewBook {
    pub fn new(
        id: i64,
        title: impl Into<String>,
        author: impl Into<String>,
        description: impl Into<String>,
        sales_rank: i32,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            description: description.into(),
            sales_rank,
        }
    }
}

/// Insert rows in a single statement. An empty slice is a no-op.
pub async fn insert_books<C>(db: &C, books: &[NewBook]) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    if books.is_empty() {
        return Ok(());
    }

    let mut stmt = Query::insert();
    stmt.into_table(Books::Table).columns([
        Books::Id,
        Books::Title,
        Books::Author,
        Books::Description,
        Books::SalesRank,
    ]);

    for book in books {
        stmt.values([
            book.id.into(),
            book.title.clone().into(),
            book.author.clone().into(),
            book.description.clone().into(),
            book.sales_rank.into(),
        ])
        .map_err(|e| DbErr::Custom(format!("invalid book row {}: {e}", book.id)))?;
    }

    let backend = db.get_database_backend();
    db.execute(backend.build(&stmt)).await?;
    Ok(())
}

pub async fn count_books<C>(db: &C) -> Result<i64, DbErr>
where
    C: ConnectionTrait,
{
    let stmt = Query::select()
        .expr_as(Func::count(Expr::col(Books::Id)), Alias::new("n"))
        .from(Books::Table)
        .to_owned();

    let backend = db.get_database_backend();
    match db.query_one(backend.build(&stmt)).await? {
        Some(row) => row.try_get("", "n"),
        None => Ok(0),
    }
}

/// Fill an empty `books` table with the demo catalogue.
/// Returns the number of rows inserted (0 when the table already had data).
pub async fn seed_demo_books(db: &DatabaseConnection) -> Result<usize, DbErr> {
    let existing = count_books(db).await?;
    if existing > 0 {
        tracing::info!("▶ seed skipped: books already holds {existing} row(s)");
        return Ok(0);
    }

    let books = demo_books();
    insert_books(db, &books).await?;
    tracing::info!("✅ seeded {} book(s)", books.len());
    Ok(books.len())
}

/// Twelve titles so the page's cap of ten is visible out of the box.
pub fn demo_books() -> Vec<NewBook> {
    vec![
        NewBook::new(1, "Atomic Habits", "James Clear", "Small changes, remarkable results: a practical system for building good habits & breaking bad ones.", 1),
        NewBook::new(2, "Deep Work", "Cal Newport", "Rules for focused success in a distracted world.", 2),
        NewBook::new(3, "Getting Things Done", "David Allen", "The art of stress-free productivity through capturing, clarifying and organizing every commitment.", 3),
        NewBook::new(4, "The 7 Habits of Highly Effective People", "Stephen R. Covey", "Principle-centered lessons on personal and interpersonal effectiveness.", 4),
        NewBook::new(5, "Essentialism", "Greg McKeown", "The disciplined pursuit of less.", 5),
        NewBook::new(6, "Eat That Frog!", "Brian Tracy", "Stop procrastinating and get more of the important things done in less time.", 6),
        NewBook::new(7, "The ONE Thing", "Gary Keller & Jay Papasan", "The surprisingly simple truth behind extraordinary results.", 7),
        NewBook::new(8, "Four Thousand Weeks", "Oliver Burkeman", "Time management for mortals.", 8),
        NewBook::new(9, "Indistractable", "Nir Eyal", "How to control your attention and choose your life.", 9),
        NewBook::new(10, "Make Time", "Jake Knapp & John Zeratsky", "How to focus on what matters every day.", 10),
        NewBook::new(11, "The Power of Habit", "Charles Duhigg", "Why we do what we do in life and business.", 11),
        NewBook::new(12, "The Effective Executive", "Peter F. Drucker", "The definitive guide to getting the right things done.", 12),
    ]
}
