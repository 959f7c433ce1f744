//! The book list page: connect, query, close, render.
//!
//! Each call to [`PageRenderer::render_page`] owns exactly one database
//! connection, which is closed before any markup is produced. There are no
//! retries at any step.

pub mod render;

use std::fmt;

use db_infra::{close, connect, DbSettings};
use tracing::{debug, warn};

use crate::error::AppError;
use crate::repos::books::fetch_top_books;

use self::render::{render, NO_BOOKS_MESSAGE};

/// Where a page request is in its linear lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagePhase {
    Connecting,
    Querying,
    Rendering,
    /// Terminal: the connection could not be opened
    Failed,
}

impl PagePhase {
    pub fn as_str(self) -> &'static str {
        match self {
            PagePhase::Connecting => "connecting",
            PagePhase::Querying => "querying",
            PagePhase::Rendering => "rendering",
            PagePhase::Failed => "failed",
        }
    }
}

impl fmt::Display for PagePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a page request ended and how many books it listed.
/// Attached to the response so the request log can report it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageOutcome {
    pub phase: PagePhase,
    pub books: usize,
}

pub struct PageRenderer<'a> {
    settings: &'a DbSettings,
    phase: PagePhase,
    books: usize,
}

impl<'a> PageRenderer<'a> {
    pub fn new(settings: &'a DbSettings) -> Self {
        Self {
            settings,
            phase: PagePhase::Connecting,
            books: 0,
        }
    }

    pub fn phase(&self) -> PagePhase {
        self.phase
    }

    pub fn outcome(&self) -> PageOutcome {
        PageOutcome {
            phase: self.phase,
            books: self.books,
        }
    }

    fn advance(&mut self, next: PagePhase) {
        debug!(from = %self.phase, to = %next, "page_phase");
        self.phase = next;
    }

    /// Produce the full HTML document.
    ///
    /// A connection failure is returned as [`AppError::ConnectionFailure`] and
    /// nothing else happens. An empty or failed query still renders a page,
    /// carrying [`NO_BOOKS_MESSAGE`].
    pub async fn render_page(&mut self) -> Result<String, AppError> {
        let conn = match connect(self.settings).await {
            Ok(conn) => conn,
            Err(e) => {
                self.advance(PagePhase::Failed);
                return Err(AppError::from(e));
            }
        };

        self.advance(PagePhase::Querying);
        let books = fetch_top_books(&conn).await;

        // Rows are already in memory; a failed close does not change the page
        if let Err(e) = close(conn).await {
            warn!(error = %e, "db_close=failed");
        }

        self.advance(PagePhase::Rendering);
        self.books = books.len();
        let error_message = books.is_empty().then_some(NO_BOOKS_MESSAGE);
        let html = render(&books, error_message)?;
        Ok(html)
    }
}
