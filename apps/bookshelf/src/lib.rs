#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod config;
pub mod entities;
pub mod error;
pub mod middleware;
pub mod page;
pub mod repos;
pub mod routes;
pub mod state;
pub mod telemetry;

// Re-exports for public API
pub use config::{AppConfig, ServerConfig};
pub use error::AppError;
pub use middleware::request_trace::RequestTrace;
pub use middleware::security_headers::SecurityHeaders;
pub use middleware::structured_logger::StructuredLogger;
pub use middleware::trace_span::TraceSpan;
pub use page::render::{render, NO_BOOKS_MESSAGE, PLACEHOLDER_MESSAGE};
pub use page::{PageOutcome, PagePhase, PageRenderer};
pub use repos::books::{fetch_top_books, try_fetch_top_books, Book, TOP_BOOKS_LIMIT};
pub use state::app_state::AppState;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}
