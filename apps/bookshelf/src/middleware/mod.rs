//! Request middleware, wired in `main.rs` outermost-first as
//! `RequestTrace` → `TraceSpan` → `StructuredLogger` → `SecurityHeaders`.

pub mod request_trace;
pub mod security_headers;
pub mod structured_logger;
pub mod trace_span;

pub use request_trace::RequestTrace;
pub use security_headers::SecurityHeaders;
pub use structured_logger::StructuredLogger;
pub use trace_span::TraceSpan;
