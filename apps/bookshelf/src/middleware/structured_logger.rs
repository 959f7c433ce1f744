use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::{Error as ActixError, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::{error, info, warn};

use crate::page::{PageOutcome, PagePhase};

/// One `request_completed` event per request: 5xx at error, 4xx at warn,
/// everything else at info.
///
/// Page requests also report `page.phase` and `page.books` from the
/// [`PageOutcome`] the handler attached. A page that rendered zero books is
/// logged at warn, since that is the only trace of an empty or failed query
/// the user cannot tell apart.
pub struct StructuredLogger;

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Severity {
    Error,
    Warn,
    Info,
}

fn severity(status: StatusCode, page: Option<PageOutcome>) -> Severity {
    if status.is_server_error() {
        Severity::Error
    } else if status.is_client_error() {
        Severity::Warn
    } else if matches!(
        page,
        Some(PageOutcome {
            phase: PagePhase::Rendering,
            books: 0
        })
    ) {
        Severity::Warn
    } else {
        Severity::Info
    }
}

struct Completion {
    method: String,
    path: String,
    trace_id: String,
    status: StatusCode,
    duration_us: u64,
    page: Option<PageOutcome>,
}

impl Completion {
    fn emit(&self) {
        let Completion {
            method,
            path,
            trace_id,
            status,
            duration_us,
            page,
        } = self;
        let status_code = status.as_u16();
        let page_phase = page.map(|p| p.phase.as_str());
        let page_books = page.map(|p| p.books as u64);

        match severity(*status, *page) {
            Severity::Error => {
                error!(http.method=%method, url.path=%path, http.status_code=%status_code, duration_us=%duration_us, trace_id=%trace_id, page.phase=page_phase, page.books=page_books, message="request_completed")
            }
            Severity::Warn => {
                warn!(http.method=%method, url.path=%path, http.status_code=%status_code, duration_us=%duration_us, trace_id=%trace_id, page.phase=page_phase, page.books=page_books, message="request_completed")
            }
            Severity::Info => {
                info!(http.method=%method, url.path=%path, http.status_code=%status_code, duration_us=%duration_us, trace_id=%trace_id, page.phase=page_phase, page.books=page_books, message="request_completed")
            }
        }
    }
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let method = req.method().to_string();
        let path = req.path().to_string();
        let trace_id = req
            .extensions()
            .get::<String>()
            .cloned()
            .unwrap_or_else(|| "unknown".to_string());

        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;

            let (status, page) = match &result {
                Ok(res) => (
                    res.status(),
                    res.response().extensions().get::<PageOutcome>().copied(),
                ),
                Err(err) => (err.as_response_error().status_code(), None),
            };

            Completion {
                method,
                path,
                trace_id,
                status,
                duration_us: start.elapsed().as_micros() as u64,
                page,
            }
            .emit();

            result
        })
    }
}
