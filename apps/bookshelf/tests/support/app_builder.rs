use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::header::HeaderMap;
use actix_web::http::StatusCode;
use actix_web::{test, web, App, Error};
use bookshelf::middleware::{RequestTrace, SecurityHeaders, StructuredLogger, TraceSpan};
use bookshelf::routes;
use bookshelf::state::AppState;
use db_infra::DbSettings;

/// Build the service the way `main.rs` does: same middleware, same routes.
pub async fn create_test_app(
    settings: DbSettings,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = Error> {
    let data = web::Data::new(AppState::new(settings));

    test::init_service(
        App::new()
            .wrap(SecurityHeaders)
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data)
            .configure(routes::configure),
    )
    .await
}

/// What a test usually wants from one response
pub struct PageResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl PageResponse {
    pub fn content_type(&self) -> &str {
        self.headers
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }
}

/// Issue a single GET against a fresh app backed by `settings`
pub async fn get(settings: &DbSettings, uri: &str) -> PageResponse {
    let app = create_test_app(settings.clone()).await;
    get_from(&app, uri).await
}

pub async fn get_from<S>(app: &S, uri: &str) -> PageResponse
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let req = test::TestRequest::get().uri(uri).to_request();
    let resp = test::call_service(app, req).await;

    let status = resp.status();
    let headers = resp.headers().clone();
    let body = test::read_body(resp).await;

    PageResponse {
        status,
        headers,
        body: String::from_utf8(body.to_vec()).expect("response body should be UTF-8"),
    }
}
