use actix_web::http::header::ContentType;
use actix_web::{web, HttpResponse, ResponseError};

use crate::page::PageRenderer;
use crate::state::AppState;

/// GET / : the top books page, or the bare connection-failure text.
///
/// Either way the response carries the page's [`PageOutcome`](crate::page::PageOutcome)
/// in its extensions for the request log.
async fn book_list(state: web::Data<AppState>) -> HttpResponse {
    let mut page = PageRenderer::new(state.db_settings());

    let mut resp = match page.render_page().await {
        Ok(html) => HttpResponse::Ok()
            .content_type(ContentType::html())
            .body(html),
        Err(e) => e.error_response(),
    };

    resp.extensions_mut().insert(page.outcome());
    resp
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(book_list));
}
