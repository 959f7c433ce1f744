use actix_web::{web, App, HttpServer};
use bookshelf::config::AppConfig;
use bookshelf::middleware::{RequestTrace, SecurityHeaders, StructuredLogger, TraceSpan};
use bookshelf::routes;
use bookshelf::state::AppState;
use bookshelf::telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment:
    // BOOKSHELF_HOST, BOOKSHELF_PORT and the BOOKS_DB_* connection settings
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    let AppConfig { server, db } = config;
    tracing::info!(db = ?db, "configuration loaded");
    println!("🚀 Starting Bookshelf on http://{}:{}", server.host, server.port);

    let data = web::Data::new(AppState::new(db));

    HttpServer::new(move || {
        App::new()
            .wrap(SecurityHeaders)
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((server.host.as_str(), server.port))?
    .run()
    .await
}
