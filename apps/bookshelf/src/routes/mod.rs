use actix_web::web;

pub mod books;
pub mod health;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(books::configure_routes)
        .configure(health::configure_routes);
}
