mod common;
mod support;

use std::time::Duration;

use actix_web::http::StatusCode;
use db_infra::DbSettings;

use crate::support::get;

#[actix_web::test]
async fn test_health_ok_without_database() {
    let missing = std::env::temp_dir()
        .join("bookshelf-health-missing")
        .join("books.db");
    let settings = DbSettings::sqlite_file(missing.to_string_lossy().to_string())
        .with_connect_timeout(Duration::from_secs(1));

    let resp = get(&settings, "/health").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body, "ok");
    assert!(resp.headers.contains_key("x-request-id"));
}

#[actix_web::test]
async fn test_unknown_path_is_not_found() {
    let settings = DbSettings::sqlite_file("unused.db");

    let resp = get(&settings, "/books.php").await;

    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}
