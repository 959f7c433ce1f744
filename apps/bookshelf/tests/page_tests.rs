// End-to-end tests for GET /
//
// Each test builds the app with the production middleware and routes,
// backed by a temp-file SQLite database (or a deliberately unreachable one).

mod common;
mod support;

use std::time::Duration;

use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::books_db::numbered_books;
use backend_test_support::page_assertions::{
    assert_titles_in_order, book_block_count, rendered_titles, status_block_count,
};
use backend_test_support::{NewBook, TempBooksDb};
use bookshelf::error::CONNECTION_FAILED_MESSAGE;
use bookshelf::{PageOutcome, PagePhase, NO_BOOKS_MESSAGE, PLACEHOLDER_MESSAGE};
use db_infra::{DbKind, DbSettings};

use crate::support::app_builder::{create_test_app, get_from};
use crate::support::get;

fn unreachable_sqlite() -> DbSettings {
    let path = std::env::temp_dir()
        .join("bookshelf-missing-dir")
        .join("nowhere")
        .join("books.db");
    DbSettings::sqlite_file(path.to_string_lossy().to_string())
        .with_connect_timeout(Duration::from_secs(1))
}

#[actix_web::test]
async fn test_two_books_render_in_query_order_escaped() {
    let db = TempBooksDb::with_books(&[
        NewBook::new(1, "Deep Work", "Cal Newport", "Focus.", 1),
        NewBook::new(2, "Atomic Habits", "James Clear", "Habits & <tips>", 2),
    ])
    .await
    .unwrap();

    let resp = get(db.settings(), "/").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.content_type(), "text/html; charset=utf-8");
    assert_titles_in_order(&resp.body, &["Deep Work", "Atomic Habits"]);
    assert_eq!(status_block_count(&resp.body), 0);
    assert!(resp.body.contains("Habits &amp; &lt;tips&gt;"));
    assert!(!resp.body.contains("<tips>"));
}

#[actix_web::test]
async fn test_empty_table_renders_one_status_block() {
    let db = TempBooksDb::new().await.unwrap();

    let resp = get(db.settings(), "/").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(book_block_count(&resp.body), 0);
    assert_eq!(status_block_count(&resp.body), 1);
    assert!(resp.body.contains(NO_BOOKS_MESSAGE));
    assert!(!resp.body.contains(PLACEHOLDER_MESSAGE));
}

#[actix_web::test]
async fn test_failed_query_looks_like_empty_table_to_the_user() {
    let empty = TempBooksDb::new().await.unwrap();
    let broken = TempBooksDb::without_schema().await.unwrap();

    let empty_resp = get(empty.settings(), "/").await;
    let broken_resp = get(broken.settings(), "/").await;

    assert_eq!(broken_resp.status, StatusCode::OK);
    assert_eq!(book_block_count(&broken_resp.body), 0);
    assert_eq!(status_block_count(&broken_resp.body), 1);
    assert_eq!(empty_resp.body, broken_resp.body);
    assert!(!broken_resp.body.contains("no such table"));
}

#[actix_web::test]
async fn test_more_than_ten_books_caps_at_lowest_ranks() {
    // Ranks descend as ids rise: the ten best are ids 13 down to 4
    let db = TempBooksDb::with_books(&numbered_books(13, |id| 50 - id as i32))
        .await
        .unwrap();

    let resp = get(db.settings(), "/").await;

    let expected: Vec<String> = (4..=13).rev().map(|id| format!("Book {id}")).collect();
    assert_eq!(book_block_count(&resp.body), 10);
    assert_eq!(rendered_titles(&resp.body), expected);
}

#[actix_web::test]
async fn test_equal_ranks_fall_back_to_id() {
    let db = TempBooksDb::with_books(&[
        NewBook::new(30, "Rank 2, id 30", "A", "d", 2),
        NewBook::new(10, "Rank 2, id 10", "A", "d", 2),
        NewBook::new(20, "Rank 1, id 20", "A", "d", 1),
        NewBook::new(5, "Rank 3, id 5", "A", "d", 3),
    ])
    .await
    .unwrap();

    let resp = get(db.settings(), "/").await;

    assert_titles_in_order(
        &resp.body,
        &["Rank 1, id 20", "Rank 2, id 10", "Rank 2, id 30", "Rank 3, id 5"],
    );
}

#[actix_web::test]
async fn test_each_request_reads_fresh_data() {
    let db = TempBooksDb::with_books(&[NewBook::new(1, "Deep Work", "Cal Newport", "Focus.", 5)])
        .await
        .unwrap();
    let app = create_test_app(db.settings().clone()).await;

    let first = get_from(&app, "/").await;
    assert_titles_in_order(&first.body, &["Deep Work"]);

    db.insert(&[NewBook::new(2, "Essentialism", "Greg McKeown", "Less, but better.", 1)])
        .await
        .unwrap();

    let second = get_from(&app, "/").await;
    assert_titles_in_order(&second.body, &["Essentialism", "Deep Work"]);
}

#[actix_web::test]
async fn test_unreachable_database_serves_only_generic_text() {
    let settings = unreachable_sqlite();

    let resp = get(&settings, "/").await;

    assert_eq!(resp.status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(resp.content_type().starts_with("text/plain"));
    assert_eq!(resp.body, CONNECTION_FAILED_MESSAGE);
    assert_eq!(book_block_count(&resp.body), 0);
    assert!(!resp.body.contains("bookshelf-missing-dir"));
    assert!(resp.headers.contains_key("x-request-id"));
}

#[actix_web::test]
async fn test_connection_failure_never_leaks_credentials() {
    let settings = DbSettings::new(
        DbKind::Postgres,
        "127.0.0.1",
        "webapp_user",
        "hunter2",
        "productivity_db",
    )
    .with_port(1)
    .with_connect_timeout(Duration::from_secs(1));

    let resp = get(&settings, "/").await;

    assert_eq!(resp.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(resp.body, CONNECTION_FAILED_MESSAGE);
    for secret in ["hunter2", "webapp_user", "127.0.0.1", "productivity_db", "postgres"] {
        assert!(!resp.body.contains(secret), "body leaked {secret}");
    }
}

#[actix_web::test]
async fn test_book_text_is_never_interpreted_as_markup() {
    let payload = r#"<img src=x onerror="alert('pwned')">"#;
    let db = TempBooksDb::with_books(&[NewBook::new(1, payload, payload, payload, 1)])
        .await
        .unwrap();

    let resp = get(db.settings(), "/").await;

    assert_eq!(book_block_count(&resp.body), 1);
    assert!(!resp.body.contains("<img"));
    assert!(resp.body.contains("&lt;img src=x onerror="));
}

#[actix_web::test]
async fn test_response_carries_page_outcome() {
    let db = TempBooksDb::with_books(&numbered_books(3, |id| id as i32))
        .await
        .unwrap();
    let app = create_test_app(db.settings().clone()).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    let outcome = resp.response().extensions().get::<PageOutcome>().copied();
    assert_eq!(
        outcome,
        Some(PageOutcome {
            phase: PagePhase::Rendering,
            books: 3
        })
    );

    let app = create_test_app(unreachable_sqlite()).await;
    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let outcome = resp.response().extensions().get::<PageOutcome>().copied();
    assert_eq!(outcome.map(|o| o.phase), Some(PagePhase::Failed));
}
