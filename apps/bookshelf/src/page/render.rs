//! Book list markup. Pure: records in, HTML out.
//!
//! Every book field passes through askama's HTML escaper; the template never
//! marks book text `|safe`.

use askama::Template;

use crate::repos::books::Book;

/// Shown when there are no books and no explanation was given
pub const PLACEHOLDER_MESSAGE: &str = "Loading books... (or none found)";

/// Shown when the query returned nothing or failed
pub const NO_BOOKS_MESSAGE: &str = "No books found or could not retrieve data.";

#[derive(Template)]
#[template(path = "book_list.html")]
struct BookListPage<'a> {
    books: &'a [Book],
    status_message: &'a str,
}

/// One block per book, or a single status block when `books` is empty.
pub fn render(books: &[Book], error_message: Option<&str>) -> Result<String, askama::Error> {
    BookListPage {
        books,
        status_message: error_message.unwrap_or(PLACEHOLDER_MESSAGE),
    }
    .render()
}

#[cfg(test)]
mod tests {
    use backend_test_support::page_assertions::{
        assert_titles_in_order, book_block_count, count_occurrences, rendered_titles,
        status_block_count,
    };
    use proptest::prelude::*;

    use super::*;

    fn book(id: i64, title: &str, author: &str, description: &str) -> Book {
        Book {
            id,
            title: title.to_string(),
            author: author.to_string(),
            description: description.to_string(),
        }
    }

    fn unescape(s: &str) -> String {
        s.replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#x27;", "'")
            .replace("&#39;", "'")
            .replace("&amp;", "&")
    }

    #[test]
    fn test_two_books_render_in_order_with_escaping() {
        let books = vec![
            book(1, "Deep Work", "Cal Newport", "Focus."),
            book(2, "Atomic Habits", "James Clear", "Habits & <tips>"),
        ];

        let html = render(&books, None).unwrap();

        assert_titles_in_order(&html, &["Deep Work", "Atomic Habits"]);
        assert_eq!(status_block_count(&html), 0);
        assert!(html.contains("Habits &amp; &lt;tips&gt;"));
        assert!(!html.contains("<tips>"));
        assert!(html.contains(r#"<p class="author">By Cal Newport</p>"#));
        assert!(html.contains(r#"<p class="description">Focus.</p>"#));
    }

    #[test]
    fn test_empty_with_message_renders_single_status_block() {
        let html = render(&[], Some(NO_BOOKS_MESSAGE)).unwrap();

        assert_eq!(book_block_count(&html), 0);
        assert_eq!(status_block_count(&html), 1);
        assert!(html.contains(NO_BOOKS_MESSAGE));
        assert!(!html.contains(PLACEHOLDER_MESSAGE));
    }

    #[test]
    fn test_empty_without_message_renders_placeholder() {
        let html = render(&[], None).unwrap();

        assert_eq!(book_block_count(&html), 0);
        assert_eq!(status_block_count(&html), 1);
        assert!(html.contains(PLACEHOLDER_MESSAGE));
    }

    #[test]
    fn test_message_ignored_when_books_present() {
        let html = render(&[book(1, "Deep Work", "Cal Newport", "Focus.")], Some(NO_BOOKS_MESSAGE))
            .unwrap();

        assert_eq!(status_block_count(&html), 0);
        assert!(!html.contains(NO_BOOKS_MESSAGE));
    }

    #[test]
    fn test_script_injection_is_neutralised_in_every_field() {
        let payload = r#"<script>alert("x")</script>"#;
        let html = render(&[book(1, payload, payload, payload)], None).unwrap();

        assert!(!html.contains("<script>"));
        assert!(!html.contains("</script>"));
        assert_eq!(count_occurrences(&html, "&lt;script&gt;"), 3);
    }

    #[test]
    fn test_page_chrome_is_present() {
        let html = render(&[], None).unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Top Productivity Books (from DB)</title>"));
        assert!(html.contains(r#"<link rel="stylesheet" href="style.css">"#));
        assert!(html.contains("<h1>Top Selling Productivity Books</h1>"));
        assert!(html.contains(r#"<div id="book-list-container">"#));
    }

    proptest! {
        #[test]
        fn prop_block_count_matches_input(n in 1usize..=10) {
            let books: Vec<Book> = (1..=n as i64)
                .map(|id| book(id, &format!("Title {id}"), "Author", "Description"))
                .collect();

            let html = render(&books, None).unwrap();

            prop_assert_eq!(book_block_count(&html), n);
            prop_assert_eq!(status_block_count(&html), 0);
            let expected: Vec<String> = books.iter().map(|b| b.title.clone()).collect();
            prop_assert_eq!(rendered_titles(&html), expected);
        }

        #[test]
        fn prop_fields_never_appear_unescaped(title in r#"[<>&"' a-z]{1,24}"#) {
            let html = render(&[book(1, &title, "Author", "Description")], None).unwrap();

            let rendered = rendered_titles(&html);
            prop_assert_eq!(rendered.len(), 1);
            prop_assert!(!rendered[0].contains('<'));
            prop_assert!(!rendered[0].contains('>'));
            prop_assert!(!rendered[0].contains('"'));
            prop_assert_eq!(unescape(&rendered[0]), title);
        }
    }
}
