//! Assertions over the rendered book list page.
//!
//! These work on the raw HTML text so tests do not depend on the server's
//! template types.

pub const BOOK_BLOCK_MARKER: &str = r#"<div class="book-item">"#;
pub const STATUS_BLOCK_MARKER: &str = r#"<div class="loading">"#;

/// Number of non-overlapping occurrences of `needle` in `haystack`
pub fn count_occurrences(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

pub fn book_block_count(page: &str) -> usize {
    count_occurrences(page, BOOK_BLOCK_MARKER)
}

pub fn status_block_count(page: &str) -> usize {
    count_occurrences(page, STATUS_BLOCK_MARKER)
}

/// Titles in page order, taken from the `<h3>` of each book block
pub fn rendered_titles(page: &str) -> Vec<String> {
    page.split(BOOK_BLOCK_MARKER)
        .skip(1)
        .filter_map(|block| {
            let start = block.find("<h3>")? + "<h3>".len();
            let end = block[start..].find("</h3>")? + start;
            Some(block[start..end].to_string())
        })
        .collect()
}

/// Assert the page lists exactly `expected` titles, in order
pub fn assert_titles_in_order(page: &str, expected: &[&str]) {
    let titles = rendered_titles(page);
    assert_eq!(
        titles, expected,
        "rendered titles should match the expected order"
    );
    assert_eq!(book_block_count(page), expected.len());
}
