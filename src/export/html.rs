//! Markup (HTML) export
//!
//! A single document embedding each page's raw content, annotated with its
//! source URL and separated by horizontal rules.

use crate::store::StoredPage;

/// Renders pages as one HTML document titled from the filename prefix
pub fn render(pages: &[StoredPage], prefix: &str) -> String {
    let mut out = String::new();

    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str(&format!("<title>{}</title>\n", escape_text(prefix)));
    out.push_str("</head>\n<body>\n");

    for (i, page) in pages.iter().enumerate() {
        if i > 0 {
            out.push_str("<hr>\n");
        }
        out.push_str(&format!("<!-- source: {} -->\n", page.url));
        out.push_str(&page.content);
        out.push('\n');
    }

    out.push_str("</body>\n</html>\n");
    out
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
