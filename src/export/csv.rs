//! Tabular (CSV) export
//!
//! One header row, one row per page. Content itself is not exported in
//! this format, only its size.

use crate::store::StoredPage;

const HEADER: &str = "url,domain,status,content_size,timestamp";

/// Renders pages as CSV with an RFC 3339 timestamp column
pub fn render(pages: &[StoredPage]) -> String {
    let mut out = String::from(HEADER);
    out.push('\n');

    for page in pages {
        out.push_str(&format!(
            "{},{},{},{},{}\n",
            escape(&page.url),
            escape(&page.domain),
            escape(&page.status),
            page.content_size,
            escape(&page.stored_at.to_rfc3339()),
        ));
    }

    out
}

/// Standard quoting: a field containing a comma, double-quote, or newline
/// is wrapped in double quotes with internal quotes doubled
fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
