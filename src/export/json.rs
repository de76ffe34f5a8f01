//! Structured (JSON) export
//!
//! Emits an array of page objects with a stable field order. Field layout
//! is a compatibility surface: consumers parse these artifacts back.

use crate::export::ExportResult;
use crate::store::StoredPage;
use serde::Serialize;

/// Wire record for the structured export; the declaration order here is
/// the serialized field order
#[derive(Serialize)]
struct PageRecord<'a> {
    url: &'a str,
    content: &'a str,
    status: &'a str,
    domain: &'a str,
    timestamp: String,
}

/// Renders pages as a pretty-printed JSON array (2-space indentation)
pub fn render(pages: &[StoredPage]) -> ExportResult<String> {
    let records: Vec<PageRecord> = pages
        .iter()
        .map(|page| PageRecord {
            url: &page.url,
            content: &page.content,
            status: &page.status,
            domain: &page.domain,
            timestamp: page.stored_at.to_rfc3339(),
        })
        .collect();

    Ok(serde_json::to_string_pretty(&records)?)
}
