//! Inbound seam for crawl results
//!
//! The crawl client is an external collaborator that delivers raw
//! `(url, content, status)` records as a crawl streams. This module turns
//! those records into stored pages: the domain is extracted from the URL,
//! `content_size` is computed as the byte length of the payload, and the
//! write instant becomes the page timestamp.

use crate::store::{PageStore, StoredPage};
use crate::{Result, WebstashError};
use serde::Deserialize;
use std::path::Path;
use url::Url;

/// One raw crawl result as delivered by the crawl client
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlRecord {
    pub url: String,
    pub content: String,
    pub status: String,
}

/// Extracts the domain from a URL
///
/// Returns the lowercased host portion; `None` for URLs without a host.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use webstash::ingest::extract_domain;
///
/// let url = Url::parse("https://Example.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Converts a crawl record into a stored page
///
/// # Returns
///
/// * `Ok(StoredPage)` - Page ready for `upsert_page`, stamped now
/// * `Err(WebstashError)` - The record's URL is unparseable or hostless
pub fn page_from_record(record: CrawlRecord) -> Result<StoredPage> {
    let parsed = Url::parse(&record.url)?;
    let domain = extract_domain(&parsed).ok_or_else(|| WebstashError::InvalidRecord {
        url: record.url.clone(),
        message: "URL has no host".to_string(),
    })?;

    Ok(StoredPage::new(
        record.url,
        domain,
        record.content,
        record.status,
    ))
}

/// Reads a JSON array of crawl records from a file
pub fn load_records(path: &Path) -> Result<Vec<CrawlRecord>> {
    let content = std::fs::read_to_string(path)?;
    let records: Vec<CrawlRecord> = serde_json::from_str(&content)?;
    Ok(records)
}

/// Upserts a batch of crawl records into the store
///
/// Records with unusable URLs are skipped with a warning; storage failures
/// abort the batch.
///
/// # Returns
///
/// The number of pages stored
pub fn import_records<S: PageStore>(store: &mut S, records: Vec<CrawlRecord>) -> Result<u64> {
    let mut stored = 0u64;

    for record in records {
        let url = record.url.clone();
        match page_from_record(record) {
            Ok(page) => {
                tracing::debug!("Storing {} ({} bytes)", page.url, page.content_size);
                store.upsert_page(&page)?;
                stored += 1;
            }
            Err(e) => {
                tracing::warn!("Skipping record for {}: {}", url, e);
            }
        }
    }

    tracing::info!("Imported {} pages", stored);
    Ok(stored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SqliteStore;

    fn record(url: &str, content: &str) -> CrawlRecord {
        CrawlRecord {
            url: url.to_string(),
            content: content.to_string(),
            status: "success".to_string(),
        }
    }

    #[test]
    fn test_extract_domain_lowercases() {
        let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
        assert_eq!(extract_domain(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_extract_subdomain_kept() {
        let url = Url::parse("https://blog.example.com/post").unwrap();
        assert_eq!(extract_domain(&url), Some("blog.example.com".to_string()));
    }

    #[test]
    fn test_page_from_record() {
        let page = page_from_record(record("https://example.com/1", "hello")).unwrap();

        assert_eq!(page.domain, "example.com");
        assert_eq!(page.url, "https://example.com/1");
        assert_eq!(page.content_size, 5);
    }

    #[test]
    fn test_page_from_record_rejects_bad_url() {
        let result = page_from_record(record("not a url", "x"));
        assert!(result.is_err());
    }

    #[test]
    fn test_import_skips_bad_records() {
        let mut store = SqliteStore::new_in_memory().unwrap();

        let stored = import_records(
            &mut store,
            vec![
                record("https://example.com/1", "one"),
                record(":::definitely not a url", "skipped"),
                record("https://example.com/2", "two"),
            ],
        )
        .unwrap();

        assert_eq!(stored, 2);
        assert_eq!(store.count_pages().unwrap(), 2);
    }

    #[test]
    fn test_import_reimport_is_upsert() {
        let mut store = SqliteStore::new_in_memory().unwrap();

        import_records(&mut store, vec![record("https://example.com/1", "v1")]).unwrap();
        import_records(&mut store, vec![record("https://example.com/1", "v2")]).unwrap();

        let pages = store.pages_for_domain("example.com").unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].content, "v2");
    }

    #[test]
    fn test_records_parse_from_json() {
        let json = r#"[
            {"url": "https://example.com/1", "content": "<p>hi</p>", "status": "success"}
        ]"#;

        let records: Vec<CrawlRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].url, "https://example.com/1");
    }
}
