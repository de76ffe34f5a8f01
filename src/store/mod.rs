//! Storage module for the crawled-page knowledge base
//!
//! This module handles all database operations for the knowledge base:
//! - SQLite database initialization and schema management
//! - Page persistence keyed by (domain, url)
//! - Per-domain aggregate maintenance

mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqliteStore;
pub use traits::{PageStore, StoreError, StoreResult};

use chrono::{DateTime, Utc};
use std::path::Path;

/// Initializes or opens a knowledge-base database
///
/// # Arguments
///
/// * `path` - Path to the SQLite database file
///
/// # Returns
///
/// * `Ok(SqliteStore)` - Successfully initialized store
/// * `Err(StoreError)` - The persistence substrate is unavailable
pub fn open_store(path: &Path) -> StoreResult<SqliteStore> {
    SqliteStore::new(path)
}

/// One crawled resource as persisted in the knowledge base
///
/// Pages are keyed by `(domain, url)`; writing an existing key replaces the
/// content, status, size, and timestamp in place.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredPage {
    /// Absolute resource identifier
    pub url: String,

    /// Lowercased host extracted from `url`; the partitioning key
    pub domain: String,

    /// Raw textual payload (HTML or Markdown)
    pub content: String,

    /// Fetch outcome label reported by the crawl client; informational only
    pub status: String,

    /// Byte length of `content` at write time
    pub content_size: u64,

    /// Creation/last-write instant
    pub stored_at: DateTime<Utc>,
}

impl StoredPage {
    /// Creates a page stamped at the current instant, with `content_size`
    /// computed from the payload
    pub fn new(url: String, domain: String, content: String, status: String) -> Self {
        let content_size = content.len() as u64;
        Self {
            url,
            domain,
            content,
            status,
            content_size,
            stored_at: Utc::now(),
        }
    }
}

/// Aggregate view over one domain's pages
///
/// Derived data: `page_count` and `total_size` always equal a live
/// aggregation over the domain's current pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainInfo {
    pub domain: String,
    pub page_count: u64,
    pub total_size: u64,
}
