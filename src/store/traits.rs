//! Storage traits and error types
//!
//! This module defines the trait interface for knowledge-base storage
//! backends and associated error types.

use crate::store::{DomainInfo, StoredPage};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// The persistence substrate cannot be reached or initialized.
    /// Read-path callers are expected to degrade gracefully and treat the
    /// knowledge base as empty rather than crash.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for storage operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Trait for knowledge-base storage backends
///
/// This trait defines all database operations needed by the search and
/// export layers. The store is single-writer by construction: there is one
/// CLI-driven caller, so no operation needs internal locking.
pub trait PageStore {
    /// Inserts or replaces a page keyed by `(domain, url)`
    ///
    /// The page write and the owning domain's aggregate update happen in
    /// one transaction, so no reader can observe one without the other.
    fn upsert_page(&mut self, page: &StoredPage) -> StoreResult<()>;

    /// Gets all pages for a domain, in insertion order
    fn pages_for_domain(&self, domain: &str) -> StoreResult<Vec<StoredPage>>;

    /// Gets every stored page across all domains, in insertion order
    ///
    /// This is the corpus-assembly read used by search and export.
    fn all_pages(&self) -> StoreResult<Vec<StoredPage>>;

    /// Removes all pages for a domain and its aggregate row
    ///
    /// No-op if the domain is absent.
    fn clear_domain(&mut self, domain: &str) -> StoreResult<()>;

    /// Removes every page and every aggregate row
    ///
    /// Leaves the store in the same state as freshly initialized.
    fn clear_all(&mut self) -> StoreResult<()>;

    /// Gets the aggregate for every domain with at least one page,
    /// ordered by domain name
    fn saved_domains(&self) -> StoreResult<Vec<DomainInfo>>;

    /// Gets total page count
    fn count_pages(&self) -> StoreResult<u64>;

    /// Gets count of distinct domains with stored pages
    fn count_domains(&self) -> StoreResult<u64>;

    /// Recomputes all domain aggregates from the page set
    ///
    /// Recovery path: aggregates are derived data, so any drift is
    /// repairable from the pages table alone.
    fn rebuild_stats(&mut self) -> StoreResult<()>;
}
