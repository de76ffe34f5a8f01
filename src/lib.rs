//! Webstash: a local knowledge base for crawled pages
//!
//! This crate persists crawled pages keyed by domain, maintains per-domain
//! aggregates, answers free-text queries over the stored corpus, and
//! serializes page sets into several export formats.

pub mod config;
pub mod export;
pub mod humanize;
pub mod ingest;
pub mod search;
pub mod store;

use thiserror::Error;

/// Main error type for webstash operations
#[derive(Debug, Error)]
pub enum WebstashError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Store error: {0}")]
    Store(#[from] store::StoreError),

    #[error("Export error: {0}")]
    Export(#[from] export::ExportError),

    #[error("Invalid crawl record for {url}: {message}")]
    InvalidRecord { url: String, message: String },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for webstash operations
pub type Result<T> = std::result::Result<T, WebstashError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use export::{export_pages, ExportFormat};
pub use search::{search, SearchResult};
pub use store::{DomainInfo, PageStore, SqliteStore, StoredPage};
