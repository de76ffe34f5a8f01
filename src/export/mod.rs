//! Export pipeline for serializing page sets into downloadable artifacts
//!
//! This module handles:
//! - Rendering a page set in one of four formats
//! - Deriving the artifact filename from a prefix and the export date
//! - Emitting exactly one artifact, all-or-nothing

mod csv;
mod html;
mod json;
mod markdown;

use crate::store::StoredPage;
use chrono::{NaiveDate, Utc};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during export operations
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to serialize pages: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;

/// Output formats supported by the export pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Structured data: a JSON array of page objects
    Json,

    /// Tabular data: one CSV row per page
    Csv,

    /// Document: one Markdown section per page
    Markdown,

    /// Markup: one HTML document embedding the raw page contents
    Html,
}

impl ExportFormat {
    /// File extension for artifacts in this format
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Markdown => "md",
            Self::Html => "html",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "markdown" | "md" => Ok(Self::Markdown),
            "html" => Ok(Self::Html),
            other => Err(format!(
                "unknown export format '{}' (expected json, csv, markdown, or html)",
                other
            )),
        }
    }
}

/// Builds the artifact filename: `{prefix}-{date}.{extension}`
pub fn artifact_filename(prefix: &str, format: ExportFormat, date: NaiveDate) -> String {
    format!("{}-{}.{}", prefix, date.format("%Y-%m-%d"), format.extension())
}

/// Renders a page set in the given format without touching the filesystem
pub fn render(pages: &[StoredPage], format: ExportFormat, prefix: &str) -> ExportResult<String> {
    match format {
        ExportFormat::Json => json::render(pages),
        ExportFormat::Csv => Ok(csv::render(pages)),
        ExportFormat::Markdown => Ok(markdown::render(pages)),
        ExportFormat::Html => Ok(html::render(pages, prefix)),
    }
}

/// Serializes `pages` and emits one artifact under `out_dir`
///
/// The artifact is written to a temporary sibling and renamed into place,
/// so a failed export never leaves a valid-looking partial file. The
/// caller supplies the already-loaded page set; this function performs no
/// store access.
///
/// # Returns
///
/// * `Ok(PathBuf)` - Path of the emitted artifact
/// * `Err(ExportError)` - Serialization or emission failed
pub fn export_pages(
    pages: &[StoredPage],
    format: ExportFormat,
    prefix: &str,
    out_dir: &Path,
) -> ExportResult<PathBuf> {
    let body = render(pages, format, prefix)?;

    let filename = artifact_filename(prefix, format, Utc::now().date_naive());
    let target = out_dir.join(&filename);
    let staging = out_dir.join(format!(".{}.tmp", filename));

    std::fs::create_dir_all(out_dir)?;

    if let Err(e) = std::fs::write(&staging, body.as_bytes()) {
        let _ = std::fs::remove_file(&staging);
        return Err(e.into());
    }

    if let Err(e) = std::fs::rename(&staging, &target) {
        let _ = std::fs::remove_file(&staging);
        return Err(e.into());
    }

    Ok(target)
}
