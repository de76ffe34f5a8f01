//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the PageStore trait.

use crate::store::schema::initialize_schema;
use crate::store::traits::{PageStore, StoreError, StoreResult};
use crate::store::{DomainInfo, StoredPage};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

const PAGE_COLUMNS: &str = "url, domain, content, status, content_size, stored_at";

/// SQLite storage backend
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Creates a new SqliteStore instance
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteStore)` - Successfully opened/created database
    /// * `Err(StoreError::Unavailable)` - The database cannot be opened
    pub fn new(path: &Path) -> StoreResult<Self> {
        let conn =
            Connection::open(path).map_err(|e| StoreError::Unavailable(e.to_string()))?;

        // Configure SQLite for better performance
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )
        .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        // Initialize schema
        initialize_schema(&conn).map_err(|e| StoreError::Unavailable(e.to_string()))?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database (for testing)
    #[cfg(test)]
    pub fn new_in_memory() -> StoreResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| StoreError::Unavailable(e.to_string()))?;
        initialize_schema(&conn).map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(Self { conn })
    }

    fn row_to_page(row: &rusqlite::Row<'_>) -> rusqlite::Result<StoredPage> {
        let stored_at: String = row.get(5)?;
        let stored_at = DateTime::parse_from_rfc3339(&stored_at)
            .map(|t| t.with_timezone(&Utc))
            .map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    5,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?;

        Ok(StoredPage {
            url: row.get(0)?,
            domain: row.get(1)?,
            content: row.get(2)?,
            status: row.get(3)?,
            content_size: row.get::<_, i64>(4)? as u64,
            stored_at,
        })
    }
}

impl PageStore for SqliteStore {
    fn upsert_page(&mut self, page: &StoredPage) -> StoreResult<()> {
        let tx = self.conn.transaction()?;

        // Size of the row being replaced, if any, so the aggregate can be
        // adjusted rather than recomputed
        let previous_size: Option<i64> = tx
            .query_row(
                "SELECT content_size FROM pages WHERE domain = ?1 AND url = ?2",
                params![page.domain, page.url],
                |row| row.get(0),
            )
            .optional()?;

        tx.execute(
            "INSERT INTO pages (url, domain, content, status, content_size, stored_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(domain, url) DO UPDATE SET
                content = excluded.content,
                status = excluded.status,
                content_size = excluded.content_size,
                stored_at = excluded.stored_at",
            params![
                page.url,
                page.domain,
                page.content,
                page.status,
                page.content_size as i64,
                page.stored_at.to_rfc3339(),
            ],
        )?;

        match previous_size {
            // Replacement: page count is unchanged, only the size moves
            Some(old_size) => {
                tx.execute(
                    "UPDATE domain_stats SET total_size = total_size - ?2 + ?3
                     WHERE domain = ?1",
                    params![page.domain, old_size, page.content_size as i64],
                )?;
            }
            None => {
                tx.execute(
                    "INSERT INTO domain_stats (domain, page_count, total_size)
                     VALUES (?1, 1, ?2)
                     ON CONFLICT(domain) DO UPDATE SET
                        page_count = page_count + 1,
                        total_size = total_size + excluded.total_size",
                    params![page.domain, page.content_size as i64],
                )?;
            }
        }

        tx.commit()?;
        Ok(())
    }

    fn pages_for_domain(&self, domain: &str) -> StoreResult<Vec<StoredPage>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM pages WHERE domain = ?1 ORDER BY id",
            PAGE_COLUMNS
        ))?;

        let pages = stmt
            .query_map(params![domain], Self::row_to_page)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(pages)
    }

    fn all_pages(&self) -> StoreResult<Vec<StoredPage>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {} FROM pages ORDER BY id", PAGE_COLUMNS))?;

        let pages = stmt
            .query_map([], Self::row_to_page)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(pages)
    }

    fn clear_domain(&mut self, domain: &str) -> StoreResult<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM pages WHERE domain = ?1", params![domain])?;
        tx.execute("DELETE FROM domain_stats WHERE domain = ?1", params![domain])?;
        tx.commit()?;
        Ok(())
    }

    fn clear_all(&mut self) -> StoreResult<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM pages", [])?;
        tx.execute("DELETE FROM domain_stats", [])?;
        tx.commit()?;
        Ok(())
    }

    fn saved_domains(&self) -> StoreResult<Vec<DomainInfo>> {
        let mut stmt = self.conn.prepare(
            "SELECT domain, page_count, total_size FROM domain_stats
             WHERE page_count > 0 ORDER BY domain",
        )?;

        let domains = stmt
            .query_map([], |row| {
                Ok(DomainInfo {
                    domain: row.get(0)?,
                    page_count: row.get::<_, i64>(1)? as u64,
                    total_size: row.get::<_, i64>(2)? as u64,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(domains)
    }

    fn count_pages(&self) -> StoreResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM pages", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn count_domains(&self) -> StoreResult<u64> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(DISTINCT domain) FROM pages", [], |row| {
                    row.get(0)
                })?;
        Ok(count as u64)
    }

    fn rebuild_stats(&mut self) -> StoreResult<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM domain_stats", [])?;
        tx.execute(
            "INSERT INTO domain_stats (domain, page_count, total_size)
             SELECT domain, COUNT(*), COALESCE(SUM(content_size), 0)
             FROM pages GROUP BY domain",
            [],
        )?;
        tx.commit()?;
        Ok(())
    }
}
