//! SQLite-backed catalog store implementation.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::{params, Connection};

use super::{CatalogEntry, CatalogError, CatalogStore};

/// The five catalog columns plus the primary key.
///
/// `artist`, `name` and `instrument` carry NOCASE collation so ordering and
/// comparison match the entry model without per-query collation clauses.
const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS songs (
        document_id TEXT PRIMARY KEY,
        artist      TEXT NOT NULL COLLATE NOCASE,
        name        TEXT NOT NULL COLLATE NOCASE,
        instrument  TEXT NOT NULL COLLATE NOCASE,
        location    TEXT NOT NULL,
        link        TEXT NOT NULL
    );
"#;

/// SQLite-backed catalog store.
pub struct SqliteCatalog {
    conn: Mutex<Connection>,
}

impl SqliteCatalog {
    /// Open a SQLite catalog, creating the database file and table if needed.
    pub fn new(path: &Path) -> Result<Self, CatalogError> {
        let conn = Connection::open(path).map_err(|e| CatalogError::Database(e.to_string()))?;
        conn.execute_batch(SCHEMA)
            .map_err(|e| CatalogError::Database(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory SQLite catalog (useful for testing).
    pub fn in_memory() -> Result<Self, CatalogError> {
        let conn =
            Connection::open_in_memory().map_err(|e| CatalogError::Database(e.to_string()))?;
        conn.execute_batch(SCHEMA)
            .map_err(|e| CatalogError::Database(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn row_to_entry(row: &rusqlite::Row) -> rusqlite::Result<CatalogEntry> {
        Ok(CatalogEntry {
            document_id: row.get(0)?,
            artist: row.get(1)?,
            name: row.get(2)?,
            instrument: row.get(3)?,
            location: row.get(4)?,
            link: row.get(5)?,
        })
    }
}

impl CatalogStore for SqliteCatalog {
    fn reset(&self) -> Result<(), CatalogError> {
        let conn = self.conn.lock().unwrap();

        conn.execute_batch("DROP TABLE IF EXISTS songs;")
            .map_err(|e| CatalogError::Database(e.to_string()))?;
        conn.execute_batch(SCHEMA)
            .map_err(|e| CatalogError::Database(e.to_string()))?;

        Ok(())
    }

    fn upsert(&self, entry: &CatalogEntry) -> Result<(), CatalogError> {
        let conn = self.conn.lock().unwrap();

        // Open a pending transaction on the first write so nothing becomes
        // durable until commit().
        if conn.is_autocommit() {
            conn.execute_batch("BEGIN IMMEDIATE")
                .map_err(|e| CatalogError::Database(e.to_string()))?;
        }

        conn.execute(
            "INSERT OR REPLACE INTO songs (document_id, artist, name, instrument, location, link)
             VALUES (?, ?, ?, ?, ?, ?)",
            params![
                &entry.document_id,
                &entry.artist,
                &entry.name,
                &entry.instrument,
                &entry.location,
                &entry.link,
            ],
        )
        .map_err(|e| CatalogError::Database(e.to_string()))?;

        Ok(())
    }

    fn commit(&self) -> Result<(), CatalogError> {
        let conn = self.conn.lock().unwrap();

        if !conn.is_autocommit() {
            conn.execute_batch("COMMIT")
                .map_err(|e| CatalogError::Database(e.to_string()))?;
        }

        Ok(())
    }

    fn all_ordered(&self) -> Result<Vec<CatalogEntry>, CatalogError> {
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn
            .prepare(
                "SELECT document_id, artist, name, instrument, location, link
                 FROM songs
                 ORDER BY artist, name, instrument",
            )
            .map_err(|e| CatalogError::Database(e.to_string()))?;

        let rows = stmt
            .query_map([], Self::row_to_entry)
            .map_err(|e| CatalogError::Database(e.to_string()))?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row.map_err(|e| CatalogError::Database(e.to_string()))?);
        }
        Ok(entries)
    }
}
