//! Song catalog persistence.
//!
//! The catalog is rebuilt from scratch on every indexing run: the store is
//! reset, entries are upserted by document id, and readers get a
//! deterministic ordered view for publishing.

mod sqlite;
mod types;

pub use sqlite::SqliteCatalog;
pub use types::*;

/// Trait for catalog storage.
pub trait CatalogStore: Send + Sync {
    /// Destroy and recreate the backing table with the fixed schema.
    ///
    /// Called once at the start of a run, before any ingestion. Fails loudly
    /// if the destructive reset cannot be performed.
    fn reset(&self) -> Result<(), CatalogError>;

    /// Insert or replace an entry by `document_id`.
    ///
    /// Safe to call repeatedly with entries sharing an identifier; the final
    /// state equals the last write. Writes stay pending until
    /// [`CatalogStore::commit`].
    fn upsert(&self, entry: &CatalogEntry) -> Result<(), CatalogError>;

    /// Make all upserts since the last commit durable and visible to readers.
    fn commit(&self) -> Result<(), CatalogError>;

    /// Every live entry sorted by `(artist, name, instrument)`,
    /// case-insensitive on all three keys.
    fn all_ordered(&self) -> Result<Vec<CatalogEntry>, CatalogError>;
}
