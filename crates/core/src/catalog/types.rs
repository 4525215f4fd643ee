//! Types for the song catalog.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A cataloged song entry.
///
/// One entry per document id; re-ingesting the same id replaces the prior
/// entry in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Source document id, the primary key.
    pub document_id: String,
    /// Artist folder name.
    pub artist: String,
    /// Song file name.
    pub name: String,
    /// Instrument folder name, original case as returned by the hierarchy.
    pub instrument: String,
    /// Derived `root/artist/instrument` path.
    pub location: String,
    /// View link for presentation; empty when the source item has none.
    pub link: String,
}

impl CatalogEntry {
    /// Build the derived location path for an entry.
    pub fn location_for(root: &str, artist: &str, instrument: &str) -> String {
        format!("{}/{}/{}", root, artist, instrument)
    }
}

/// Errors for catalog store operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Database error: {0}")]
    Database(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_for() {
        assert_eq!(
            CatalogEntry::location_for("Library", "Bo", "guitar"),
            "Library/Bo/guitar"
        );
    }

    #[test]
    fn test_entry_serialization() {
        let entry = CatalogEntry {
            document_id: "S1".to_string(),
            artist: "Bo".to_string(),
            name: "Song1".to_string(),
            instrument: "guitar".to_string(),
            location: "Library/Bo/guitar".to_string(),
            link: "http://x".to_string(),
        };

        let json = serde_json::to_string(&entry).unwrap();
        let parsed: CatalogEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, entry);
    }
}
