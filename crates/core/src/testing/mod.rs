//! Testing utilities and mock implementations.
//!
//! This module provides mock implementations of the external collaborator
//! traits so traversal and publishing can be tested without real
//! infrastructure.
//!
//! # Example
//!
//! ```rust,ignore
//! use tunedex_core::testing::{MockHierarchy, MockSheet};
//!
//! let hierarchy = MockHierarchy::new();
//! hierarchy.add_folder("R", "A1", "Bo").await;
//! hierarchy.add_folder("A1", "I1", "guitar").await;
//! hierarchy.add_item("I1", "S1", "Song1", Some("http://x")).await;
//!
//! let sheet = MockSheet::new();
//! // Run the indexer/publisher, then assert on sheet.grid().await...
//! ```

mod mock_hierarchy;
mod mock_sheet;

pub use mock_hierarchy::MockHierarchy;
pub use mock_sheet::{MockSheet, SheetOp};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::catalog::CatalogEntry;

    /// Create a test catalog entry with reasonable defaults.
    ///
    /// The document id and link are derived from the name so entries stay
    /// distinguishable in assertions.
    pub fn entry(artist: &str, name: &str, instrument: &str) -> CatalogEntry {
        CatalogEntry {
            document_id: format!("S-{}", name),
            artist: artist.to_string(),
            name: name.to_string(),
            instrument: instrument.to_string(),
            location: CatalogEntry::location_for("Library", artist, instrument),
            link: format!("http://drive.example/S-{}", name),
        }
    }
}
