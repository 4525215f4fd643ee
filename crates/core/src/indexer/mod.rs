//! Hierarchy traversal and catalog reconciliation.
//!
//! The indexer walks the fixed three-level layout under each configured
//! root (artist folders, instrument folders, song files), keeps only
//! instrument folders on the recognized allow-list, and flattens the result
//! into one entry per document id. A recurring id silently replaces the
//! earlier entry: last write wins, no field merging.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::catalog::CatalogEntry;
use crate::hierarchy::{HierarchyClient, HierarchyError};

/// A configured root folder under which the artist/instrument/song
/// structure is expected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexRoot {
    pub id: String,
    pub name: String,
}

/// The result of one traversal pass.
#[derive(Debug, Default)]
pub struct IndexedCatalog {
    /// One entry per document id.
    pub entries: HashMap<String, CatalogEntry>,
    /// How many entries were overwritten by a later item with the same id.
    pub duplicates_replaced: u32,
}

/// Walks the remote hierarchy and produces the in-memory catalog.
pub struct CatalogIndexer {
    /// Lower-cased allow-list of instrument folder names.
    instruments: Vec<String>,
}

impl CatalogIndexer {
    /// Create an indexer recognizing the given instrument folder names
    /// (matched case-insensitively).
    pub fn new(instruments: &[String]) -> Self {
        Self {
            instruments: instruments.iter().map(|i| i.to_lowercase()).collect(),
        }
    }

    fn is_recognized(&self, folder_name: &str) -> bool {
        self.instruments.contains(&folder_name.to_lowercase())
    }

    /// Walk every root in order and flatten matching songs into a mapping
    /// keyed by document id.
    ///
    /// Transport failures are not caught here; the first error aborts the
    /// traversal and no partial catalog leaves this function.
    pub async fn index(
        &self,
        roots: &[IndexRoot],
        hierarchy: &dyn HierarchyClient,
    ) -> Result<IndexedCatalog, HierarchyError> {
        let mut catalog = IndexedCatalog::default();

        for root in roots {
            let artists = hierarchy.list_child_folders(&root.id).await?;
            debug!("root {}: {} artist folders", root.name, artists.len());

            for artist in &artists {
                let children = hierarchy.list_child_items(&artist.id).await?;

                for folder in children.iter().filter(|c| c.is_folder) {
                    if !self.is_recognized(&folder.name) {
                        debug!(
                            "skipping unrecognized instrument folder '{}' under {}",
                            folder.name, artist.name
                        );
                        continue;
                    }

                    let songs = hierarchy.list_child_items(&folder.id).await?;
                    for song in songs {
                        let location =
                            CatalogEntry::location_for(&root.name, &artist.name, &folder.name);
                        info!(
                            "found {}: {} ({} in {})",
                            artist.name, song.name, folder.name, location
                        );

                        let entry = CatalogEntry {
                            document_id: song.id.clone(),
                            artist: artist.name.clone(),
                            name: song.name,
                            instrument: folder.name.clone(),
                            location,
                            link: song.link.unwrap_or_default(),
                        };

                        if let Some(previous) = catalog.entries.insert(song.id, entry) {
                            catalog.duplicates_replaced += 1;
                            warn!(
                                "duplicate document id {}: entry from '{}' replaced by '{}'",
                                previous.document_id, previous.artist, artist.name
                            );
                        }
                    }
                }
            }
        }

        Ok(catalog)
    }
}
