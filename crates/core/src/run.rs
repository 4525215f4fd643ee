//! One-shot catalog run orchestration.
//!
//! A run rebuilds the catalog from zero: reset the store, walk the
//! hierarchy, bulk-upsert and commit, then publish the ordered read-back to
//! the sheet. Any collaborator failure aborts the run; the sheet is only
//! touched after a fully committed index.

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::info;

use crate::catalog::{CatalogError, CatalogStore};
use crate::hierarchy::{HierarchyClient, HierarchyError};
use crate::indexer::{CatalogIndexer, IndexRoot};
use crate::publisher::CatalogPublisher;
use crate::sheet::{SheetError, SheetSurface};

/// Outcome of a completed run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub entries_indexed: usize,
    pub duplicates_replaced: u32,
    pub entries_published: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Errors that abort a catalog run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("hierarchy listing failed: {0}")]
    Hierarchy(#[from] HierarchyError),

    #[error("catalog store failed: {0}")]
    Catalog(#[from] CatalogError),

    #[error("sheet publishing failed: {0}")]
    Sheet(#[from] SheetError),
}

/// Execute one full index-and-publish run.
///
/// The destination sheet must already be resolved (its construction is the
/// configuration check); this function performs the destructive work.
pub async fn run_catalog(
    roots: &[IndexRoot],
    indexer: &CatalogIndexer,
    hierarchy: &dyn HierarchyClient,
    store: &dyn CatalogStore,
    publisher: &CatalogPublisher,
    sheet: &dyn SheetSurface,
) -> Result<RunSummary, RunError> {
    let started_at = Utc::now();

    store.reset()?;
    info!("catalog store reset");

    let indexed = indexer.index(roots, hierarchy).await?;
    info!(
        "indexed {} entries ({} duplicate ids replaced)",
        indexed.entries.len(),
        indexed.duplicates_replaced
    );

    for entry in indexed.entries.values() {
        store.upsert(entry)?;
    }
    store.commit()?;

    let ordered = store.all_ordered()?;
    publisher.publish(&ordered, sheet).await?;
    info!("published {} entries", ordered.len());

    Ok(RunSummary {
        entries_indexed: indexed.entries.len(),
        duplicates_replaced: indexed.duplicates_replaced,
        entries_published: ordered.len(),
        started_at,
        finished_at: Utc::now(),
    })
}
