//! Catalog run integration tests.
//!
//! These tests drive a full index-and-publish run over mock collaborators:
//! - the canonical single-root walk
//! - duplicate document ids across roots (last write wins)
//! - sheet layout and hyperlink row alignment
//! - fail-fast on transport errors, with the sheet left untouched

use tunedex_core::{
    run_catalog, CatalogIndexer, CatalogStore, CachedHierarchy, HierarchyError, IndexRoot,
    CatalogPublisher, SqliteCatalog,
    testing::{MockHierarchy, MockSheet, SheetOp},
};

/// Test helper bundling the run collaborators.
struct TestHarness {
    hierarchy: MockHierarchy,
    store: SqliteCatalog,
    sheet: MockSheet,
    indexer: CatalogIndexer,
    publisher: CatalogPublisher,
}

impl TestHarness {
    fn new() -> Self {
        Self {
            hierarchy: MockHierarchy::new(),
            store: SqliteCatalog::in_memory().expect("Failed to create in-memory store"),
            sheet: MockSheet::new(),
            indexer: CatalogIndexer::new(&["guitar".to_string(), "ukulele".to_string()]),
            publisher: CatalogPublisher::new(),
        }
    }

    async fn run(&self, roots: &[IndexRoot]) -> Result<tunedex_core::RunSummary, tunedex_core::RunError> {
        run_catalog(
            roots,
            &self.indexer,
            &self.hierarchy,
            &self.store,
            &self.publisher,
            &self.sheet,
        )
        .await
    }
}

fn root(id: &str, name: &str) -> IndexRoot {
    IndexRoot {
        id: id.to_string(),
        name: name.to_string(),
    }
}

#[tokio::test]
async fn test_single_root_end_to_end() {
    let h = TestHarness::new();
    h.hierarchy.add_folder("R", "A1", "Bo").await;
    h.hierarchy.add_folder("A1", "I1", "guitar").await;
    h.hierarchy.add_folder("A1", "I2", "drums").await;
    h.hierarchy.add_item("I1", "S1", "Song1", Some("http://x")).await;

    let summary = h.run(&[root("R", "Library")]).await.unwrap();

    assert_eq!(summary.entries_indexed, 1);
    assert_eq!(summary.entries_published, 1);
    assert_eq!(summary.duplicates_replaced, 0);
    assert!(summary.finished_at >= summary.started_at);

    // The drums folder contributed nothing.
    let stored = h.store.all_ordered().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].document_id, "S1");
    assert_eq!(stored[0].artist, "Bo");
    assert_eq!(stored[0].name, "Song1");
    assert_eq!(stored[0].instrument, "guitar");
    assert_eq!(stored[0].location, "Library/Bo/guitar");
    assert_eq!(stored[0].link, "http://x");

    let grid = h.sheet.grid().await;
    assert_eq!(grid.len(), 2);
    assert_eq!(
        grid[0],
        vec!["Artist", "Name", "Instrument", "Location", "Document ID"]
            .into_iter()
            .map(String::from)
            .collect::<Vec<_>>()
    );
    assert_eq!(grid[1][1], "=HYPERLINK(\"http://x\", \"Song1\")");
    assert_eq!(grid[1][4], "S1");
}

#[tokio::test]
async fn test_duplicate_id_across_roots_keeps_last_ingestion() {
    let h = TestHarness::new();
    h.hierarchy.add_folder("R1", "A1", "Bo").await;
    h.hierarchy.add_folder("A1", "I1", "guitar").await;
    h.hierarchy.add_item("I1", "DUP", "Song1", Some("http://first")).await;
    h.hierarchy.add_folder("R2", "A2", "Ann").await;
    h.hierarchy.add_folder("A2", "I2", "guitar").await;
    h.hierarchy.add_item("I2", "DUP", "Song1", Some("http://second")).await;

    let summary = h
        .run(&[root("R1", "Library"), root("R2", "Archive")])
        .await
        .unwrap();

    assert_eq!(summary.entries_indexed, 1);
    assert_eq!(summary.duplicates_replaced, 1);

    let stored = h.store.all_ordered().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].artist, "Ann");
    assert_eq!(stored[0].location, "Archive/Ann/guitar");
}

#[tokio::test]
async fn test_published_rows_follow_store_ordering() {
    let h = TestHarness::new();
    h.hierarchy.add_folder("R", "A1", "zara").await;
    h.hierarchy.add_folder("A1", "I1", "guitar").await;
    h.hierarchy.add_item("I1", "S1", "Zulu", None).await;
    h.hierarchy.add_folder("R", "A2", "Anna").await;
    h.hierarchy.add_folder("A2", "I2", "ukulele").await;
    h.hierarchy.add_item("I2", "S2", "Alpha", Some("http://a")).await;

    h.run(&[root("R", "Library")]).await.unwrap();

    let grid = h.sheet.grid().await;
    assert_eq!(grid.len(), 3);
    // Case-insensitive artist ordering: Anna before zara.
    assert_eq!(grid[1][0], "Anna");
    assert_eq!(grid[2][0], "zara");
    // Row k+1 carries the k-th sorted entry's hyperlink; a missing link
    // degrades to the plain name.
    assert_eq!(grid[1][1], "=HYPERLINK(\"http://a\", \"Alpha\")");
    assert_eq!(grid[2][1], "Zulu");
}

#[tokio::test]
async fn test_unrecognized_instruments_do_not_fail_the_run() {
    let h = TestHarness::new();
    h.hierarchy.add_folder("R", "A1", "Bo").await;
    h.hierarchy.add_folder("A1", "I1", "drums").await;
    h.hierarchy.add_item("I1", "S1", "Solo", None).await;

    let summary = h.run(&[root("R", "Library")]).await.unwrap();

    assert_eq!(summary.entries_indexed, 0);
    assert_eq!(summary.entries_published, 0);

    // Header only.
    assert_eq!(h.sheet.grid().await.len(), 1);
}

#[tokio::test]
async fn test_transport_error_aborts_before_the_sheet_is_touched() {
    let h = TestHarness::new();
    h.hierarchy.add_folder("R", "A1", "Bo").await;
    h.hierarchy
        .set_next_error(HierarchyError::ApiError {
            status: 503,
            message: "unavailable".to_string(),
        })
        .await;

    let result = h.run(&[root("R", "Library")]).await;
    assert!(matches!(result, Err(tunedex_core::RunError::Hierarchy(_))));

    // Fail-fast: nothing was published.
    assert!(h.sheet.operations().await.is_empty());
    assert!(h.store.all_ordered().unwrap().is_empty());
}

#[tokio::test]
async fn test_sheet_error_surfaces_as_run_error() {
    let h = TestHarness::new();
    h.hierarchy.add_folder("R", "A1", "Bo").await;
    h.hierarchy.add_folder("A1", "I1", "guitar").await;
    h.hierarchy.add_item("I1", "S1", "Song1", None).await;
    h.sheet
        .set_next_error(tunedex_core::SheetError::ApiError {
            status: 500,
            message: "backend".to_string(),
        })
        .await;

    let result = h.run(&[root("R", "Library")]).await;
    assert!(matches!(result, Err(tunedex_core::RunError::Sheet(_))));

    // The index itself was committed before publishing failed.
    assert_eq!(h.store.all_ordered().unwrap().len(), 1);
}

#[tokio::test]
async fn test_rerun_rebuilds_from_scratch() {
    let h = TestHarness::new();
    h.hierarchy.add_folder("R", "A1", "Bo").await;
    h.hierarchy.add_folder("A1", "I1", "guitar").await;
    h.hierarchy.add_item("I1", "S1", "Song1", None).await;

    h.run(&[root("R", "Library")]).await.unwrap();
    h.run(&[root("R", "Library")]).await.unwrap();

    // No accumulation across runs: the store was reset, the sheet cleared.
    assert_eq!(h.store.all_ordered().unwrap().len(), 1);
    let grid = h.sheet.grid().await;
    assert_eq!(grid.len(), 2);

    let clears = h
        .sheet
        .operations()
        .await
        .iter()
        .filter(|op| **op == SheetOp::Clear)
        .count();
    assert_eq!(clears, 2);
}

#[tokio::test]
async fn test_cached_hierarchy_serves_repeat_lookups_without_refetching() {
    let h = TestHarness::new();
    h.hierarchy.add_folder("R", "A1", "Bo").await;
    h.hierarchy.add_folder("A1", "I1", "guitar").await;
    h.hierarchy.add_item("I1", "S1", "Song1", None).await;

    let cached = CachedHierarchy::new(h.hierarchy.clone());

    // The same root traversed twice costs one remote listing per folder.
    run_catalog(
        &[root("R", "Library"), root("R", "Library")],
        &h.indexer,
        &cached,
        &h.store,
        &h.publisher,
        &h.sheet,
    )
    .await
    .unwrap();

    assert_eq!(h.hierarchy.folder_calls().await.len(), 1);
    assert_eq!(h.hierarchy.item_calls().await.len(), 2);
}
