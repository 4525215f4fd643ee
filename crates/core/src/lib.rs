pub mod catalog;
pub mod config;
pub mod hierarchy;
pub mod indexer;
pub mod publisher;
pub mod run;
pub mod sheet;
pub mod testing;

pub use catalog::{CatalogEntry, CatalogError, CatalogStore, SqliteCatalog};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, SanitizedConfig,
};
pub use hierarchy::{
    CachedHierarchy, DriveConfig, DriveHierarchy, FolderRef, HierarchyClient, HierarchyError,
    ItemRef,
};
pub use indexer::{CatalogIndexer, IndexRoot, IndexedCatalog};
pub use publisher::CatalogPublisher;
pub use run::{run_catalog, RunError, RunSummary};
pub use sheet::{GoogleSheet, GoogleSheetConfig, SheetError, SheetSurface};
