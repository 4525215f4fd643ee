use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tunedex_core::{
    load_config, run_catalog, validate_config, CachedHierarchy, CatalogIndexer, CatalogPublisher,
    DriveHierarchy, GoogleSheet, SanitizedConfig, SqliteCatalog,
};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine config path
    let config_path = std::env::var("TUNEDEX_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    info!(
        "Configuration loaded: {}",
        serde_json::to_string(&SanitizedConfig::from(&config)).unwrap_or_default()
    );

    // Resolve the destination worksheet before anything destructive happens
    let sheet = GoogleSheet::open(config.sheet.clone(), &config.auth.access_token)
        .await
        .with_context(|| format!("Failed to open worksheet '{}'", config.sheet.sheet_name))?;
    info!("Destination worksheet resolved: {}", config.sheet.sheet_name);

    // Open the catalog store
    let store = SqliteCatalog::new(&config.database.path)
        .with_context(|| format!("Failed to open catalog store at {:?}", config.database.path))?;
    info!("Catalog store opened at {:?}", config.database.path);

    // Create the hierarchy client, wrapped in a per-run listing cache
    let drive = DriveHierarchy::new(config.drive.clone(), &config.auth.access_token)
        .context("Failed to create Drive client")?;
    let hierarchy = CachedHierarchy::new(drive);

    let indexer = CatalogIndexer::new(&config.indexer.instruments);
    let publisher = CatalogPublisher::new();

    let summary = run_catalog(
        &config.roots,
        &indexer,
        &hierarchy,
        &store,
        &publisher,
        &sheet,
    )
    .await
    .context("Catalog run failed")?;

    info!(
        "Run finished: {} entries indexed, {} published, {} duplicate ids replaced, took {}s",
        summary.entries_indexed,
        summary.entries_published,
        summary.duplicates_replaced,
        (summary.finished_at - summary.started_at).num_seconds()
    );

    Ok(())
}
