use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::hierarchy::DriveConfig;
use crate::indexer::IndexRoot;
use crate::sheet::GoogleSheetConfig;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub auth: AuthConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    pub sheet: GoogleSheetConfig,
    /// Roots to index, in order.
    pub roots: Vec<IndexRoot>,
    #[serde(default)]
    pub indexer: IndexerConfig,
    #[serde(default)]
    pub drive: DriveConfig,
}

/// Authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Pre-obtained bearer token used for both Drive and Sheets calls.
    pub access_token: String,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("tunedex.db")
}

/// Indexer configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IndexerConfig {
    /// Recognized instrument folder names, matched case-insensitively.
    #[serde(default = "default_instruments")]
    pub instruments: Vec<String>,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            instruments: default_instruments(),
        }
    }
}

fn default_instruments() -> Vec<String> {
    vec!["guitar".to_string(), "ukulele".to_string()]
}

/// Sanitized config for logging (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub auth: SanitizedAuthConfig,
    pub database: DatabaseConfig,
    pub sheet: GoogleSheetConfig,
    pub roots: Vec<IndexRoot>,
    pub indexer: IndexerConfig,
    pub drive: DriveConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedAuthConfig {
    pub access_token_configured: bool,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            auth: SanitizedAuthConfig {
                access_token_configured: !config.auth.access_token.is_empty(),
            },
            database: config.database.clone(),
            sheet: config.sheet.clone(),
            roots: config.roots.clone(),
            indexer: config.indexer.clone(),
            drive: config.drive.clone(),
        }
    }
}
