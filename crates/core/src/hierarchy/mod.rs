//! Remote folder hierarchy abstraction.
//!
//! The indexer walks a remote tree of folders and files through the
//! [`HierarchyClient`] trait. [`DriveHierarchy`] is the Google Drive
//! implementation; [`CachedHierarchy`] wraps any client with per-run
//! memoization of folder listings.

mod cache;
mod drive;
mod types;

pub use cache::CachedHierarchy;
pub use drive::{DriveConfig, DriveHierarchy};
pub use types::*;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when listing the remote hierarchy.
#[derive(Debug, Error)]
pub enum HierarchyError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error status.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse a response.
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

/// Trait for listing the immediate children of a remote folder.
///
/// Both queries return a single flattened sequence; pagination beyond one
/// page is the implementation's responsibility to expose transparently.
#[async_trait]
pub trait HierarchyClient: Send + Sync {
    /// Child folders of `parent_id`.
    async fn list_child_folders(&self, parent_id: &str)
        -> Result<Vec<FolderRef>, HierarchyError>;

    /// Child items of `parent_id`, folders and files alike.
    async fn list_child_items(&self, parent_id: &str) -> Result<Vec<ItemRef>, HierarchyError>;
}
