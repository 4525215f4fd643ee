//! Mock hierarchy client for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::hierarchy::{FolderRef, HierarchyClient, HierarchyError, ItemRef};

/// Mock implementation of the [`HierarchyClient`] trait.
///
/// Provides controllable behavior for testing:
/// - Register a canned folder/item tree
/// - Track which parents were listed, per query shape
/// - Simulate transport failures
///
/// Registered folders show up in both query shapes, like real folders do:
/// as [`FolderRef`]s from `list_child_folders` and as folder-kind
/// [`ItemRef`]s from `list_child_items`.
#[derive(Debug, Clone, Default)]
pub struct MockHierarchy {
    folders: Arc<RwLock<HashMap<String, Vec<FolderRef>>>>,
    items: Arc<RwLock<HashMap<String, Vec<ItemRef>>>>,
    folder_calls: Arc<RwLock<Vec<String>>>,
    item_calls: Arc<RwLock<Vec<String>>>,
    next_error: Arc<RwLock<Option<HierarchyError>>>,
}

impl MockHierarchy {
    /// Create a new empty mock hierarchy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a folder under `parent_id`.
    pub async fn add_folder(&self, parent_id: &str, id: &str, name: &str) {
        self.folders
            .write()
            .await
            .entry(parent_id.to_string())
            .or_default()
            .push(FolderRef {
                id: id.to_string(),
                name: name.to_string(),
            });
        self.items
            .write()
            .await
            .entry(parent_id.to_string())
            .or_default()
            .push(ItemRef {
                id: id.to_string(),
                name: name.to_string(),
                link: None,
                is_folder: true,
            });
    }

    /// Register a file item under `parent_id`.
    pub async fn add_item(&self, parent_id: &str, id: &str, name: &str, link: Option<&str>) {
        self.items
            .write()
            .await
            .entry(parent_id.to_string())
            .or_default()
            .push(ItemRef {
                id: id.to_string(),
                name: name.to_string(),
                link: link.map(|l| l.to_string()),
                is_folder: false,
            });
    }

    /// Parents listed through `list_child_folders`, in call order.
    pub async fn folder_calls(&self) -> Vec<String> {
        self.folder_calls.read().await.clone()
    }

    /// Parents listed through `list_child_items`, in call order.
    pub async fn item_calls(&self) -> Vec<String> {
        self.item_calls.read().await.clone()
    }

    /// Configure the next listing call to fail with the given error.
    pub async fn set_next_error(&self, error: HierarchyError) {
        *self.next_error.write().await = Some(error);
    }

    async fn take_error(&self) -> Option<HierarchyError> {
        self.next_error.write().await.take()
    }
}

#[async_trait]
impl HierarchyClient for MockHierarchy {
    async fn list_child_folders(
        &self,
        parent_id: &str,
    ) -> Result<Vec<FolderRef>, HierarchyError> {
        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        self.folder_calls.write().await.push(parent_id.to_string());

        Ok(self
            .folders
            .read()
            .await
            .get(parent_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn list_child_items(&self, parent_id: &str) -> Result<Vec<ItemRef>, HierarchyError> {
        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        self.item_calls.write().await.push(parent_id.to_string());

        Ok(self
            .items
            .read()
            .await
            .get(parent_id)
            .cloned()
            .unwrap_or_default())
    }
}
