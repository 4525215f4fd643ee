//! Per-run memoizing wrapper around a hierarchy client.
//!
//! Sibling artist folders often share instrument folder names, and the same
//! folder id can be listed more than once over a run. Memoizing by folder id
//! bounds the remote call count to the number of distinct folders visited
//! rather than the number of traversal paths.
//!
//! The cache never evicts; its lifetime is one indexing run. Construct a
//! fresh wrapper per run and drop it afterwards.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::types::{FolderRef, ItemRef};
use super::{HierarchyClient, HierarchyError};

/// Memoizing hierarchy client wrapper.
///
/// The two query shapes memoize independently: child-folders and child-items
/// of the same folder id are different result sets.
pub struct CachedHierarchy<C> {
    inner: C,
    folders: Mutex<HashMap<String, Vec<FolderRef>>>,
    items: Mutex<HashMap<String, Vec<ItemRef>>>,
}

impl<C: HierarchyClient> CachedHierarchy<C> {
    /// Wrap a client with an empty per-run cache.
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            folders: Mutex::new(HashMap::new()),
            items: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl<C: HierarchyClient> HierarchyClient for CachedHierarchy<C> {
    async fn list_child_folders(
        &self,
        parent_id: &str,
    ) -> Result<Vec<FolderRef>, HierarchyError> {
        let mut cache = self.folders.lock().await;
        if let Some(children) = cache.get(parent_id) {
            return Ok(children.clone());
        }

        let children = self.inner.list_child_folders(parent_id).await?;
        cache.insert(parent_id.to_string(), children.clone());
        Ok(children)
    }

    async fn list_child_items(&self, parent_id: &str) -> Result<Vec<ItemRef>, HierarchyError> {
        let mut cache = self.items.lock().await;
        if let Some(children) = cache.get(parent_id) {
            return Ok(children.clone());
        }

        let children = self.inner.list_child_items(parent_id).await?;
        cache.insert(parent_id.to_string(), children.clone());
        Ok(children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockHierarchy;

    #[tokio::test]
    async fn test_second_lookup_is_served_from_cache() {
        let mock = MockHierarchy::new();
        mock.add_folder("R", "A1", "Bo").await;
        let cached = CachedHierarchy::new(mock.clone());

        let first = cached.list_child_folders("R").await.unwrap();
        let second = cached.list_child_folders("R").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(mock.folder_calls().await, vec!["R".to_string()]);
    }

    #[tokio::test]
    async fn test_query_shapes_memoize_independently() {
        let mock = MockHierarchy::new();
        mock.add_folder("R", "A1", "Bo").await;
        let cached = CachedHierarchy::new(mock.clone());

        cached.list_child_folders("R").await.unwrap();
        cached.list_child_items("R").await.unwrap();
        cached.list_child_items("R").await.unwrap();

        assert_eq!(mock.folder_calls().await.len(), 1);
        assert_eq!(mock.item_calls().await.len(), 1);
    }

    #[tokio::test]
    async fn test_errors_are_not_cached() {
        let mock = MockHierarchy::new();
        mock.add_folder("R", "A1", "Bo").await;
        mock.set_next_error(HierarchyError::ApiError {
            status: 500,
            message: "boom".to_string(),
        })
        .await;
        let cached = CachedHierarchy::new(mock.clone());

        assert!(cached.list_child_folders("R").await.is_err());

        let retry = cached.list_child_folders("R").await.unwrap();
        assert_eq!(retry.len(), 1);
        assert_eq!(mock.folder_calls().await.len(), 1);
    }
}
