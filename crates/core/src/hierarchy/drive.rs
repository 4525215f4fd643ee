//! Google Drive v3 hierarchy client.
//!
//! Lists folder children through `files.list` with a parent query. Pages
//! are followed to exhaustion so callers always see one flattened sequence.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::types::{FolderRef, ItemRef};
use super::{HierarchyClient, HierarchyError};
use async_trait::async_trait;

const MIME_TYPE_FOLDER: &str = "application/vnd.google-apps.folder";
const INCLUDE_FIELDS: &str = "nextPageToken, files(id, name, mimeType, webViewLink)";

/// Google Drive client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriveConfig {
    /// Page size hint passed to `files.list` (default: 1000).
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Request timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
    /// Base URL (default: https://www.googleapis.com/drive/v3).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

fn default_page_size() -> u32 {
    1000
}

fn default_timeout() -> u32 {
    30
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            timeout_secs: default_timeout(),
            base_url: None,
        }
    }
}

/// Google Drive hierarchy client.
pub struct DriveHierarchy {
    client: Client,
    base_url: String,
    page_size: u32,
    access_token: String,
}

impl DriveHierarchy {
    /// Create a new Drive client with a pre-obtained bearer token.
    pub fn new(config: DriveConfig, access_token: &str) -> Result<Self, HierarchyError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()?;

        let base_url = config
            .base_url
            .unwrap_or_else(|| "https://www.googleapis.com/drive/v3".to_string());

        Ok(Self {
            client,
            base_url,
            page_size: config.page_size,
            access_token: access_token.to_string(),
        })
    }

    /// Run a `files.list` query, following `nextPageToken` to exhaustion.
    async fn list(&self, query: &str) -> Result<Vec<DriveFile>, HierarchyError> {
        let url = format!("{}/files", self.base_url);
        let page_size = self.page_size.to_string();
        let mut files = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self.client.get(&url).bearer_auth(&self.access_token).query(&[
                ("q", query),
                ("fields", INCLUDE_FIELDS),
                ("pageSize", page_size.as_str()),
            ]);
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token.as_str())]);
            }

            let response = request.send().await?;
            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(HierarchyError::ApiError {
                    status: status.as_u16(),
                    message: body,
                });
            }

            let page: DriveFileList = response.json().await.map_err(|e| {
                HierarchyError::Parse(format!("Failed to parse file list response: {}", e))
            })?;

            debug!("Drive list page: {} files, query='{}'", page.files.len(), query);

            files.extend(page.files);
            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        Ok(files)
    }
}

#[async_trait]
impl HierarchyClient for DriveHierarchy {
    async fn list_child_folders(
        &self,
        parent_id: &str,
    ) -> Result<Vec<FolderRef>, HierarchyError> {
        let query = format!(
            "mimeType = '{}' and '{}' in parents",
            MIME_TYPE_FOLDER, parent_id
        );
        let files = self.list(&query).await?;
        Ok(files.into_iter().map(|f| f.into()).collect())
    }

    async fn list_child_items(&self, parent_id: &str) -> Result<Vec<ItemRef>, HierarchyError> {
        let query = format!("'{}' in parents", parent_id);
        let files = self.list(&query).await?;
        Ok(files.into_iter().map(|f| f.into()).collect())
    }
}

// ============================================================================
// Drive API Response Types (private)
// ============================================================================

#[derive(Debug, Deserialize)]
struct DriveFileList {
    #[serde(default)]
    files: Vec<DriveFile>,
    #[serde(rename = "nextPageToken", default)]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DriveFile {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(rename = "mimeType", default)]
    mime_type: String,
    #[serde(rename = "webViewLink", default)]
    web_view_link: Option<String>,
}

impl From<DriveFile> for FolderRef {
    fn from(file: DriveFile) -> Self {
        FolderRef {
            id: file.id,
            name: file.name,
        }
    }
}

impl From<DriveFile> for ItemRef {
    fn from(file: DriveFile) -> Self {
        let is_folder = file.mime_type == MIME_TYPE_FOLDER;
        ItemRef {
            id: file.id,
            name: file.name,
            link: file.web_view_link,
            is_folder,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_from_folder_file() {
        let file: DriveFile = serde_json::from_str(
            r#"{"id": "I1", "name": "guitar", "mimeType": "application/vnd.google-apps.folder"}"#,
        )
        .unwrap();

        let item: ItemRef = file.into();
        assert!(item.is_folder);
        assert_eq!(item.name, "guitar");
        assert!(item.link.is_none());
    }

    #[test]
    fn test_item_from_song_file() {
        let file: DriveFile = serde_json::from_str(
            r#"{"id": "S1", "name": "Song1.pdf", "mimeType": "application/pdf",
                "webViewLink": "http://x"}"#,
        )
        .unwrap();

        let item: ItemRef = file.into();
        assert!(!item.is_folder);
        assert_eq!(item.link.as_deref(), Some("http://x"));
    }

    #[test]
    fn test_missing_name_becomes_empty() {
        let file: DriveFile = serde_json::from_str(r#"{"id": "S1"}"#).unwrap();
        let item: ItemRef = file.into();
        assert_eq!(item.name, "");
        assert!(item.link.is_none());
    }

    #[test]
    fn test_file_list_page_token() {
        let page: DriveFileList = serde_json::from_str(
            r#"{"nextPageToken": "tok", "files": [{"id": "A1", "name": "Bo",
                "mimeType": "application/vnd.google-apps.folder"}]}"#,
        )
        .unwrap();

        assert_eq!(page.next_page_token.as_deref(), Some("tok"));
        assert_eq!(page.files.len(), 1);

        let last: DriveFileList = serde_json::from_str(r#"{"files": []}"#).unwrap();
        assert!(last.next_page_token.is_none());
    }
}
