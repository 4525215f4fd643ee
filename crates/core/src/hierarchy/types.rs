//! Child descriptors returned by hierarchy listings.

use serde::{Deserialize, Serialize};

/// A child folder of a listed parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderRef {
    pub id: String,
    pub name: String,
}

/// A child item of a listed parent, folder or file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRef {
    pub id: String,
    /// Empty when the source item carries no name.
    pub name: String,
    /// View link, absent when the source exposes none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    pub is_folder: bool,
}
