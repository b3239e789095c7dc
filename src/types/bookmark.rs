use serde::{Deserialize, Serialize};

/// Folder name used for bookmarks that carry no tag.
pub const UNSORTED_FOLDER: &str = "Unsorted";

/// Represents a saved bookmark as persisted in the remote data file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub id: String,
    pub title: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon_url: Option<String>,
    /// Only the first tag decides where the bookmark sits in the folder tree.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// ISO-8601 timestamp.
    pub saved_at: String,
}

impl Bookmark {
    /// Returns the first tag, if any.
    pub fn primary_tag(&self) -> Option<&str> {
        self.tags
            .as_ref()
            .and_then(|tags| tags.first())
            .map(String::as_str)
    }
}

/// A node of the folder hierarchy derived from bookmark tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderNode {
    pub name: String,
    /// Slash-joined path from the root; empty for the synthetic root.
    pub path: String,
    pub count: usize,
    pub children: Vec<FolderNode>,
}

impl FolderNode {
    pub(crate) fn root() -> Self {
        Self {
            name: String::new(),
            path: String::new(),
            count: 0,
            children: Vec::new(),
        }
    }
}

/// One row of the flattened folder listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderEntry {
    pub path: String,
    pub name: String,
    pub depth: usize,
    pub count: usize,
}
