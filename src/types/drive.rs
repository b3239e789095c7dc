use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Space and parent id of the drive's private per-application area.
pub const APP_DATA_FOLDER: &str = "appDataFolder";

/// Identifying key/value pairs attached to a drive file.
pub type AppProperties = BTreeMap<String, String>;

/// Metadata of a file in the application area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMetadata {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_properties: Option<AppProperties>,
}

/// Predicate for listing files.
///
/// Every condition that is set must hold for a file to match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileQuery {
    pub name: Option<String>,
    pub parent: String,
    /// Each pair must be present with exactly this value.
    pub app_properties: AppProperties,
    pub include_trashed: bool,
    pub page_size: u32,
}

impl FileQuery {
    /// All non-trashed files in the application area.
    pub fn in_app_data(page_size: u32) -> Self {
        Self {
            name: None,
            parent: APP_DATA_FOLDER.to_string(),
            app_properties: AppProperties::new(),
            include_trashed: false,
            page_size,
        }
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn with_app_properties(mut self, props: &AppProperties) -> Self {
        self.app_properties = props.clone();
        self
    }
}

/// A file to be created.
#[derive(Debug, Clone)]
pub struct NewFile {
    pub name: String,
    pub parent: String,
    pub mime_type: String,
    pub app_properties: AppProperties,
    pub body: Vec<u8>,
}
