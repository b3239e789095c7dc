use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A folder of an external export. Only lives for one normalization call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportFolder {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<String>,
}

/// A bookmark item of an external export.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportBookmarkItem {
    pub url: String,
    pub title: String,
    #[serde(default)]
    pub favicon_url: Option<String>,
    /// Epoch milliseconds, kept as the raw JSON number so the synthesized id
    /// renders it exactly as the document did.
    pub saved_at: serde_json::Number,
    #[serde(default)]
    pub visit_time: Option<serde_json::Number>,
}

/// Items grouped by the id of the folder that holds them.
pub type FolderItems = BTreeMap<String, Vec<ExportBookmarkItem>>;

/// Standalone export file written by the browser extension.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderGraphExport {
    pub version: serde_json::Number,
    pub exported_at: String,
    pub folders: Vec<ExportFolder>,
    pub folder_items: FolderItems,
}

/// Sync payload pushed by the extension into the data file before the
/// canonical array format existed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncPayloadExport {
    pub version: serde_json::Value,
    pub data: SyncPayloadData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncPayloadData {
    pub bookmark_saga_folders: Vec<ExportFolder>,
    pub bookmark_saga_folder_items: FolderItems,
}

/// Every export shape the normalizer knows how to read.
#[derive(Debug, Clone)]
pub enum ExportShape {
    FolderGraph(FolderGraphExport),
    SyncPayload(SyncPayloadExport),
}

impl ExportShape {
    /// Returns the folder list and the items map regardless of variant.
    pub fn parts(&self) -> (&[ExportFolder], &FolderItems) {
        match self {
            ExportShape::FolderGraph(export) => (&export.folders, &export.folder_items),
            ExportShape::SyncPayload(payload) => (
                &payload.data.bookmark_saga_folders,
                &payload.data.bookmark_saga_folder_items,
            ),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ExportShape::FolderGraph(_) => "folder-graph",
            ExportShape::SyncPayload(_) => "sync-payload",
        }
    }
}
