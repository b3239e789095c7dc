//! Bookmark Store for Bookmark Saga.
//!
//! Implements `BookmarkStoreTrait`: locating (or creating) the single
//! canonical data file in the drive's application area, and loading or
//! replacing the bookmark list it holds.
//!
//! Resolution is a three-step search. A strict match on name and
//! identifying properties comes first. A name-only match comes next, and its
//! properties are repaired. A new file is created last. The search is not
//! atomic: two first-time callers racing each other may both create a file.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::drive::transport::DriveTransport;
use crate::services::export_normalizer::normalize_export;
use crate::types::bookmark::Bookmark;
use crate::types::drive::{AppProperties, FileMetadata, FileQuery, NewFile, APP_DATA_FOLDER};
use crate::types::errors::StoreError;
use crate::types::settings::{DataFileSettings, SagaSettings};

const DATA_FILE_MIME: &str = "application/json";

/// Trait defining bookmark persistence operations.
#[async_trait]
pub trait BookmarkStoreTrait: Send + Sync {
    /// Returns the id of the canonical data file, creating it if needed.
    async fn ensure_data_file(&self) -> Result<String, StoreError>;
    /// Loads the bookmark list. Unreadable documents load as an empty list;
    /// transport failures are returned.
    async fn read_bookmarks(&self) -> Result<Vec<Bookmark>, StoreError>;
    /// Like `read_bookmarks`, but also reports whether anything stored was dropped.
    async fn read_contents(&self) -> Result<DataFileContents, StoreError>;
    /// Replaces the whole bookmark list.
    async fn write_bookmarks(&self, bookmarks: &[Bookmark]) -> Result<(), StoreError>;
    /// Lists every file in the application area, newest first.
    async fn list_app_data_files(&self) -> Result<Vec<FileMetadata>, StoreError>;
}

/// Bookmark store backed by a drive transport.
pub struct BookmarkStore {
    drive: Arc<dyn DriveTransport>,
    data_file: DataFileSettings,
    page_size: u32,
}

impl BookmarkStore {
    /// Creates a new `BookmarkStore` over the given transport.
    pub fn new(drive: Arc<dyn DriveTransport>, settings: &SagaSettings) -> Self {
        Self {
            drive,
            data_file: settings.data_file.clone(),
            page_size: settings.drive.page_size,
        }
    }

    fn name_query(&self) -> FileQuery {
        FileQuery::in_app_data(1).named(&self.data_file.file_name)
    }
}

#[async_trait]
impl BookmarkStoreTrait for BookmarkStore {
    async fn ensure_data_file(&self) -> Result<String, StoreError> {
        let props = self.data_file.app_properties();

        let strict = self.name_query().with_app_properties(&props);
        if let Some(file) = self.drive.list_files(&strict).await?.into_iter().next() {
            debug!(file_id = %file.id, "data file resolved");
            return Ok(file.id);
        }

        if let Some(file) = self.drive.list_files(&self.name_query()).await?.into_iter().next() {
            let intact = file
                .app_properties
                .as_ref()
                .map_or(false, |existing| has_properties(existing, &props));
            if !intact {
                info!(file_id = %file.id, "repairing identifying properties of data file");
                self.drive.update_file(&file.id, None, Some(props)).await?;
            }
            return Ok(file.id);
        }

        let id = self
            .drive
            .create_file(NewFile {
                name: self.data_file.file_name.clone(),
                parent: APP_DATA_FOLDER.to_string(),
                mime_type: DATA_FILE_MIME.to_string(),
                app_properties: props,
                body: b"[]".to_vec(),
            })
            .await?;
        info!(file_id = %id, name = %self.data_file.file_name, "created data file");
        Ok(id)
    }

    async fn read_bookmarks(&self) -> Result<Vec<Bookmark>, StoreError> {
        Ok(self.read_contents().await?.bookmarks)
    }

    async fn read_contents(&self) -> Result<DataFileContents, StoreError> {
        let file_id = self.ensure_data_file().await?;
        let content = self.drive.get_file_content(&file_id).await?;
        let contents = decode_data_file(&content);
        debug!(file_id = %file_id, count = contents.bookmarks.len(), "bookmarks loaded");
        Ok(contents)
    }

    async fn write_bookmarks(&self, bookmarks: &[Bookmark]) -> Result<(), StoreError> {
        let file_id = self.ensure_data_file().await?;
        let body = serde_json::to_vec(bookmarks)
            .map_err(|e| StoreError::SerializationError(e.to_string()))?;
        self.drive.update_file(&file_id, Some(body), None).await?;
        info!(file_id = %file_id, count = bookmarks.len(), "bookmarks written");
        Ok(())
    }

    async fn list_app_data_files(&self) -> Result<Vec<FileMetadata>, StoreError> {
        let files = self
            .drive
            .list_files(&FileQuery::in_app_data(self.page_size))
            .await?;
        Ok(files)
    }
}

/// Bookmarks decoded from the data file, plus what could not be decoded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataFileContents {
    pub bookmarks: Vec<Bookmark>,
    /// Why part or all of the document was dropped. `None` when every stored
    /// record made it into `bookmarks`.
    pub degraded: Option<String>,
}

impl DataFileContents {
    fn unreadable(reason: String) -> Self {
        Self {
            bookmarks: Vec::new(),
            degraded: Some(reason),
        }
    }
}

/// Decodes the content of the data file.
///
/// A JSON array is taken as canonical bookmarks, element by element; elements
/// that are not bookmarks are skipped. Any other document goes through the
/// export normalizer. Content that is not UTF-8, not JSON or of an unknown
/// shape decodes to an empty list.
pub fn decode_data_file(content: &[u8]) -> DataFileContents {
    let text = match std::str::from_utf8(content) {
        Ok(text) => text,
        Err(e) => {
            warn!("data file is not valid UTF-8: {}", e);
            return DataFileContents::unreadable(format!("not valid UTF-8: {}", e));
        }
    };

    let value: Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(e) => {
            warn!("data file is not valid JSON: {}", e);
            return DataFileContents::unreadable(format!("not valid JSON: {}", e));
        }
    };

    if let Value::Array(items) = value {
        let total = items.len();
        let bookmarks: Vec<Bookmark> = items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect();
        let skipped = total - bookmarks.len();
        if skipped == 0 {
            return DataFileContents {
                bookmarks,
                degraded: None,
            };
        }
        warn!(skipped, kept = bookmarks.len(), "data file array holds malformed bookmarks");
        return DataFileContents {
            bookmarks,
            degraded: Some(format!("{} malformed bookmark(s) skipped", skipped)),
        };
    }

    match normalize_export(&value) {
        Some(bookmarks) => {
            info!(count = bookmarks.len(), "data file holds a legacy export, normalized");
            DataFileContents {
                bookmarks,
                degraded: None,
            }
        }
        None => {
            warn!("data file holds an unrecognized document");
            DataFileContents::unreadable("unrecognized document".to_string())
        }
    }
}

/// Decodes the content of the data file, keeping only the bookmarks.
pub fn decode_bookmarks(content: &[u8]) -> Vec<Bookmark> {
    decode_data_file(content).bookmarks
}

fn has_properties(existing: &AppProperties, expected: &AppProperties) -> bool {
    expected
        .iter()
        .all(|(key, value)| existing.get(key) == Some(value))
}
