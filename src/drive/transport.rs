//! The storage capability the bookmark store is written against.

use async_trait::async_trait;

use crate::types::drive::{AppProperties, FileMetadata, FileQuery, NewFile};
use crate::types::errors::DriveError;

/// List/create/update/get primitives over a drive's application area.
#[async_trait]
pub trait DriveTransport: Send + Sync {
    /// Lists the files matching `query`, most recently modified first.
    async fn list_files(&self, query: &FileQuery) -> Result<Vec<FileMetadata>, DriveError>;

    /// Creates a file and returns its id.
    async fn create_file(&self, file: NewFile) -> Result<String, DriveError>;

    /// Replaces the content and/or the identifying properties of a file.
    async fn update_file(
        &self,
        file_id: &str,
        body: Option<Vec<u8>>,
        app_properties: Option<AppProperties>,
    ) -> Result<(), DriveError>;

    /// Downloads the full content of a file.
    async fn get_file_content(&self, file_id: &str) -> Result<Vec<u8>, DriveError>;
}
