//! In-process drive used by tests and offline runs.
//!
//! Evaluates [`FileQuery`] predicates the way the Drive API does for the
//! subset of conditions the store uses, and can be switched offline to
//! exercise transport failures.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};

use crate::drive::transport::DriveTransport;
use crate::types::drive::{AppProperties, FileMetadata, FileQuery, NewFile, APP_DATA_FOLDER};
use crate::types::errors::DriveError;

struct StoredFile {
    id: String,
    name: String,
    parent: String,
    mime_type: String,
    app_properties: Option<AppProperties>,
    trashed: bool,
    body: Vec<u8>,
    modified_time: String,
    revision: u64,
}

impl StoredFile {
    fn metadata(&self) -> FileMetadata {
        FileMetadata {
            id: self.id.clone(),
            name: self.name.clone(),
            mime_type: Some(self.mime_type.clone()),
            size: Some(self.body.len().to_string()),
            modified_time: Some(self.modified_time.clone()),
            app_properties: self.app_properties.clone(),
        }
    }

    fn matches(&self, query: &FileQuery) -> bool {
        if self.trashed && !query.include_trashed {
            return false;
        }
        if self.parent != query.parent {
            return false;
        }
        if let Some(name) = &query.name {
            if &self.name != name {
                return false;
            }
        }
        query.app_properties.iter().all(|(key, value)| {
            self.app_properties
                .as_ref()
                .and_then(|props| props.get(key))
                == Some(value)
        })
    }

    fn touch(&mut self, revision: u64) {
        self.revision = revision;
        self.modified_time = now();
    }
}

#[derive(Default)]
struct DriveState {
    files: Vec<StoredFile>,
    revision: u64,
    creates: usize,
    updates: usize,
}

impl DriveState {
    fn next_revision(&mut self) -> u64 {
        self.revision += 1;
        self.revision
    }

    fn file_mut(&mut self, file_id: &str) -> Result<&mut StoredFile, DriveError> {
        self.files
            .iter_mut()
            .find(|f| f.id == file_id && !f.trashed)
            .ok_or_else(|| DriveError::NotFound(file_id.to_string()))
    }
}

/// Drive transport that keeps every file in memory.
#[derive(Default)]
pub struct InMemoryDrive {
    state: Mutex<DriveState>,
    offline: AtomicBool,
}

impl InMemoryDrive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every transport call fail with a network error while `offline` is true.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Stores a file in the application area without going through the
    /// transport, e.g. a legacy data file. Returns its id.
    pub fn seed_file(&self, name: &str, app_properties: Option<AppProperties>, body: &[u8]) -> String {
        let mut state = self.state();
        let revision = state.next_revision();
        let id = format!("file-{}", revision);
        state.files.push(StoredFile {
            id: id.clone(),
            name: name.to_string(),
            parent: APP_DATA_FOLDER.to_string(),
            mime_type: "application/json".to_string(),
            app_properties,
            trashed: false,
            body: body.to_vec(),
            modified_time: now(),
            revision,
        });
        id
    }

    /// Moves a file to the trash.
    pub fn trash_file(&self, file_id: &str) {
        if let Some(file) = self.state().files.iter_mut().find(|f| f.id == file_id) {
            file.trashed = true;
        }
    }

    pub fn file_metadata(&self, file_id: &str) -> Option<FileMetadata> {
        self.state()
            .files
            .iter()
            .find(|f| f.id == file_id)
            .map(StoredFile::metadata)
    }

    pub fn file_content(&self, file_id: &str) -> Option<Vec<u8>> {
        self.state()
            .files
            .iter()
            .find(|f| f.id == file_id)
            .map(|f| f.body.clone())
    }

    /// Number of files that are not trashed.
    pub fn file_count(&self) -> usize {
        self.state().files.iter().filter(|f| !f.trashed).count()
    }

    /// Number of successful `create_file` calls.
    pub fn create_count(&self) -> usize {
        self.state().creates
    }

    /// Number of successful `update_file` calls.
    pub fn update_count(&self) -> usize {
        self.state().updates
    }

    fn state(&self) -> MutexGuard<'_, DriveState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check_online(&self) -> Result<(), DriveError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(DriveError::NetworkError("drive is offline".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl DriveTransport for InMemoryDrive {
    async fn list_files(&self, query: &FileQuery) -> Result<Vec<FileMetadata>, DriveError> {
        self.check_online()?;
        let state = self.state();
        let mut matching: Vec<&StoredFile> =
            state.files.iter().filter(|f| f.matches(query)).collect();
        matching.sort_by(|a, b| b.revision.cmp(&a.revision));
        Ok(matching
            .into_iter()
            .take(query.page_size as usize)
            .map(StoredFile::metadata)
            .collect())
    }

    async fn create_file(&self, file: NewFile) -> Result<String, DriveError> {
        self.check_online()?;
        let mut state = self.state();
        let revision = state.next_revision();
        let id = format!("file-{}", revision);
        state.files.push(StoredFile {
            id: id.clone(),
            name: file.name,
            parent: file.parent,
            mime_type: file.mime_type,
            app_properties: Some(file.app_properties),
            trashed: false,
            body: file.body,
            modified_time: now(),
            revision,
        });
        state.creates += 1;
        Ok(id)
    }

    async fn update_file(
        &self,
        file_id: &str,
        body: Option<Vec<u8>>,
        app_properties: Option<AppProperties>,
    ) -> Result<(), DriveError> {
        self.check_online()?;
        let mut state = self.state();
        let revision = state.next_revision();
        let file = state.file_mut(file_id)?;
        if let Some(body) = body {
            file.body = body;
        }
        if let Some(props) = app_properties {
            // Drive merges appProperties key by key.
            file.app_properties.get_or_insert_with(AppProperties::new).extend(props);
        }
        file.touch(revision);
        state.updates += 1;
        Ok(())
    }

    async fn get_file_content(&self, file_id: &str) -> Result<Vec<u8>, DriveError> {
        self.check_online()?;
        let mut state = self.state();
        let file = state.file_mut(file_id)?;
        Ok(file.body.clone())
    }
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
