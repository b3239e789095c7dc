//! App Core for Bookmark Saga.
//!
//! Central struct holding the settings engine and deciding which drive the
//! bookmark store talks to.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::drive::{DriveTransport, GoogleDriveClient};
use crate::managers::bookmark_store::BookmarkStore;
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::types::errors::SettingsError;
use crate::types::settings::SagaSettings;

/// Where drive requests go.
pub enum DriveSource {
    /// Google Drive, authenticated per request with a caller-supplied token.
    Google,
    /// A fixed transport, shared by every request. Tokens are ignored.
    Fixed(Arc<dyn DriveTransport>),
}

/// Central application struct.
pub struct App {
    settings_engine: Mutex<SettingsEngine>,
    drive_source: DriveSource,
}

impl App {
    /// Creates an App wired to Google Drive, loading settings from
    /// `config_path` or the platform default.
    pub fn new(config_path: Option<String>) -> Result<Self, Box<dyn std::error::Error>> {
        let mut settings_engine = SettingsEngine::new(config_path);
        settings_engine.load()?;

        Ok(Self {
            settings_engine: Mutex::new(settings_engine),
            drive_source: DriveSource::Google,
        })
    }

    /// Creates an App that sends every request to `drive`.
    pub fn with_transport(settings_engine: SettingsEngine, drive: Arc<dyn DriveTransport>) -> Self {
        Self {
            settings_engine: Mutex::new(settings_engine),
            drive_source: DriveSource::Fixed(drive),
        }
    }

    /// A snapshot of the current settings.
    pub fn settings(&self) -> SagaSettings {
        self.engine().get_settings().clone()
    }

    pub fn config_path(&self) -> String {
        self.engine().get_config_path().to_string()
    }

    /// Updates one setting by dot-path and persists it. Returns the new settings.
    pub fn set_setting(&self, key: &str, value: serde_json::Value) -> Result<SagaSettings, SettingsError> {
        let mut engine = self.engine();
        engine.set_value(key, value)?;
        Ok(engine.get_settings().clone())
    }

    /// Restores and persists the default settings.
    pub fn reset_settings(&self) -> Result<SagaSettings, SettingsError> {
        let mut engine = self.engine();
        engine.reset()?;
        Ok(engine.get_settings().clone())
    }

    /// Builds a bookmark store for one request, using the settings current
    /// at the time of the call.
    ///
    /// Google Drive needs a non-empty access token; without one the call
    /// fails with `unauthorized`.
    pub fn bookmark_store(&self, access_token: Option<&str>) -> Result<BookmarkStore, String> {
        let settings = self.settings();
        let drive: Arc<dyn DriveTransport> = match &self.drive_source {
            DriveSource::Fixed(drive) => Arc::clone(drive),
            DriveSource::Google => {
                let token = access_token
                    .filter(|token| !token.is_empty())
                    .ok_or_else(|| "unauthorized".to_string())?;
                let client = GoogleDriveClient::new(token, &settings.drive).map_err(|e| e.to_string())?;
                Arc::new(client)
            }
        };
        Ok(BookmarkStore::new(drive, &settings))
    }

    fn engine(&self) -> MutexGuard<'_, SettingsEngine> {
        self.settings_engine.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
