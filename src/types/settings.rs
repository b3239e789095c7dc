use serde::{Deserialize, Serialize};

use super::drive::AppProperties;

/// Top-level settings container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SagaSettings {
    pub data_file: DataFileSettings,
    pub drive: DriveSettings,
    pub logging: LoggingSettings,
}

/// Name and identifying properties of the canonical remote data file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataFileSettings {
    pub file_name: String,
    pub app: String,
    /// Stored as the `type` identifying property.
    pub kind: String,
    pub version: String,
}

impl Default for DataFileSettings {
    fn default() -> Self {
        Self {
            file_name: "bookmark-saga-settings.json".to_string(),
            app: "bookmark-saga".to_string(),
            kind: "settings".to_string(),
            version: "1".to_string(),
        }
    }
}

impl DataFileSettings {
    /// The identifying property set attached to the data file.
    pub fn app_properties(&self) -> AppProperties {
        let mut props = AppProperties::new();
        props.insert("app".to_string(), self.app.clone());
        props.insert("type".to_string(), self.kind.clone());
        props.insert("version".to_string(), self.version.clone());
        props
    }
}

/// Google Drive endpoints and limits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DriveSettings {
    pub api_base_url: String,
    pub upload_base_url: String,
    pub page_size: u32,
    pub request_timeout_secs: u64,
}

impl Default for DriveSettings {
    fn default() -> Self {
        Self {
            api_base_url: "https://www.googleapis.com/drive/v3".to_string(),
            upload_base_url: "https://www.googleapis.com/upload/drive/v3".to_string(),
            page_size: 100,
            request_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingSettings {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}
