use std::fmt;

// === DriveError ===

/// Errors raised by a drive transport. Always propagated to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriveError {
    /// The request could not be sent or the response could not be read.
    NetworkError(String),
    /// The access token was rejected or lacks the app-data scope.
    AuthFailed(String),
    /// The referenced file does not exist.
    NotFound(String),
    /// The drive API answered with an unexpected status or body.
    ApiError(String),
}

impl fmt::Display for DriveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriveError::NetworkError(msg) => write!(f, "Drive network error: {}", msg),
            DriveError::AuthFailed(msg) => write!(f, "Drive authorization failed: {}", msg),
            DriveError::NotFound(id) => write!(f, "Drive file not found: {}", id),
            DriveError::ApiError(msg) => write!(f, "Drive API error: {}", msg),
        }
    }
}

impl std::error::Error for DriveError {}

// === StoreError ===

/// Errors related to loading and saving the bookmark data file.
#[derive(Debug)]
pub enum StoreError {
    /// The drive transport failed.
    Transport(DriveError),
    /// The bookmark list could not be serialized.
    SerializationError(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Transport(err) => write!(f, "Bookmark store transport failure: {}", err),
            StoreError::SerializationError(msg) => {
                write!(f, "Bookmark store serialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Transport(err) => Some(err),
            StoreError::SerializationError(_) => None,
        }
    }
}

impl From<DriveError> for StoreError {
    fn from(err: DriveError) -> Self {
        StoreError::Transport(err)
    }
}

// === ImportError ===

/// Errors related to importing a user-supplied bookmark document.
#[derive(Debug)]
pub enum ImportError {
    /// The document matches none of the accepted shapes.
    ShapeMismatch(String),
    /// At least one element is missing a required field. Nothing was written.
    ValidationFailed {
        invalid_count: usize,
        first_error: String,
    },
    /// A merge was refused because the stored list could not be read in full.
    /// Nothing was written.
    StoreDegraded(String),
    /// Writing the imported list failed.
    Store(StoreError),
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportError::ShapeMismatch(msg) => write!(f, "Invalid import structure: {}", msg),
            ImportError::ValidationFailed {
                invalid_count,
                first_error,
            } => write!(
                f,
                "Invalid import payload: {} invalid bookmark(s), first: {}",
                invalid_count, first_error
            ),
            ImportError::StoreDegraded(reason) => {
                write!(f, "Refusing to merge into a damaged data file: {}", reason)
            }
            ImportError::Store(err) => write!(f, "Import failed: {}", err),
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImportError::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for ImportError {
    fn from(err: StoreError) -> Self {
        ImportError::Store(err)
    }
}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    IoError(String),
    /// Failed to serialize or deserialize settings.
    SerializationError(String),
    /// The provided settings key is invalid.
    InvalidKey(String),
    /// The provided settings value is invalid.
    InvalidValue(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
            SettingsError::InvalidKey(key) => write!(f, "Invalid settings key: {}", key),
            SettingsError::InvalidValue(msg) => {
                write!(f, "Invalid settings value: {}", msg)
            }
        }
    }
}

impl std::error::Error for SettingsError {}
