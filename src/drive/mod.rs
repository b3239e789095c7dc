//! Drive storage layer.
//!
//! The bookmark store only sees [`DriveTransport`]. Two implementations ship
//! with the crate:
//!
//! ```no_run
//! use bookmark_saga::drive::{GoogleDriveClient, InMemoryDrive};
//! use bookmark_saga::types::settings::DriveSettings;
//!
//! // Google Drive, authenticated with an OAuth access token
//! let drive = GoogleDriveClient::new("ya29.token", &DriveSettings::default())
//!     .expect("failed to build http client");
//!
//! // Or an in-process drive for tests
//! let drive = InMemoryDrive::new();
//! ```

pub mod http;
pub mod memory;
pub mod transport;

pub use http::GoogleDriveClient;
pub use memory::InMemoryDrive;
pub use transport::DriveTransport;
