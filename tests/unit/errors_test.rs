use std::error::Error;

use bookmark_saga::types::errors::*;

// === DriveError Tests ===

#[test]
fn drive_error_display_variants() {
    assert_eq!(
        DriveError::NetworkError("timed out".to_string()).to_string(),
        "Drive network error: timed out"
    );
    assert_eq!(
        DriveError::AuthFailed("401".to_string()).to_string(),
        "Drive authorization failed: 401"
    );
    assert_eq!(
        DriveError::NotFound("file-7".to_string()).to_string(),
        "Drive file not found: file-7"
    );
    assert_eq!(
        DriveError::ApiError("500".to_string()).to_string(),
        "Drive API error: 500"
    );
}

#[test]
fn drive_error_implements_error_trait() {
    let err: Box<dyn Error> = Box::new(DriveError::NotFound("id".to_string()));
    assert!(err.source().is_none());
}

// === StoreError Tests ===

#[test]
fn store_error_wraps_transport_failure() {
    let err: StoreError = DriveError::NetworkError("offline".to_string()).into();
    assert_eq!(
        err.to_string(),
        "Bookmark store transport failure: Drive network error: offline"
    );
    let source = err.source().expect("transport errors expose their cause");
    assert_eq!(source.to_string(), "Drive network error: offline");
}

#[test]
fn store_error_serialization_has_no_source() {
    let err = StoreError::SerializationError("bad".to_string());
    assert_eq!(err.to_string(), "Bookmark store serialization error: bad");
    assert!(err.source().is_none());
}

// === ImportError Tests ===

#[test]
fn import_error_display_variants() {
    assert_eq!(
        ImportError::ShapeMismatch("expected an array".to_string()).to_string(),
        "Invalid import structure: expected an array"
    );
    assert_eq!(
        ImportError::ValidationFailed {
            invalid_count: 2,
            first_error: "item 0: missing string `url`".to_string(),
        }
        .to_string(),
        "Invalid import payload: 2 invalid bookmark(s), first: item 0: missing string `url`"
    );
}

#[test]
fn import_error_store_degraded_display() {
    let err = ImportError::StoreDegraded("unrecognized document".to_string());
    assert_eq!(
        err.to_string(),
        "Refusing to merge into a damaged data file: unrecognized document"
    );
    assert!(err.source().is_none());
}

#[test]
fn import_error_from_store_error_chains_sources() {
    let err: ImportError = StoreError::from(DriveError::AuthFailed("expired".to_string())).into();
    assert!(err.to_string().starts_with("Import failed: "));
    let store = err.source().expect("store errors expose their cause");
    assert!(store.source().is_some());
}

// === SettingsError Tests ===

#[test]
fn settings_error_display_variants() {
    assert_eq!(
        SettingsError::IoError("disk full".to_string()).to_string(),
        "Settings I/O error: disk full"
    );
    assert_eq!(
        SettingsError::SerializationError("bad json".to_string()).to_string(),
        "Settings serialization error: bad json"
    );
    assert_eq!(
        SettingsError::InvalidKey("drive.bogus".to_string()).to_string(),
        "Invalid settings key: drive.bogus"
    );
    assert_eq!(
        SettingsError::InvalidValue("page_size".to_string()).to_string(),
        "Invalid settings value: page_size"
    );
}
