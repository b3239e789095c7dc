//! Import Manager for Bookmark Saga.
//!
//! Turns a user-chosen JSON document into canonical bookmarks and writes
//! them through a [`BookmarkStoreTrait`]. Accepted documents, tried in order:
//! a recognized extension export, a plain array of bookmarks, an object with
//! a `bookmarks` array. A batch with any invalid element is rejected whole.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::managers::bookmark_store::BookmarkStoreTrait;
use crate::services::export_normalizer::normalize_export;
use crate::types::bookmark::Bookmark;
use crate::types::errors::ImportError;

const REQUIRED_FIELDS: &[&str] = &["id", "title", "url", "savedAt"];

/// How imported bookmarks are combined with the stored list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportMode {
    /// The stored list is overwritten.
    #[default]
    Replace,
    /// Stored bookmarks are kept unless an imported one has the same id.
    /// Refused when the stored list cannot be read in full.
    Merge,
}

/// Outcome of a successful import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    /// Bookmarks found in the document.
    pub imported: usize,
    /// Bookmarks in the list that was written.
    pub written: usize,
}

/// Import manager writing through a bookmark store.
pub struct ImportManager<'a> {
    store: &'a dyn BookmarkStoreTrait,
}

impl<'a> ImportManager<'a> {
    /// Creates a new `ImportManager` using the provided store.
    pub fn new(store: &'a dyn BookmarkStoreTrait) -> Self {
        Self { store }
    }

    /// Parses, validates and writes a raw JSON document.
    pub async fn import_document(&self, raw: &str, mode: ImportMode) -> Result<ImportSummary, ImportError> {
        let bookmarks = parse_import_document(raw)?;
        self.import_bookmarks(bookmarks, mode).await
    }

    /// Validates and writes an already parsed document.
    pub async fn import_value(&self, value: &Value, mode: ImportMode) -> Result<ImportSummary, ImportError> {
        let bookmarks = extract_import_payload(value)?;
        self.import_bookmarks(bookmarks, mode).await
    }

    /// Writes canonical bookmarks according to `mode`.
    pub async fn import_bookmarks(
        &self,
        imported: Vec<Bookmark>,
        mode: ImportMode,
    ) -> Result<ImportSummary, ImportError> {
        let imported_count = imported.len();
        let list = match mode {
            ImportMode::Replace => imported,
            ImportMode::Merge => {
                let existing = self.store.read_contents().await?;
                if let Some(reason) = existing.degraded {
                    warn!(%reason, "merge refused, stored list is incomplete");
                    return Err(ImportError::StoreDegraded(reason));
                }
                merge_bookmarks(existing.bookmarks, imported)
            }
        };

        self.store.write_bookmarks(&list).await?;
        info!(imported = imported_count, written = list.len(), ?mode, "bookmarks imported");
        Ok(ImportSummary {
            imported: imported_count,
            written: list.len(),
        })
    }
}

/// Parses raw text and extracts canonical bookmarks from it.
pub fn parse_import_document(raw: &str) -> Result<Vec<Bookmark>, ImportError> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| ImportError::ShapeMismatch(format!("not valid JSON: {}", e)))?;
    extract_import_payload(&value)
}

/// Extracts canonical bookmarks from a parsed import document.
pub fn extract_import_payload(value: &Value) -> Result<Vec<Bookmark>, ImportError> {
    if let Some(bookmarks) = normalize_export(value) {
        return Ok(bookmarks);
    }

    let items = match value {
        Value::Array(items) => items,
        Value::Object(obj) => match obj.get("bookmarks") {
            Some(Value::Array(items)) => items,
            _ => return Err(shape_mismatch()),
        },
        _ => return Err(shape_mismatch()),
    };
    validate_bookmarks(items)
}

/// Checks every element for the required string fields and converts the
/// batch. Fails with the number of invalid elements and the first problem.
pub fn validate_bookmarks(items: &[Value]) -> Result<Vec<Bookmark>, ImportError> {
    let mut bookmarks = Vec::with_capacity(items.len());
    let mut invalid_count = 0;
    let mut first_error: Option<String> = None;

    for (index, item) in items.iter().enumerate() {
        let converted = check_required_fields(item).and_then(|()| {
            serde_json::from_value::<Bookmark>(item.clone()).map_err(|e| e.to_string())
        });
        match converted {
            Ok(bookmark) => bookmarks.push(bookmark),
            Err(reason) => {
                invalid_count += 1;
                first_error.get_or_insert_with(|| format!("item {}: {}", index, reason));
            }
        }
    }

    match first_error {
        Some(first_error) => Err(ImportError::ValidationFailed {
            invalid_count,
            first_error,
        }),
        None => Ok(bookmarks),
    }
}

/// Unions two lists by id, imported records winning, most recent first.
pub fn merge_bookmarks(existing: Vec<Bookmark>, imported: Vec<Bookmark>) -> Vec<Bookmark> {
    let imported_ids: HashSet<&str> = imported.iter().map(|b| b.id.as_str()).collect();
    let mut merged: Vec<Bookmark> = existing
        .into_iter()
        .filter(|b| !imported_ids.contains(b.id.as_str()))
        .collect();
    merged.extend(imported.iter().cloned());
    merged.sort_by(|a, b| b.saved_at.cmp(&a.saved_at));
    merged
}

fn check_required_fields(item: &Value) -> Result<(), String> {
    let obj = item
        .as_object()
        .ok_or_else(|| "not an object".to_string())?;
    for field in REQUIRED_FIELDS {
        if !obj.get(*field).map_or(false, Value::is_string) {
            return Err(format!("missing string `{}`", field));
        }
    }
    Ok(())
}

fn shape_mismatch() -> ImportError {
    ImportError::ShapeMismatch(
        "expected an export, an array of bookmarks or an object with a `bookmarks` array"
            .to_string(),
    )
}
