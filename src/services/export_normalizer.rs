//! Conversion of extension exports into canonical bookmarks.
//!
//! Each known export shape has its own detector. Detectors run in a fixed
//! order and the first match wins. A document no detector accepts yields
//! `None` so callers can fall back to plain arrays.

use std::collections::{HashMap, HashSet};

use chrono::{SecondsFormat, TimeZone, Utc};
use serde_json::Value;
use tracing::{debug, warn};

use crate::types::bookmark::{Bookmark, UNSORTED_FOLDER};
use crate::types::export::{
    ExportBookmarkItem, ExportFolder, ExportShape, FolderGraphExport, SyncPayloadExport,
};

/// Separator used between folder names in the labels this module produces.
pub const FOLDER_LABEL_SEPARATOR: &str = " / ";

type Detector = fn(&Value) -> Option<ExportShape>;

/// Detectors in priority order. A new export shape is a new variant plus a
/// new entry here.
const DETECTORS: &[Detector] = &[detect_folder_graph, detect_sync_payload];

/// Returns the export shape `value` matches, if any.
pub fn detect_shape(value: &Value) -> Option<ExportShape> {
    DETECTORS.iter().find_map(|detect| detect(value))
}

/// Converts a recognized export document into canonical bookmarks, most
/// recent first. Returns `None` when the document is not a known export.
pub fn normalize_export(value: &Value) -> Option<Vec<Bookmark>> {
    let shape = detect_shape(value)?;
    debug!(shape = shape.kind(), "recognized export document");
    Some(extract_bookmarks(&shape))
}

/// Converts an already detected export into canonical bookmarks.
pub fn extract_bookmarks(shape: &ExportShape) -> Vec<Bookmark> {
    let (folders, folder_items) = shape.parts();
    let mut paths = FolderPaths::new(folders);

    let mut bookmarks = Vec::new();
    for (folder_id, items) in folder_items {
        let folder_path = paths
            .path_of(folder_id)
            .unwrap_or_else(|| UNSORTED_FOLDER.to_string());
        for item in items {
            match to_bookmark(item, &folder_path) {
                Some(bookmark) => bookmarks.push(bookmark),
                None => warn!(
                    url = %item.url,
                    saved_at = %item.saved_at,
                    "skipping export item with an unrepresentable timestamp"
                ),
            }
        }
    }

    bookmarks.sort_by(|a, b| b.saved_at.cmp(&a.saved_at));
    bookmarks
}

/// Renders epoch milliseconds as an ISO-8601 UTC string with millisecond
/// precision, e.g. `2023-11-14T22:13:20.000Z`.
pub fn iso_from_millis(millis: i64) -> Option<String> {
    Utc.timestamp_millis_opt(millis)
        .single()
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Extracts the host of a URL, `None` when the URL does not parse or has no host.
pub fn domain_of(url: &str) -> Option<String> {
    reqwest::Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_string))
        .filter(|host| !host.is_empty())
}

fn detect_folder_graph(value: &Value) -> Option<ExportShape> {
    let obj = value.as_object()?;
    let looks_like = obj.get("version")?.is_number()
        && obj.get("exportedAt")?.is_string()
        && obj.get("folders")?.is_array()
        && obj.get("folderItems")?.is_object();
    if !looks_like {
        return None;
    }
    serde_json::from_value::<FolderGraphExport>(value.clone())
        .map_err(|e| debug!("folder-graph export has malformed entries: {}", e))
        .ok()
        .map(ExportShape::FolderGraph)
}

fn detect_sync_payload(value: &Value) -> Option<ExportShape> {
    let obj = value.as_object()?;
    let version_ok = match obj.get("version")? {
        Value::Number(n) => n.as_f64() == Some(1.0),
        Value::String(s) => s == "1",
        _ => false,
    };
    let data = obj.get("data")?.as_object()?;
    let looks_like = version_ok
        && data.get("bookmarkSagaFolders")?.is_array()
        && data.get("bookmarkSagaFolderItems")?.is_object();
    if !looks_like {
        return None;
    }
    serde_json::from_value::<SyncPayloadExport>(value.clone())
        .map_err(|e| debug!("sync payload has malformed entries: {}", e))
        .ok()
        .map(ExportShape::SyncPayload)
}

/// Renders a JSON number the way the extension's ids do: whole numbers
/// without a fractional part, whatever form the document used.
pub fn number_text(number: &serde_json::Number) -> String {
    if let Some(i) = number.as_i64() {
        return i.to_string();
    }
    if let Some(u) = number.as_u64() {
        return u.to_string();
    }
    match number.as_f64() {
        Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e21 => format!("{:.0}", f),
        Some(f) => f.to_string(),
        None => number.to_string(),
    }
}

fn to_bookmark(item: &ExportBookmarkItem, folder_path: &str) -> Option<Bookmark> {
    let millis = item
        .saved_at
        .as_i64()
        .or_else(|| item.saved_at.as_f64().map(|f| f.trunc() as i64))?;
    let saved_at = iso_from_millis(millis)?;

    Some(Bookmark {
        id: format!("{}|{}", item.url, number_text(&item.saved_at)),
        title: item.title.clone(),
        url: item.url.clone(),
        domain: domain_of(&item.url),
        favicon_url: item.favicon_url.clone(),
        tags: Some(vec![folder_path.to_string()]),
        saved_at,
    })
}

/// Memoized resolution of folder ids to `Parent / Child` labels.
struct FolderPaths<'a> {
    folders: HashMap<&'a str, &'a ExportFolder>,
    cache: HashMap<&'a str, String>,
}

impl<'a> FolderPaths<'a> {
    fn new(folders: &'a [ExportFolder]) -> Self {
        Self {
            folders: folders.iter().map(|f| (f.id.as_str(), f)).collect(),
            cache: HashMap::new(),
        }
    }

    /// Returns the label of a folder, or `None` if the id is unknown.
    ///
    /// Walks up the parent chain until it reaches a root, a cached ancestor,
    /// an unknown parent or an id already on the chain. The last two end the
    /// label at the folder reached so far. Folders on the chain are cached,
    /// so shared ancestors are resolved once; members of a cycle are not.
    fn path_of(&mut self, id: &str) -> Option<String> {
        let start = self.folders.get(id).copied()?;

        let mut chain: Vec<&'a ExportFolder> = Vec::new();
        let mut visited: HashSet<&'a str> = HashSet::new();
        let mut prefix: Option<String> = None;
        let mut cycle_start: Option<usize> = None;
        let mut next = Some(start);

        while let Some(folder) = next {
            if !visited.insert(folder.id.as_str()) {
                debug!(folder_id = %folder.id, "folder parent cycle, truncating label");
                cycle_start = chain.iter().position(|f| f.id == folder.id);
                break;
            }
            if let Some(cached) = self.cache.get(folder.id.as_str()) {
                prefix = Some(cached.clone());
                break;
            }
            chain.push(folder);
            next = match folder.parent_id.as_deref().filter(|p| !p.is_empty()) {
                Some(parent_id) => {
                    let parent = self.folders.get(parent_id).copied();
                    if parent.is_none() {
                        debug!(folder_id = %folder.id, parent_id, "unresolved parent folder");
                    }
                    parent
                }
                None => None,
            };
        }

        // Labels of folders on a cycle depend on where the walk entered it,
        // so only the folders leading into the cycle are cached.
        let cacheable = cycle_start.unwrap_or(chain.len());
        for (index, folder) in chain.into_iter().enumerate().rev() {
            let label = match prefix {
                Some(parent) => format!("{}{}{}", parent, FOLDER_LABEL_SEPARATOR, folder.name),
                None => folder.name.clone(),
            };
            if index < cacheable {
                self.cache.insert(folder.id.as_str(), label.clone());
            }
            prefix = Some(label);
        }
        prefix
    }
}
