//! RPC method handler for the Bookmark Saga JSON-RPC protocol.
//!
//! Extracted from `rpc_server.rs` so it can be unit-tested independently.
//! The `handle_method` function dispatches JSON-RPC method calls to the
//! bookmark store and services via the `App` struct.

use serde_json::{json, Value};

use crate::app::App;
use crate::managers::bookmark_store::BookmarkStoreTrait;
use crate::managers::import_manager::{ImportManager, ImportMode};
use crate::services::bookmark_view::bookmark_view;

/// Dispatch a JSON-RPC method call to the appropriate handler.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub async fn handle_method(app: &App, method: &str, params: &Value) -> Result<Value, String> {
    let access_token = params.get("access_token").and_then(|v| v.as_str());

    match method {
        "ping" => Ok(json!({"pong": true, "version": env!("CARGO_PKG_VERSION")})),

        // ─── Settings ───
        "settings.get" => serde_json::to_value(app.settings()).map_err(|e| e.to_string()),
        "settings.set" => {
            let key = params.get("key").and_then(|v| v.as_str()).ok_or("missing key")?;
            let value = params.get("value").cloned().ok_or("missing value")?;
            let settings = app.set_setting(key, value).map_err(|e| e.to_string())?;
            serde_json::to_value(settings).map_err(|e| e.to_string())
        }
        "settings.reset" => {
            let settings = app.reset_settings().map_err(|e| e.to_string())?;
            serde_json::to_value(settings).map_err(|e| e.to_string())
        }

        // ─── Data file ───
        "data_file.ensure" => {
            let store = app.bookmark_store(access_token)?;
            let file_id = store.ensure_data_file().await.map_err(|e| e.to_string())?;
            Ok(json!({"file_id": file_id}))
        }
        "appdata.list" => {
            let store = app.bookmark_store(access_token)?;
            let files = store.list_app_data_files().await.map_err(|e| e.to_string())?;
            serde_json::to_value(files).map_err(|e| e.to_string())
        }

        // ─── Bookmarks ───
        "bookmarks.view" => {
            let folder = optional_str(params, "folder")?;
            let query = optional_str(params, "query")?;
            let store = app.bookmark_store(access_token)?;
            let bookmarks = store.read_bookmarks().await.map_err(|e| e.to_string())?;
            let view = bookmark_view(&bookmarks, folder, query);
            serde_json::to_value(view).map_err(|e| e.to_string())
        }
        "bookmarks.import" => {
            let document = params.get("document").ok_or("missing document")?;
            let mode = match params.get("mode") {
                None | Some(Value::Null) => ImportMode::default(),
                Some(mode) => serde_json::from_value::<ImportMode>(mode.clone())
                    .map_err(|_| "invalid mode: expected \"replace\" or \"merge\"".to_string())?,
            };
            let store = app.bookmark_store(access_token)?;
            let summary = ImportManager::new(&store)
                .import_value(document, mode)
                .await
                .map_err(|e| e.to_string())?;
            serde_json::to_value(summary).map_err(|e| e.to_string())
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}

fn optional_str<'a>(params: &'a Value, key: &str) -> Result<Option<&'a str>, String> {
    match params.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(format!("invalid {}: expected a string", key)),
    }
}
