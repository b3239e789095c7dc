//! Bookmark Saga RPC Server: JSON-RPC over stdin/stdout.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"bookmarks.view", "params":{"access_token":"...","folder":"Work"}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}
//!
//! Logs go to stderr so stdout carries protocol lines only.

use std::io::{self, Write};

use bookmark_saga::app::App;
use bookmark_saga::rpc_handler::handle_method;

use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn respond(response: &Value) {
    let mut stdout = io::stdout().lock();
    if writeln!(stdout, "{}", response).and_then(|()| stdout.flush()).is_err() {
        error!("failed to write response to stdout");
    }
}

#[tokio::main]
async fn main() {
    let config_path = std::env::var("BOOKMARK_SAGA_CONFIG").ok();
    let app = match App::new(config_path) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Failed to initialize Bookmark Saga: {}", e);
            std::process::exit(1);
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&app.settings().logging.filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    // Signal ready
    respond(&json!({"event":"ready","version":env!("CARGO_PKG_VERSION")}));
    info!(config = %app.config_path(), "rpc server ready");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(l)) => l,
            Ok(None) => break,
            Err(e) => {
                error!("stdin read failed: {}", e);
                break;
            }
        };
        if line.trim().is_empty() { continue; }

        let req: Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                respond(&json!({"id":null,"error":format!("parse error: {}",e)}));
                continue;
            }
        };

        let id = req.get("id").cloned().unwrap_or(Value::Null);
        let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("");
        let params = req.get("params").cloned().unwrap_or(json!({}));

        let response = match handle_method(&app, method, &params).await {
            Ok(val) => json!({"id": id, "result": val}),
            Err(err) => json!({"id": id, "error": err}),
        };
        respond(&response);
    }
}
