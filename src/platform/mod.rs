// Bookmark Saga platform paths
// Only the configuration directory is needed; everything else lives in the drive.

use std::env;
use std::path::PathBuf;

/// Returns the platform-specific configuration directory.
///
/// - **Linux**: `$XDG_CONFIG_HOME/bookmark-saga` or `~/.config/bookmark-saga`
/// - **macOS**: `~/Library/Application Support/BookmarkSaga`
/// - **Windows**: `%APPDATA%/BookmarkSaga`
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        let appdata = env::var("APPDATA")
            .unwrap_or_else(|_| String::from("C:\\Users\\Default\\AppData\\Roaming"));
        PathBuf::from(appdata).join("BookmarkSaga")
    }
    #[cfg(target_os = "macos")]
    {
        home_dir()
            .join("Library")
            .join("Application Support")
            .join("BookmarkSaga")
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        match env::var("XDG_CONFIG_HOME") {
            Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg).join("bookmark-saga"),
            _ => home_dir().join(".config").join("bookmark-saga"),
        }
    }
}

#[cfg(not(target_os = "windows"))]
fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}
