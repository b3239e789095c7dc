// Bookmark Saga managers
// Managers own the remote data file: resolving it, reading, writing and importing.

pub mod bookmark_store;
pub mod import_manager;
