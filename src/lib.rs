//! Bookmark Saga: personal bookmarks kept in a cloud drive's app-data folder
//! and browsed as a folder tree derived from their tags.
//!
//! This library crate exposes all modules for use by the binary and integration tests.

pub mod app;
pub mod drive;
pub mod managers;
pub mod platform;
pub mod services;
pub mod rpc_handler;
pub mod types;
