// Bookmark Saga shared type definitions
// Each submodule defines types used across the application.

pub mod bookmark;
pub mod drive;
pub mod errors;
pub mod export;
pub mod settings;
