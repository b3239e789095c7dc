// Bookmark Saga services
// Stateless computations over bookmark lists plus the settings engine.

pub mod bookmark_view;
pub mod export_normalizer;
pub mod folder_tree;
pub mod path_resolver;
pub mod query_filter;
pub mod settings_engine;
