//! Case-insensitive free-text search over bookmarks.

use std::borrow::Borrow;

use crate::types::bookmark::Bookmark;

/// Keeps the items whose title, url, domain or tags contain `query`,
/// ignoring case. An absent or empty query keeps everything.
///
/// Works on owned bookmarks as well as on references produced by
/// [`select_folder`](crate::services::folder_tree::select_folder). Relative
/// order is preserved.
pub fn filter_by_query<B: Borrow<Bookmark>>(mut list: Vec<B>, query: Option<&str>) -> Vec<B> {
    let needle = match query {
        Some(q) if !q.is_empty() => q.to_lowercase(),
        _ => return list,
    };
    list.retain(|item| matches_query(item.borrow(), &needle));
    list
}

/// `needle` must already be lowercased.
pub fn matches_query(bookmark: &Bookmark, needle: &str) -> bool {
    haystack(bookmark).contains(needle)
}

fn haystack(bookmark: &Bookmark) -> String {
    let mut parts = vec![
        bookmark.title.as_str(),
        bookmark.url.as_str(),
        bookmark.domain.as_deref().unwrap_or(""),
    ];
    if let Some(tags) = &bookmark.tags {
        parts.extend(tags.iter().map(String::as_str));
    }
    parts.join(" ").to_lowercase()
}
