//! The data behind the bookmark browser: folder listing plus visible items.
//!
//! Selection and query are inputs, never stored.

use serde::Serialize;

use crate::services::folder_tree::{build_tree, flatten, select_folder};
use crate::services::query_filter::filter_by_query;
use crate::types::bookmark::{Bookmark, FolderEntry};

/// Folder listing and the bookmarks visible for a selection and query.
#[derive(Debug, Clone, Serialize)]
pub struct BookmarkView<'a> {
    pub folders: Vec<FolderEntry>,
    pub visible: Vec<&'a Bookmark>,
    pub total: usize,
}

/// Computes `filter(select(bookmarks, selected), query)` alongside the
/// flattened folder tree of the whole list.
pub fn bookmark_view<'a>(
    bookmarks: &'a [Bookmark],
    selected: Option<&str>,
    query: Option<&str>,
) -> BookmarkView<'a> {
    let folders = flatten(&build_tree(bookmarks));
    let visible = filter_by_query(select_folder(bookmarks, selected), query);
    BookmarkView {
        folders,
        visible,
        total: bookmarks.len(),
    }
}
