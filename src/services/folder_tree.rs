//! Folder hierarchy derived from bookmark tags.
//!
//! A bookmark is placed at the normalized path of its first tag, or under
//! [`UNSORTED_FOLDER`] when it has none. The tree is rebuilt from scratch on
//! every call; nothing here keeps state between calls.

use std::cmp::Ordering;

use crate::services::path_resolver::normalize_path;
use crate::types::bookmark::{Bookmark, FolderEntry, FolderNode, UNSORTED_FOLDER};

/// Returns the normalized folder path a bookmark is placed at.
pub fn placement_path(bookmark: &Bookmark) -> String {
    let normalized = bookmark
        .primary_tag()
        .map(normalize_path)
        .unwrap_or_default();
    if normalized.is_empty() {
        UNSORTED_FOLDER.to_string()
    } else {
        normalized
    }
}

/// Builds the folder tree for a bookmark list.
///
/// Every node on a bookmark's placement path has its `count` incremented,
/// the synthetic root included, so `root.count == bookmarks.len()`. Children
/// are sorted by name at every level once all bookmarks are inserted.
pub fn build_tree(bookmarks: &[Bookmark]) -> FolderNode {
    let mut root = FolderNode::root();

    for bookmark in bookmarks {
        let path = placement_path(bookmark);
        root.count += 1;

        let mut node = &mut root;
        for segment in path.split('/') {
            node = child_entry(node, segment);
            node.count += 1;
        }
    }

    sort_children(&mut root);
    root
}

/// Flattens a tree into a pre-order listing of its folders.
///
/// The root is not listed; top-level folders have depth 0.
pub fn flatten(tree: &FolderNode) -> Vec<FolderEntry> {
    let mut entries = Vec::new();
    walk(tree, 0, &mut entries);
    entries
}

/// Returns true if the bookmark sits in `folder` or one of its descendants.
///
/// Matching is on whole segments: `Proj` contains `Proj/Sub` but not
/// `Project`. An empty folder matches everything.
pub fn belongs_to_folder(bookmark: &Bookmark, folder: &str) -> bool {
    is_within(&placement_path(bookmark), &normalize_path(folder))
}

/// Keeps the bookmarks in the selected folder and its descendants.
///
/// `None` or an empty selection keeps the whole list.
pub fn select_folder<'a>(bookmarks: &'a [Bookmark], selected: Option<&str>) -> Vec<&'a Bookmark> {
    let folder = selected.map(normalize_path).unwrap_or_default();
    bookmarks
        .iter()
        .filter(|bookmark| is_within(&placement_path(bookmark), &folder))
        .collect()
}

fn is_within(path: &str, folder: &str) -> bool {
    if folder.is_empty() {
        return true;
    }
    match path.strip_prefix(folder) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

fn child_entry<'a>(parent: &'a mut FolderNode, name: &str) -> &'a mut FolderNode {
    let index = match parent.children.iter().position(|child| child.name == name) {
        Some(index) => index,
        None => {
            let path = if parent.path.is_empty() {
                name.to_string()
            } else {
                format!("{}/{}", parent.path, name)
            };
            parent.children.push(FolderNode {
                name: name.to_string(),
                path,
                count: 0,
                children: Vec::new(),
            });
            parent.children.len() - 1
        }
    };
    &mut parent.children[index]
}

/// Case-insensitive order, ties broken by exact byte order so the result is total.
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn sort_children(node: &mut FolderNode) {
    node.children.sort_by(|a, b| compare_names(&a.name, &b.name));
    for child in &mut node.children {
        sort_children(child);
    }
}

fn walk(node: &FolderNode, depth: usize, entries: &mut Vec<FolderEntry>) {
    for child in &node.children {
        entries.push(FolderEntry {
            path: child.path.clone(),
            name: child.name.clone(),
            depth,
            count: child.count,
        });
        walk(child, depth + 1, entries);
    }
}
