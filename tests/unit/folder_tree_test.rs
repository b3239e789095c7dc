//! Unit tests for the tag-derived folder tree: building, flattening and selection.

use bookmark_saga::services::folder_tree::{
    belongs_to_folder, build_tree, flatten, placement_path, select_folder,
};
use bookmark_saga::types::bookmark::{Bookmark, FolderEntry};
use rstest::rstest;

fn bookmark(id: &str, tags: Option<&[&str]>) -> Bookmark {
    Bookmark {
        id: id.to_string(),
        title: format!("Title {}", id),
        url: format!("https://example.com/{}", id),
        domain: Some("example.com".to_string()),
        favicon_url: None,
        tags: tags.map(|t| t.iter().map(|s| s.to_string()).collect()),
        saved_at: "2024-01-01T00:00:00.000Z".to_string(),
    }
}

fn entry(path: &str, name: &str, depth: usize, count: usize) -> FolderEntry {
    FolderEntry {
        path: path.to_string(),
        name: name.to_string(),
        depth,
        count,
    }
}

#[test]
fn test_empty_list_builds_empty_root() {
    let tree = build_tree(&[]);
    assert_eq!(tree.count, 0);
    assert!(tree.children.is_empty());
    assert!(flatten(&tree).is_empty());
}

#[test]
fn test_counts_include_descendants() {
    let bookmarks = vec![
        bookmark("1", Some(&["Work/Reports"])),
        bookmark("2", Some(&["Work"])),
        bookmark("3", Some(&["Home"])),
        bookmark("4", None),
    ];
    let tree = build_tree(&bookmarks);
    assert_eq!(tree.count, 4);

    assert_eq!(
        flatten(&tree),
        vec![
            entry("Home", "Home", 0, 1),
            entry("Unsorted", "Unsorted", 0, 1),
            entry("Work", "Work", 0, 2),
            entry("Work/Reports", "Reports", 1, 1),
        ]
    );
}

#[test]
fn test_only_first_tag_places_a_bookmark() {
    let bookmarks = vec![bookmark("1", Some(&["Work", "Home"]))];
    let entries = flatten(&build_tree(&bookmarks));
    assert_eq!(entries, vec![entry("Work", "Work", 0, 1)]);
}

#[test]
fn test_messy_tags_share_a_folder() {
    let bookmarks = vec![
        bookmark("1", Some(&[" Work / Reports "])),
        bookmark("2", Some(&["Work//Reports/"])),
    ];
    let entries = flatten(&build_tree(&bookmarks));
    assert_eq!(
        entries,
        vec![
            entry("Work", "Work", 0, 2),
            entry("Work/Reports", "Reports", 1, 2),
        ]
    );
}

#[test]
fn test_children_sorted_case_insensitively() {
    let bookmarks = vec![
        bookmark("1", Some(&["beta"])),
        bookmark("2", Some(&["Alpha"])),
        bookmark("3", Some(&["Gamma"])),
    ];
    let names: Vec<String> = flatten(&build_tree(&bookmarks))
        .into_iter()
        .map(|e| e.name)
        .collect();
    assert_eq!(names, vec!["Alpha", "beta", "Gamma"]);
}

#[rstest]
#[case(None, "Unsorted")]
#[case(Some(&[][..]), "Unsorted")]
#[case(Some(&[" / "][..]), "Unsorted")]
#[case(Some(&["Work / Reports"][..]), "Work/Reports")]
#[case(Some(&["Unsorted"][..]), "Unsorted")]
fn test_placement_path(#[case] tags: Option<&[&str]>, #[case] expected: &str) {
    assert_eq!(placement_path(&bookmark("x", tags)), expected);
}

#[test]
fn test_selection_is_prefix_inclusive_on_segments() {
    let bookmarks = vec![
        bookmark("sub", Some(&["Proj/Sub"])),
        bookmark("proj", Some(&["Proj"])),
        bookmark("project", Some(&["Project"])),
    ];

    let ids = |selected: Option<&str>| -> Vec<String> {
        select_folder(&bookmarks, selected)
            .into_iter()
            .map(|b| b.id.clone())
            .collect()
    };

    assert_eq!(ids(Some("Proj")), vec!["sub", "proj"]);
    assert_eq!(ids(Some("Proj/Sub")), vec!["sub"]);
    assert_eq!(ids(Some(" Proj / Sub ")), vec!["sub"]);
    assert_eq!(ids(None), vec!["sub", "proj", "project"]);
    assert_eq!(ids(Some("")), vec!["sub", "proj", "project"]);
}

#[rstest]
#[case("Proj", true)]
#[case("Proj/Sub", true)]
#[case("Proj/Sub/Deeper", false)]
#[case("Pro", false)]
#[case("", true)]
fn test_belongs_to_folder(#[case] folder: &str, #[case] expected: bool) {
    let b = bookmark("x", Some(&["Proj/Sub"]));
    assert_eq!(belongs_to_folder(&b, folder), expected);
}
