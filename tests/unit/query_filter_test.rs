//! Unit tests for free-text bookmark search and the combined bookmark view.

use bookmark_saga::services::bookmark_view::bookmark_view;
use bookmark_saga::services::query_filter::filter_by_query;
use bookmark_saga::types::bookmark::Bookmark;
use rstest::rstest;

fn bookmark(id: &str, title: &str, url: &str, domain: Option<&str>, tags: &[&str]) -> Bookmark {
    Bookmark {
        id: id.to_string(),
        title: title.to_string(),
        url: url.to_string(),
        domain: domain.map(str::to_string),
        favicon_url: None,
        tags: Some(tags.iter().map(|s| s.to_string()).collect()),
        saved_at: "2024-01-01T00:00:00.000Z".to_string(),
    }
}

fn sample() -> Vec<Bookmark> {
    vec![
        bookmark("gh", "GitHub", "https://github.com", Some("github.com"), &["Dev"]),
        bookmark("news", "Daily News", "https://news.example.org", None, &["Reading"]),
        bookmark("docs", "Rust Book", "https://doc.rust-lang.org", Some("doc.rust-lang.org"), &["Dev/Rust"]),
    ]
}

fn ids(list: &[Bookmark]) -> Vec<&str> {
    list.iter().map(|b| b.id.as_str()).collect()
}

#[test]
fn test_git_query_matches_title_and_url() {
    let result = filter_by_query(sample(), Some("git"));
    assert_eq!(ids(&result), vec!["gh"]);
}

#[rstest]
#[case(None)]
#[case(Some(""))]
fn test_absent_or_empty_query_keeps_everything(#[case] query: Option<&str>) {
    let result = filter_by_query(sample(), query);
    assert_eq!(ids(&result), vec!["gh", "news", "docs"]);
}

#[rstest]
#[case("RUST", vec!["docs"])]
#[case("reading", vec!["news"])]
#[case("dev", vec!["gh", "docs"])]
#[case("example.org", vec!["news"])]
#[case("nothing-matches", vec![])]
fn test_query_fields_and_case(#[case] query: &str, #[case] expected: Vec<&str>) {
    let result = filter_by_query(sample(), Some(query));
    assert_eq!(ids(&result), expected);
}

#[test]
fn test_filter_works_on_references() {
    let list = sample();
    let refs: Vec<&Bookmark> = list.iter().collect();
    let result = filter_by_query(refs, Some("news"));
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].id, "news");
}

#[test]
fn test_bookmark_view_selects_then_filters() {
    let list = sample();
    let view = bookmark_view(&list, Some("Dev"), Some("book"));
    assert_eq!(view.total, 3);
    assert_eq!(view.visible.len(), 1);
    assert_eq!(view.visible[0].id, "docs");

    let paths: Vec<&str> = view.folders.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(paths, vec!["Dev", "Dev/Rust", "Reading"]);
}

#[test]
fn test_bookmark_view_serializes_for_rpc() {
    let list = sample();
    let value = serde_json::to_value(bookmark_view(&list, None, None)).unwrap();
    assert_eq!(value["total"], 3);
    assert_eq!(value["visible"].as_array().unwrap().len(), 3);
    assert_eq!(value["visible"][0]["savedAt"], "2024-01-01T00:00:00.000Z");
    assert_eq!(value["folders"][0]["depth"], 0);
}
