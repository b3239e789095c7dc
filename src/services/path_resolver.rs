//! Normalization of slash-delimited tag paths into comparable folder keys.

/// Normalizes a raw tag path: trims every `/`-separated segment, drops empty
/// segments and rejoins the rest with `/`.
///
/// `"  Work / Reports/ "` and `"Work/Reports"` both become `"Work/Reports"`.
pub fn normalize_path(raw: &str) -> String {
    path_segments(raw).join("/")
}

/// Returns the trimmed, non-empty segments of a raw tag path.
pub fn path_segments(raw: &str) -> Vec<&str> {
    raw.split('/')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect()
}
