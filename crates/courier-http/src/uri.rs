//! Base URI merging.

/// Marker that identifies a path as an absolute URL.
const SCHEME_SEPARATOR: &str = "://";

/// Merge a base URI and a request path into one URL string.
///
/// A path that already carries a scheme wins outright. Otherwise the base
/// gets exactly one trailing `/` and at most one leading `/` is dropped from
/// the path. No escaping or `.`/`..` normalization happens here.
///
/// Returns an empty string only when both inputs are empty; callers treat
/// that as "no URL".
pub fn merge_uri(base: &str, path: &str) -> String {
    if path.contains(SCHEME_SEPARATOR) {
        return path.to_string();
    }
    if base.is_empty() {
        return path.to_string();
    }

    let path = path.strip_prefix('/').unwrap_or(path);
    if base.ends_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_empty() {
        assert_eq!(merge_uri("", ""), "");
    }

    #[test]
    fn test_empty_base_keeps_path() {
        assert_eq!(merge_uri("", "/x"), "/x");
        assert_eq!(merge_uri("", "x"), "x");
    }

    #[test]
    fn test_absolute_path_ignores_base() {
        assert_eq!(merge_uri("anything", "https://c/d"), "https://c/d");
        assert_eq!(merge_uri("", "https://c/d"), "https://c/d");
        assert_eq!(merge_uri("http://a/", "ftp://b"), "ftp://b");
    }

    #[test]
    fn test_scheme_marker_anywhere_in_path() {
        assert_eq!(merge_uri("http://a", "/x?next=http://b"), "/x?next=http://b");
    }

    #[test]
    fn test_trailing_slash_on_base() {
        assert_eq!(merge_uri("http://a/", "b"), "http://a/b");
        assert_eq!(merge_uri("http://a", "b"), "http://a/b");
    }

    #[test]
    fn test_leading_slash_on_path() {
        assert_eq!(merge_uri("http://a/", "/b"), "http://a/b");
        assert_eq!(merge_uri("http://a", "/b"), "http://a/b");
    }

    #[test]
    fn test_only_one_slash_is_touched() {
        assert_eq!(merge_uri("http://a//", "b"), "http://a//b");
        assert_eq!(merge_uri("http://a/", "//b"), "http://a//b");
    }

    #[test]
    fn test_empty_path_with_base() {
        assert_eq!(merge_uri("http://a", ""), "http://a/");
        assert_eq!(merge_uri("http://a/", ""), "http://a/");
    }

    #[test]
    fn test_no_normalization() {
        assert_eq!(merge_uri("http://a/v1", "../b/./c"), "http://a/v1/../b/./c");
        assert_eq!(merge_uri("http://a", "b c"), "http://a/b c");
    }
}
