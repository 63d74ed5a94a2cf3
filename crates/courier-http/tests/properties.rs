//! Property tests for URI and cookie merging.

use courier_http::{cookie_header, merge_cookies, merge_uri, ReceivedCookie};
use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

fn pairs(header: &str) -> BTreeSet<String> {
    header
        .split(';')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn base_uri() -> impl Strategy<Value = String> {
    "[a-z]{1,8}(:/)?[a-z0-9./]{0,12}[a-z0-9]"
}

fn relative_path() -> impl Strategy<Value = String> {
    "([a-z0-9][a-z0-9/._?=&-]{0,20})?".prop_filter("no scheme", |p| !p.contains("://"))
}

fn cookie_name() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9_]{0,7}"
}

fn cookie_value() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("0".to_string()),
        "[a-zA-Z0-9_]{1,8}",
    ]
}

fn received_cookies() -> impl Strategy<Value = Vec<ReceivedCookie>> {
    prop::collection::vec(
        (cookie_name(), cookie_value()).prop_map(|(n, v)| ReceivedCookie::new(n, v)),
        0..8,
    )
}

fn cookie_jar() -> impl Strategy<Value = BTreeMap<String, String>> {
    prop::collection::btree_map(cookie_name(), "[a-zA-Z0-9_]{1,8}", 0..8)
}

fn to_header(jar: &BTreeMap<String, String>) -> String {
    jar.iter().map(|(n, v)| format!("{}={};", n, v)).collect()
}

proptest! {
    /// A relative path joins the base with exactly one slash.
    #[test]
    fn test_merge_uri_joins_with_one_slash(b in base_uri(), p in relative_path()) {
        prop_assert_eq!(merge_uri(&b, &p), format!("{}/{}", b, p));
    }

    /// A trailing slash on the base changes nothing.
    #[test]
    fn test_merge_uri_trailing_slash_idempotent(b in base_uri(), p in relative_path()) {
        prop_assert_eq!(merge_uri(&b, &p), merge_uri(&format!("{}/", b), &p));
    }

    /// A leading slash on the path changes nothing.
    #[test]
    fn test_merge_uri_leading_slash_stripped(b in base_uri(), p in relative_path()) {
        prop_assert_eq!(merge_uri(&b, &p), merge_uri(&b, &format!("/{}", p)));
    }

    /// Absolute URLs pass through whatever the base.
    #[test]
    fn test_merge_uri_absolute_wins(
        b in "\\PC{0,16}",
        host in "[a-z]{1,8}",
        rest in "[a-z0-9/]{0,8}"
    ) {
        let absolute = format!("https://{}/{}", host, rest);
        prop_assert_eq!(merge_uri(&b, &absolute), absolute);
    }

    /// Merging with nothing new reproduces the same pairs.
    #[test]
    fn test_merge_cookies_remerge_is_stable(
        jar in cookie_jar(),
        received in received_cookies()
    ) {
        let once = merge_cookies(&to_header(&jar), &received);
        let twice = merge_cookies(&once, &[]);
        prop_assert_eq!(pairs(&once), pairs(&twice));
    }

    /// Received cookies overwrite unless their value is empty or "0".
    #[test]
    fn test_merge_cookies_filter_then_overwrite(
        jar in cookie_jar(),
        received in received_cookies()
    ) {
        let mut expected = jar.clone();
        for cookie in &received {
            if !cookie.value.is_empty() && cookie.value != "0" {
                expected.insert(cookie.name.clone(), cookie.value.clone());
            }
        }

        let merged = merge_cookies(&to_header(&jar), &received);
        prop_assert_eq!(pairs(&merged), pairs(&to_header(&expected)));
    }

    /// Building from received cookies equals merging onto an empty header.
    #[test]
    fn test_cookie_header_matches_empty_merge(received in received_cookies()) {
        prop_assert_eq!(pairs(&cookie_header(&received)), pairs(&merge_cookies("", &received)));
    }
}
