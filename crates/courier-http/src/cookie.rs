//! Cookie header merging.
//!
//! Cookies are kept as a flat `name=value;` string. Only names and values
//! survive; attributes from `Set-Cookie` (`Path`, `Expires`, ...) are dropped.

use reqwest::header::{HeaderMap, SET_COOKIE};
use std::collections::BTreeMap;

/// A cookie received through a `Set-Cookie` response header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedCookie {
    /// Cookie name.
    pub name: String,
    /// Cookie value, without surrounding quotes.
    pub value: String,
}

impl ReceivedCookie {
    /// Create a cookie from a name and value.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Parse the name/value pair of a single `Set-Cookie` header value.
    ///
    /// Returns `None` when there is no `=` or the name is empty.
    pub fn parse(set_cookie: &str) -> Option<Self> {
        let pair = set_cookie.split(';').next().unwrap_or_default();
        let (name, value) = pair.split_once('=')?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        let value = value.trim();
        let value = value
            .strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .unwrap_or(value);

        Some(Self::new(name, value))
    }

    /// Collect every parseable `Set-Cookie` header, in header order.
    pub fn from_headers(headers: &HeaderMap) -> Vec<Self> {
        headers
            .get_all(SET_COOKIE)
            .iter()
            .map(|v| String::from_utf8_lossy(v.as_bytes()))
            .filter_map(|v| Self::parse(&v))
            .collect()
    }

    /// Whether this cookie carries a value worth sending back.
    ///
    /// Empty values and the literal `0` are skipped, not treated as deletions.
    fn is_meaningful(&self) -> bool {
        !self.value.is_empty() && self.value != "0"
    }
}

/// Merge an outgoing `Cookie` header with newly received cookies.
pub fn merge_cookies(outgoing: &str, received: &[ReceivedCookie]) -> String {
    let mut jar = parse_cookie_header(outgoing);
    apply_received(&mut jar, received);
    tracing::trace!(
        previous = outgoing,
        received = received.len(),
        merged = jar.len(),
        "merged cookies"
    );
    serialize(&jar)
}

/// Build a `Cookie` header from received cookies alone.
pub fn cookie_header(received: &[ReceivedCookie]) -> String {
    let mut jar = BTreeMap::new();
    apply_received(&mut jar, received);
    serialize(&jar)
}

/// Parse a `Cookie` header value into a name to value map.
///
/// Segments without `=` are dropped. Later duplicates win.
pub fn parse_cookie_header(header: &str) -> BTreeMap<String, String> {
    header
        .split(';')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .filter_map(|segment| segment.split_once('='))
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}

fn apply_received(jar: &mut BTreeMap<String, String>, received: &[ReceivedCookie]) {
    for cookie in received.iter().filter(|c| c.is_meaningful()) {
        jar.insert(cookie.name.clone(), cookie.value.clone());
    }
}

fn serialize(jar: &BTreeMap<String, String>) -> String {
    jar.iter().fold(String::new(), |mut out, (name, value)| {
        out.push_str(name);
        out.push('=');
        out.push_str(value);
        out.push(';');
        out
    })
}
