//! Request bodies.

use crate::client::HttpError;
use serde::Serialize;

/// A request body, resolved at the call site.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Body {
    /// No body at all.
    #[default]
    Empty,
    /// Text sent verbatim.
    Text(String),
    /// A structured value sent as JSON.
    Json(serde_json::Value),
}

impl Body {
    /// A verbatim text body.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Encode any serializable value as a JSON body.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, HttpError> {
        serde_json::to_value(value)
            .map(Self::Json)
            .map_err(HttpError::Encode)
    }

    /// Whether this body carries JSON.
    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json(_))
    }

    /// Encode into the bytes that go on the wire.
    pub(crate) fn into_bytes(self) -> Result<Option<Vec<u8>>, HttpError> {
        match self {
            Self::Empty => Ok(None),
            Self::Text(text) => Ok(Some(text.into_bytes())),
            Self::Json(value) => serde_json::to_vec(&value)
                .map(Some)
                .map_err(HttpError::Encode),
        }
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Body {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<serde_json::Value> for Body {
    fn from(value: serde_json::Value) -> Self {
        Self::Json(value)
    }
}

impl<T: Into<Body>> From<Option<T>> for Body {
    fn from(body: Option<T>) -> Self {
        body.map(Into::into).unwrap_or_default()
    }
}
