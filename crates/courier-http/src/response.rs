//! HTTP response types.

use crate::client::HttpError;
use crate::cookie::{self, ReceivedCookie};
use reqwest::header::{HeaderMap, COOKIE, LOCATION};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;

/// A fully buffered response.
///
/// Keeps the headers of the request that produced it so cookies can be
/// merged against what was sent.
#[derive(Debug, Clone)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    url: Url,
    request_headers: HeaderMap,
    cookies: Vec<ReceivedCookie>,
    body: String,
}

impl Response {
    pub(crate) fn new(
        status: StatusCode,
        headers: HeaderMap,
        url: Url,
        request_headers: HeaderMap,
        body: String,
    ) -> Self {
        let cookies = ReceivedCookie::from_headers(&headers);
        Self {
            status,
            headers,
            url,
            request_headers,
            cookies,
            body,
        }
    }

    /// Buffer a reqwest response.
    ///
    /// With `read_body` unset the body is left unread and empty.
    pub(crate) async fn read(
        response: reqwest::Response,
        request_headers: HeaderMap,
        read_body: bool,
    ) -> Result<Self, HttpError> {
        let status = response.status();
        let headers = response.headers().clone();
        let url = response.url().clone();
        let body = if read_body {
            response.text().await.map_err(HttpError::from)?
        } else {
            String::new()
        };

        Ok(Self::new(status, headers, url, request_headers, body))
    }

    /// Response status.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// URL the request was sent to.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Headers of the request that produced this response.
    pub fn request_headers(&self) -> &HeaderMap {
        &self.request_headers
    }

    /// Cookies set by this response, in header order.
    pub fn cookies(&self) -> &[ReceivedCookie] {
        &self.cookies
    }

    /// Buffered body text.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Take the buffered body text.
    pub fn into_body(self) -> String {
        self.body
    }

    /// Whether the status is 2xx.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Whether the status is 3xx.
    pub fn is_redirect(&self) -> bool {
        self.status.is_redirection()
    }

    /// Redirect target, since redirects are never followed.
    pub fn location(&self) -> Option<&str> {
        self.headers.get(LOCATION).and_then(|v| v.to_str().ok())
    }

    /// Merge the `Cookie` header that was sent with the cookies received.
    pub fn merge_cookies(&self) -> String {
        let outgoing = self
            .request_headers
            .get(COOKIE)
            .map(|v| String::from_utf8_lossy(v.as_bytes()))
            .unwrap_or_default();
        cookie::merge_cookies(&outgoing, &self.cookies)
    }

    /// `Cookie` header built from the received cookies alone.
    pub fn cookie_header(&self) -> String {
        cookie::cookie_header(&self.cookies)
    }

    /// Parse the buffered body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ResponseError> {
        serde_json::from_str(&self.body).map_err(|e| ResponseError::Parse {
            status: self.status.as_u16(),
            body: self.body.clone(),
            source: e,
        })
    }
}

/// Response parsing errors.
#[derive(Debug, thiserror::Error)]
pub enum ResponseError {
    #[error("failed to parse JSON (status {status}): {source}")]
    Parse {
        status: u16,
        body: String,
        #[source]
        source: serde_json::Error,
    },
}
