//! HTTP request types and builders.

use crate::body::Body;
use crate::client::{BoxError, HttpClient, HttpError};
use crate::response::Response;
use crate::uri::merge_uri;
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Common HTTP headers.
pub mod headers {
    pub const CONTENT_TYPE_JSON: &str = "application/json";
    pub const X_API_KEY: &str = "x-api-key";
}

/// Turns the body of a failed response into an error.
pub type ErrorHandler = Arc<dyn Fn(&str) -> BoxError + Send + Sync>;

/// Per-call header overrides.
pub type Headers = HashMap<String, String>;

/// Builds a [`Requester`].
#[derive(Clone, Default)]
pub struct RequestBuilder {
    headers: HeaderMap,
    base_uri: String,
    error_handler: Option<ErrorHandler>,
}

impl RequestBuilder {
    /// Create a new request builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URI every path is merged onto.
    pub fn base_uri(mut self, uri: impl Into<String>) -> Self {
        self.base_uri = uri.into();
        self
    }

    /// Add a base header, replacing any previous value.
    pub fn header(
        mut self,
        name: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> Result<Self, HttpError> {
        let (name, value) = parse_header(name.as_ref(), value.as_ref())?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Add every header of a map.
    pub fn headers(mut self, headers: &Headers) -> Result<Self, HttpError> {
        overlay(&mut self.headers, headers)?;
        Ok(self)
    }

    /// Add bearer token authorization.
    pub fn bearer_auth(self, token: impl AsRef<str>) -> Result<Self, HttpError> {
        self.header(AUTHORIZATION, format!("Bearer {}", token.as_ref()))
    }

    /// Add API key header.
    pub fn api_key(self, key: impl AsRef<str>) -> Result<Self, HttpError> {
        self.header(headers::X_API_KEY, key)
    }

    /// Set content type to JSON.
    pub fn json_content(mut self) -> Self {
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static(headers::CONTENT_TYPE_JSON));
        self
    }

    /// Map failed response bodies (status 400 and up) to errors.
    pub fn on_error<F, E>(mut self, handler: F) -> Self
    where
        F: Fn(&str) -> E + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        self.error_handler = Some(Arc::new(move |body: &str| -> BoxError {
            handler(body).into()
        }));
        self
    }

    /// Build the requester on top of a shared client.
    pub fn build(self, client: HttpClient) -> Requester {
        Requester {
            client,
            base_uri: self.base_uri,
            headers: self.headers,
            error_handler: self.error_handler,
        }
    }
}

impl fmt::Debug for RequestBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestBuilder")
            .field("base_uri", &self.base_uri)
            .field("headers", &self.headers)
            .field("error_handler", &self.error_handler.is_some())
            .finish()
    }
}

/// Issues requests against a base URI with a base header set.
///
/// Never mutated after construction; clone it freely.
#[derive(Clone)]
pub struct Requester {
    client: HttpClient,
    base_uri: String,
    headers: HeaderMap,
    error_handler: Option<ErrorHandler>,
}

impl Requester {
    /// Start building a requester.
    pub fn builder() -> RequestBuilder {
        RequestBuilder::new()
    }

    /// Base URI paths are merged onto.
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Headers sent with every request.
    pub fn base_headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Build the full URL for a path.
    pub fn url(&self, path: &str) -> Result<String, HttpError> {
        let url = merge_uri(&self.base_uri, path);
        if url.is_empty() {
            return Err(HttpError::EmptyUrl);
        }
        Ok(url)
    }

    /// Make a GET request.
    pub async fn get(
        &self,
        path: &str,
        overrides: Option<&Headers>,
    ) -> Result<Response, HttpError> {
        self.send(Method::GET, path, Body::Empty, overrides).await
    }

    /// Make a POST request.
    pub async fn post(
        &self,
        path: &str,
        body: impl Into<Body>,
        overrides: Option<&Headers>,
    ) -> Result<Response, HttpError> {
        self.send(Method::POST, path, body.into(), overrides).await
    }

    /// Make a PUT request.
    pub async fn put(
        &self,
        path: &str,
        body: impl Into<Body>,
        overrides: Option<&Headers>,
    ) -> Result<Response, HttpError> {
        self.send(Method::PUT, path, body.into(), overrides).await
    }

    /// Make a DELETE request.
    pub async fn delete(
        &self,
        path: &str,
        body: impl Into<Body>,
        overrides: Option<&Headers>,
    ) -> Result<Response, HttpError> {
        self.send(Method::DELETE, path, body.into(), overrides).await
    }

    /// PUT raw bytes.
    ///
    /// The payload is sent untouched. The body of a successful response is
    /// not read, so [`Response::body`] is empty.
    pub async fn upload(
        &self,
        path: &str,
        payload: impl Into<Bytes>,
        overrides: Option<&Headers>,
    ) -> Result<Response, HttpError> {
        let url = self.url(path)?;
        let request_headers = self.request_headers(overrides)?;

        tracing::debug!("Making PUT upload to: {}", url);
        let response = self
            .client
            .inner()
            .put(&url)
            .headers(request_headers.clone())
            .body(payload.into())
            .send()
            .await
            .map_err(HttpError::from)?;
        tracing::debug!("PUT upload response: {} {}", response.status(), url);

        let read_body = response.status().as_u16() >= 400;
        let response = Response::read(response, request_headers, read_body).await?;
        self.check_status(response)
    }

    /// Send a request with any method.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        body: Body,
        overrides: Option<&Headers>,
    ) -> Result<Response, HttpError> {
        let url = self.url(path)?;
        let is_json = body.is_json();
        let payload = body.into_bytes()?;

        let mut request_headers = self.request_headers(overrides)?;
        if is_json && !request_headers.contains_key(CONTENT_TYPE) {
            request_headers.insert(
                CONTENT_TYPE,
                HeaderValue::from_static(headers::CONTENT_TYPE_JSON),
            );
        }

        tracing::debug!("Making {} request to: {}", method, url);
        let mut request = self
            .client
            .inner()
            .request(method.clone(), &url)
            .headers(request_headers.clone());
        if let Some(payload) = payload {
            request = request.body(payload);
        }

        let response = request.send().await.map_err(HttpError::from)?;
        tracing::debug!("{} response: {} {}", method, response.status(), url);

        let response = Response::read(response, request_headers, true).await?;
        self.check_status(response)
    }

    /// Base headers with the per-call overrides applied on top.
    fn request_headers(&self, overrides: Option<&Headers>) -> Result<HeaderMap, HttpError> {
        let mut headers = self.headers.clone();
        if let Some(overrides) = overrides {
            overlay(&mut headers, overrides)?;
        }
        Ok(headers)
    }

    fn check_status(&self, response: Response) -> Result<Response, HttpError> {
        let status = response.status().as_u16();
        if status < 400 {
            return Ok(response);
        }

        tracing::warn!(status, url = %response.url(), "request failed");
        let source = self
            .error_handler
            .as_ref()
            .map(|handler| handler(response.body()));

        Err(HttpError::Status {
            status,
            source,
            response: Box::new(response),
        })
    }
}

impl fmt::Debug for Requester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Requester")
            .field("base_uri", &self.base_uri)
            .field("headers", &self.headers)
            .field("error_handler", &self.error_handler.is_some())
            .finish()
    }
}

fn parse_header(name: &str, value: &str) -> Result<(HeaderName, HeaderValue), HttpError> {
    let invalid = || HttpError::InvalidHeader {
        name: name.to_string(),
    };
    let name = HeaderName::try_from(name).map_err(|_| invalid())?;
    let value = HeaderValue::try_from(value).map_err(|_| invalid())?;
    Ok((name, value))
}

fn overlay(target: &mut HeaderMap, headers: &Headers) -> Result<(), HttpError> {
    for (name, value) in headers {
        let (name, value) = parse_header(name, value)?;
        target.insert(name, value);
    }
    Ok(())
}
