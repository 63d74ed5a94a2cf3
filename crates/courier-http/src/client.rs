//! HTTP client configuration.

use crate::response::Response;
use reqwest::{redirect, Client, ClientBuilder};
use std::time::Duration;

/// Boxed error returned by error hooks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Environment variable names read by [`HttpConfig::from_env`].
pub mod vars {
    pub const CONNECT_TIMEOUT: &str = "COURIER_HTTP_CONNECT_TIMEOUT";
    pub const TIMEOUT: &str = "COURIER_HTTP_TIMEOUT";
    pub const USER_AGENT: &str = "COURIER_HTTP_USER_AGENT";
    pub const POOL_MAX_IDLE: &str = "COURIER_HTTP_POOL_MAX_IDLE";
    pub const GZIP: &str = "COURIER_HTTP_GZIP";
}

/// HTTP client configuration.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// Request timeout.
    pub request_timeout: Duration,
    /// User agent string.
    pub user_agent: String,
    /// Maximum connections per host.
    pub pool_max_idle_per_host: usize,
    /// Enable gzip decompression.
    pub gzip: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            user_agent: format!("courier/{}", env!("CARGO_PKG_VERSION")),
            pool_max_idle_per_host: 10,
            gzip: true,
        }
    }
}

impl HttpConfig {
    /// Create config from environment variables.
    ///
    /// Timeouts are whole seconds. Unset or unparsable values keep the default.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(secs) = env_parse::<u64>(vars::CONNECT_TIMEOUT) {
            config.connect_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = env_parse::<u64>(vars::TIMEOUT) {
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Ok(user_agent) = std::env::var(vars::USER_AGENT) {
            if !user_agent.is_empty() {
                config.user_agent = user_agent;
            }
        }
        if let Some(max_idle) = env_parse::<usize>(vars::POOL_MAX_IDLE) {
            config.pool_max_idle_per_host = max_idle;
        }
        if let Ok(gzip) = std::env::var(vars::GZIP) {
            config.gzip = gzip.to_lowercase() == "true" || gzip == "1";
        }

        config
    }
}

fn env_parse<T: std::str::FromStr>(var: &str) -> Option<T> {
    std::env::var(var).ok().and_then(|v| v.trim().parse().ok())
}

/// Build a configured HTTP client.
///
/// Redirects are never followed; a 3xx response reaches the caller as-is.
pub fn build_client(config: HttpConfig) -> Result<Client, HttpError> {
    let builder = ClientBuilder::new()
        .connect_timeout(config.connect_timeout)
        .timeout(config.request_timeout)
        .user_agent(&config.user_agent)
        .pool_max_idle_per_host(config.pool_max_idle_per_host)
        .redirect(redirect::Policy::none())
        .gzip(config.gzip);

    builder.build().map_err(HttpError::ClientBuild)
}

/// HTTP errors.
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("URL must not be empty")]
    EmptyUrl,

    #[error("invalid header: {name}")]
    InvalidHeader { name: String },

    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("request timed out")]
    Timeout,

    #[error("{}", status_message(.status, .source))]
    Status {
        status: u16,
        source: Option<BoxError>,
        response: Box<Response>,
    },
}

fn status_message(status: &u16, source: &Option<BoxError>) -> String {
    match source {
        Some(e) => e.to_string(),
        None => format!("request failed with status {}", status),
    }
}

impl HttpError {
    /// The HTTP status code, for status failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the transport gave up waiting.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// The buffered response behind a status failure.
    pub fn response(&self) -> Option<&Response> {
        match self {
            Self::Status { response, .. } => Some(response.as_ref()),
            _ => None,
        }
    }

    /// Take the buffered response behind a status failure.
    pub fn into_response(self) -> Option<Response> {
        match self {
            Self::Status { response, .. } => Some(*response),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for HttpError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            HttpError::Timeout
        } else {
            HttpError::Request(e)
        }
    }
}

/// Shared HTTP client.
///
/// Cloning is cheap and clones share one connection pool.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Client,
}

impl HttpClient {
    /// Create a new HTTP client with default config.
    pub fn new() -> Result<Self, HttpError> {
        Self::with_config(HttpConfig::default())
    }

    /// Create a new HTTP client with custom config.
    pub fn with_config(config: HttpConfig) -> Result<Self, HttpError> {
        let inner = build_client(config)?;
        Ok(Self { inner })
    }

    /// Wrap an already configured reqwest client.
    ///
    /// The client's own redirect policy applies.
    pub fn from_client(inner: Client) -> Self {
        Self { inner }
    }

    /// Get the inner reqwest client.
    pub fn inner(&self) -> &Client {
        &self.inner
    }
}
