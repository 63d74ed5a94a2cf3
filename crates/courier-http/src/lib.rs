//! Base-URI request wrapper for reqwest.
//!
//! A [`Requester`] joins request paths onto a base URI, layers per-call
//! headers over its base headers, buffers every response body and turns
//! statuses of 400 and up into [`HttpError::Status`] without losing the
//! response. Cookies received on a [`Response`] can be folded back into the
//! `Cookie` header that was sent.
//!
//! ```no_run
//! # async fn demo() -> Result<(), courier_http::HttpError> {
//! use courier_http::{HttpClient, Requester};
//!
//! let api = Requester::builder()
//!     .base_uri("http://svc/")
//!     .bearer_auth("secret")?
//!     .build(HttpClient::new()?);
//!
//! let res = api.get("items/1", None).await?;
//! let cookie = res.merge_cookies();
//! # let _ = cookie;
//! # Ok(())
//! # }
//! ```

pub mod body;
pub mod client;
pub mod cookie;
pub mod request;
pub mod response;
pub mod uri;

pub use body::Body;
pub use client::{build_client, BoxError, HttpClient, HttpConfig, HttpError};
pub use cookie::{cookie_header, merge_cookies, ReceivedCookie};
pub use request::{headers, ErrorHandler, Headers, RequestBuilder, Requester};
pub use response::{Response, ResponseError};
pub use uri::merge_uri;
