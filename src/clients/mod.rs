//! HTTP transport for Bling API communication.
//!
//! This module is the layer under the [`BlingRepository`](crate::BlingRepository):
//! it turns a path, query, headers and body into one authenticated HTTP
//! exchange and reports what happened.
//!
//! # Overview
//!
//! - [`HttpClient`]: async client that stamps `Authorization: Bearer <token>`
//!   on every request and applies optional throttling
//! - [`HttpRequest`]: a request to be sent
//! - [`HttpResponse`]: status, headers and parsed JSON body
//! - [`HttpMethod`]: GET, POST, PUT, PATCH, DELETE
//! - [`HttpError`]: transport failure with the attempted method/path and any
//!   payload the server sent
//! - [`RateLimiter`] / [`RateLimitOptions`]: request-per-window and
//!   in-flight limits
//!
//! # Throttling
//!
//! Throttling delays requests; it never rejects them. The client never
//! retries: each call makes at most one HTTP attempt.
//!
//! # Example
//!
//! ```rust,ignore
//! use bling_api::{BlingConfig, RateLimitOptions};
//! use bling_api::clients::HttpClient;
//!
//! let config = BlingConfig::builder()
//!     .access_token(AccessToken::new("access-token")?)
//!     .rate_limit(RateLimitOptions::per_second(3))
//!     .build()?;
//! let client = HttpClient::new(&config);
//!
//! let response = client.get("contatos", None, None).await?;
//! ```

mod errors;
mod http_client;
mod http_request;
mod http_response;
mod rate_limit;

pub use errors::{HttpError, HttpResponseError, InvalidHttpRequestError};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;
pub use rate_limit::{RateLimitOptions, RateLimitPermit, RateLimiter, DEFAULT_WINDOW_MILLISECONDS};
