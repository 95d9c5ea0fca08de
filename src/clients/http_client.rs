//! HTTP client for Bling API communication.
//!
//! This module provides the [`HttpClient`] type: a reqwest client bound to a
//! base URL that stamps the bearer token on every request and, when
//! configured, throttles dispatch through a [`RateLimiter`].

use std::collections::HashMap;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};

use crate::clients::errors::{HttpError, HttpResponseError, InvalidHttpRequestError};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::clients::rate_limit::RateLimiter;
use crate::config::{AccessToken, BaseUrl, BlingConfig};

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Transport client for the Bling API.
///
/// The client handles:
/// - URL construction from the configured base URL
/// - Default headers including User-Agent and Accept
/// - `Authorization: Bearer <token>` on every request, overriding any
///   caller-supplied value
/// - Optional throttling (requests per window, requests in flight)
///
/// Each call makes exactly one HTTP attempt.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`; share it across tasks behind a reference or
/// an `Arc`. The rate limiter state is the only mutable part and is
/// synchronized internally.
///
/// # Example
///
/// ```rust,ignore
/// use bling_api::{BlingConfig, clients::HttpClient};
///
/// let config = BlingConfig::new("access-token")?;
/// let client = HttpClient::new(&config);
///
/// let response = client.get("contatos/42", None, None).await?;
/// println!("{}", response.body);
/// ```
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Base URL every path is joined onto.
    base_url: BaseUrl,
    /// Bearer token applied to every request.
    access_token: AccessToken,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
    /// Throttle shared by every request sent through this client.
    rate_limiter: Option<RateLimiter>,
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client from the given configuration.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS initialization failure).
    #[must_use]
    pub fn new(config: &BlingConfig) -> Self {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}Bling API Library v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        let mut builder = reqwest::Client::builder().use_rustls_tls();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().expect("Failed to create HTTP client");

        Self {
            client,
            base_url: config.base_url().clone(),
            access_token: config.access_token().clone(),
            default_headers,
            rate_limiter: config.rate_limit().map(RateLimiter::new),
        }
    }

    /// Returns the base URL for this client.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the default headers for this client.
    ///
    /// The `Authorization` header is not listed here; it is applied last, at
    /// send time, so that it always wins.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the rate limiter, if throttling is enabled.
    #[must_use]
    pub const fn rate_limiter(&self) -> Option<&RateLimiter> {
        self.rate_limiter.as_ref()
    }

    /// Sends a GET request.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if no 2xx response was obtained.
    pub async fn get(
        &self,
        path: &str,
        query: Option<HashMap<String, String>>,
        headers: Option<HashMap<String, String>>,
    ) -> Result<HttpResponse, HttpError> {
        self.send(HttpMethod::Get, path, None, query, headers).await
    }

    /// Sends a POST request.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if no 2xx response was obtained.
    pub async fn post(
        &self,
        path: &str,
        body: Option<serde_json::Value>,
        query: Option<HashMap<String, String>>,
        headers: Option<HashMap<String, String>>,
    ) -> Result<HttpResponse, HttpError> {
        self.send(HttpMethod::Post, path, body, query, headers)
            .await
    }

    /// Sends a PUT request.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if no 2xx response was obtained.
    pub async fn put(
        &self,
        path: &str,
        body: Option<serde_json::Value>,
        query: Option<HashMap<String, String>>,
        headers: Option<HashMap<String, String>>,
    ) -> Result<HttpResponse, HttpError> {
        self.send(HttpMethod::Put, path, body, query, headers).await
    }

    /// Sends a PATCH request.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if no 2xx response was obtained.
    pub async fn patch(
        &self,
        path: &str,
        body: Option<serde_json::Value>,
        query: Option<HashMap<String, String>>,
        headers: Option<HashMap<String, String>>,
    ) -> Result<HttpResponse, HttpError> {
        self.send(HttpMethod::Patch, path, body, query, headers)
            .await
    }

    /// Sends a DELETE request.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if no 2xx response was obtained.
    pub async fn delete(
        &self,
        path: &str,
        query: Option<HashMap<String, String>>,
        headers: Option<HashMap<String, String>>,
    ) -> Result<HttpResponse, HttpError> {
        self.send(HttpMethod::Delete, path, None, query, headers)
            .await
    }

    /// Sends an HTTP request to the Bling API.
    ///
    /// This method handles:
    /// - Request validation
    /// - URL construction
    /// - Header merging, with the bearer token applied last
    /// - Waiting on the rate limiter, if configured
    /// - Response parsing
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - No response arrives (`Network`)
    /// - A non-2xx response is received (`Response`)
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        let method = request.http_method;
        let path = request.path.trim_start_matches('/').to_string();
        let invalid = |source| HttpError::InvalidRequest {
            method,
            path: path.clone(),
            source,
        };

        request.verify().map_err(invalid)?;
        let headers = self
            .build_headers(request.extra_headers.as_ref())
            .map_err(invalid)?;

        let url = self.base_url.join(&path);
        let mut req_builder = self.client.request(method.into(), &url).headers(headers);
        if let Some(query) = &request.query {
            req_builder = req_builder.query(query);
        }
        if let Some(body) = &request.body {
            req_builder = req_builder.json(body);
        }

        // Held until the body has been read so in-flight limits cover the whole exchange.
        let _permit = match &self.rate_limiter {
            Some(limiter) => Some(limiter.acquire().await),
            None => None,
        };

        tracing::debug!("Dispatching {} {}", method, path);
        let network = |source| HttpError::Network {
            method,
            path: path.clone(),
            source,
        };
        let res = req_builder.send().await.map_err(network)?;

        let code = res.status().as_u16();
        let res_headers = Self::parse_response_headers(res.headers());
        let body_text = res.text().await.map_err(network)?;
        let parsed = Self::parse_body(&body_text);

        if (200..=299).contains(&code) {
            let body = parsed.unwrap_or(serde_json::Value::String(body_text));
            return Ok(HttpResponse::new(code, res_headers, body));
        }

        tracing::debug!("{} {} returned status {}", method, path, code);
        Err(HttpError::Response(HttpResponseError {
            method,
            path,
            code,
            headers: res_headers,
            body: parsed.filter(|body| !body.is_null()),
        }))
    }

    async fn send(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<serde_json::Value>,
        query: Option<HashMap<String, String>>,
        headers: Option<HashMap<String, String>>,
    ) -> Result<HttpResponse, HttpError> {
        let request = HttpRequest {
            http_method: method,
            path: path.to_string(),
            body,
            query,
            extra_headers: headers,
        };
        self.request(request).await
    }

    /// Merges default and caller headers, then stamps the bearer token.
    fn build_headers(
        &self,
        extra: Option<&HashMap<String, String>>,
    ) -> Result<HeaderMap, InvalidHttpRequestError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(user_agent) = self.default_headers.get("User-Agent") {
            headers.insert(USER_AGENT, Self::header_value("User-Agent", user_agent)?);
        }

        for (key, value) in extra.into_iter().flatten() {
            let name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|_| InvalidHttpRequestError::InvalidHeader { name: key.clone() })?;
            headers.insert(name, Self::header_value(key, value)?);
        }

        let mut authorization = Self::header_value("Authorization", &self.access_token.bearer())?;
        authorization.set_sensitive(true);
        headers.insert(AUTHORIZATION, authorization);

        Ok(headers)
    }

    fn header_value(name: &str, value: &str) -> Result<HeaderValue, InvalidHttpRequestError> {
        HeaderValue::from_str(value).map_err(|_| InvalidHttpRequestError::InvalidHeader {
            name: name.to_string(),
        })
    }

    /// Parses response headers into a `HashMap`. Non-UTF-8 bytes are replaced,
    /// never dropped.
    fn parse_response_headers(headers: &HeaderMap) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
            result.entry(key).or_default().push(value);
        }
        result
    }

    /// Parses a response body. Empty bodies become `Null`; non-JSON bodies `None`.
    fn parse_body(body_text: &str) -> Option<serde_json::Value> {
        if body_text.trim().is_empty() {
            return Some(serde_json::Value::Null);
        }
        serde_json::from_str(body_text).ok()
    }
}
