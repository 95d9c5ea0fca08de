//! Configuration types for the Bling API SDK.
//!
//! # Overview
//!
//! - [`BlingConfig`]: everything a client needs, built once per access token
//! - [`BlingConfigBuilder`]: fluent builder for [`BlingConfig`]
//! - [`AccessToken`]: validated bearer token with masked debug output
//! - [`BaseUrl`]: validated API base URL (defaults to the Bling v3 API)
//!
//! # Example
//!
//! ```rust
//! use bling_api::{AccessToken, BlingConfig, RateLimitOptions};
//!
//! let config = BlingConfig::builder()
//!     .access_token(AccessToken::new("my-token").unwrap())
//!     .rate_limit(RateLimitOptions::per_second(3))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.base_url().as_ref(), "https://www.bling.com.br/Api/v3");
//! ```

mod newtypes;

pub use newtypes::{AccessToken, BaseUrl};

use std::time::Duration;

use crate::clients::RateLimitOptions;
use crate::error::ConfigError;

/// Configuration for a Bling API client.
///
/// Immutable once built. One configuration corresponds to one authentication
/// context; build a new one to use a different token.
#[derive(Clone, Debug)]
pub struct BlingConfig {
    access_token: AccessToken,
    base_url: BaseUrl,
    rate_limit: Option<RateLimitOptions>,
    timeout: Option<Duration>,
    user_agent_prefix: Option<String>,
}

impl BlingConfig {
    /// Creates a configuration for the production API with only a token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAccessToken`] if the token is empty.
    pub fn new(access_token: impl Into<String>) -> Result<Self, ConfigError> {
        Self::builder()
            .access_token(AccessToken::new(access_token)?)
            .build()
    }

    /// Creates a new builder for constructing a `BlingConfig`.
    #[must_use]
    pub fn builder() -> BlingConfigBuilder {
        BlingConfigBuilder::new()
    }

    /// Returns the access token.
    #[must_use]
    pub const fn access_token(&self) -> &AccessToken {
        &self.access_token
    }

    /// Returns the base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the rate limit options, if throttling is enabled.
    #[must_use]
    pub const fn rate_limit(&self) -> Option<&RateLimitOptions> {
        self.rate_limit.as_ref()
    }

    /// Returns the per-request timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<BlingConfig>();
};

/// Builder for constructing [`BlingConfig`] instances.
///
/// `access_token` is required. Defaults:
///
/// - `base_url`: [`BaseUrl::BLING_V3`]
/// - `rate_limit`: `None` (unthrottled)
/// - `timeout`: `None`
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct BlingConfigBuilder {
    access_token: Option<AccessToken>,
    base_url: Option<BaseUrl>,
    rate_limit: Option<RateLimitOptions>,
    timeout: Option<Duration>,
    user_agent_prefix: Option<String>,
}

impl BlingConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the access token (required).
    #[must_use]
    pub fn access_token(mut self, token: AccessToken) -> Self {
        self.access_token = Some(token);
        self
    }

    /// Sets the base URL.
    #[must_use]
    pub fn base_url(mut self, url: BaseUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Enables request throttling.
    #[must_use]
    pub const fn rate_limit(mut self, options: RateLimitOptions) -> Self {
        self.rate_limit = Some(options);
        self
    }

    /// Sets a timeout applied to each HTTP exchange.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`BlingConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `access_token` is not
    /// set, or [`ConfigError::InvalidRateLimit`] if the rate limit options
    /// fail validation.
    pub fn build(self) -> Result<BlingConfig, ConfigError> {
        let access_token = self.access_token.ok_or(ConfigError::MissingRequiredField {
            field: "access_token",
        })?;

        if let Some(options) = &self.rate_limit {
            options.validate()?;
        }

        Ok(BlingConfig {
            access_token,
            base_url: self.base_url.unwrap_or_default(),
            rate_limit: self.rate_limit,
            timeout: self.timeout,
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}
