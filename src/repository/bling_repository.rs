//! The generic Bling repository.
//!
//! [`BlingRepository`] implements the six resource operations once, for every
//! endpoint. Callers describe the call with an [`OperationDescriptor`] and
//! pick the response type; the repository picks the verb and path.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::clients::{HttpClient, HttpMethod, HttpResponse, RateLimitOptions};
use crate::config::{AccessToken, BlingConfig};
use crate::error::ConfigError;
use crate::repository::descriptor::OperationDescriptor;
use crate::repository::errors::{normalize, BlingError, BlingInternalError};

/// Generic client for Bling API resources.
///
/// | Method    | Verb   | Path          | Body sent |
/// |-----------|--------|---------------|-----------|
/// | `list`    | GET    | `endpoint`    | no        |
/// | `get`     | GET    | `endpoint/id` | no        |
/// | `create`  | POST   | `endpoint`    | yes       |
/// | `update`  | PATCH  | `endpoint/id` | yes       |
/// | `replace` | PATCH  | `endpoint/id` | yes       |
/// | `delete`  | DELETE | `endpoint/id` | no        |
///
/// Every operation either returns the decoded response body or exactly one
/// [`BlingError`]. Nothing is retried.
///
/// # Thread Safety
///
/// `BlingRepository` is `Send + Sync` and holds no per-call state, so calls
/// may be issued concurrently from many tasks. They share the client's rate
/// limiter, if one is configured.
///
/// # Example
///
/// ```rust,ignore
/// use bling_api::{BlingRepository, OperationDescriptor};
/// use serde_json::{json, Value};
///
/// let repository = BlingRepository::with_token("access-token", None)?;
///
/// let contact: Value = repository
///     .get(OperationDescriptor::builder("contatos").id(42_u64).build())
///     .await?;
///
/// let created: Value = repository
///     .create(
///         OperationDescriptor::builder("pedidos/vendas")
///             .body(json!({"numero": 1}))
///             .build(),
///     )
///     .await?;
/// ```
#[derive(Debug)]
pub struct BlingRepository {
    http_client: HttpClient,
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<BlingRepository>();
};

impl BlingRepository {
    /// Creates a repository from a full configuration.
    #[must_use]
    pub fn new(config: &BlingConfig) -> Self {
        Self {
            http_client: HttpClient::new(config),
        }
    }

    /// Creates a repository for the default Bling v3 URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the token is empty or the rate limit
    /// options are invalid.
    pub fn with_token(
        access_token: impl Into<String>,
        rate_limit: Option<RateLimitOptions>,
    ) -> Result<Self, ConfigError> {
        let mut builder = BlingConfig::builder().access_token(AccessToken::new(access_token)?);
        if let Some(options) = rate_limit {
            builder = builder.rate_limit(options);
        }
        Ok(Self::new(&builder.build()?))
    }

    /// Returns the underlying transport client.
    #[must_use]
    pub const fn http_client(&self) -> &HttpClient {
        &self.http_client
    }

    /// Lists resources: `GET endpoint`.
    ///
    /// # Errors
    ///
    /// Returns [`BlingError`] if the call fails or the body cannot be decoded.
    pub async fn list<T: DeserializeOwned>(
        &self,
        descriptor: OperationDescriptor,
    ) -> Result<T, BlingError> {
        self.execute(HttpMethod::Get, descriptor, false).await
    }

    /// Fetches one resource: `GET endpoint/id`.
    ///
    /// # Errors
    ///
    /// Returns [`BlingError::Internal`] if the descriptor has no id, and
    /// [`BlingError`] if the call fails or the body cannot be decoded.
    pub async fn get<T: DeserializeOwned>(
        &self,
        descriptor: OperationDescriptor,
    ) -> Result<T, BlingError> {
        self.execute(HttpMethod::Get, descriptor, true).await
    }

    /// Creates a resource: `POST endpoint` with the descriptor body.
    ///
    /// # Errors
    ///
    /// Returns [`BlingError`] if the call fails or the body cannot be decoded.
    pub async fn create<T: DeserializeOwned>(
        &self,
        descriptor: OperationDescriptor,
    ) -> Result<T, BlingError> {
        self.execute(HttpMethod::Post, descriptor, false).await
    }

    /// Partially updates a resource: `PATCH endpoint/id` with the descriptor body.
    ///
    /// # Errors
    ///
    /// Returns [`BlingError::Internal`] if the descriptor has no id, and
    /// [`BlingError`] if the call fails or the body cannot be decoded.
    pub async fn update<T: DeserializeOwned>(
        &self,
        descriptor: OperationDescriptor,
    ) -> Result<T, BlingError> {
        self.execute(HttpMethod::Patch, descriptor, true).await
    }

    /// Replaces a resource: `PATCH endpoint/id` with the descriptor body.
    ///
    /// Bling v3 takes full updates through PATCH as well, so this differs from
    /// [`update`](Self::update) only in intent.
    ///
    /// # Errors
    ///
    /// Returns [`BlingError::Internal`] if the descriptor has no id, and
    /// [`BlingError`] if the call fails or the body cannot be decoded.
    pub async fn replace<T: DeserializeOwned>(
        &self,
        descriptor: OperationDescriptor,
    ) -> Result<T, BlingError> {
        self.execute(HttpMethod::Patch, descriptor, true).await
    }

    /// Deletes a resource: `DELETE endpoint/id`.
    ///
    /// Use `()` or [`serde::de::IgnoredAny`] as `T` when the response body is
    /// not needed.
    ///
    /// # Errors
    ///
    /// Returns [`BlingError::Internal`] if the descriptor has no id, and
    /// [`BlingError`] if the call fails or the body cannot be decoded.
    pub async fn delete<T: DeserializeOwned>(
        &self,
        descriptor: OperationDescriptor,
    ) -> Result<T, BlingError> {
        self.execute(HttpMethod::Delete, descriptor, true).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        descriptor: OperationDescriptor,
        requires_id: bool,
    ) -> Result<T, BlingError> {
        let endpoint = descriptor.endpoint().to_string();
        if endpoint.is_empty() {
            return Err(BlingInternalError::new(method, endpoint, "An endpoint is required").into());
        }

        let (path, target) = if requires_id {
            let Some(id) = &descriptor.id else {
                return Err(BlingInternalError::new(method, endpoint, "An id is required").into());
            };
            (
                format!("{endpoint}/{}", id.to_path_segment()),
                descriptor.resolved_endpoint(),
            )
        } else {
            (endpoint.clone(), endpoint)
        };

        let OperationDescriptor {
            params,
            headers,
            body,
            include_headers_in_response,
            ..
        } = descriptor;
        let body = body.filter(|_| method.sends_body());

        let result = match method {
            HttpMethod::Get => self.http_client.get(&path, params, headers).await,
            HttpMethod::Post => self.http_client.post(&path, body, params, headers).await,
            HttpMethod::Put => self.http_client.put(&path, body, params, headers).await,
            HttpMethod::Patch => self.http_client.patch(&path, body, params, headers).await,
            HttpMethod::Delete => self.http_client.delete(&path, params, headers).await,
        };
        let response = result.map_err(|error| normalize(error, &target))?;

        let value = if include_headers_in_response {
            merge_response_headers(response)
        } else {
            response.body
        };

        serde_json::from_value(value).map_err(|error| {
            tracing::warn!("{} {} returned an undecodable body: {}", method, target, error);
            BlingInternalError::new(method, target, "Unable to decode response body").into()
        })
    }
}

/// Builds `{"headers": {...}}` and lays the body's own fields over it.
///
/// A body field named `headers` replaces the response headers. Bodies that
/// are not JSON objects contribute no fields.
fn merge_response_headers(response: HttpResponse) -> Value {
    let mut merged = Map::new();
    merged.insert("headers".to_string(), response.headers_as_json());
    if let Value::Object(fields) = response.body {
        merged.extend(fields);
    }
    Value::Object(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    fn response(body: Value) -> HttpResponse {
        let mut headers = HashMap::new();
        headers.insert("x-request-id".to_string(), vec!["r-1".to_string()]);
        HttpResponse::new(200, headers, body)
    }

    #[test]
    fn test_merge_adds_headers_key() {
        let merged = merge_response_headers(response(json!({"data": {"id": 1}})));

        assert_eq!(merged["data"], json!({"id": 1}));
        assert_eq!(merged["headers"]["x-request-id"], json!("r-1"));
    }

    #[test]
    fn test_merge_body_wins_on_collision() {
        let merged = merge_response_headers(response(json!({"headers": "from-body"})));
        assert_eq!(merged, json!({"headers": "from-body"}));
    }

    #[test]
    fn test_merge_with_null_or_scalar_body() {
        let merged = merge_response_headers(response(Value::Null));
        assert_eq!(merged, json!({"headers": {"x-request-id": "r-1"}}));

        let merged = merge_response_headers(response(json!("plain text")));
        assert_eq!(merged, json!({"headers": {"x-request-id": "r-1"}}));
    }

    #[test]
    fn test_with_token_rejects_empty_token() {
        assert!(matches!(
            BlingRepository::with_token("", None),
            Err(ConfigError::EmptyAccessToken)
        ));
    }

    #[test]
    fn test_with_token_applies_rate_limit() {
        let repository =
            BlingRepository::with_token("tkn", Some(RateLimitOptions::concurrent(2))).unwrap();

        let limiter = repository.http_client().rate_limiter().unwrap();
        assert_eq!(limiter.available_slots(), Some(2));
    }

    #[tokio::test]
    async fn test_missing_id_fails_before_any_call() {
        let repository = BlingRepository::with_token("tkn", None).unwrap();

        let result: Result<Value, _> = repository
            .update(OperationDescriptor::new("pedidos/compras"))
            .await;

        match result {
            Err(BlingError::Internal(error)) => {
                assert_eq!(error.method, HttpMethod::Patch);
                assert_eq!(error.endpoint, "pedidos/compras");
                assert!(error.message.contains("PATCH pedidos/compras"));
            }
            other => panic!("Expected internal error, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_endpoint_fails_before_any_call() {
        let repository = BlingRepository::with_token("tkn", None).unwrap();

        let result: Result<Value, _> = repository.list(OperationDescriptor::new("/")).await;

        assert!(matches!(result, Err(BlingError::Internal(error)) if error.method == HttpMethod::Get));
    }

    #[test]
    fn test_repository_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<BlingRepository>();
    }
}
