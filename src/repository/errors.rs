//! Repository error taxonomy and the transport error normalizer.
//!
//! Every repository operation fails with exactly one [`BlingError`]:
//!
//! - [`BlingError::Api`]: the server answered with a structured error
//!   payload, preserved verbatim in [`BlingApiError::payload`]
//! - [`BlingError::Internal`]: nothing structured came back (connection
//!   failure, timeout, HTML error page, undecodable body, invalid descriptor)
//!
//! Neither kind is retried.
//!
//! # Example
//!
//! ```rust,ignore
//! use bling_api::BlingError;
//!
//! match repository.get::<serde_json::Value>(descriptor).await {
//!     Ok(contact) => println!("{contact}"),
//!     Err(BlingError::Api(error)) => {
//!         // Validation messages, not-found, etc. as defined by Bling.
//!         println!("Bling rejected the call ({}): {}", error.status, error.payload);
//!     }
//!     Err(BlingError::Internal(error)) => {
//!         println!("Call did not complete: {}", error.message);
//!     }
//! }
//! ```

use thiserror::Error;

use crate::clients::{HttpError, HttpMethod};

/// The remote API reported an error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Bling API returned status {status}: {payload}")]
pub struct BlingApiError {
    /// The HTTP status code of the failed response.
    pub status: u16,
    /// The error payload exactly as the server sent it.
    pub payload: serde_json::Value,
}

/// The call could not be completed and no structured error came back.
///
/// The message names the HTTP method and the resolved endpoint and never
/// includes request or response payload data.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct BlingInternalError {
    /// Human-readable description naming method and endpoint.
    pub message: String,
    /// The HTTP method of the attempted call.
    pub method: HttpMethod,
    /// The resolved endpoint, e.g. `contatos/42`.
    pub endpoint: String,
}

impl BlingInternalError {
    /// Creates an internal error for `method endpoint` with the given reason.
    #[must_use]
    pub fn new(method: HttpMethod, endpoint: impl Into<String>, reason: &str) -> Self {
        let endpoint = endpoint.into();
        Self {
            message: format!("{reason}: {method} {endpoint}"),
            method,
            endpoint,
        }
    }

    /// Creates the error used when an HTTP exchange did not complete.
    #[must_use]
    pub fn call_failed(method: HttpMethod, endpoint: impl Into<String>) -> Self {
        Self::new(method, endpoint, "Unable to complete HTTP call")
    }
}

/// The error type returned by every repository and entity operation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BlingError {
    /// The remote API reported an error.
    #[error(transparent)]
    Api(#[from] BlingApiError),

    /// The call did not complete.
    #[error(transparent)]
    Internal(#[from] BlingInternalError),
}

impl BlingError {
    /// Returns the remote payload if this is an API error.
    #[must_use]
    pub const fn payload(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Api(error) => Some(&error.payload),
            Self::Internal(_) => None,
        }
    }

    /// Returns `true` if this is an API error.
    #[must_use]
    pub const fn is_api(&self) -> bool {
        matches!(self, Self::Api(_))
    }

    /// Returns `true` if this is an internal error.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal(_))
    }
}

/// Returns `true` if a response body looks like a structured error payload.
///
/// Any non-empty JSON object or array qualifies; the shape itself belongs to
/// the remote API and is not inspected.
#[must_use]
pub fn is_remote_error_payload(body: &serde_json::Value) -> bool {
    match body {
        serde_json::Value::Object(map) => !map.is_empty(),
        serde_json::Value::Array(items) => !items.is_empty(),
        _ => false,
    }
}

/// Maps a failed exchange to exactly one [`BlingError`].
///
/// The method is taken from the failed request itself; `endpoint` is the
/// resolved endpoint the repository used.
///
/// An empty `{}` or `[]` error body carries nothing to act on and yields
/// [`BlingError::Internal`], same as a missing or non-JSON body.
#[must_use]
pub fn normalize(error: HttpError, endpoint: &str) -> BlingError {
    let method = error.method();

    if let HttpError::Response(response) = error {
        if let Some(payload) = response.body.filter(is_remote_error_payload) {
            return BlingError::Api(BlingApiError {
                status: response.code,
                payload,
            });
        }
        tracing::warn!(
            "{} {} returned status {} without an error payload",
            method,
            endpoint,
            response.code
        );
    } else {
        tracing::warn!("{} {} failed: {}", method, endpoint, error);
    }

    BlingError::Internal(BlingInternalError::call_failed(method, endpoint))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{HttpResponseError, InvalidHttpRequestError};
    use serde_json::json;
    use std::collections::HashMap;

    fn response_error(method: HttpMethod, code: u16, body: Option<serde_json::Value>) -> HttpError {
        HttpError::Response(HttpResponseError {
            method,
            path: "ignored".to_string(),
            code,
            headers: HashMap::new(),
            body,
        })
    }

    #[test]
    fn test_structured_payload_becomes_api_error() {
        let payload = json!({"error": {"message": "not found"}});
        let error = normalize(
            response_error(HttpMethod::Delete, 404, Some(payload.clone())),
            "contatos/5",
        );

        assert_eq!(
            error,
            BlingError::Api(BlingApiError {
                status: 404,
                payload,
            })
        );
    }

    #[test]
    fn test_validation_payload_is_preserved_verbatim() {
        let payload = json!({
            "error": {
                "type": "VALIDATION_ERROR",
                "message": "Não foi possível salvar o contato",
                "fields": [{"code": 49, "element": "nome", "msg": "O nome é obrigatório"}]
            }
        });
        let error = normalize(
            response_error(HttpMethod::Post, 400, Some(payload.clone())),
            "contatos",
        );

        assert_eq!(error.payload(), Some(&payload));
        assert!(error.is_api());
    }

    #[test]
    fn test_missing_payload_becomes_internal_error() {
        let error = normalize(response_error(HttpMethod::Get, 502, None), "contatos/42");

        match error {
            BlingError::Internal(internal) => {
                assert_eq!(internal.method, HttpMethod::Get);
                assert_eq!(internal.endpoint, "contatos/42");
                assert_eq!(internal.message, "Unable to complete HTTP call: GET contatos/42");
            }
            BlingError::Api(_) => panic!("Expected internal error"),
        }
    }

    #[test]
    fn test_empty_or_scalar_payload_is_not_structured() {
        assert!(!is_remote_error_payload(&json!({})));
        assert!(!is_remote_error_payload(&json!([])));
        assert!(!is_remote_error_payload(&json!("Bad Gateway")));
        assert!(!is_remote_error_payload(&json!(null)));
        assert!(is_remote_error_payload(&json!({"error": "x"})));
        assert!(is_remote_error_payload(&json!([{"msg": "x"}])));

        let error = normalize(response_error(HttpMethod::Get, 500, Some(json!({}))), "contatos");
        assert!(error.is_internal());
    }

    #[test]
    fn test_method_comes_from_failed_request() {
        let error = HttpError::InvalidRequest {
            method: HttpMethod::Patch,
            path: "pedidosCompras/7".to_string(),
            source: InvalidHttpRequestError::InvalidHeader {
                name: "bad header".to_string(),
            },
        };

        let normalized = normalize(error, "pedidosCompras/7");
        let message = normalized.to_string();
        assert!(message.contains("PATCH"));
        assert!(message.contains("pedidosCompras/7"));
    }

    #[test]
    fn test_internal_error_custom_reason() {
        let error = BlingInternalError::new(HttpMethod::Get, "contatos", "An id is required");
        assert_eq!(error.to_string(), "An id is required: GET contatos");
    }

    #[test]
    fn test_api_error_display_includes_status_and_payload() {
        let error = BlingApiError {
            status: 404,
            payload: json!({"error": {"message": "not found"}}),
        };
        let message = error.to_string();
        assert!(message.contains("404"));
        assert!(message.contains("not found"));
    }
}
