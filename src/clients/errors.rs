//! Transport-level error types for the Bling API SDK.
//!
//! [`HttpError`] is what the [`HttpClient`](crate::clients::HttpClient)
//! returns when an exchange does not end in a 2xx response. It records the
//! attempted method and path, whether a response arrived, and the payload
//! that came with it. The repository layer turns it into a
//! [`BlingError`](crate::BlingError); callers of the repository never see it.
//!
//! # Example
//!
//! ```rust,ignore
//! use bling_api::clients::HttpError;
//!
//! match client.get("contatos/1", None, None).await {
//!     Ok(response) => println!("Contact: {}", response.body),
//!     Err(error) if error.response_received() => {
//!         println!("{} {} failed with payload {:?}", error.method(), error.path(), error.payload());
//!     }
//!     Err(error) => println!("No response: {error}"),
//! }
//! ```

use std::collections::HashMap;

use thiserror::Error;

use crate::clients::HttpMethod;

/// Error returned when the server answered with a non-2xx status.
#[derive(Debug, Error)]
#[error("{method} {path} returned status {code}")]
pub struct HttpResponseError {
    /// The method of the failed request.
    pub method: HttpMethod,
    /// The path of the failed request, relative to the base URL.
    pub path: String,
    /// The HTTP status code of the response.
    pub code: u16,
    /// Response headers.
    pub headers: HashMap<String, Vec<String>>,
    /// The response body, if it was present and valid JSON.
    pub body: Option<serde_json::Value>,
}

/// Error returned when a request cannot be sent as described.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// The request path is empty.
    #[error("Cannot send a request without a path.")]
    EmptyPath,

    /// A body was supplied for a method that does not send one.
    #[error("Cannot send a body with {method}.")]
    UnexpectedBody {
        /// The HTTP method that was used.
        method: String,
    },

    /// A header name or value is not valid HTTP.
    #[error("Invalid header '{name}'.")]
    InvalidHeader {
        /// The offending header name.
        name: String,
    },
}

/// Unified error type for transport failures.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The server responded with a non-2xx status code.
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// No response was received (connection failure, timeout, TLS error).
    #[error("Network error during {method} {path}: {source}")]
    Network {
        /// The method of the failed request.
        method: HttpMethod,
        /// The path of the failed request.
        path: String,
        /// The underlying client error.
        #[source]
        source: reqwest::Error,
    },

    /// The request failed validation and was never sent.
    #[error("Invalid request {method} {path}: {source}")]
    InvalidRequest {
        /// The method of the rejected request.
        method: HttpMethod,
        /// The path of the rejected request.
        path: String,
        /// Why the request was rejected.
        #[source]
        source: InvalidHttpRequestError,
    },
}

impl HttpError {
    /// Returns `true` if the server sent back a response.
    #[must_use]
    pub const fn response_received(&self) -> bool {
        matches!(self, Self::Response(_))
    }

    /// Returns the response payload, if a response with a JSON body arrived.
    #[must_use]
    pub fn payload(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Response(error) => error.body.as_ref(),
            Self::Network { .. } | Self::InvalidRequest { .. } => None,
        }
    }

    /// Returns the HTTP method of the attempted request.
    #[must_use]
    pub const fn method(&self) -> HttpMethod {
        match self {
            Self::Response(error) => error.method,
            Self::Network { method, .. } | Self::InvalidRequest { method, .. } => *method,
        }
    }

    /// Returns the path of the attempted request.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::Response(error) => &error.path,
            Self::Network { path, .. } | Self::InvalidRequest { path, .. } => path,
        }
    }

    /// Returns the HTTP status code, if a response arrived.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Response(error) => Some(error.code),
            Self::Network { .. } | Self::InvalidRequest { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response_error(body: Option<serde_json::Value>) -> HttpError {
        HttpError::Response(HttpResponseError {
            method: HttpMethod::Delete,
            path: "contatos/5".to_string(),
            code: 404,
            headers: HashMap::new(),
            body,
        })
    }

    #[test]
    fn test_response_error_message_names_request() {
        let message = response_error(None).to_string();
        assert_eq!(message, "DELETE contatos/5 returned status 404");
    }

    #[test]
    fn test_response_error_exposes_payload_and_request() {
        let error = response_error(Some(json!({"error": {"message": "not found"}})));

        assert!(error.response_received());
        assert_eq!(error.payload(), Some(&json!({"error": {"message": "not found"}})));
        assert_eq!(error.method(), HttpMethod::Delete);
        assert_eq!(error.path(), "contatos/5");
        assert_eq!(error.status(), Some(404));
    }

    #[test]
    fn test_invalid_request_has_no_response() {
        let error = HttpError::InvalidRequest {
            method: HttpMethod::Get,
            path: "contatos".to_string(),
            source: InvalidHttpRequestError::InvalidHeader {
                name: "bad header".to_string(),
            },
        };

        assert!(!error.response_received());
        assert!(error.payload().is_none());
        assert!(error.status().is_none());
        assert!(error.to_string().contains("GET contatos"));
        assert!(error.to_string().contains("bad header"));
    }

    #[test]
    fn test_invalid_request_error_messages() {
        assert_eq!(
            InvalidHttpRequestError::EmptyPath.to_string(),
            "Cannot send a request without a path."
        );
        assert_eq!(
            InvalidHttpRequestError::UnexpectedBody {
                method: "GET".to_string()
            }
            .to_string(),
            "Cannot send a body with GET."
        );
    }

    #[test]
    fn test_error_types_implement_std_error() {
        let _: &dyn std::error::Error = &response_error(None);
        let _: &dyn std::error::Error = &InvalidHttpRequestError::EmptyPath;
    }
}
