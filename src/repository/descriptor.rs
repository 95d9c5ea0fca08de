//! Operation descriptors consumed by the repository.
//!
//! An [`OperationDescriptor`] says *what* to call (endpoint, id, query,
//! headers, body); the [`BlingRepository`](crate::BlingRepository) method
//! chosen by the caller says *how* (verb and path rule).

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A resource identifier.
///
/// Bling ids are numeric, but some endpoints accept textual keys (codes,
/// document numbers), so both forms are supported.
///
/// # Example
///
/// ```rust
/// use bling_api::Identifier;
///
/// assert_eq!(Identifier::from(42_u64).to_string(), "42");
/// assert_eq!(Identifier::from("SKU-1").to_string(), "SKU-1");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Identifier {
    /// A numeric id.
    Number(u64),
    /// A textual id.
    Text(String),
}

impl Identifier {
    /// Returns the id encoded for use as a single path segment.
    #[must_use]
    pub fn to_path_segment(&self) -> String {
        match self {
            Self::Number(id) => id.to_string(),
            Self::Text(id) => urlencoding::encode(id).into_owned(),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

impl From<u64> for Identifier {
    fn from(id: u64) -> Self {
        Self::Number(id)
    }
}

impl From<u32> for Identifier {
    fn from(id: u32) -> Self {
        Self::Number(u64::from(id))
    }
}

/// Negative values have no numeric id in Bling and are kept as text.
impl From<i64> for Identifier {
    fn from(id: i64) -> Self {
        u64::try_from(id).map_or_else(|_| Self::Text(id.to_string()), Self::Number)
    }
}

impl From<i32> for Identifier {
    fn from(id: i32) -> Self {
        Self::from(i64::from(id))
    }
}

impl From<&str> for Identifier {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

impl From<String> for Identifier {
    fn from(id: String) -> Self {
        Self::Text(id)
    }
}

/// Describes one repository operation.
///
/// # Example
///
/// ```rust
/// use bling_api::OperationDescriptor;
/// use serde_json::json;
///
/// let descriptor = OperationDescriptor::builder("pedidos/compras")
///     .id(7_u64)
///     .body(json!({"observacoes": "Entregar pela manhã"}))
///     .include_headers_in_response(true)
///     .build();
///
/// assert_eq!(descriptor.resolved_endpoint(), "pedidos/compras/7");
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OperationDescriptor {
    /// The endpoint path, e.g. `contatos` or `pedidos/vendas`.
    pub endpoint: String,
    /// The resource id, required by get, update, replace and delete.
    pub id: Option<Identifier>,
    /// Query parameters, forwarded verbatim.
    pub params: Option<HashMap<String, String>>,
    /// Extra request headers. `Authorization` is always overridden.
    pub headers: Option<HashMap<String, String>>,
    /// The JSON request body. Ignored by list, get and delete.
    pub body: Option<serde_json::Value>,
    /// Merge the response headers into the result under a `headers` key.
    pub include_headers_in_response: bool,
}

impl OperationDescriptor {
    /// Creates a descriptor for the given endpoint with no other fields set.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    /// Creates a new builder for the given endpoint.
    #[must_use]
    pub fn builder(endpoint: impl Into<String>) -> OperationDescriptorBuilder {
        OperationDescriptorBuilder {
            descriptor: Self::new(endpoint),
        }
    }

    /// Returns the endpoint without surrounding slashes.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        self.endpoint.trim_matches('/')
    }

    /// Returns `endpoint/id`, or `endpoint` when no id is set.
    ///
    /// The id is rendered verbatim; this is the form used in messages.
    #[must_use]
    pub fn resolved_endpoint(&self) -> String {
        match &self.id {
            Some(id) => format!("{}/{id}", self.endpoint()),
            None => self.endpoint().to_string(),
        }
    }
}

/// Builder for [`OperationDescriptor`].
#[derive(Debug)]
pub struct OperationDescriptorBuilder {
    descriptor: OperationDescriptor,
}

impl OperationDescriptorBuilder {
    /// Sets the resource id.
    #[must_use]
    pub fn id(mut self, id: impl Into<Identifier>) -> Self {
        self.descriptor.id = Some(id.into());
        self
    }

    /// Sets all query parameters at once.
    #[must_use]
    pub fn params(mut self, params: HashMap<String, String>) -> Self {
        self.descriptor.params = Some(params);
        self
    }

    /// Adds a single query parameter.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.descriptor
            .params
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Sets all extra headers at once.
    #[must_use]
    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.descriptor.headers = Some(headers);
        self
    }

    /// Adds a single extra header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.descriptor
            .headers
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Sets the JSON request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<serde_json::Value>) -> Self {
        self.descriptor.body = Some(body.into());
        self
    }

    /// Requests that response headers be merged into the result.
    #[must_use]
    pub const fn include_headers_in_response(mut self, include: bool) -> Self {
        self.descriptor.include_headers_in_response = include;
        self
    }

    /// Returns the finished descriptor.
    ///
    /// Endpoint and id requirements are checked by the repository operation
    /// that consumes the descriptor.
    #[must_use]
    pub fn build(self) -> OperationDescriptor {
        self.descriptor
    }
}
