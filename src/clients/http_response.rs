//! HTTP response envelope returned by the transport client.

use std::collections::HashMap;

/// A successful or failed HTTP response from the Bling API.
///
/// Header names are stored lower-cased; a header may carry several values.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The parsed response body. `Null` when the body was empty.
    pub body: serde_json::Value,
}

impl HttpResponse {
    /// Creates a new response envelope.
    #[must_use]
    pub const fn new(
        code: u16,
        headers: HashMap<String, Vec<String>>,
        body: serde_json::Value,
    ) -> Self {
        Self {
            code,
            headers,
            body,
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the first value of a header, matching the name case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the headers as a JSON object of name to value.
    ///
    /// Repeated headers are joined with `", "`, as they would be on the wire.
    #[must_use]
    pub fn headers_as_json(&self) -> serde_json::Value {
        let map = self
            .headers
            .iter()
            .map(|(name, values)| (name.clone(), serde_json::Value::from(values.join(", "))))
            .collect::<serde_json::Map<_, _>>();
        serde_json::Value::Object(map)
    }
}
