//! Typed Bling entities built on the generic repository.
//!
//! An entity only knows its endpoint and the shape of its payloads; the
//! [`Entity`] trait turns that into typed list, find, create, update,
//! replace and delete calls through a [`BlingRepository`].
//!
//! # Provided Entities
//!
//! - [`Contacts`]: `contatos`
//! - [`Orders`]: `pedidos/vendas`
//! - [`PurchaseOrders`]: `pedidos/compras`
//!
//! # Example
//!
//! ```rust,ignore
//! use bling_api::entities::{ContactFilters, Contacts, Entity, PersonType};
//! use bling_api::BlingRepository;
//!
//! let repository = BlingRepository::with_token("access-token", None)?;
//!
//! let filters = ContactFilters {
//!     tipo_pessoa: Some(PersonType::Company),
//!     ..Default::default()
//! };
//! let page = Contacts::list(&repository, Some(filters)).await?;
//! for contact in &page.data {
//!     println!("{}", contact.nome);
//! }
//! ```
//!
//! # Adding an Entity
//!
//! ```rust,ignore
//! use bling_api::entities::Entity;
//!
//! pub struct Products;
//!
//! impl Entity for Products {
//!     type Payload = Product;
//!     type Response = Product;
//!     type Filters = ProductFilters;
//!     type Infos = ();
//!
//!     const NAME: &'static str = "produto";
//!     const ENDPOINT: &'static str = "produtos";
//! }
//! ```

mod bling_date;
mod contacts;
mod orders;
mod purchase_orders;

pub use contacts::{
    Contact, ContactFilters, ContactInfos, ContactKind, ContactResponse, Contacts, PersonType,
    TaxpayerKind,
};
pub use orders::{
    Order, OrderCustomer, OrderFilters, OrderInfos, OrderInstallment, OrderItem, OrderTransport,
    Orders,
};
pub use purchase_orders::{
    DiscountUnit, PurchaseOrder, PurchaseOrderDiscount, PurchaseOrderFilters, PurchaseOrderItem,
    PurchaseOrderInstallment, PurchaseOrderStatus, PurchaseOrderTransport, PurchaseOrders, Reference,
    StatusValue, Taxes,
};

use std::collections::HashMap;

use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::clients::HttpMethod;
use crate::repository::{BlingError, BlingInternalError, BlingRepository, Identifier, OperationDescriptor};

/// The `{"data": ...}` envelope Bling wraps every successful result in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DataResponse<T> {
    /// The wrapped result.
    pub data: T,
}

impl<T> DataResponse<T> {
    /// Returns the wrapped result.
    pub fn into_inner(self) -> T {
        self.data
    }
}

/// The result of a create or update.
///
/// Bling answers writes with the id of the saved record, any warnings it
/// raised while saving, and sometimes endpoint-specific extras (e.g. the
/// final `numero` of an order or attachment errors), which are kept in
/// [`extra`](Self::extra).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SavedRecord {
    /// Id of the saved record.
    pub id: Identifier,
    /// Warnings raised while saving.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alertas: Vec<String>,
    /// Any other fields returned.
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// A Bling resource with typed payloads.
///
/// Implementors supply the endpoint and payload types and get default
/// implementations of every operation.
///
/// # Associated Types
///
/// - `Payload`: the body sent on create and replace
/// - `Response`: one record as returned by list and find
/// - `Filters`: query parameters for `list()` (use `()` if none)
/// - `Infos`: query parameters for `find()` (use `()` if none)
#[allow(async_fn_in_trait)]
pub trait Entity: Sized {
    /// The body sent on create and replace.
    type Payload: Serialize + Send + Sync;

    /// One record as returned by the API.
    type Response: DeserializeOwned + Send;

    /// Query parameters for `list()`.
    type Filters: Serialize + Default + Send + Sync;

    /// Query parameters for `find()`.
    type Infos: Serialize + Default + Send + Sync;

    /// The singular name of the entity (e.g. "contato").
    const NAME: &'static str;

    /// The endpoint path relative to the base URL (e.g. "contatos").
    const ENDPOINT: &'static str;

    /// Lists records matching the given filters.
    ///
    /// # Errors
    ///
    /// Returns [`BlingError`] if the call fails.
    async fn list(
        repository: &BlingRepository,
        filters: Option<Self::Filters>,
    ) -> Result<DataResponse<Vec<Self::Response>>, BlingError> {
        let mut descriptor = OperationDescriptor::new(Self::ENDPOINT);
        descriptor.params = query_params(filters.as_ref(), HttpMethod::Get, Self::ENDPOINT)?;
        repository.list(descriptor).await
    }

    /// Fetches one record by id.
    ///
    /// # Errors
    ///
    /// Returns [`BlingError`] if the call fails; a missing record is an
    /// [`BlingError::Api`] carrying Bling's not-found payload.
    async fn find(
        repository: &BlingRepository,
        id: impl Into<Identifier>,
        infos: Option<Self::Infos>,
    ) -> Result<DataResponse<Self::Response>, BlingError> {
        let mut descriptor = OperationDescriptor::builder(Self::ENDPOINT).id(id).build();
        descriptor.params =
            query_params(infos.as_ref(), HttpMethod::Get, &descriptor.resolved_endpoint())?;
        repository.get(descriptor).await
    }

    /// Creates a record.
    ///
    /// # Errors
    ///
    /// Returns [`BlingError`] if the call fails.
    async fn create(
        repository: &BlingRepository,
        payload: &Self::Payload,
    ) -> Result<DataResponse<SavedRecord>, BlingError> {
        let body = encode_body(payload, HttpMethod::Post, Self::ENDPOINT)?;
        let descriptor = OperationDescriptor::builder(Self::ENDPOINT).body(body).build();
        repository.create(descriptor).await
    }

    /// Updates some fields of a record.
    ///
    /// `changes` may be any serializable value, typically a
    /// `serde_json::Value` or a payload with only the changed fields set.
    ///
    /// # Errors
    ///
    /// Returns [`BlingError`] if the call fails.
    async fn update<P: Serialize + Sync>(
        repository: &BlingRepository,
        id: impl Into<Identifier>,
        changes: &P,
    ) -> Result<DataResponse<SavedRecord>, BlingError> {
        let descriptor = OperationDescriptor::builder(Self::ENDPOINT).id(id).build();
        let body = encode_body(changes, HttpMethod::Patch, &descriptor.resolved_endpoint())?;
        repository
            .update(OperationDescriptor {
                body: Some(body),
                ..descriptor
            })
            .await
    }

    /// Replaces a record with a full payload.
    ///
    /// # Errors
    ///
    /// Returns [`BlingError`] if the call fails.
    async fn replace(
        repository: &BlingRepository,
        id: impl Into<Identifier>,
        payload: &Self::Payload,
    ) -> Result<DataResponse<SavedRecord>, BlingError> {
        let descriptor = OperationDescriptor::builder(Self::ENDPOINT).id(id).build();
        let body = encode_body(payload, HttpMethod::Patch, &descriptor.resolved_endpoint())?;
        repository
            .replace(OperationDescriptor {
                body: Some(body),
                ..descriptor
            })
            .await
    }

    /// Deletes a record.
    ///
    /// # Errors
    ///
    /// Returns [`BlingError`] if the call fails.
    async fn delete(repository: &BlingRepository, id: impl Into<Identifier>) -> Result<(), BlingError> {
        let descriptor = OperationDescriptor::builder(Self::ENDPOINT).id(id).build();
        repository.delete::<IgnoredAny>(descriptor).await.map(|_| ())
    }
}

fn encode_body<T: Serialize + ?Sized>(
    payload: &T,
    method: HttpMethod,
    endpoint: &str,
) -> Result<Value, BlingError> {
    serde_json::to_value(payload).map_err(|error| {
        tracing::warn!("{} {} body could not be encoded: {}", method, endpoint, error);
        BlingInternalError::new(method, endpoint, "Unable to encode request body").into()
    })
}

fn query_params<T: Serialize>(
    params: Option<&T>,
    method: HttpMethod,
    endpoint: &str,
) -> Result<Option<HashMap<String, String>>, BlingError> {
    let Some(params) = params else {
        return Ok(None);
    };
    let value = encode_body(params, method, endpoint)?;
    let query = serialize_to_query(value);
    Ok(Some(query).filter(|query| !query.is_empty()))
}

/// Flattens a serialized params struct into query parameters.
///
/// Nulls are skipped, arrays become comma-separated lists and nested objects
/// are sent as JSON text. Anything other than an object yields no parameters.
fn serialize_to_query(value: Value) -> HashMap<String, String> {
    let mut query = HashMap::new();

    if let Value::Object(map) = value {
        for (key, val) in map {
            match val {
                Value::Null => {}
                Value::String(s) => {
                    query.insert(key, s);
                }
                Value::Number(n) => {
                    query.insert(key, n.to_string());
                }
                Value::Bool(b) => {
                    query.insert(key, b.to_string());
                }
                Value::Array(arr) => {
                    let values: Vec<String> = arr
                        .iter()
                        .filter_map(|v| match v {
                            Value::String(s) => Some(s.clone()),
                            Value::Number(n) => Some(n.to_string()),
                            _ => None,
                        })
                        .collect();
                    if !values.is_empty() {
                        query.insert(key, values.join(","));
                    }
                }
                Value::Object(_) => {
                    query.insert(key, val.to_string());
                }
            }
        }
    }

    query
}
