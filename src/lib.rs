//! # Bling API Rust SDK
//!
//! A Rust client for the Bling ERP REST API (v3): typed configuration, one
//! generic repository for every endpoint, and typed entities on top of it.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`BlingConfig`] and [`BlingConfigBuilder`]
//! - Bearer token authentication on every request
//! - Optional client-side rate limiting (requests per window, requests in flight)
//! - A generic [`BlingRepository`] with list, get, create, update, replace and
//!   delete operations
//! - Typed entities (contacts, sales orders, purchase orders) via [`entities`]
//! - A two-kind error taxonomy: [`BlingError::Api`] and [`BlingError::Internal`]
//!
//! ## Quick Start
//!
//! ```rust
//! use bling_api::{AccessToken, BlingConfig, BlingRepository, RateLimitOptions};
//!
//! let config = BlingConfig::builder()
//!     .access_token(AccessToken::new("your-access-token").unwrap())
//!     .rate_limit(RateLimitOptions::per_second(3))
//!     .build()
//!     .unwrap();
//!
//! let repository = BlingRepository::new(&config);
//! ```
//!
//! ## Generic Operations
//!
//! ```rust,ignore
//! use bling_api::{BlingError, BlingRepository, OperationDescriptor};
//! use serde_json::{json, Value};
//!
//! let repository = BlingRepository::with_token("your-access-token", None)?;
//!
//! let contact: Value = repository
//!     .get(OperationDescriptor::builder("contatos").id(42_u64).build())
//!     .await?;
//!
//! let result: Result<Value, BlingError> = repository
//!     .update(
//!         OperationDescriptor::builder("pedidos/compras")
//!             .id(7_u64)
//!             .body(json!({"observacoes": "Entregar pela manhã"}))
//!             .include_headers_in_response(true)
//!             .build(),
//!     )
//!     .await;
//! ```
//!
//! ## Typed Entities
//!
//! ```rust,ignore
//! use bling_api::entities::{Contacts, Entity};
//!
//! let contact = Contacts::find(&repository, 42_u64, None).await?;
//! println!("{}", contact.data.nome);
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: The repository is `Send + Sync` and holds no per-call state
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **No retries**: Every failure surfaces as exactly one [`BlingError`]

pub mod clients;
pub mod config;
pub mod entities;
pub mod error;
pub mod repository;

// Re-export public types at crate root for convenience
pub use config::{AccessToken, BaseUrl, BlingConfig, BlingConfigBuilder};
pub use error::ConfigError;

// Re-export repository types
pub use repository::{
    BlingApiError, BlingError, BlingInternalError, BlingRepository, Identifier,
    OperationDescriptor, OperationDescriptorBuilder,
};

// Re-export HTTP client types
pub use clients::{
    HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    HttpResponseError, InvalidHttpRequestError, RateLimitOptions,
};
