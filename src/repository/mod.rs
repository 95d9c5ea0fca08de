//! Generic resource access for the Bling API.
//!
//! - [`BlingRepository`]: list, get, create, update, replace and delete for
//!   any endpoint
//! - [`OperationDescriptor`] / [`Identifier`]: what to call
//! - [`BlingError`]: the two ways an operation can fail
//!
//! Entity modules in [`crate::entities`] build descriptors and call the
//! repository; anything they do not cover can use the repository directly.

mod bling_repository;
mod descriptor;
mod errors;

pub use bling_repository::BlingRepository;
pub use descriptor::{Identifier, OperationDescriptor, OperationDescriptorBuilder};
pub use errors::{is_remote_error_payload, normalize, BlingApiError, BlingError, BlingInternalError};
