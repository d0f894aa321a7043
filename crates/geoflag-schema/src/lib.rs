//! # geoflag-schema
//!
//! JSON Schema generation and validation for GeoFlag.
//!
//! Document types are defined in `geoflag-core` with `#[derive(JsonSchema)]`.
//! This crate builds their schemas once and validates produced documents
//! against them, so downstream tooling can rely on a fixed output contract.

mod error;
mod registry;

pub use error::SchemaError;
pub use registry::{FLAG_FEATURE, FLAG_FEATURE_COLLECTION, SchemaRegistry};
