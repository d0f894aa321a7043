//! Cross-cutting error types for GeoFlag.
//!
//! Report and configuration crates define their own errors. Traversal
//! anomalies in this crate are recovered locally and only surface through
//! logging, so most callers never see a `CoreError` from flattening.

use thiserror::Error;

use crate::entity::EntityId;

/// Errors that can be raised by the core model.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {0}")]
    NotFound(EntityId),

    /// A composite references a member the dataset cannot resolve.
    #[error("Malformed composite {composite}: member {member} cannot be resolved")]
    MalformedComposite { composite: EntityId, member: EntityId },

    /// Data failed validation (unknown tag value, bad format).
    #[error("Validation error: {0}")]
    Validation(String),
}
