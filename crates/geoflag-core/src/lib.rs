//! # geoflag-core
//!
//! Core types for aggregating validation flags over a map entity graph.
//!
//! This crate provides the foundational types shared across all GeoFlag crates:
//! - Read-only entity model (`Dataset`, `EntityRef`) with composite membership
//! - Composite flattening with cycle protection
//! - GeoJSON geometry derived from entity coordinates
//! - `Flag`: the aggregation root for one violation report
//! - `DedupLedger`: per-check record of origin identifiers already reported
//! - Output document shapes consumed by report synthesis and schema validation
//! - Cross-cutting error types

pub mod documents;
pub mod entity;
pub mod enums;
pub mod errors;
pub mod flag;
pub mod flatten;
pub mod geometry;
pub mod ledger;

pub use entity::{Coordinate, Dataset, Entity, EntityId, EntityRef, Member, MemberRef};
pub use enums::{EntityKind, HighwayClass};
pub use errors::CoreError;
pub use flag::{Flag, Flagged, FlaggedComposite, FlaggedEntity};
pub use flatten::{FlatMember, flatten, flatten_members};
pub use geometry::{Geometry, GeometryWithProperties, PropertyMap};
pub use ledger::{DedupLedger, LedgerGuard};
