//! Report document shapes.
//!
//! These structs define the JSON contract produced by report synthesis.
//! Field names are consumed by downstream tooling and must stay stable.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::geometry::{Geometry, PropertyMap};

/// The GeoJSON `"Feature"` type tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum FeatureType {
    #[default]
    Feature,
}

/// The GeoJSON `"FeatureCollection"` type tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum CollectionType {
    #[default]
    FeatureCollection,
}

/// Aggregate document: one feature for the whole flag.
///
/// `geometry` is the single contributed geometry when there is exactly one,
/// otherwise a `GeometryCollection` (possibly empty).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FlagFeature {
    #[serde(rename = "type")]
    pub kind: FeatureType,
    pub id: String,
    pub geometry: Geometry,
    pub properties: FlagFeatureProperties,
}

/// Properties of the aggregate document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FlagFeatureProperties {
    /// Numbered instruction text.
    pub instructions: String,

    /// Contextual properties (`name`, `generator`, `timestamp`, ...).
    #[serde(flatten)]
    pub context: PropertyMap,

    /// Number of entries in `feature_properties`.
    pub feature_count: usize,

    /// One property block per contributing entity.
    pub feature_properties: Vec<PropertyMap>,

    /// Distinct origin identifiers found in `feature_properties`.
    pub feature_osmids: Vec<String>,

    /// Own property blocks of flagged composites.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub composite_properties: Vec<PropertyMap>,
}

/// Flattened document: one feature per contributed geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FlagFeatureCollection {
    #[serde(rename = "type")]
    pub kind: CollectionType,
    pub features: Vec<MemberFeature>,
    /// `id`, `instructions`, contextual properties, and composite tags.
    pub properties: PropertyMap,
}

/// One feature of a [`FlagFeatureCollection`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MemberFeature {
    #[serde(rename = "type")]
    pub kind: FeatureType,
    pub geometry: Geometry,
    pub properties: PropertyMap,
}
