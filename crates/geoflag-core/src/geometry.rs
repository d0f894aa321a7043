//! GeoJSON geometry derived from entity coordinates.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entity::{Coordinate, EntityRef};
use crate::enums::EntityKind;

/// String-to-string property block attached to a geometry.
pub type PropertyMap = BTreeMap<String, String>;

/// A GeoJSON geometry object. Positions are `[longitude, latitude]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { coordinates: [f64; 2] },
    LineString { coordinates: Vec<[f64; 2]> },
    Polygon { coordinates: Vec<Vec<[f64; 2]>> },
    GeometryCollection { geometries: Vec<Self> },
}

impl Geometry {
    /// Derive the geometry of a non-composite entity.
    ///
    /// Returns `None` for composites and for entities without coordinates.
    /// A line with a single coordinate degrades to a point. Area rings are
    /// closed by repeating the first coordinate.
    #[must_use]
    pub fn for_entity(entity: EntityRef<'_>) -> Option<Self> {
        let points = entity.geometry_points();
        let first = *points.first()?;
        let geometry = match entity.kind() {
            EntityKind::Composite => return None,
            EntityKind::Point => Self::Point {
                coordinates: first.position(),
            },
            EntityKind::Line if points.len() == 1 => Self::Point {
                coordinates: first.position(),
            },
            EntityKind::Line => Self::LineString {
                coordinates: positions(points),
            },
            EntityKind::Area => {
                let mut ring = positions(points);
                if points.last() != Some(&first) {
                    ring.push(first.position());
                }
                Self::Polygon {
                    coordinates: vec![ring],
                }
            }
        };
        Some(geometry)
    }

    #[must_use]
    pub const fn collection(geometries: Vec<Self>) -> Self {
        Self::GeometryCollection { geometries }
    }

    /// The GeoJSON `type` member.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Point { .. } => "Point",
            Self::LineString { .. } => "LineString",
            Self::Polygon { .. } => "Polygon",
            Self::GeometryCollection { .. } => "GeometryCollection",
        }
    }
}

fn positions(points: &[Coordinate]) -> Vec<[f64; 2]> {
    points.iter().map(|point| point.position()).collect()
}

/// One contributed geometry together with the property block describing it.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryWithProperties {
    pub geometry: Geometry,
    pub properties: PropertyMap,
}
