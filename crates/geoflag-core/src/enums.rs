//! Entity kinds and highway classifications.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! `HighwayClass` carries a total importance order used by the report
//! decorator to pick the most significant road among flagged features.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// EntityKind
// ---------------------------------------------------------------------------

/// Kind of a map entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Point,
    Line,
    Area,
    Composite,
}

impl EntityKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Point => "point",
            Self::Line => "line",
            Self::Area => "area",
            Self::Composite => "composite",
        }
    }

    /// Label written to the `ItemType` key of a flagged entity's property block.
    #[must_use]
    pub const fn item_type(self) -> &'static str {
        match self {
            Self::Point => "Point",
            Self::Line => "Line",
            Self::Area => "Area",
            Self::Composite => "Relation",
        }
    }

    #[must_use]
    pub const fn is_composite(self) -> bool {
        matches!(self, Self::Composite)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// HighwayClass
// ---------------------------------------------------------------------------

/// Highway classification, ordered by importance.
///
/// Declaration order is importance order, most important first. `No` is the
/// default classification and ranks below everything else.
///
/// ```text
/// motorway > trunk > primary > ... > construction > proposed > no
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum HighwayClass {
    Motorway,
    Trunk,
    Primary,
    Secondary,
    Tertiary,
    MotorwayLink,
    TrunkLink,
    PrimaryLink,
    SecondaryLink,
    TertiaryLink,
    Unclassified,
    Residential,
    LivingStreet,
    Service,
    Pedestrian,
    Track,
    BusGuideway,
    Road,
    Footway,
    Bridleway,
    Steps,
    Path,
    Cycleway,
    Construction,
    Proposed,
    No,
}

impl HighwayClass {
    /// Tag key carrying the classification.
    pub const KEY: &'static str = "highway";

    /// Every classification, most important first.
    pub const ALL: [Self; 26] = [
        Self::Motorway,
        Self::Trunk,
        Self::Primary,
        Self::Secondary,
        Self::Tertiary,
        Self::MotorwayLink,
        Self::TrunkLink,
        Self::PrimaryLink,
        Self::SecondaryLink,
        Self::TertiaryLink,
        Self::Unclassified,
        Self::Residential,
        Self::LivingStreet,
        Self::Service,
        Self::Pedestrian,
        Self::Track,
        Self::BusGuideway,
        Self::Road,
        Self::Footway,
        Self::Bridleway,
        Self::Steps,
        Self::Path,
        Self::Cycleway,
        Self::Construction,
        Self::Proposed,
        Self::No,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Motorway => "motorway",
            Self::Trunk => "trunk",
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Tertiary => "tertiary",
            Self::MotorwayLink => "motorway_link",
            Self::TrunkLink => "trunk_link",
            Self::PrimaryLink => "primary_link",
            Self::SecondaryLink => "secondary_link",
            Self::TertiaryLink => "tertiary_link",
            Self::Unclassified => "unclassified",
            Self::Residential => "residential",
            Self::LivingStreet => "living_street",
            Self::Service => "service",
            Self::Pedestrian => "pedestrian",
            Self::Track => "track",
            Self::BusGuideway => "bus_guideway",
            Self::Road => "road",
            Self::Footway => "footway",
            Self::Bridleway => "bridleway",
            Self::Steps => "steps",
            Self::Path => "path",
            Self::Cycleway => "cycleway",
            Self::Construction => "construction",
            Self::Proposed => "proposed",
            Self::No => "no",
        }
    }

    /// Importance rank; larger is more important. `No` ranks 0.
    #[must_use]
    pub const fn importance(self) -> usize {
        Self::ALL.len() - 1 - self as usize
    }

    #[must_use]
    pub fn is_less_important_than(self, other: Self) -> bool {
        self < other
    }

    /// Tag text in `highway=<value>` form.
    #[must_use]
    pub fn as_tag(self) -> String {
        format!("{}={}", Self::KEY, self.as_str())
    }
}

impl PartialOrd for HighwayClass {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HighwayClass {
    fn cmp(&self, other: &Self) -> Ordering {
        self.importance().cmp(&other.importance())
    }
}

impl FromStr for HighwayClass {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|class| class.as_str() == normalized)
            .ok_or_else(|| CoreError::Validation(format!("unknown highway classification '{s}'")))
    }
}

impl fmt::Display for HighwayClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    macro_rules! test_serde_roundtrip {
        ($name:ident, $ty:ty, $variant:expr, $expected_str:expr) => {
            #[test]
            fn $name() {
                let val = $variant;
                let json = serde_json::to_string(&val).unwrap();
                assert_eq!(json, format!("\"{}\"", $expected_str));
                let recovered: $ty = serde_json::from_str(&json).unwrap();
                assert_eq!(recovered, val);
            }
        };
    }

    test_serde_roundtrip!(kind_point, EntityKind, EntityKind::Point, "point");
    test_serde_roundtrip!(kind_composite, EntityKind, EntityKind::Composite, "composite");
    test_serde_roundtrip!(
        highway_living_street,
        HighwayClass,
        HighwayClass::LivingStreet,
        "living_street"
    );
    test_serde_roundtrip!(highway_no, HighwayClass, HighwayClass::No, "no");

    #[test]
    fn item_type_labels() {
        assert_eq!(EntityKind::Point.item_type(), "Point");
        assert_eq!(EntityKind::Line.item_type(), "Line");
        assert_eq!(EntityKind::Area.item_type(), "Area");
        assert_eq!(EntityKind::Composite.item_type(), "Relation");
    }

    #[rstest]
    #[case(HighwayClass::Motorway, HighwayClass::Trunk)]
    #[case(HighwayClass::Primary, HighwayClass::Residential)]
    #[case(HighwayClass::Tertiary, HighwayClass::TertiaryLink)]
    #[case(HighwayClass::Residential, HighwayClass::Footway)]
    #[case(HighwayClass::Proposed, HighwayClass::No)]
    fn importance_order(#[case] higher: HighwayClass, #[case] lower: HighwayClass) {
        assert!(higher > lower);
        assert!(lower.is_less_important_than(higher));
        assert!(!higher.is_less_important_than(lower));
    }

    #[test]
    fn no_is_least_important() {
        assert_eq!(HighwayClass::No.importance(), 0);
        assert_eq!(HighwayClass::ALL.iter().min(), Some(&HighwayClass::No));
        assert_eq!(HighwayClass::ALL.iter().max(), Some(&HighwayClass::Motorway));
    }

    #[rstest]
    #[case("motorway", HighwayClass::Motorway)]
    #[case("MOTORWAY", HighwayClass::Motorway)]
    #[case(" Residential ", HighwayClass::Residential)]
    #[case("bus_guideway", HighwayClass::BusGuideway)]
    fn parses_case_insensitively(#[case] input: &str, #[case] expected: HighwayClass) {
        assert_eq!(input.parse::<HighwayClass>().unwrap(), expected);
    }

    #[test]
    fn unknown_value_is_rejected() {
        let err = "superhighway".parse::<HighwayClass>().unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn as_tag_formats_key_value() {
        assert_eq!(HighwayClass::Motorway.as_tag(), "highway=motorway");
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(format!("{}", EntityKind::Area), "area");
        assert_eq!(format!("{}", HighwayClass::PrimaryLink), "primary_link");
    }
}
