//! Flag to GeoJSON document conversion.
//!
//! Two documents come out of one flag:
//!
//! - the aggregate feature: one `Feature` whose geometry is the single
//!   contributed geometry or a `GeometryCollection`, with one property block
//!   per contributing entity;
//! - the flattened collection: one `Feature` per contributed geometry.
//!
//! Composite members sectioned from the same real-world feature share an
//! origin identifier. The aggregate document keeps only the first property
//! block per origin identifier within each composite; the flattened
//! collection keeps every fragment.

use std::collections::HashSet;

use geoflag_config::ReportConfig;
use geoflag_core::documents::{
    CollectionType, FeatureType, FlagFeature, FlagFeatureCollection, FlagFeatureProperties,
    MemberFeature,
};
use geoflag_core::flag::ORIGIN_IDENTIFIER_KEY;
use geoflag_core::{Flag, Flagged, FlaggedComposite, Geometry, PropertyMap};
use indexmap::IndexSet;

use crate::decorator::decorate_name;

/// Property key of the flag identifier in the flattened collection.
pub const ID_KEY: &str = "id";
/// Property key of the rendered instructions in the flattened collection.
pub const INSTRUCTIONS_KEY: &str = "instructions";

/// Builds report documents from flags.
#[derive(Debug, Clone)]
pub struct ReportSynthesizer {
    default_name: String,
}

impl ReportSynthesizer {
    #[must_use]
    pub fn new(config: &ReportConfig) -> Self {
        Self {
            default_name: config.default_name.clone(),
        }
    }

    /// Aggregate document for `flag`, with `context` merged into its
    /// properties.
    #[must_use]
    pub fn to_feature(&self, flag: &Flag<'_>, mut context: PropertyMap) -> FlagFeature {
        let mut shapes: Vec<Geometry> = flag
            .geometries_with_properties()
            .into_iter()
            .map(|contribution| contribution.geometry)
            .collect();
        let geometry = if shapes.len() == 1 {
            shapes.swap_remove(0)
        } else {
            Geometry::collection(shapes)
        };

        let mut blocks = PropertyBlocks::default();
        let mut composite_properties = Vec::new();
        for flagged in flag.flagged() {
            match flagged {
                Flagged::Entity(entity) => {
                    if let Some(contribution) = entity.contribution() {
                        blocks.push(contribution.properties);
                    }
                }
                Flagged::Composite(composite) => {
                    composite_properties.push(composite.properties().clone());
                    blocks.push_composite_members(composite);
                }
            }
        }

        decorate_name(
            &mut context,
            blocks.properties.iter().chain(&composite_properties),
            &self.default_name,
        );

        FlagFeature {
            kind: FeatureType::Feature,
            id: flag.identifier().to_string(),
            geometry,
            properties: FlagFeatureProperties {
                instructions: flag.instructions(),
                context,
                feature_count: blocks.properties.len(),
                feature_properties: blocks.properties,
                feature_osmids: blocks.origin_ids.into_iter().collect(),
                composite_properties,
            },
        }
    }

    /// Flattened document for `flag`: every contributed geometry becomes a
    /// feature, and `id`, `instructions`, `context`, and the own properties of
    /// each flagged composite form the shared top-level properties.
    #[must_use]
    pub fn to_feature_collection(
        &self,
        flag: &Flag<'_>,
        context: PropertyMap,
    ) -> FlagFeatureCollection {
        let features = flag
            .geometries_with_properties()
            .into_iter()
            .map(|contribution| MemberFeature {
                kind: FeatureType::Feature,
                geometry: contribution.geometry,
                properties: contribution.properties,
            })
            .collect();

        let mut properties = PropertyMap::from([
            (ID_KEY.to_string(), flag.identifier().to_string()),
            (INSTRUCTIONS_KEY.to_string(), flag.instructions()),
        ]);
        properties.extend(context);
        for composite in flag.flagged_composites() {
            properties.extend(composite.properties().clone());
        }

        FlagFeatureCollection {
            kind: CollectionType::FeatureCollection,
            features,
            properties,
        }
    }
}

impl Default for ReportSynthesizer {
    fn default() -> Self {
        Self::new(&ReportConfig::default())
    }
}

/// Property blocks of the aggregate document with their distinct origin
/// identifiers, both in emission order.
#[derive(Default)]
struct PropertyBlocks {
    properties: Vec<PropertyMap>,
    origin_ids: IndexSet<String>,
}

impl PropertyBlocks {
    fn push(&mut self, block: PropertyMap) {
        if let Some(origin) = block.get(ORIGIN_IDENTIFIER_KEY) {
            self.origin_ids.insert(origin.clone());
        }
        self.properties.push(block);
    }

    /// First block per origin identifier among the composite's flattened
    /// members.
    fn push_composite_members(&mut self, composite: &FlaggedComposite<'_>) {
        let mut emitted: HashSet<String> = HashSet::new();
        for contribution in composite.contributions() {
            let origin = contribution
                .properties
                .get(ORIGIN_IDENTIFIER_KEY)
                .cloned()
                .unwrap_or_default();
            if emitted.insert(origin) {
                self.push(contribution.properties);
            }
        }
    }
}
