//! Flagged entity wrappers.
//!
//! A flagged entity carries the property block that describes it in
//! reports: the entity's tags plus the synthetic keys below. Composites are
//! resolved into their flattened membership list once, at construction.

use std::collections::HashMap;

use crate::entity::{EntityId, EntityRef};
use crate::flatten::{FlatMember, flatten, flatten_members};
use crate::geometry::{Geometry, GeometryWithProperties, PropertyMap};

/// Property key for the entity's internal identifier.
pub const ITEM_IDENTIFIER_KEY: &str = "ItemId";
/// Property key for the entity's origin identifier.
pub const ORIGIN_IDENTIFIER_KEY: &str = "osmid";
/// Property key for the entity kind label.
pub const ITEM_TYPE_KEY: &str = "ItemType";
/// Property key for the label a check attached to the entity.
pub const LABEL_KEY: &str = "flag:label";
/// Property key for the membership role of a flattened composite member.
pub const ROLE_KEY: &str = "role";

/// Tags plus the identifier, origin identifier, and kind keys.
#[must_use]
pub fn entity_properties(entity: EntityRef<'_>) -> PropertyMap {
    let mut properties = entity.tags().clone();
    properties.insert(
        ITEM_IDENTIFIER_KEY.to_string(),
        entity.identifier().to_string(),
    );
    properties.insert(
        ORIGIN_IDENTIFIER_KEY.to_string(),
        entity.origin_identifier().to_string(),
    );
    properties.insert(
        ITEM_TYPE_KEY.to_string(),
        entity.kind().item_type().to_string(),
    );
    properties
}

fn labeled(mut properties: PropertyMap, label: Option<&str>) -> PropertyMap {
    if let Some(label) = label {
        properties.insert(LABEL_KEY.to_string(), label.to_string());
    }
    properties
}

/// A non-composite entity added to a flag.
#[derive(Debug, Clone)]
pub struct FlaggedEntity<'a> {
    entity: EntityRef<'a>,
    label: Option<String>,
    geometry: Option<Geometry>,
    properties: PropertyMap,
}

impl<'a> FlaggedEntity<'a> {
    #[must_use]
    pub fn new(entity: EntityRef<'a>, label: Option<String>) -> Self {
        Self {
            entity,
            geometry: Geometry::for_entity(entity),
            properties: labeled(entity_properties(entity), label.as_deref()),
            label,
        }
    }

    #[must_use]
    pub const fn entity(&self) -> EntityRef<'a> {
        self.entity
    }

    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    #[must_use]
    pub const fn geometry(&self) -> Option<&Geometry> {
        self.geometry.as_ref()
    }

    #[must_use]
    pub const fn properties(&self) -> &PropertyMap {
        &self.properties
    }

    /// The (geometry, properties) pair, if the entity has any geometry.
    #[must_use]
    pub fn contribution(&self) -> Option<GeometryWithProperties> {
        let Some(geometry) = &self.geometry else {
            tracing::debug!(entity = self.entity.identifier(), "flagged entity has no geometry");
            return None;
        };
        Some(GeometryWithProperties {
            geometry: geometry.clone(),
            properties: self.properties.clone(),
        })
    }
}

/// A composite entity added to a flag.
///
/// The composite has no geometry of its own; it is drawn through the
/// geometry of its flattened members.
#[derive(Debug, Clone)]
pub struct FlaggedComposite<'a> {
    entity: EntityRef<'a>,
    label: Option<String>,
    properties: PropertyMap,
    members: Vec<FlatMember<'a>>,
}

impl<'a> FlaggedComposite<'a> {
    #[must_use]
    pub fn new(entity: EntityRef<'a>, label: Option<String>) -> Self {
        Self {
            entity,
            properties: labeled(entity_properties(entity), label.as_deref()),
            members: flatten_members(entity),
            label,
        }
    }

    #[must_use]
    pub const fn entity(&self) -> EntityRef<'a> {
        self.entity
    }

    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// The composite's own property block.
    #[must_use]
    pub const fn properties(&self) -> &PropertyMap {
        &self.properties
    }

    /// Flattened membership list, in traversal order.
    #[must_use]
    pub fn members(&self) -> &[FlatMember<'a>] {
        &self.members
    }

    /// The set of non-composite entities reachable from this composite.
    #[must_use]
    pub fn flatten(&self) -> Vec<EntityRef<'a>> {
        flatten(self.entity)
    }

    /// One pair per reachable non-composite with geometry, each entity once
    /// even when several membership paths lead to it. Member blocks carry the
    /// `role` of the first path that reached the entity.
    #[must_use]
    pub fn contributions(&self) -> Vec<GeometryWithProperties> {
        let mut roles: HashMap<EntityId, &str> = HashMap::new();
        for member in &self.members {
            roles.entry(member.entity.identifier()).or_insert(member.role);
        }

        self.flatten()
            .into_iter()
            .filter_map(|entity| {
                let geometry = Geometry::for_entity(entity)?;
                let mut properties = entity_properties(entity);
                let role = roles.get(&entity.identifier()).copied().unwrap_or_default();
                properties.insert(ROLE_KEY.to_string(), role.to_string());
                Some(GeometryWithProperties {
                    geometry,
                    properties,
                })
            })
            .collect()
    }
}

/// Either kind of flagged entity.
#[derive(Debug, Clone)]
pub enum Flagged<'a> {
    Entity(FlaggedEntity<'a>),
    Composite(FlaggedComposite<'a>),
}

impl<'a> Flagged<'a> {
    /// Wrap `entity`, choosing the composite variant by kind.
    #[must_use]
    pub fn new(entity: EntityRef<'a>, label: Option<String>) -> Self {
        if entity.is_composite() {
            Self::Composite(FlaggedComposite::new(entity, label))
        } else {
            Self::Entity(FlaggedEntity::new(entity, label))
        }
    }

    #[must_use]
    pub const fn entity(&self) -> EntityRef<'a> {
        match self {
            Self::Entity(flagged) => flagged.entity(),
            Self::Composite(flagged) => flagged.entity(),
        }
    }

    #[must_use]
    pub const fn identifier(&self) -> EntityId {
        self.entity().identifier()
    }

    #[must_use]
    pub const fn properties(&self) -> &PropertyMap {
        match self {
            Self::Entity(flagged) => flagged.properties(),
            Self::Composite(flagged) => flagged.properties(),
        }
    }

    #[must_use]
    pub const fn as_composite(&self) -> Option<&FlaggedComposite<'a>> {
        match self {
            Self::Composite(flagged) => Some(flagged),
            Self::Entity(_) => None,
        }
    }

    /// All (geometry, properties) pairs this entry contributes.
    #[must_use]
    pub fn contributions(&self) -> Vec<GeometryWithProperties> {
        match self {
            Self::Entity(flagged) => flagged.contribution().into_iter().collect(),
            Self::Composite(flagged) => flagged.contributions(),
        }
    }
}
