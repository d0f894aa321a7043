//! Read-only entity model.
//!
//! A `Dataset` owns every `Entity` keyed by identifier. Callers work with
//! `EntityRef`, a copyable view that can resolve composite members back
//! through the dataset it came from. Members are stored by identifier, so
//! cyclic membership graphs are representable without shared ownership.

use std::collections::BTreeMap;
use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::EntityKind;
use crate::errors::CoreError;

/// Stable numeric identifier of an entity, or of the real-world feature it
/// was sectioned from (origin identifier).
pub type EntityId = i64;

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// GeoJSON position, longitude first.
    #[must_use]
    pub const fn position(self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }
}

/// Reference from a composite to one of its members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Member {
    pub entity_id: EntityId,
    pub role: String,
}

/// One node of the map graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Entity {
    pub id: EntityId,
    pub origin_id: EntityId,
    pub kind: EntityKind,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
    #[serde(default)]
    pub points: Vec<Coordinate>,
    #[serde(default)]
    pub members: Vec<Member>,
}

impl Entity {
    fn bare(id: EntityId, origin_id: EntityId, kind: EntityKind) -> Self {
        Self {
            id,
            origin_id,
            kind,
            tags: BTreeMap::new(),
            points: Vec::new(),
            members: Vec::new(),
        }
    }

    #[must_use]
    pub fn point(id: EntityId, origin_id: EntityId, location: Coordinate) -> Self {
        Self {
            points: vec![location],
            ..Self::bare(id, origin_id, EntityKind::Point)
        }
    }

    #[must_use]
    pub fn line(id: EntityId, origin_id: EntityId, points: Vec<Coordinate>) -> Self {
        Self {
            points,
            ..Self::bare(id, origin_id, EntityKind::Line)
        }
    }

    /// An area; `ring` is the open boundary (last point not repeated).
    #[must_use]
    pub fn area(id: EntityId, origin_id: EntityId, ring: Vec<Coordinate>) -> Self {
        Self {
            points: ring,
            ..Self::bare(id, origin_id, EntityKind::Area)
        }
    }

    #[must_use]
    pub fn composite(id: EntityId, origin_id: EntityId) -> Self {
        Self::bare(id, origin_id, EntityKind::Composite)
    }

    #[must_use]
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_member(mut self, entity_id: EntityId, role: impl Into<String>) -> Self {
        self.members.push(Member {
            entity_id,
            role: role.into(),
        });
        self
    }
}

/// Owner of all entities of one map extract.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    entities: BTreeMap<EntityId, Entity>,
}

impl Dataset {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entity, returning the one it replaced (same identifier).
    pub fn insert(&mut self, entity: Entity) -> Option<Entity> {
        self.entities.insert(entity.id, entity)
    }

    /// Look up an entity by identifier.
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<EntityRef<'_>> {
        self.entities.get(&id).map(|entity| EntityRef {
            dataset: self,
            entity,
        })
    }

    /// Like [`get`](Self::get), but a missing entity is an error.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if no entity has this identifier.
    pub fn resolve(&self, id: EntityId) -> Result<EntityRef<'_>, CoreError> {
        self.get(id).ok_or(CoreError::NotFound(id))
    }

    /// All entities in identifier order.
    pub fn entities(&self) -> impl Iterator<Item = EntityRef<'_>> {
        self.entities.values().map(|entity| EntityRef {
            dataset: self,
            entity,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl FromIterator<Entity> for Dataset {
    fn from_iter<I: IntoIterator<Item = Entity>>(iter: I) -> Self {
        Self {
            entities: iter.into_iter().map(|entity| (entity.id, entity)).collect(),
        }
    }
}

/// Borrowed view of an entity inside its dataset.
#[derive(Clone, Copy)]
pub struct EntityRef<'a> {
    dataset: &'a Dataset,
    entity: &'a Entity,
}

impl<'a> EntityRef<'a> {
    #[must_use]
    pub const fn identifier(self) -> EntityId {
        self.entity.id
    }

    #[must_use]
    pub const fn origin_identifier(self) -> EntityId {
        self.entity.origin_id
    }

    #[must_use]
    pub const fn kind(self) -> EntityKind {
        self.entity.kind
    }

    #[must_use]
    pub const fn is_composite(self) -> bool {
        self.entity.kind.is_composite()
    }

    #[must_use]
    pub const fn tags(self) -> &'a BTreeMap<String, String> {
        &self.entity.tags
    }

    #[must_use]
    pub fn tag(self, key: &str) -> Option<&'a str> {
        self.entity.tags.get(key).map(String::as_str)
    }

    /// Coordinates of the entity; always empty for composites.
    #[must_use]
    pub fn geometry_points(self) -> &'a [Coordinate] {
        if self.is_composite() {
            &[]
        } else {
            &self.entity.points
        }
    }

    /// Direct members in declaration order; empty for non-composites.
    pub fn members(self) -> impl Iterator<Item = MemberRef<'a>> {
        let members: &'a [Member] = if self.is_composite() {
            &self.entity.members
        } else {
            &[]
        };
        members.iter().map(move |member| MemberRef {
            composite: self.entity.id,
            member,
            dataset: self.dataset,
        })
    }

    #[must_use]
    pub const fn entity(self) -> &'a Entity {
        self.entity
    }

    #[must_use]
    pub const fn dataset(self) -> &'a Dataset {
        self.dataset
    }
}

impl fmt::Debug for EntityRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityRef")
            .field("id", &self.entity.id)
            .field("origin_id", &self.entity.origin_id)
            .field("kind", &self.entity.kind)
            .finish()
    }
}

impl PartialEq for EntityRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.dataset, other.dataset) && self.entity.id == other.entity.id
    }
}

impl Eq for EntityRef<'_> {}

/// A composite member reference that may or may not resolve.
#[derive(Debug, Clone, Copy)]
pub struct MemberRef<'a> {
    composite: EntityId,
    member: &'a Member,
    dataset: &'a Dataset,
}

impl<'a> MemberRef<'a> {
    #[must_use]
    pub const fn member_id(self) -> EntityId {
        self.member.entity_id
    }

    #[must_use]
    pub fn role(self) -> &'a str {
        &self.member.role
    }

    /// Resolve the member through the dataset.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::MalformedComposite` if the dataset has no entity
    /// with the member's identifier.
    pub fn resolve(self) -> Result<EntityRef<'a>, CoreError> {
        self.dataset
            .get(self.member.entity_id)
            .ok_or(CoreError::MalformedComposite {
                composite: self.composite,
                member: self.member.entity_id,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Dataset {
        [
            Entity::point(1, 100, Coordinate::new(37.33, -122.03)),
            Entity::line(
                2,
                200,
                vec![Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 1.0)],
            )
            .with_tag("highway", "primary"),
            Entity::composite(3, 300)
                .with_tag("type", "restriction")
                .with_member(2, "from")
                .with_member(1, "via")
                .with_member(99, "to"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn position_is_longitude_first() {
        assert_eq!(Coordinate::new(37.5, -122.25).position(), [-122.25, 37.5]);
    }

    #[test]
    fn get_and_resolve() {
        let dataset = sample();
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.get(2).unwrap().tag("highway"), Some("primary"));
        assert!(dataset.get(42).is_none());
        assert_eq!(dataset.resolve(42).unwrap_err(), CoreError::NotFound(42));
    }

    #[test]
    fn members_resolve_or_report_malformed() {
        let dataset = sample();
        let composite = dataset.get(3).unwrap();
        let members: Vec<_> = composite.members().collect();
        assert_eq!(members.len(), 3);
        assert_eq!(members[0].role(), "from");
        assert_eq!(members[0].resolve().unwrap().identifier(), 2);
        assert_eq!(
            members[2].resolve().unwrap_err(),
            CoreError::MalformedComposite {
                composite: 3,
                member: 99
            }
        );
    }

    #[test]
    fn non_composites_have_no_members() {
        let dataset = sample();
        assert_eq!(dataset.get(2).unwrap().members().count(), 0);
    }

    #[test]
    fn composites_have_no_geometry_points() {
        let mut composite = Entity::composite(5, 5);
        composite.points.push(Coordinate::new(1.0, 1.0));
        let dataset: Dataset = [composite].into_iter().collect();
        assert!(dataset.get(5).unwrap().geometry_points().is_empty());
    }

    #[test]
    fn insert_replaces_by_identifier() {
        let mut dataset = sample();
        let previous = dataset.insert(Entity::point(1, 101, Coordinate::new(0.0, 0.0)));
        assert_eq!(previous.map(|e| e.origin_id), Some(100));
        assert_eq!(dataset.get(1).unwrap().origin_identifier(), 101);
    }

    #[test]
    fn entity_deserializes_with_defaults() {
        let json = r#"{"id":7,"origin_id":70,"kind":"point","points":[{"latitude":1.0,"longitude":2.0}]}"#;
        let entity: Entity = serde_json::from_str(json).unwrap();
        assert!(entity.tags.is_empty());
        assert!(entity.members.is_empty());
        assert_eq!(entity.kind, EntityKind::Point);
    }
}
