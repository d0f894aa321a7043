//! The aggregation root for one violation report.
//!
//! A `Flag` collects the entities a check implicates, in insertion order,
//! ignoring repeated additions of the same entity. Instructions are kept
//! verbatim and in order, duplicates included.

mod flagged;

pub use flagged::{
    FlaggedComposite, FlaggedEntity, Flagged, ITEM_IDENTIFIER_KEY, ITEM_TYPE_KEY, LABEL_KEY,
    ORIGIN_IDENTIFIER_KEY, ROLE_KEY, entity_properties,
};

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::entity::{EntityId, EntityRef};
use crate::geometry::GeometryWithProperties;

/// One violation report under construction.
#[derive(Debug, Clone)]
pub struct Flag<'a> {
    identifier: String,
    instructions: Vec<String>,
    challenge_name: Option<String>,
    flagged: IndexMap<EntityId, Flagged<'a>>,
}

impl<'a> Flag<'a> {
    /// An empty flag with a caller-chosen identifier.
    #[must_use]
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            instructions: Vec::new(),
            challenge_name: None,
            flagged: IndexMap::new(),
        }
    }

    /// A flag identified by, and containing, a single entity.
    #[must_use]
    pub fn for_entity(entity: EntityRef<'a>) -> Self {
        let mut flag = Self::new(entity.identifier().to_string());
        flag.add_entity(entity);
        flag
    }

    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Add an entity. Returns `false` if one with the same identifier is
    /// already present, in which case the flag is unchanged.
    pub fn add_entity(&mut self, entity: EntityRef<'a>) -> bool {
        self.insert(entity, None)
    }

    /// Add an entity with a label describing why it was flagged.
    pub fn add_labeled_entity(&mut self, entity: EntityRef<'a>, label: impl Into<String>) -> bool {
        self.insert(entity, Some(label.into()))
    }

    pub fn add_entities<I>(&mut self, entities: I)
    where
        I: IntoIterator<Item = EntityRef<'a>>,
    {
        for entity in entities {
            self.add_entity(entity);
        }
    }

    fn insert(&mut self, entity: EntityRef<'a>, label: Option<String>) -> bool {
        if self.flagged.contains_key(&entity.identifier()) {
            return false;
        }
        self.flagged
            .insert(entity.identifier(), Flagged::new(entity, label));
        true
    }

    pub fn add_instruction(&mut self, instruction: impl Into<String>) {
        self.instructions.push(instruction.into());
    }

    pub fn add_instructions<I, S>(&mut self, instructions: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.instructions
            .extend(instructions.into_iter().map(Into::into));
    }

    /// Instructions as added.
    #[must_use]
    pub fn instruction_list(&self) -> &[String] {
        &self.instructions
    }

    /// Instructions rendered as numbered lines (`1. first\n2. second`).
    #[must_use]
    pub fn instructions(&self) -> String {
        self.instructions
            .iter()
            .enumerate()
            .map(|(index, instruction)| format!("{}. {instruction}", index + 1))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn set_challenge_name(&mut self, name: impl Into<String>) {
        self.challenge_name = Some(name.into());
    }

    #[must_use]
    pub fn challenge_name(&self) -> Option<&str> {
        self.challenge_name.as_deref()
    }

    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.flagged.contains_key(&id)
    }

    /// Number of flagged entities, composites included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.flagged.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flagged.is_empty()
    }

    /// All flagged entries in insertion order.
    pub fn flagged(&self) -> impl Iterator<Item = &Flagged<'a>> {
        self.flagged.values()
    }

    pub fn flagged_entities(&self) -> impl Iterator<Item = &FlaggedEntity<'a>> {
        self.flagged.values().filter_map(|flagged| match flagged {
            Flagged::Entity(entity) => Some(entity),
            Flagged::Composite(_) => None,
        })
    }

    pub fn flagged_composites(&self) -> impl Iterator<Item = &FlaggedComposite<'a>> {
        self.flagged.values().filter_map(Flagged::as_composite)
    }

    #[must_use]
    pub fn has_composites(&self) -> bool {
        self.flagged_composites().next().is_some()
    }

    /// Every (geometry, properties) pair in insertion order: one per
    /// flagged entity with geometry, one per distinct non-composite reachable
    /// from each flagged composite.
    #[must_use]
    pub fn geometries_with_properties(&self) -> Vec<GeometryWithProperties> {
        self.flagged.values().flat_map(Flagged::contributions).collect()
    }
}

impl PartialEq for Flag<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.identifier == other.identifier
            && self.instructions == other.instructions
            && self.challenge_name == other.challenge_name
            && self.flagged.keys().collect::<HashSet<_>>()
                == other.flagged.keys().collect::<HashSet<_>>()
    }
}
