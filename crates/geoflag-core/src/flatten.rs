//! Composite flattening.
//!
//! Both traversals are breadth-first over an explicit work queue. Each
//! composite identifier is expanded at most once per traversal, so
//! self-referencing and mutually-referencing composites terminate. Members
//! the dataset cannot resolve are skipped with a warning.

use std::collections::{HashSet, VecDeque};

use crate::entity::{EntityId, EntityRef, MemberRef};

/// A non-composite entity reached through a composite, with the role of the
/// membership that reached it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlatMember<'a> {
    pub entity: EntityRef<'a>,
    pub role: &'a str,
}

/// Resolve `root` into the set of non-composite entities reachable through
/// its membership graph.
///
/// Each entity appears once, in first-reached order. A non-composite `root`
/// flattens to itself.
#[must_use]
pub fn flatten(root: EntityRef<'_>) -> Vec<EntityRef<'_>> {
    let mut result = Vec::new();
    let mut collected: HashSet<EntityId> = HashSet::new();
    let mut expanded: HashSet<EntityId> = HashSet::new();
    let mut queue = VecDeque::from([root]);

    while let Some(next) = queue.pop_front() {
        if next.is_composite() {
            if !expanded.insert(next.identifier()) {
                tracing::debug!(composite = next.identifier(), "composite already expanded");
                continue;
            }
            queue.extend(next.members().filter_map(resolve_or_skip));
        } else if collected.insert(next.identifier()) {
            result.push(next);
        }
    }

    result
}

/// Resolve `root` into its flattened membership list.
///
/// Unlike [`flatten`], a non-composite reached along several membership
/// paths appears once per path, each time with the role of the membership
/// that reached it. Composite expansion is still guarded by identifier,
/// including `root` itself. A non-composite `root` has no members.
#[must_use]
pub fn flatten_members(root: EntityRef<'_>) -> Vec<FlatMember<'_>> {
    let mut result = Vec::new();
    let mut expanded: HashSet<EntityId> = HashSet::from([root.identifier()]);
    let mut queue: VecDeque<MemberRef<'_>> = root.members().collect();

    while let Some(member) = queue.pop_front() {
        let Some(entity) = resolve_or_skip(member) else {
            continue;
        };
        if entity.is_composite() {
            if expanded.insert(entity.identifier()) {
                queue.extend(entity.members());
            } else {
                tracing::debug!(composite = entity.identifier(), "composite already expanded");
            }
        } else {
            result.push(FlatMember {
                entity,
                role: member.role(),
            });
        }
    }

    result
}

fn resolve_or_skip(member: MemberRef<'_>) -> Option<EntityRef<'_>> {
    match member.resolve() {
        Ok(entity) => Some(entity),
        Err(error) => {
            tracing::warn!(%error, "skipping unresolved composite member");
            None
        }
    }
}
