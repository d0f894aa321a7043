//! Per-check record of origin identifiers that have already been reported.
//!
//! A check run creates one ledger, shares it across the workers evaluating
//! entities, and drops it when the run ends. The set only grows.
//!
//! `is_flagged` followed by `mark_flagged` is two critical sections, so two
//! workers can both observe `false`. Use [`DedupLedger::try_mark`] for the
//! single-identifier case, or hold a [`LedgerGuard`] for multi-step
//! sequences.

use std::collections::HashSet;

use parking_lot::{Mutex, MutexGuard};

use crate::entity::EntityId;

#[derive(Debug, Default)]
pub struct DedupLedger {
    flagged: Mutex<HashSet<EntityId>>,
}

impl DedupLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_flagged(&self, origin_id: EntityId) -> bool {
        self.flagged.lock().contains(&origin_id)
    }

    pub fn mark_flagged(&self, origin_id: EntityId) {
        self.flagged.lock().insert(origin_id);
    }

    /// Atomically check and mark. Returns `true` only for the caller that
    /// marked `origin_id` first.
    pub fn try_mark(&self, origin_id: EntityId) -> bool {
        self.flagged.lock().insert(origin_id)
    }

    /// Hold the ledger for a multi-step check-then-mark sequence.
    pub fn lock(&self) -> LedgerGuard<'_> {
        LedgerGuard {
            flagged: self.flagged.lock(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.flagged.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flagged.lock().is_empty()
    }
}

/// Exclusive access to a [`DedupLedger`] until dropped.
pub struct LedgerGuard<'a> {
    flagged: MutexGuard<'a, HashSet<EntityId>>,
}

impl LedgerGuard<'_> {
    #[must_use]
    pub fn is_flagged(&self, origin_id: EntityId) -> bool {
        self.flagged.contains(&origin_id)
    }

    pub fn mark_flagged(&mut self, origin_id: EntityId) {
        self.flagged.insert(origin_id);
    }

    pub fn mark_all<I>(&mut self, origin_ids: I)
    where
        I: IntoIterator<Item = EntityId>,
    {
        self.flagged.extend(origin_ids);
    }
}
