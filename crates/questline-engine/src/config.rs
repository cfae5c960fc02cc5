//! Engine configuration.
//!
//! Constructed per feature and passed into [`Engine::new`]; there is no
//! ambient or global configuration lookup.
//!
//! [`Engine::new`]: crate::engine::Engine::new

use std::time::Duration;

use crate::supervisor::{ConcurrencyPolicy, OpKind};

/// Per-operation-kind concurrency policy table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolicyTable {
    /// Policy for list reads.
    pub load_summaries: ConcurrencyPolicy,
    /// Policy for detail reads.
    pub load_detail: ConcurrencyPolicy,
    /// Policy for reference-data reads.
    pub load_auxiliary: ConcurrencyPolicy,
    /// Policy for entity creation.
    pub create: ConcurrencyPolicy,
    /// Policy for entity updates.
    pub update: ConcurrencyPolicy,
    /// Policy for entity deletion.
    pub delete: ConcurrencyPolicy,
}

impl PolicyTable {
    /// Look up the policy for one operation kind.
    pub fn for_kind(&self, kind: OpKind) -> ConcurrencyPolicy {
        match kind {
            OpKind::LoadSummaries => self.load_summaries,
            OpKind::LoadDetail => self.load_detail,
            OpKind::LoadAuxiliary => self.load_auxiliary,
            OpKind::Create => self.create,
            OpKind::Update => self.update,
            OpKind::Delete => self.delete,
        }
    }
}

impl Default for PolicyTable {
    /// Reads supersede (a newer page wins over a stale one), create and
    /// update reject overlap (no duplicate submissions), deletes of
    /// independent resources run concurrently.
    fn default() -> Self {
        Self {
            load_summaries: ConcurrencyPolicy::Supersede,
            load_detail: ConcurrencyPolicy::Supersede,
            load_auxiliary: ConcurrencyPolicy::Supersede,
            create: ConcurrencyPolicy::RejectIfBusy,
            update: ConcurrencyPolicy::RejectIfBusy,
            delete: ConcurrencyPolicy::Concurrent,
        }
    }
}

/// Engine configuration for one feature instance.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Bound on how long a select-or-load resolution waits for its entity.
    pub resolve_deadline: Duration,
    /// Concurrency policies per operation kind.
    pub policies: PolicyTable,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            resolve_deadline: Duration::from_millis(5000),
            policies: PolicyTable::default(),
        }
    }
}
