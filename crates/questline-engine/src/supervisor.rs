//! # Task Supervisor
//!
//! Tracks in-flight gateway work per operation kind and applies the
//! configured concurrency policy when overlapping requests of the same kind
//! arrive. Cancellation here is subscription cancellation: a superseded call
//! keeps running on the wire, but its completion ticket no longer validates
//! and its result is discarded before it reaches the store.

use std::collections::HashMap;

use parking_lot::Mutex;

/// The kind of operation a request belongs to. Policies apply per kind, not
/// globally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKind {
    /// List read.
    LoadSummaries,
    /// Detail read.
    LoadDetail,
    /// Reference-data read.
    LoadAuxiliary,
    /// Entity creation.
    Create,
    /// Entity update.
    Update,
    /// Entity deletion.
    Delete,
}

impl OpKind {
    /// Short label for log output.
    pub fn label(&self) -> &'static str {
        match self {
            Self::LoadSummaries => "load_summaries",
            Self::LoadDetail => "load_detail",
            Self::LoadAuxiliary => "load_auxiliary",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

/// How overlapping requests of the same operation kind are reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConcurrencyPolicy {
    /// A new request invalidates the previous one's completion; stale
    /// results are discarded on arrival.
    Supersede,
    /// A new request is refused while one is in flight.
    RejectIfBusy,
    /// Requests run independently.
    Concurrent,
}

/// Admission ticket for one accepted request.
#[derive(Debug, Clone, Copy)]
pub struct Ticket {
    kind: OpKind,
    policy: ConcurrencyPolicy,
    generation: u64,
}

#[derive(Debug, Default)]
struct Slot {
    generation: u64,
    busy: bool,
}

/// Per-operation-kind in-flight tracking.
#[derive(Debug, Default)]
pub struct TaskSupervisor {
    slots: Mutex<HashMap<OpKind, Slot>>,
}

impl TaskSupervisor {
    /// Create an empty supervisor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask to start work of `kind` under `policy`.
    ///
    /// Returns `None` when the request is refused (`RejectIfBusy` with work
    /// in flight). A refused request produces no terminal event; the
    /// surviving in-flight request's terminal event settles the substate's
    /// loading flag.
    pub fn admit(&self, kind: OpKind, policy: ConcurrencyPolicy) -> Option<Ticket> {
        let mut slots = self.slots.lock();
        let slot = slots.entry(kind).or_default();

        match policy {
            ConcurrencyPolicy::Concurrent => Some(Ticket {
                kind,
                policy,
                generation: slot.generation,
            }),
            ConcurrencyPolicy::Supersede => {
                slot.generation += 1;
                slot.busy = true;
                Some(Ticket {
                    kind,
                    policy,
                    generation: slot.generation,
                })
            }
            ConcurrencyPolicy::RejectIfBusy => {
                if slot.busy {
                    None
                } else {
                    slot.busy = true;
                    Some(Ticket {
                        kind,
                        policy,
                        generation: slot.generation,
                    })
                }
            }
        }
    }

    /// Report completion of the work behind `ticket`.
    ///
    /// Returns `false` when the ticket was superseded in the meantime and
    /// the caller must discard the result instead of dispatching it.
    pub fn finish(&self, ticket: &Ticket) -> bool {
        match ticket.policy {
            ConcurrencyPolicy::Concurrent => true,
            ConcurrencyPolicy::Supersede => {
                let mut slots = self.slots.lock();
                let slot = slots.entry(ticket.kind).or_default();
                if slot.generation == ticket.generation {
                    slot.busy = false;
                    true
                } else {
                    false
                }
            }
            ConcurrencyPolicy::RejectIfBusy => {
                let mut slots = self.slots.lock();
                let slot = slots.entry(ticket.kind).or_default();
                slot.busy = false;
                true
            }
        }
    }

    /// Whether work of `kind` is currently in flight.
    pub fn in_flight(&self, kind: OpKind) -> bool {
        self.slots.lock().get(&kind).is_some_and(|slot| slot.busy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supersede_discards_the_older_completion() {
        let supervisor = TaskSupervisor::new();
        let first = supervisor
            .admit(OpKind::LoadSummaries, ConcurrencyPolicy::Supersede)
            .expect("first admitted");
        let second = supervisor
            .admit(OpKind::LoadSummaries, ConcurrencyPolicy::Supersede)
            .expect("second admitted");

        // Completion order does not matter; only the newest ticket survives.
        assert!(supervisor.finish(&second));
        assert!(!supervisor.finish(&first));
    }

    #[test]
    fn reject_if_busy_refuses_overlap_then_recovers() {
        let supervisor = TaskSupervisor::new();
        let ticket = supervisor
            .admit(OpKind::Create, ConcurrencyPolicy::RejectIfBusy)
            .expect("admitted");
        assert!(supervisor
            .admit(OpKind::Create, ConcurrencyPolicy::RejectIfBusy)
            .is_none());
        assert!(supervisor.in_flight(OpKind::Create));

        assert!(supervisor.finish(&ticket));
        assert!(!supervisor.in_flight(OpKind::Create));
        assert!(supervisor
            .admit(OpKind::Create, ConcurrencyPolicy::RejectIfBusy)
            .is_some());
    }

    #[test]
    fn concurrent_admits_everything() {
        let supervisor = TaskSupervisor::new();
        let a = supervisor
            .admit(OpKind::Delete, ConcurrencyPolicy::Concurrent)
            .expect("admitted");
        let b = supervisor
            .admit(OpKind::Delete, ConcurrencyPolicy::Concurrent)
            .expect("admitted");
        assert!(supervisor.finish(&a));
        assert!(supervisor.finish(&b));
    }

    #[test]
    fn kinds_are_independent() {
        let supervisor = TaskSupervisor::new();
        let _create = supervisor
            .admit(OpKind::Create, ConcurrencyPolicy::RejectIfBusy)
            .expect("admitted");
        // A busy Create slot does not block an Update.
        assert!(supervisor
            .admit(OpKind::Update, ConcurrencyPolicy::RejectIfBusy)
            .is_some());
    }
}
