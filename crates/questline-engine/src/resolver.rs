//! # Select-or-Load Coordinator
//!
//! The cache-aside read used by detail screens and blocking navigation
//! guards: yield entity `id`, fetching it at most once if absent.
//!
//! Contract:
//! 1. No id → not-found immediately.
//! 2. Cache hit → the entity, no I/O.
//! 3. A load for the same id already pending → join it, never issue a
//!    second request.
//! 4. Otherwise dispatch one `LoadDetailRequested` and wait for the first
//!    state containing the id — however it got there; a concurrent list
//!    load populating the entity short-circuits the wait.
//! 5. The wait is bounded by the configured deadline; expiry yields a
//!    timeout error and no automatic retry.
//! 6. If the load of `id` itself fails, the failure is reported immediately
//!    rather than sleeping out the deadline. Failures of other work sharing
//!    the detail substate (mutations, loads of other ids) do not end the
//!    wait.

use std::collections::HashSet;

use parking_lot::Mutex;
use tracing::debug;

use crate::engine::Engine;
use crate::error::ResolveError;
use crate::event::Event;
use crate::feature::Feature;

/// Removes the pending marker for an issued load when the issuing waiter
/// exits, whichever way it exits.
struct PendingGuard<'a, F: Feature> {
    pending: &'a Mutex<HashSet<F::Id>>,
    id: F::Id,
}

impl<F: Feature> Drop for PendingGuard<'_, F> {
    fn drop(&mut self) {
        self.pending.lock().remove(&self.id);
    }
}

pub(crate) async fn resolve<F: Feature>(
    engine: &Engine<F>,
    id: Option<F::Id>,
) -> Result<F::Detail, ResolveError> {
    let Some(id) = id else {
        return Err(ResolveError::NotFound);
    };

    if let Some(found) = engine.inner.store.snapshot().detail.entities.get(&id) {
        return Ok(found.clone());
    }

    // Only the first waiter for a given id issues the load. The dispatch
    // happens under the pending-set lock, so a waiter that loses the insert
    // race can only observe state at or after the request it joins.
    let issued = {
        let mut pending = engine.inner.pending_details.lock();
        if pending.insert(id.clone()) {
            engine.dispatch(Event::LoadDetailRequested { id: id.clone() });
            true
        } else {
            false
        }
    };
    let _guard = issued.then(|| PendingGuard::<F> {
        pending: &engine.inner.pending_details,
        id: id.clone(),
    });
    if !issued {
        debug!(
            feature = F::NAME,
            "joining pending detail load instead of issuing a second request"
        );
    }

    let mut rx = engine.inner.store.subscribe();
    let deadline = engine.inner.config.resolve_deadline;

    let wait = async {
        loop {
            {
                let state = rx.borrow_and_update();
                if let Some(found) = state.detail.entities.get(&id) {
                    return Ok(found.clone());
                }
                // Only a failed load of this id ends the wait early; the
                // detail substate is shared with mutations, whose failures
                // are not ours to report.
                if state.detail.failed_id.as_ref() == Some(&id) {
                    let message = state.detail.error.clone().unwrap_or_default();
                    return Err(ResolveError::Failed(message));
                }
            }
            if rx.changed().await.is_err() {
                return Err(ResolveError::NotFound);
            }
        }
    };

    match tokio::time::timeout(deadline, wait).await {
        Ok(result) => result,
        Err(_) => Err(ResolveError::Timeout(deadline)),
    }
}
