//! State store: serialized event application and publication.
//!
//! All mutation funnels through [`reduce`] inside the watch sender's modify
//! lock, so events are applied atomically and in dispatch order — there is
//! no concurrent writer. Readers hold cheap snapshots or watch receivers.

use tokio::sync::watch;

use crate::event::Event;
use crate::feature::Feature;
use crate::reducer::reduce;
use crate::state::FeatureState;

#[derive(Debug)]
pub(crate) struct Store<F: Feature> {
    tx: watch::Sender<FeatureState<F>>,
}

impl<F: Feature> Store<F> {
    pub(crate) fn new() -> Self {
        Self {
            tx: watch::Sender::new(FeatureState::default()),
        }
    }

    /// Apply one event and publish the new state.
    pub(crate) fn dispatch(&self, event: &Event<F>) {
        self.tx.send_modify(|state| *state = reduce(state, event));
    }

    /// Clone of the current state.
    pub(crate) fn snapshot(&self) -> FeatureState<F> {
        self.tx.borrow().clone()
    }

    /// Subscribe to state publications.
    pub(crate) fn subscribe(&self) -> watch::Receiver<FeatureState<F>> {
        self.tx.subscribe()
    }
}
