//! # Engine Façade
//!
//! [`Engine`] is the only surface consumers touch. It owns the store, the
//! orchestrator, and the select-or-load bookkeeping for one feature
//! instance; imperative methods do nothing but dispatch the corresponding
//! `Requested` event, and reads go through memoized [`View`] handles. Raw
//! events are never exposed, so terminal events can only originate from the
//! orchestrator.
//!
//! Gateway work runs on spawned tasks, so an engine must live inside a
//! tokio runtime.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::config::EngineConfig;
use crate::error::ResolveError;
use crate::event::Event;
use crate::feature::Feature;
use crate::gateway::Gateway;
use crate::orchestrator::Orchestrator;
use crate::resolver;
use crate::state::{FeatureState, Pagination};
use crate::store::Store;
use crate::supervisor::TaskSupervisor;
use crate::view::{self, View};

pub(crate) struct EngineInner<F: Feature> {
    pub(crate) store: Arc<Store<F>>,
    pub(crate) orchestrator: Orchestrator<F>,
    pub(crate) pending_details: Mutex<HashSet<F::Id>>,
    pub(crate) config: EngineConfig,
}

/// Façade over one feature's synchronized state.
///
/// Cheap to clone; clones share the same store and in-flight bookkeeping.
#[derive(Clone)]
pub struct Engine<F: Feature> {
    pub(crate) inner: Arc<EngineInner<F>>,
}

impl<F: Feature> Engine<F> {
    /// Create an engine for one feature, backed by the given data-access
    /// collaborator.
    pub fn new(gateway: Arc<dyn Gateway<F>>, config: EngineConfig) -> Self {
        let store = Arc::new(Store::new());
        let supervisor = Arc::new(TaskSupervisor::new());
        let orchestrator =
            Orchestrator::new(store.clone(), gateway, supervisor, config.policies);
        Self {
            inner: Arc::new(EngineInner {
                store,
                orchestrator,
                pending_details: Mutex::new(HashSet::new()),
                config,
            }),
        }
    }

    pub(crate) fn dispatch(&self, event: Event<F>) {
        debug!(
            feature = F::NAME,
            op = event.label(),
            "dispatching feature event"
        );
        self.inner.store.dispatch(&event);
        if event.is_request() {
            self.inner.orchestrator.handle(&event);
        }
    }

    // ─── Intents ─────────────────────────────────────────────────

    /// Load a page of summaries, replacing the current list.
    pub fn load_summaries(&self, filters: F::Filters) {
        self.dispatch(Event::LoadSummariesRequested {
            filters,
            append: false,
        });
    }

    /// Load a page of summaries, appending to the current list.
    pub fn load_more_summaries(&self, filters: F::Filters) {
        self.dispatch(Event::LoadSummariesRequested {
            filters,
            append: true,
        });
    }

    /// Load one detail entity.
    pub fn load_detail(&self, id: F::Id) {
        self.dispatch(Event::LoadDetailRequested { id });
    }

    /// Load the feature's static reference data.
    pub fn load_auxiliary(&self) {
        self.dispatch(Event::LoadAuxiliaryRequested);
    }

    /// Create a new entity.
    pub fn create(&self, payload: F::CreatePayload) {
        self.dispatch(Event::CreateRequested { payload });
    }

    /// Apply a change set to an existing entity.
    pub fn update(&self, id: F::Id, changes: F::Changes) {
        self.dispatch(Event::UpdateRequested { id, changes });
    }

    /// Delete an entity.
    pub fn delete(&self, id: F::Id) {
        self.dispatch(Event::DeleteRequested { id });
    }

    /// Set or clear the current detail-screen selection.
    pub fn select(&self, id: Option<F::Id>) {
        self.dispatch(Event::Selected { id });
    }

    // ─── Select-or-load ──────────────────────────────────────────

    /// Yield the detail entity for `id`, fetching it at most once if absent.
    ///
    /// See the resolver module for the full contract: cache hits return
    /// immediately, concurrent misses for the same id share one load, and
    /// the wait is bounded by the configured deadline.
    pub async fn resolve(&self, id: Option<F::Id>) -> Result<F::Detail, ResolveError> {
        resolver::resolve(self, id).await
    }

    // ─── Derived views ───────────────────────────────────────────

    /// Clone of the current state. Prefer the view handles for repeated
    /// reads.
    pub fn snapshot(&self) -> FeatureState<F> {
        self.inner.store.snapshot()
    }

    /// Build a memoized view over an arbitrary projection of the state.
    pub fn view<T: Clone>(
        &self,
        project: impl Fn(&FeatureState<F>) -> T + Send + Sync + 'static,
    ) -> View<F, T> {
        View::new(self.inner.store.subscribe(), project)
    }

    /// Summaries in presentation order.
    pub fn summaries(&self) -> View<F, Vec<F::Summary>> {
        self.view(|state| view::summaries(state))
    }

    /// One detail entity by id.
    pub fn entity(&self, id: F::Id) -> View<F, Option<F::Detail>> {
        self.view(move |state| view::entity_by_id(state, &id).cloned())
    }

    /// Several detail entities, in the supplied order, misses dropped.
    pub fn entities(&self, ids: Vec<F::Id>) -> View<F, Vec<F::Detail>> {
        self.view(move |state| view::entities_by_ids(state, &ids))
    }

    /// The selected detail entity, once loaded.
    pub fn selected(&self) -> View<F, Option<F::Detail>> {
        self.view(|state| view::selected_entity(state))
    }

    /// Combined loading flag (OR over all substates).
    pub fn loading(&self) -> View<F, bool> {
        self.view(FeatureState::combined_loading)
    }

    /// Latest combined error (detail before summaries before auxiliary).
    pub fn error(&self) -> View<F, Option<String>> {
        self.view(|state| state.combined_error().map(str::to_string))
    }

    /// Pagination metadata for the summaries list.
    pub fn pagination(&self) -> View<F, Pagination> {
        self.view(|state| state.summaries.page)
    }

    /// The feature's static reference data, once loaded.
    pub fn auxiliary(&self) -> View<F, Option<F::Auxiliary>> {
        self.view(|state| state.auxiliary.data.clone())
    }
}
