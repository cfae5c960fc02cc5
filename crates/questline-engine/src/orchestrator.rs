//! # Async Orchestrator
//!
//! Consumes `Requested` intents, asks the supervisor for admission under the
//! configured policy, and runs one gateway call per admitted intent on its
//! own task. Every admitted intent settles with exactly one terminal event;
//! gateway errors are normalized to messages here and nowhere else. A
//! superseded completion is discarded before it reaches the store.

use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::config::PolicyTable;
use crate::event::Event;
use crate::feature::Feature;
use crate::gateway::Gateway;
use crate::store::Store;
use crate::supervisor::{OpKind, TaskSupervisor, Ticket};

pub(crate) struct Orchestrator<F: Feature> {
    store: Arc<Store<F>>,
    gateway: Arc<dyn Gateway<F>>,
    supervisor: Arc<TaskSupervisor>,
    policies: PolicyTable,
}

impl<F: Feature> Orchestrator<F> {
    pub(crate) fn new(
        store: Arc<Store<F>>,
        gateway: Arc<dyn Gateway<F>>,
        supervisor: Arc<TaskSupervisor>,
        policies: PolicyTable,
    ) -> Self {
        Self {
            store,
            gateway,
            supervisor,
            policies,
        }
    }

    /// React to a dispatched event. Terminal events and selection changes
    /// require no I/O and fall through.
    pub(crate) fn handle(&self, event: &Event<F>) {
        match event {
            Event::LoadSummariesRequested { filters, append } => {
                self.load_summaries(filters.clone(), *append);
            }
            Event::LoadDetailRequested { id } => self.load_detail(id.clone()),
            Event::LoadAuxiliaryRequested => self.load_auxiliary(),
            Event::CreateRequested { payload } => self.create(payload.clone()),
            Event::UpdateRequested { id, changes } => self.update(id.clone(), changes.clone()),
            Event::DeleteRequested { id } => self.delete(id.clone()),
            _ => {}
        }
    }

    fn admit(&self, kind: OpKind) -> Option<Ticket> {
        let ticket = self.supervisor.admit(kind, self.policies.for_kind(kind));
        if ticket.is_none() {
            debug!(
                feature = F::NAME,
                op = kind.label(),
                "request refused while one is in flight"
            );
        }
        ticket
    }

    fn parts(&self) -> (Arc<Store<F>>, Arc<dyn Gateway<F>>, Arc<TaskSupervisor>) {
        (
            self.store.clone(),
            self.gateway.clone(),
            self.supervisor.clone(),
        )
    }

    fn settle(
        store: &Store<F>,
        supervisor: &TaskSupervisor,
        ticket: &Ticket,
        kind: OpKind,
        event: Event<F>,
    ) {
        if supervisor.finish(ticket) {
            store.dispatch(&event);
        } else {
            trace!(
                feature = F::NAME,
                op = kind.label(),
                "superseded completion discarded"
            );
        }
    }

    fn load_summaries(&self, filters: F::Filters, append: bool) {
        let Some(ticket) = self.admit(OpKind::LoadSummaries) else {
            return;
        };
        let (store, gateway, supervisor) = self.parts();
        tokio::spawn(async move {
            let event = match gateway.list(&filters).await {
                Ok(result) => Event::LoadSummariesSuccess {
                    items: result.items,
                    page: result.page,
                    append,
                },
                Err(error) => {
                    warn!(feature = F::NAME, op = "load_summaries", %error, "gateway call failed");
                    Event::LoadSummariesFailure {
                        error: error.to_string(),
                    }
                }
            };
            Self::settle(&store, &supervisor, &ticket, OpKind::LoadSummaries, event);
        });
    }

    fn load_detail(&self, id: F::Id) {
        let Some(ticket) = self.admit(OpKind::LoadDetail) else {
            return;
        };
        let (store, gateway, supervisor) = self.parts();
        tokio::spawn(async move {
            let event = match gateway.get_by_id(&id).await {
                Ok(entity) => Event::LoadDetailSuccess { entity },
                Err(error) => {
                    warn!(feature = F::NAME, op = "load_detail", %error, "gateway call failed");
                    Event::LoadDetailFailure {
                        id,
                        error: error.to_string(),
                    }
                }
            };
            Self::settle(&store, &supervisor, &ticket, OpKind::LoadDetail, event);
        });
    }

    fn load_auxiliary(&self) {
        let Some(ticket) = self.admit(OpKind::LoadAuxiliary) else {
            return;
        };
        let (store, gateway, supervisor) = self.parts();
        tokio::spawn(async move {
            let event = match gateway.fetch_auxiliary().await {
                Ok(data) => Event::LoadAuxiliarySuccess { data },
                Err(error) => {
                    warn!(feature = F::NAME, op = "load_auxiliary", %error, "gateway call failed");
                    Event::LoadAuxiliaryFailure {
                        error: error.to_string(),
                    }
                }
            };
            Self::settle(&store, &supervisor, &ticket, OpKind::LoadAuxiliary, event);
        });
    }

    fn create(&self, payload: F::CreatePayload) {
        let Some(ticket) = self.admit(OpKind::Create) else {
            return;
        };
        let (store, gateway, supervisor) = self.parts();
        tokio::spawn(async move {
            let event = match gateway.create(&payload).await {
                Ok(entity) => Event::CreateSuccess { entity },
                Err(error) => {
                    warn!(feature = F::NAME, op = "create", %error, "gateway call failed");
                    Event::CreateFailure {
                        error: error.to_string(),
                    }
                }
            };
            Self::settle(&store, &supervisor, &ticket, OpKind::Create, event);
        });
    }

    fn update(&self, id: F::Id, changes: F::Changes) {
        let Some(ticket) = self.admit(OpKind::Update) else {
            return;
        };
        let (store, gateway, supervisor) = self.parts();
        tokio::spawn(async move {
            // Local mirrors are patch-merged from the submitted change set.
            let event = match gateway.update(&id, &changes).await {
                Ok(_updated) => Event::UpdateSuccess { id, changes },
                Err(error) => {
                    warn!(feature = F::NAME, op = "update", %error, "gateway call failed");
                    Event::UpdateFailure {
                        id,
                        error: error.to_string(),
                    }
                }
            };
            Self::settle(&store, &supervisor, &ticket, OpKind::Update, event);
        });
    }

    fn delete(&self, id: F::Id) {
        let Some(ticket) = self.admit(OpKind::Delete) else {
            return;
        };
        let (store, gateway, supervisor) = self.parts();
        tokio::spawn(async move {
            let event = match gateway.delete(&id).await {
                Ok(()) => Event::DeleteSuccess { id },
                Err(error) => {
                    warn!(feature = F::NAME, op = "delete", %error, "gateway call failed");
                    Event::DeleteFailure {
                        id,
                        error: error.to_string(),
                    }
                }
            };
            Self::settle(&store, &supervisor, &ticket, OpKind::Delete, event);
        });
    }
}
