//! # Questline Engine
//!
//! A reusable client-side state-synchronization engine for server-owned
//! feature data. Each feature instance keeps a normalized local mirror of
//! remote entities and orchestrates fetch/create/update/delete operations
//! against a data-access collaborator with explicit concurrency policies.
//!
//! ## Flow
//!
//! ```text
//! Intent → Façade.dispatch → Orchestrator → Gateway I/O
//!        → terminal event → Reducer → state publication → Views
//! ```
//!
//! ## Pieces
//!
//! - [`Event`]: closed catalog of intents and outcomes per operation.
//! - [`reduce`]: pure transition function over `(state, event)`.
//! - [`TaskSupervisor`] + [`ConcurrencyPolicy`]: how overlapping requests
//!   of the same kind are reconciled (supersede / reject-if-busy /
//!   concurrent).
//! - [`View`]: memoized, reactive projections of feature state.
//! - [`Engine::resolve`]: the select-or-load contract used by detail
//!   screens and blocking navigation guards.
//! - [`Engine`]: the façade — the only surface consumers touch.
//!
//! Features plug in through the [`Feature`] trait and a [`Gateway`]
//! implementation; see the `questline-app` crate for the concrete
//! Challenges and Character Progression instantiations.

pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod feature;
pub mod gateway;
pub mod query;
pub mod reducer;
pub mod state;
pub mod supervisor;
pub mod view;

mod orchestrator;
mod resolver;
mod store;

#[cfg(test)]
pub(crate) mod testkit;

pub use config::{EngineConfig, PolicyTable};
pub use engine::Engine;
pub use error::{GatewayError, ResolveError};
pub use event::Event;
pub use feature::{Entity, Feature};
pub use gateway::{Gateway, PageInfo, PageResult};
pub use query::Filters;
pub use reducer::reduce;
pub use state::{FeatureState, Pagination};
pub use supervisor::{ConcurrencyPolicy, OpKind, TaskSupervisor};
pub use view::View;
