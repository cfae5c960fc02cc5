//! # Event Catalog
//!
//! The closed set of intents and outcomes for one feature. Every operation
//! defines exactly three variants: `*Requested` (intent), `*Success` and
//! `*Failure` (terminal outcomes). The orchestrator guarantees that each
//! accepted `Requested` event yields exactly one terminal event; requests
//! refused or superseded by the concurrency policy yield none, their slot's
//! surviving request does.
//!
//! Consumers never see this type — the façade dispatches `Requested` events
//! on their behalf and the orchestrator alone emits terminal events.

use crate::feature::Feature;
use crate::gateway::PageInfo;

/// An intent or outcome in the lifecycle of one feature operation.
#[derive(Debug, Clone)]
pub enum Event<F: Feature> {
    /// Load a page of summaries.
    LoadSummariesRequested {
        /// List query parameters.
        filters: F::Filters,
        /// Append to the current list instead of replacing it.
        append: bool,
    },
    /// A summaries page arrived.
    LoadSummariesSuccess {
        /// Page items in presentation order.
        items: Vec<F::Summary>,
        /// Pagination metadata reported by the collaborator.
        page: PageInfo,
        /// Append to the current list instead of replacing it.
        append: bool,
    },
    /// A summaries load failed.
    LoadSummariesFailure {
        /// Normalized error message.
        error: String,
    },

    /// Load one detail entity.
    LoadDetailRequested {
        /// Target entity id.
        id: F::Id,
    },
    /// A detail entity arrived.
    LoadDetailSuccess {
        /// The loaded entity.
        entity: F::Detail,
    },
    /// A detail load failed.
    LoadDetailFailure {
        /// Target entity id.
        id: F::Id,
        /// Normalized error message.
        error: String,
    },

    /// Load the feature's static reference data.
    LoadAuxiliaryRequested,
    /// Reference data arrived.
    LoadAuxiliarySuccess {
        /// The loaded reference data.
        data: F::Auxiliary,
    },
    /// A reference-data load failed.
    LoadAuxiliaryFailure {
        /// Normalized error message.
        error: String,
    },

    /// Create a new entity.
    CreateRequested {
        /// Creation payload.
        payload: F::CreatePayload,
    },
    /// The entity was created.
    CreateSuccess {
        /// The created entity as returned by the collaborator.
        entity: F::Detail,
    },
    /// A create failed.
    CreateFailure {
        /// Normalized error message.
        error: String,
    },

    /// Update an existing entity.
    UpdateRequested {
        /// Target entity id.
        id: F::Id,
        /// Partial change set.
        changes: F::Changes,
    },
    /// The update was accepted; patch local mirrors.
    UpdateSuccess {
        /// Target entity id.
        id: F::Id,
        /// The change set to merge into detail and summary mirrors.
        changes: F::Changes,
    },
    /// An update failed.
    UpdateFailure {
        /// Target entity id.
        id: F::Id,
        /// Normalized error message.
        error: String,
    },

    /// Delete an entity.
    DeleteRequested {
        /// Target entity id.
        id: F::Id,
    },
    /// The entity was deleted.
    DeleteSuccess {
        /// Target entity id.
        id: F::Id,
    },
    /// A delete failed.
    DeleteFailure {
        /// Target entity id.
        id: F::Id,
        /// Normalized error message.
        error: String,
    },

    /// Mark an entity as the current detail-screen selection.
    Selected {
        /// Selected id, or `None` to clear the selection.
        id: Option<F::Id>,
    },
}

impl<F: Feature> Event<F> {
    /// Short label for log output.
    pub fn label(&self) -> &'static str {
        match self {
            Self::LoadSummariesRequested { .. } => "load_summaries_requested",
            Self::LoadSummariesSuccess { .. } => "load_summaries_success",
            Self::LoadSummariesFailure { .. } => "load_summaries_failure",
            Self::LoadDetailRequested { .. } => "load_detail_requested",
            Self::LoadDetailSuccess { .. } => "load_detail_success",
            Self::LoadDetailFailure { .. } => "load_detail_failure",
            Self::LoadAuxiliaryRequested => "load_auxiliary_requested",
            Self::LoadAuxiliarySuccess { .. } => "load_auxiliary_success",
            Self::LoadAuxiliaryFailure { .. } => "load_auxiliary_failure",
            Self::CreateRequested { .. } => "create_requested",
            Self::CreateSuccess { .. } => "create_success",
            Self::CreateFailure { .. } => "create_failure",
            Self::UpdateRequested { .. } => "update_requested",
            Self::UpdateSuccess { .. } => "update_success",
            Self::UpdateFailure { .. } => "update_failure",
            Self::DeleteRequested { .. } => "delete_requested",
            Self::DeleteSuccess { .. } => "delete_success",
            Self::DeleteFailure { .. } => "delete_failure",
            Self::Selected { .. } => "selected",
        }
    }

    /// Whether this event is an intent the orchestrator must act on.
    pub fn is_request(&self) -> bool {
        matches!(
            self,
            Self::LoadSummariesRequested { .. }
                | Self::LoadDetailRequested { .. }
                | Self::LoadAuxiliaryRequested
                | Self::CreateRequested { .. }
                | Self::UpdateRequested { .. }
                | Self::DeleteRequested { .. }
        )
    }
}
