//! # Normalized Feature State
//!
//! The local mirror of one feature's server-owned entities: a normalized
//! detail map, an ordered summaries list with pagination metadata, and
//! optional static reference data. Each substate carries its own loading
//! flag and latest error; combined views OR the flags and pick the first
//! error in detail → summaries → auxiliary order.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::feature::Feature;

// =============================================================================
// Pagination
// =============================================================================

/// Pagination metadata for the summaries list.
///
/// `total_pages` is always `ceil(total_items / page_size)` for a non-zero
/// page size; [`recompute`](Self::recompute) re-establishes the invariant
/// after every mutation of `total_items`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// 1-based index of the most recently loaded page.
    pub current_page: u32,
    /// Page size of the most recent list load.
    pub page_size: u32,
    /// Total matching items across all pages.
    pub total_items: u64,
    /// Derived page count.
    pub total_pages: u32,
}

impl Pagination {
    /// Recompute `total_pages` from `total_items` and `page_size`, saturating
    /// at `u32::MAX` for counts no real collection reaches.
    pub fn recompute(&mut self) {
        self.total_pages = if self.page_size > 0 {
            u32::try_from(self.total_items.div_ceil(u64::from(self.page_size)))
                .unwrap_or(u32::MAX)
        } else {
            0
        };
    }
}

// =============================================================================
// Substates
// =============================================================================

/// Detail substate: normalized id → detail map plus selection.
#[derive(Debug, Clone)]
pub struct DetailState<F: Feature> {
    /// Normalized map; every key equals the id of its value.
    pub entities: HashMap<F::Id, F::Detail>,
    /// Current detail-screen selection. May point at an entity whose load is
    /// still pending.
    pub selected_id: Option<F::Id>,
    /// A detail read or mutation is in flight.
    pub loading: bool,
    /// Latest error, cleared when the next request is accepted.
    pub error: Option<String>,
    /// Id whose detail load most recently failed. Set only by a detail-load
    /// failure and cleared when the next detail-substate request is
    /// accepted, so select-or-load waiters can tell their own failure from
    /// an unrelated mutation's.
    pub failed_id: Option<F::Id>,
}

/// Summaries substate: ordered list plus pagination.
///
/// The list is intentionally not normalized — its order is the presentation
/// order chosen by the server.
#[derive(Debug, Clone)]
pub struct SummaryState<F: Feature> {
    /// Summary entities in presentation order.
    pub items: Vec<F::Summary>,
    /// A summaries load is in flight.
    pub loading: bool,
    /// Latest error, cleared when the next request is accepted.
    pub error: Option<String>,
    /// Pagination metadata.
    pub page: Pagination,
}

/// Auxiliary substate: static reference data.
#[derive(Debug, Clone)]
pub struct AuxiliaryState<F: Feature> {
    /// Loaded reference data, if any.
    pub data: Option<F::Auxiliary>,
    /// A reference-data load is in flight.
    pub loading: bool,
    /// Latest error, cleared when the next request is accepted.
    pub error: Option<String>,
}

impl<F: Feature> Default for DetailState<F> {
    fn default() -> Self {
        Self {
            entities: HashMap::new(),
            selected_id: None,
            loading: false,
            error: None,
            failed_id: None,
        }
    }
}

impl<F: Feature> Default for SummaryState<F> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
            page: Pagination::default(),
        }
    }
}

impl<F: Feature> Default for AuxiliaryState<F> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

// =============================================================================
// Feature State
// =============================================================================

/// Complete mirrored state for one feature.
#[derive(Debug, Clone)]
pub struct FeatureState<F: Feature> {
    /// Detail substate.
    pub detail: DetailState<F>,
    /// Summaries substate.
    pub summaries: SummaryState<F>,
    /// Auxiliary substate.
    pub auxiliary: AuxiliaryState<F>,
    version: u64,
}

impl<F: Feature> Default for FeatureState<F> {
    fn default() -> Self {
        Self {
            detail: DetailState::default(),
            summaries: SummaryState::default(),
            auxiliary: AuxiliaryState::default(),
            version: 0,
        }
    }
}

impl<F: Feature> FeatureState<F> {
    /// Monotonic counter bumped once per applied event. Derived views use it
    /// to skip recomputation for states they have already projected.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub(crate) fn bump_version(&mut self) {
        self.version += 1;
    }

    /// Logical OR over the three substates' loading flags.
    pub fn combined_loading(&self) -> bool {
        self.detail.loading || self.summaries.loading || self.auxiliary.loading
    }

    /// First non-null error, detail before summaries before auxiliary.
    pub fn combined_error(&self) -> Option<&str> {
        self.detail
            .error
            .as_deref()
            .or(self.summaries.error.as_deref())
            .or(self.auxiliary.error.as_deref())
    }
}
