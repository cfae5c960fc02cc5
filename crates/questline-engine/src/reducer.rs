//! # Transition Function
//!
//! Pure, total reduction of `(state, event)` into the next state. The
//! reducer never mutates its input, never performs I/O, and handles every
//! event variant exhaustively. Mutation operations (create, update, delete)
//! are accounted against the detail substate's loading flag and error.

use crate::event::Event;
use crate::feature::{Entity, Feature};
use crate::gateway::PageInfo;
use crate::state::FeatureState;

/// Apply one event to a state snapshot, producing the next state.
pub fn reduce<F: Feature>(state: &FeatureState<F>, event: &Event<F>) -> FeatureState<F> {
    let mut next = state.clone();

    match event {
        // ─── Summaries ───────────────────────────────────────────
        Event::LoadSummariesRequested { .. } => {
            next.summaries.loading = true;
            next.summaries.error = None;
        }
        Event::LoadSummariesSuccess {
            items,
            page,
            append,
        } => apply_summaries_page(&mut next, items, page, *append),
        Event::LoadSummariesFailure { error } => {
            next.summaries.loading = false;
            next.summaries.error = Some(error.clone());
        }

        // ─── Detail ──────────────────────────────────────────────
        Event::LoadDetailRequested { .. } => {
            next.detail.loading = true;
            next.detail.error = None;
            next.detail.failed_id = None;
        }
        Event::LoadDetailSuccess { entity } => {
            next.detail.loading = false;
            next.detail.failed_id = None;
            next.detail
                .entities
                .insert(entity.id().clone(), entity.clone());
        }
        Event::LoadDetailFailure { id, error } => {
            next.detail.loading = false;
            next.detail.error = Some(error.clone());
            next.detail.failed_id = Some(id.clone());
        }

        // ─── Auxiliary ───────────────────────────────────────────
        Event::LoadAuxiliaryRequested => {
            next.auxiliary.loading = true;
            next.auxiliary.error = None;
        }
        Event::LoadAuxiliarySuccess { data } => {
            next.auxiliary.loading = false;
            next.auxiliary.data = Some(data.clone());
        }
        Event::LoadAuxiliaryFailure { error } => {
            next.auxiliary.loading = false;
            next.auxiliary.error = Some(error.clone());
        }

        // ─── Create ──────────────────────────────────────────────
        Event::CreateRequested { .. } => {
            next.detail.loading = true;
            next.detail.error = None;
            next.detail.failed_id = None;
        }
        Event::CreateSuccess { entity } => {
            next.detail.loading = false;
            next.detail
                .entities
                .insert(entity.id().clone(), entity.clone());
            next.summaries.page.total_items += 1;
            next.summaries.page.recompute();
        }
        Event::CreateFailure { error } => {
            next.detail.loading = false;
            next.detail.error = Some(error.clone());
        }

        // ─── Update ──────────────────────────────────────────────
        Event::UpdateRequested { .. } => {
            next.detail.loading = true;
            next.detail.error = None;
            next.detail.failed_id = None;
        }
        Event::UpdateSuccess { id, changes } => {
            next.detail.loading = false;
            if let Some(entity) = next.detail.entities.get_mut(id) {
                F::patch_detail(entity, changes);
            }
            if let Some(summary) = next.summaries.items.iter_mut().find(|s| s.id() == id) {
                F::patch_summary(summary, changes);
            }
        }
        Event::UpdateFailure { error, .. } => {
            next.detail.loading = false;
            next.detail.error = Some(error.clone());
        }

        // ─── Delete ──────────────────────────────────────────────
        Event::DeleteRequested { .. } => {
            next.detail.loading = true;
            next.detail.error = None;
            next.detail.failed_id = None;
        }
        Event::DeleteSuccess { id } => apply_delete(&mut next, id),
        Event::DeleteFailure { error, .. } => {
            next.detail.loading = false;
            next.detail.error = Some(error.clone());
        }

        // ─── Selection ───────────────────────────────────────────
        Event::Selected { id } => {
            next.detail.selected_id = id.clone();
        }
    }

    next.bump_version();
    next
}

fn apply_summaries_page<F: Feature>(
    state: &mut FeatureState<F>,
    items: &[F::Summary],
    page: &PageInfo,
    append: bool,
) {
    if append {
        state.summaries.items.extend(items.iter().cloned());
    } else {
        state.summaries.items = items.to_vec();
    }
    state.summaries.page.current_page = page.page_index;
    state.summaries.page.page_size = page.page_size;
    state.summaries.page.total_items = page.total_items;
    state.summaries.page.recompute();
    state.summaries.loading = false;
}

/// Delete reconciliation: the detail map, the summaries list, and the item
/// count all change in the same logical update.
fn apply_delete<F: Feature>(state: &mut FeatureState<F>, id: &F::Id) {
    state.detail.loading = false;
    state.detail.entities.remove(id);
    state.summaries.items.retain(|s| s.id() != id);
    state.summaries.page.total_items = state.summaries.page.total_items.saturating_sub(1);
    state.summaries.page.recompute();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::{detail, page_info, summary, TestFeature, TestState};

    fn reduce_all(events: &[Event<TestFeature>]) -> TestState {
        let mut state = TestState::default();
        for event in events {
            state = reduce(&state, event);
        }
        state
    }

    #[test]
    fn requested_sets_loading_and_clears_error() {
        let failed = reduce_all(&[Event::LoadSummariesFailure {
            error: "boom".into(),
        }]);
        assert_eq!(failed.summaries.error.as_deref(), Some("boom"));
        assert!(!failed.summaries.loading);

        let retried = reduce(
            &failed,
            &Event::LoadSummariesRequested {
                filters: (),
                append: false,
            },
        );
        assert!(retried.summaries.loading);
        assert!(retried.summaries.error.is_none());
    }

    #[test]
    fn summaries_success_replaces_and_paginates() {
        let state = reduce_all(&[
            Event::LoadSummariesRequested {
                filters: (),
                append: false,
            },
            Event::LoadSummariesSuccess {
                items: (1..=9).map(summary).collect(),
                page: page_info(1, 9, 25),
                append: false,
            },
        ]);

        assert_eq!(state.summaries.items.len(), 9);
        assert_eq!(state.summaries.page.current_page, 1);
        assert_eq!(state.summaries.page.total_pages, 3);
        assert!(!state.summaries.loading);
    }

    #[test]
    fn summaries_success_appends_when_flagged() {
        let state = reduce_all(&[
            Event::LoadSummariesSuccess {
                items: vec![summary(1), summary(2)],
                page: page_info(1, 2, 5),
                append: false,
            },
            Event::LoadSummariesSuccess {
                items: vec![summary(3), summary(4)],
                page: page_info(2, 2, 5),
                append: true,
            },
        ]);

        let ids: Vec<u64> = state.summaries.items.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(state.summaries.page.current_page, 2);
        assert_eq!(state.summaries.page.total_pages, 3);
    }

    #[test]
    fn detail_success_upserts_under_its_own_id() {
        let state = reduce_all(&[Event::LoadDetailSuccess { entity: detail(7) }]);
        assert_eq!(state.detail.entities.get(&7).map(|d| d.id), Some(7));
        assert!(!state.detail.loading);

        // Overwrite on reload.
        let reloaded = reduce(
            &state,
            &Event::LoadDetailSuccess {
                entity: crate::testkit::detail_named(7, "renamed"),
            },
        );
        assert_eq!(
            reloaded.detail.entities.get(&7).map(|d| d.name.as_str()),
            Some("renamed")
        );
    }

    #[test]
    fn update_success_patches_detail_and_summary() {
        let state = reduce_all(&[
            Event::LoadDetailSuccess { entity: detail(1) },
            Event::LoadSummariesSuccess {
                items: vec![summary(1), summary(2)],
                page: page_info(1, 9, 2),
                append: false,
            },
            Event::UpdateSuccess {
                id: 1,
                changes: Some("patched".to_string()),
            },
        ]);

        assert_eq!(
            state.detail.entities.get(&1).map(|d| d.name.as_str()),
            Some("patched")
        );
        assert_eq!(state.summaries.items[0].name, "patched");
        assert_eq!(state.summaries.items[1].name, "summary-2");
    }

    #[test]
    fn update_success_for_unknown_id_is_identity_on_entities() {
        let state = reduce_all(&[Event::UpdateSuccess {
            id: 42,
            changes: Some("ghost".to_string()),
        }]);
        assert!(state.detail.entities.is_empty());
        assert!(state.summaries.items.is_empty());
    }

    #[test]
    fn delete_success_reconciles_map_list_and_counts() {
        let state = reduce_all(&[
            Event::LoadDetailSuccess { entity: detail(2) },
            Event::LoadSummariesSuccess {
                items: vec![summary(1), summary(2), summary(3)],
                page: page_info(1, 9, 20),
                append: false,
            },
            Event::DeleteSuccess { id: 2 },
        ]);

        assert!(!state.detail.entities.contains_key(&2));
        assert!(state.summaries.items.iter().all(|s| s.id != 2));
        assert_eq!(state.summaries.page.total_items, 19);
        // ceil(19 / 9) == 3, unchanged by this delete.
        assert_eq!(state.summaries.page.total_pages, 3);
    }

    #[test]
    fn delete_success_can_drop_a_page() {
        let state = reduce_all(&[
            Event::LoadSummariesSuccess {
                items: (1..=9).map(summary).collect(),
                page: page_info(1, 9, 10),
                append: false,
            },
            Event::DeleteSuccess { id: 1 },
        ]);
        assert_eq!(state.summaries.page.total_items, 9);
        assert_eq!(state.summaries.page.total_pages, 1);
    }

    #[test]
    fn delete_success_on_empty_state_floors_at_zero() {
        let state = reduce_all(&[Event::DeleteSuccess { id: 99 }]);
        assert_eq!(state.summaries.page.total_items, 0);
    }

    #[test]
    fn create_success_counts_the_new_entity() {
        let state = reduce_all(&[
            Event::LoadSummariesSuccess {
                items: (1..=9).map(summary).collect(),
                page: page_info(1, 9, 9),
                append: false,
            },
            Event::CreateSuccess { entity: detail(10) },
        ]);
        assert!(state.detail.entities.contains_key(&10));
        assert_eq!(state.summaries.page.total_items, 10);
        assert_eq!(state.summaries.page.total_pages, 2);
    }

    #[test]
    fn detail_failure_records_the_failing_id_until_the_next_request() {
        let failed = reduce_all(&[Event::LoadDetailFailure {
            id: 7,
            error: "gone".into(),
        }]);
        assert_eq!(failed.detail.failed_id, Some(7));

        // A mutation failure leaves the load marker alone.
        let after_mutation = reduce(
            &failed,
            &Event::UpdateFailure {
                id: 9,
                error: "rejected".into(),
            },
        );
        assert_eq!(after_mutation.detail.failed_id, Some(7));

        let retried = reduce(&failed, &Event::LoadDetailRequested { id: 7 });
        assert_eq!(retried.detail.failed_id, None);

        let mutated = reduce(&failed, &Event::DeleteRequested { id: 9 });
        assert_eq!(mutated.detail.failed_id, None);
    }

    #[test]
    fn failures_land_in_their_own_substate() {
        let state = reduce_all(&[
            Event::LoadAuxiliaryFailure {
                error: "aux down".into(),
            },
            Event::LoadDetailFailure {
                id: 1,
                error: "detail down".into(),
            },
        ]);
        assert_eq!(state.auxiliary.error.as_deref(), Some("aux down"));
        assert_eq!(state.detail.error.as_deref(), Some("detail down"));
        assert!(state.summaries.error.is_none());
        // Detail wins the combined-error priority.
        assert_eq!(state.combined_error(), Some("detail down"));
    }

    #[test]
    fn selection_may_dangle_until_the_load_lands() {
        let state = reduce_all(&[Event::Selected { id: Some(5) }]);
        assert_eq!(state.detail.selected_id, Some(5));
        assert!(!state.detail.entities.contains_key(&5));
    }

    #[test]
    fn every_event_bumps_the_version() {
        let base = TestState::default();
        let one = reduce(&base, &Event::Selected { id: None });
        let two = reduce(&one, &Event::LoadAuxiliaryRequested);
        assert_eq!(one.version(), base.version() + 1);
        assert_eq!(two.version(), one.version() + 1);
    }
}
