//! # Challenges Feature
//!
//! Community challenges: time-boxed activities members browse, join, and
//! complete for points. This module supplies the domain types, the engine
//! wiring, and [`ChallengesClient`], the façade application code talks to.
//!
//! Wire shapes use camelCase field names to match the backing API.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use questline_engine::{
    Engine, EngineConfig, Entity, Feature, Filters, Gateway, Pagination, ResolveError, View,
};

// ─── Identifiers & enums ─────────────────────────────────────────

/// Stable identifier of a challenge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChallengeId(pub Uuid);

impl ChallengeId {
    /// Mint a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ChallengeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ChallengeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Lifecycle phase of a challenge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChallengeStatus {
    /// Scheduled but not yet started.
    Upcoming,
    /// Currently running and open for participation.
    Active,
    /// Finished; results are final.
    Completed,
    /// Hidden from the board.
    Archived,
}

impl ChallengeStatus {
    /// Query-string form of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Archived => "archived",
        }
    }
}

/// Start and optional end of a challenge, ISO-8601 timestamps as served by
/// the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeSchedule {
    /// When the challenge opens.
    pub starts_at: String,
    /// When the challenge closes; `None` for open-ended challenges.
    pub ends_at: Option<String>,
}

// ─── Entity shapes ───────────────────────────────────────────────

/// List-display projection of a challenge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeSummary {
    /// Stable identifier, shared with the detail shape.
    pub id: ChallengeId,
    /// Display title.
    pub title: String,
    /// Category slug used by the board filters.
    pub category: String,
    /// Points awarded on completion.
    pub points: u32,
    /// Lifecycle phase.
    pub status: ChallengeStatus,
    /// Start and end times.
    pub schedule: ChallengeSchedule,
}

/// Full challenge record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeDetail {
    /// Stable identifier, shared with the summary shape.
    pub id: ChallengeId,
    /// Display title.
    pub title: String,
    /// Long-form description.
    pub description: String,
    /// Category slug used by the board filters.
    pub category: String,
    /// Points awarded on completion.
    pub points: u32,
    /// Lifecycle phase.
    pub status: ChallengeStatus,
    /// Start and end times.
    pub schedule: ChallengeSchedule,
    /// Venue name, when the challenge is tied to a place.
    pub location_name: Option<String>,
    /// Members currently participating.
    pub participant_count: u32,
}

impl Entity for ChallengeSummary {
    type Id = ChallengeId;
    fn id(&self) -> &ChallengeId {
        &self.id
    }
}

impl Entity for ChallengeDetail {
    type Id = ChallengeId;
    fn id(&self) -> &ChallengeId {
        &self.id
    }
}

// ─── Mutation payloads ───────────────────────────────────────────

/// Payload for creating a challenge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewChallenge {
    /// Display title.
    pub title: String,
    /// Long-form description.
    pub description: String,
    /// Category slug.
    pub category: String,
    /// Points awarded on completion.
    pub points: u32,
    /// Start and end times.
    pub schedule: ChallengeSchedule,
}

/// Partial change set for a challenge; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeChanges {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New category slug.
    pub category: Option<String>,
    /// New point value.
    pub points: Option<u32>,
    /// New lifecycle phase.
    pub status: Option<ChallengeStatus>,
}

// ─── List filters ────────────────────────────────────────────────

/// Typed list-query parameters for the challenges board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeFilters {
    /// 1-based page index.
    pub page: u32,
    /// Rows per page.
    pub page_size: u32,
    /// Restrict to one lifecycle phase.
    pub status: Option<ChallengeStatus>,
    /// Restrict to these category slugs; empty means all.
    pub categories: Vec<String>,
    /// Free-text title search.
    pub search: Option<String>,
}

impl Default for ChallengeFilters {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 9,
            status: None,
            categories: Vec::new(),
            search: None,
        }
    }
}

impl ChallengeFilters {
    /// Flatten into the engine's query bag. Categories become repeated
    /// `category` keys.
    pub fn to_query(&self) -> Filters {
        let mut query = Filters::new()
            .with("page", self.page)
            .with("pageSize", self.page_size);
        if let Some(status) = self.status {
            query.push("status", status.as_str());
        }
        query.push_all("category", self.categories.iter());
        if let Some(search) = &self.search {
            query.push("search", search);
        }
        query
    }

    /// Same filters pointed at `page`.
    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }
}

/// Reference data backing the board's filter controls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeFilterConfig {
    /// Known category slugs.
    pub categories: Vec<String>,
    /// Statuses the board offers as filters.
    pub statuses: Vec<ChallengeStatus>,
}

// ─── Feature wiring ──────────────────────────────────────────────

/// Marker wiring the challenge types into the engine.
#[derive(Debug, Clone)]
pub struct Challenges;

impl Feature for Challenges {
    const NAME: &'static str = "challenges";
    type Id = ChallengeId;
    type Summary = ChallengeSummary;
    type Detail = ChallengeDetail;
    type Auxiliary = ChallengeFilterConfig;
    type Filters = Filters;
    type CreatePayload = NewChallenge;
    type Changes = ChallengeChanges;

    fn patch_detail(detail: &mut ChallengeDetail, changes: &ChallengeChanges) {
        if let Some(title) = &changes.title {
            detail.title = title.clone();
        }
        if let Some(description) = &changes.description {
            detail.description = description.clone();
        }
        if let Some(category) = &changes.category {
            detail.category = category.clone();
        }
        if let Some(points) = changes.points {
            detail.points = points;
        }
        if let Some(status) = changes.status {
            detail.status = status;
        }
    }

    fn patch_summary(summary: &mut ChallengeSummary, changes: &ChallengeChanges) {
        if let Some(title) = &changes.title {
            summary.title = title.clone();
        }
        if let Some(category) = &changes.category {
            summary.category = category.clone();
        }
        if let Some(points) = changes.points {
            summary.points = points;
        }
        if let Some(status) = changes.status {
            summary.status = status;
        }
    }
}

// ─── Client façade ───────────────────────────────────────────────

/// Application-facing handle for the challenges feature.
///
/// Cheap to clone; clones observe the same state.
#[derive(Clone)]
pub struct ChallengesClient {
    engine: Engine<Challenges>,
}

impl ChallengesClient {
    /// Build a client backed by the given data-access collaborator.
    pub fn new(gateway: Arc<dyn Gateway<Challenges>>) -> Self {
        Self {
            engine: Engine::new(gateway, EngineConfig::default()),
        }
    }

    /// Build a client with explicit engine configuration.
    pub fn with_config(gateway: Arc<dyn Gateway<Challenges>>, config: EngineConfig) -> Self {
        Self {
            engine: Engine::new(gateway, config),
        }
    }

    /// Load a page of the board, replacing the current list.
    pub fn load_page(&self, filters: &ChallengeFilters) {
        self.engine.load_summaries(filters.to_query());
    }

    /// Load the next page of the board, appending to the current list.
    pub fn load_more(&self, filters: &ChallengeFilters) {
        self.engine.load_more_summaries(filters.to_query());
    }

    /// Load one challenge's full record.
    pub fn load_challenge(&self, id: ChallengeId) {
        self.engine.load_detail(id);
    }

    /// Load the filter reference data for the board controls.
    pub fn load_filter_config(&self) {
        self.engine.load_auxiliary();
    }

    /// Submit a new challenge.
    pub fn create_challenge(&self, challenge: NewChallenge) {
        self.engine.create(challenge);
    }

    /// Apply a change set to an existing challenge.
    pub fn update_challenge(&self, id: ChallengeId, changes: ChallengeChanges) {
        self.engine.update(id, changes);
    }

    /// Delete a challenge.
    pub fn delete_challenge(&self, id: ChallengeId) {
        self.engine.delete(id);
    }

    /// Set or clear the challenge shown on the detail screen.
    pub fn select(&self, id: Option<ChallengeId>) {
        self.engine.select(id);
    }

    /// Route-guard read: yield the challenge for `id`, fetching it at most
    /// once if absent.
    pub async fn resolve_challenge(
        &self,
        id: Option<ChallengeId>,
    ) -> Result<ChallengeDetail, ResolveError> {
        self.engine.resolve(id).await
    }

    /// Board rows in presentation order.
    pub fn challenges(&self) -> View<Challenges, Vec<ChallengeSummary>> {
        self.engine.summaries()
    }

    /// One challenge's full record, once loaded.
    pub fn challenge(&self, id: ChallengeId) -> View<Challenges, Option<ChallengeDetail>> {
        self.engine.entity(id)
    }

    /// The selected challenge, once loaded.
    pub fn selected(&self) -> View<Challenges, Option<ChallengeDetail>> {
        self.engine.selected()
    }

    /// Combined loading flag across board, detail, and filter config.
    pub fn loading(&self) -> View<Challenges, bool> {
        self.engine.loading()
    }

    /// Latest combined error, detail first.
    pub fn error(&self) -> View<Challenges, Option<String>> {
        self.engine.error()
    }

    /// Pagination metadata for the board.
    pub fn pagination(&self) -> View<Challenges, Pagination> {
        self.engine.pagination()
    }

    /// The filter reference data, once loaded.
    pub fn filter_config(&self) -> View<Challenges, Option<ChallengeFilterConfig>> {
        self.engine.auxiliary()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule() -> ChallengeSchedule {
        ChallengeSchedule {
            starts_at: "2025-06-01T09:00:00Z".to_string(),
            ends_at: Some("2025-06-30T18:00:00Z".to_string()),
        }
    }

    fn detail() -> ChallengeDetail {
        ChallengeDetail {
            id: ChallengeId::new(),
            title: "River cleanup".to_string(),
            description: "Meet at the east bank.".to_string(),
            category: "environment".to_string(),
            points: 150,
            status: ChallengeStatus::Active,
            schedule: schedule(),
            location_name: Some("East bank".to_string()),
            participant_count: 12,
        }
    }

    #[test]
    fn filters_flatten_with_repeated_category_keys() {
        let filters = ChallengeFilters {
            page: 2,
            page_size: 9,
            status: Some(ChallengeStatus::Active),
            categories: vec!["fitness".to_string(), "social".to_string()],
            search: Some("river".to_string()),
        };

        let query = filters.to_query();
        assert_eq!(
            query.pairs(),
            &[
                ("page".to_string(), "2".to_string()),
                ("pageSize".to_string(), "9".to_string()),
                ("status".to_string(), "active".to_string()),
                ("category".to_string(), "fitness".to_string()),
                ("category".to_string(), "social".to_string()),
                ("search".to_string(), "river".to_string()),
            ]
        );
    }

    #[test]
    fn default_filters_carry_only_paging() {
        let query = ChallengeFilters::default().to_query();
        assert_eq!(query.len(), 2);
        assert_eq!(query.values_of("page").collect::<Vec<_>>(), vec!["1"]);
        assert_eq!(query.values_of("pageSize").collect::<Vec<_>>(), vec!["9"]);
    }

    #[test]
    fn patch_detail_merges_only_present_fields() {
        let mut target = detail();
        let original_description = target.description.clone();

        Challenges::patch_detail(
            &mut target,
            &ChallengeChanges {
                title: Some("River cleanup II".to_string()),
                points: Some(200),
                ..ChallengeChanges::default()
            },
        );

        assert_eq!(target.title, "River cleanup II");
        assert_eq!(target.points, 200);
        assert_eq!(target.description, original_description);
        assert_eq!(target.status, ChallengeStatus::Active);
    }

    #[test]
    fn patch_summary_ignores_detail_only_fields() {
        let source = detail();
        let mut summary = ChallengeSummary {
            id: source.id,
            title: source.title.clone(),
            category: source.category.clone(),
            points: source.points,
            status: source.status,
            schedule: source.schedule.clone(),
        };

        Challenges::patch_summary(
            &mut summary,
            &ChallengeChanges {
                description: Some("longer text".to_string()),
                status: Some(ChallengeStatus::Completed),
                ..ChallengeChanges::default()
            },
        );

        assert_eq!(summary.status, ChallengeStatus::Completed);
        assert_eq!(summary.title, source.title);
    }

    #[test]
    fn detail_deserializes_from_api_payload() {
        let payload = r#"{
            "id": "5f3c7a9e-8f49-4f25-b0a5-0d9e2f1c6b7a",
            "title": "Community 5k",
            "description": "Run or walk, everyone welcome.",
            "category": "fitness",
            "points": 100,
            "status": "active",
            "schedule": { "startsAt": "2025-06-01T09:00:00Z", "endsAt": null },
            "locationName": null,
            "participantCount": 48
        }"#;

        let parsed: ChallengeDetail = serde_json::from_str(payload).unwrap();
        assert_eq!(parsed.title, "Community 5k");
        assert_eq!(parsed.status, ChallengeStatus::Active);
        assert_eq!(parsed.schedule.ends_at, None);
        assert_eq!(parsed.participant_count, 48);
    }
}
