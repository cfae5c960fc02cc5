//! # Character Progression Feature
//!
//! Each member has a character that levels up as they complete challenges.
//! The feature mirrors the character roster and records, plus a static
//! catalog of stat definitions, and derives the stat-bar view models the
//! profile screen renders.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use questline_engine::{
    view, Engine, EngineConfig, Entity, Feature, Filters, Gateway, Pagination, ResolveError, View,
};

// ─── Identifiers ─────────────────────────────────────────────────

/// Stable identifier of a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacterId(pub Uuid);

impl CharacterId {
    /// Mint a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CharacterId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ─── Entity shapes ───────────────────────────────────────────────

/// Roster-row projection of a character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterSummary {
    /// Stable identifier, shared with the detail shape.
    pub id: CharacterId,
    /// Display name.
    pub name: String,
    /// Current level.
    pub level: u32,
    /// Lifetime experience points.
    pub total_xp: u64,
}

/// A character's current value for one stat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatValue {
    /// Id of the stat in the catalog.
    pub stat_id: String,
    /// Current value.
    pub current: f64,
}

/// A badge the character has earned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    /// Stable badge identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Icon asset name.
    pub icon: String,
}

/// Full character record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterDetail {
    /// Stable identifier, shared with the summary shape.
    pub id: CharacterId,
    /// Display name.
    pub name: String,
    /// Current level.
    pub level: u32,
    /// Lifetime experience points.
    pub total_xp: u64,
    /// Current stat values, joined against the catalog for display.
    pub stats: Vec<StatValue>,
    /// Badges earned so far.
    pub badges: Vec<Badge>,
}

impl Entity for CharacterSummary {
    type Id = CharacterId;
    fn id(&self) -> &CharacterId {
        &self.id
    }
}

impl Entity for CharacterDetail {
    type Id = CharacterId;
    fn id(&self) -> &CharacterId {
        &self.id
    }
}

// ─── Stat catalog (auxiliary) ────────────────────────────────────

/// Immutable definition of one stat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatDefinition {
    /// Stable stat identifier referenced by [`StatValue`].
    pub id: String,
    /// Display name.
    pub name: String,
    /// Icon asset name.
    pub icon: String,
    /// Value at which the stat bar is full.
    pub max_value: f64,
}

/// Static reference data for the progression feature.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressionCatalog {
    /// All known stat definitions.
    pub stats: Vec<StatDefinition>,
}

impl ProgressionCatalog {
    fn definition(&self, stat_id: &str) -> Option<&StatDefinition> {
        self.stats.iter().find(|def| def.id == stat_id)
    }
}

// ─── Mutation payloads ───────────────────────────────────────────

/// Payload for creating a character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCharacter {
    /// Display name.
    pub name: String,
}

/// Partial change set for a character; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterChanges {
    /// New display name.
    pub name: Option<String>,
    /// New level.
    pub level: Option<u32>,
    /// New lifetime experience total.
    pub total_xp: Option<u64>,
}

// ─── Display transform ───────────────────────────────────────────

/// View model for one stat bar on the profile screen.
#[derive(Debug, Clone, PartialEq)]
pub struct StatView {
    /// Stable stat identifier.
    pub stat_id: String,
    /// Display name from the definition.
    pub name: String,
    /// Icon asset name from the definition.
    pub icon: String,
    /// Current value.
    pub current: f64,
    /// Value at which the bar is full.
    pub max_value: f64,
    /// `current / max_value`, clamped to `[0, 1]`.
    pub fill: f64,
}

/// Combine a character's stat values with the catalog definitions.
///
/// Values with no matching definition are skipped rather than rendered
/// half-formed; the fill ratio is clamped so over- and under-range values
/// cannot break the bar.
pub fn stat_views(detail: &CharacterDetail, catalog: &ProgressionCatalog) -> Vec<StatView> {
    detail
        .stats
        .iter()
        .filter_map(|value| {
            let Some(def) = catalog.definition(&value.stat_id) else {
                warn!(stat_id = %value.stat_id, "stat value has no catalog definition, skipping");
                return None;
            };
            let fill = if def.max_value > 0.0 {
                (value.current / def.max_value).clamp(0.0, 1.0)
            } else {
                0.0
            };
            Some(StatView {
                stat_id: value.stat_id.clone(),
                name: def.name.clone(),
                icon: def.icon.clone(),
                current: value.current,
                max_value: def.max_value,
                fill,
            })
        })
        .collect()
}

// ─── Feature wiring ──────────────────────────────────────────────

/// Marker wiring the progression types into the engine.
#[derive(Debug, Clone)]
pub struct Progression;

impl Feature for Progression {
    const NAME: &'static str = "progression";
    type Id = CharacterId;
    type Summary = CharacterSummary;
    type Detail = CharacterDetail;
    type Auxiliary = ProgressionCatalog;
    type Filters = Filters;
    type CreatePayload = NewCharacter;
    type Changes = CharacterChanges;

    fn patch_detail(detail: &mut CharacterDetail, changes: &CharacterChanges) {
        if let Some(name) = &changes.name {
            detail.name = name.clone();
        }
        if let Some(level) = changes.level {
            detail.level = level;
        }
        if let Some(total_xp) = changes.total_xp {
            detail.total_xp = total_xp;
        }
    }

    fn patch_summary(summary: &mut CharacterSummary, changes: &CharacterChanges) {
        if let Some(name) = &changes.name {
            summary.name = name.clone();
        }
        if let Some(level) = changes.level {
            summary.level = level;
        }
        if let Some(total_xp) = changes.total_xp {
            summary.total_xp = total_xp;
        }
    }
}

// ─── Client façade ───────────────────────────────────────────────

/// Application-facing handle for the progression feature.
///
/// Cheap to clone; clones observe the same state.
#[derive(Clone)]
pub struct ProgressionClient {
    engine: Engine<Progression>,
}

impl ProgressionClient {
    /// Build a client backed by the given data-access collaborator.
    pub fn new(gateway: Arc<dyn Gateway<Progression>>) -> Self {
        Self {
            engine: Engine::new(gateway, EngineConfig::default()),
        }
    }

    /// Build a client with explicit engine configuration.
    pub fn with_config(gateway: Arc<dyn Gateway<Progression>>, config: EngineConfig) -> Self {
        Self {
            engine: Engine::new(gateway, config),
        }
    }

    /// Load a page of the character roster.
    pub fn load_roster(&self, filters: Filters) {
        self.engine.load_summaries(filters);
    }

    /// Load one character's full record.
    pub fn load_character(&self, id: CharacterId) {
        self.engine.load_detail(id);
    }

    /// Load the stat catalog.
    pub fn load_catalog(&self) {
        self.engine.load_auxiliary();
    }

    /// Create a character.
    pub fn create_character(&self, character: NewCharacter) {
        self.engine.create(character);
    }

    /// Apply a change set to a character.
    pub fn update_character(&self, id: CharacterId, changes: CharacterChanges) {
        self.engine.update(id, changes);
    }

    /// Delete a character.
    pub fn delete_character(&self, id: CharacterId) {
        self.engine.delete(id);
    }

    /// Set or clear the character shown on the profile screen.
    pub fn select(&self, id: Option<CharacterId>) {
        self.engine.select(id);
    }

    /// Route-guard read: yield the character for `id`, fetching it at most
    /// once if absent.
    pub async fn resolve_character(
        &self,
        id: Option<CharacterId>,
    ) -> Result<CharacterDetail, ResolveError> {
        self.engine.resolve(id).await
    }

    /// Roster rows in presentation order.
    pub fn roster(&self) -> View<Progression, Vec<CharacterSummary>> {
        self.engine.summaries()
    }

    /// One character's full record, once loaded.
    pub fn character(&self, id: CharacterId) -> View<Progression, Option<CharacterDetail>> {
        self.engine.entity(id)
    }

    /// The selected character, once loaded.
    pub fn selected(&self) -> View<Progression, Option<CharacterDetail>> {
        self.engine.selected()
    }

    /// Stat bars for the selected character, empty until both the record
    /// and the catalog have loaded.
    pub fn selected_stat_views(&self) -> View<Progression, Vec<StatView>> {
        self.engine.view(|state| {
            match (view::selected_entity(state), &state.auxiliary.data) {
                (Some(detail), Some(catalog)) => stat_views(&detail, catalog),
                _ => Vec::new(),
            }
        })
    }

    /// Combined loading flag across roster, record, and catalog.
    pub fn loading(&self) -> View<Progression, bool> {
        self.engine.loading()
    }

    /// Latest combined error, record first.
    pub fn error(&self) -> View<Progression, Option<String>> {
        self.engine.error()
    }

    /// Pagination metadata for the roster.
    pub fn pagination(&self) -> View<Progression, Pagination> {
        self.engine.pagination()
    }

    /// The stat catalog, once loaded.
    pub fn catalog(&self) -> View<Progression, Option<ProgressionCatalog>> {
        self.engine.auxiliary()
    }
}
