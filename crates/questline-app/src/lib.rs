//! # Questline App
//!
//! Concrete features of the questline client, built on the reusable engine
//! in `questline-engine`:
//!
//! - [`challenges`]: the community challenge board (browse, create, edit,
//!   delete, per-challenge detail with a route-guard resolve).
//! - [`progression`]: character records, the stat catalog, and the stat-bar
//!   view models for the profile screen.
//!
//! Each feature exposes a thin client façade over its engine instance;
//! transport lives behind the engine's `Gateway` trait and is supplied by
//! the embedding application.

pub mod challenges;
pub mod progression;

pub use challenges::{
    ChallengeChanges, ChallengeDetail, ChallengeFilterConfig, ChallengeFilters, ChallengeId,
    ChallengeSchedule, ChallengeStatus, ChallengeSummary, Challenges, ChallengesClient,
    NewChallenge,
};
pub use progression::{
    stat_views, Badge, CharacterChanges, CharacterDetail, CharacterId, CharacterSummary,
    NewCharacter, Progression, ProgressionCatalog, ProgressionClient, StatDefinition, StatValue,
    StatView,
};
