//! # Feature Vocabulary
//!
//! A [`Feature`] describes one server-owned resource family that the engine
//! mirrors client-side: its identifier, its two entity shapes (summary for
//! lists, detail for full records), optional static reference data, and the
//! parameter types for list queries and mutations.
//!
//! Feature implementations are zero-sized markers; all behavior lives in the
//! associated types and the two merge hooks.

use std::fmt::Debug;
use std::hash::Hash;

/// An identifiable record mirrored client-side from a server-owned resource.
pub trait Entity {
    /// Stable unique identifier shared by the summary and detail shapes.
    type Id: Clone + Eq + Hash + Debug + Send + Sync + 'static;

    /// The entity's identifier.
    fn id(&self) -> &Self::Id;
}

/// Type vocabulary for one synchronized feature.
pub trait Feature: Clone + Debug + Send + Sync + 'static {
    /// Feature name used to qualify log output.
    const NAME: &'static str;

    /// Identifier type shared by both entity shapes.
    type Id: Clone + Eq + Hash + Debug + Send + Sync + 'static;

    /// List-display projection of the entity.
    type Summary: Entity<Id = Self::Id> + Clone + Debug + Send + Sync + 'static;

    /// Full record of the entity.
    type Detail: Entity<Id = Self::Id> + Clone + Debug + Send + Sync + 'static;

    /// Static reference data loaded once per feature (filter configuration,
    /// stat definitions, ...).
    type Auxiliary: Clone + Debug + Send + Sync + 'static;

    /// List query parameters.
    type Filters: Clone + Debug + Send + Sync + 'static;

    /// Payload for creating a new entity.
    type CreatePayload: Clone + Debug + Send + Sync + 'static;

    /// Partial change set applied by update operations.
    type Changes: Clone + Debug + Send + Sync + 'static;

    /// Merge a change set into a detail entity.
    fn patch_detail(detail: &mut Self::Detail, changes: &Self::Changes);

    /// Merge a change set into a summary entity.
    ///
    /// Summaries carry a subset of the detail fields; changes to fields the
    /// summary does not display are ignored here.
    fn patch_summary(summary: &mut Self::Summary, changes: &Self::Changes);
}
