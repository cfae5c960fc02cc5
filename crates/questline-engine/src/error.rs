//! Error types for the synchronization engine.
//!
//! The orchestrator is the only place collaborator errors are caught; they
//! are normalized to a message (plus the target id where one exists) before
//! becoming `Failure` events. Nothing in this taxonomy aborts the engine.

use std::time::Duration;

/// Failure reported by the data-access collaborator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// The call itself failed (connectivity, serialization, server fault).
    #[error("transport error: {0}")]
    Transport(String),

    /// The collaborator returned a structured business rejection.
    #[error("rejected: {0}")]
    Rejected(String),
}

impl GatewayError {
    /// Create a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Create a business rejection.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected(message.into())
    }
}

/// Outcome of a failed select-or-load resolution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// No id was supplied, or the entity is absent after a completed load.
    #[error("entity not found")]
    NotFound,

    /// The underlying detail load terminated with a failure.
    #[error("load failed: {0}")]
    Failed(String),

    /// The entity did not appear within the configured deadline.
    #[error("timed out after {0:?} waiting for entity")]
    Timeout(Duration),
}
