//! Error type for operations that can fail outside the per-tick hot path.

use thiserror::Error;

use crate::enums::AgentKind;

#[derive(Debug, Error)]
pub enum SimError {
    /// No free grid cell could host the new entity. Callers retry next tick.
    #[error("no free spawn cell for {what}")]
    SpawnFailure { what: String },

    #[error("no controller registered for agent kind {0:?}")]
    UnknownAgent(AgentKind),

    #[error("entity {0} no longer exists")]
    MissingEntity(u64),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
