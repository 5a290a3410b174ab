//! Domain errors shared by the core rules and the API layer.

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A referenced row (skill, quiz, team, ...) does not exist, or is not
    /// visible to the caller.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Input or generated content broke a domain rule.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The request clashes with current state, e.g. stopping a closed session.
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),
}
