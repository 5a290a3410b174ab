//! Primary outcomes with optional best-effort enrichment.
//!
//! Some operations (AI feedback on a graded quiz, caching generated trend
//! data) have a supplementary step whose failure must not fail the
//! operation. [`Enriched`] keeps the primary outcome and the enrichment
//! outcome side by side so callers and tests can tell them apart.

use std::fmt::Display;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Enrichment<T> {
    /// The enrichment ran and produced a value.
    Applied { value: T },
    /// The enrichment was not needed.
    Skipped,
    /// The enrichment failed; the primary outcome is unaffected.
    Failed { reason: String },
}

impl<T> Enrichment<T> {
    pub fn from_result<E: Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Applied { value },
            Err(e) => Self::Failed {
                reason: e.to_string(),
            },
        }
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Applied { value } => Some(value),
            _ => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Enriched<P, E> {
    pub primary: P,
    pub enrichment: Enrichment<E>,
}
