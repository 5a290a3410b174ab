use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use upskill_core::progress::{ProgressRecord, ProgressStatus};
use upskill_core::types::{DbId, Timestamp};

/// A row from the `progress` table. One per (user, module).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Progress {
    pub id: DbId,
    pub user_id: DbId,
    pub module_id: DbId,
    pub module_type: String,
    pub completion_percentage: i32,
    pub status: String,
    pub completed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Progress {
    /// Convert to the aggregator's input type.
    ///
    /// The `status` column is constrained by a `CHECK`, so an unknown value
    /// means the row predates the constraint; it is treated as not started.
    pub fn to_record(&self) -> ProgressRecord {
        ProgressRecord {
            user_id: self.user_id,
            module_id: self.module_id,
            module_type: self.module_type.clone(),
            completion_percentage: self.completion_percentage,
            status: ProgressStatus::from_str_value(&self.status)
                .unwrap_or(ProgressStatus::NotStarted),
        }
    }
}

/// DTO for creating or updating the caller's progress on a module.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertProgress {
    pub module_id: DbId,
    pub module_type: String,
    pub completion_percentage: i32,
    pub status: ProgressStatus,
}
