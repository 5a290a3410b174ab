use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use upskill_core::sessions::{SessionSpan, SessionType};
use upskill_core::types::{DbId, Timestamp};

/// A row from the `learning_sessions` table.
///
/// `ended_at` and `duration_minutes` are both null while the session is open.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LearningSession {
    pub id: DbId,
    pub user_id: DbId,
    pub course_id: Option<DbId>,
    pub session_type: String,
    pub started_at: Timestamp,
    pub ended_at: Option<Timestamp>,
    pub duration_minutes: Option<i32>,
}

impl LearningSession {
    pub fn span(&self) -> SessionSpan {
        SessionSpan {
            started_at: self.started_at,
            duration_minutes: self.duration_minutes,
        }
    }
}

/// DTO for starting a session.
#[derive(Debug, Clone, Deserialize)]
pub struct StartSession {
    pub course_id: Option<DbId>,
    pub session_type: SessionType,
}
