use serde::Serialize;
use sqlx::FromRow;
use upskill_core::types::{DbId, Timestamp};

pub const INTERACTION_QUIZ_GENERATION: &str = "quiz_generation";
pub const INTERACTION_QUIZ_FEEDBACK: &str = "quiz_feedback";
pub const INTERACTION_ROADMAP: &str = "roadmap_generation";
pub const INTERACTION_TRENDS: &str = "trend_insights";

/// A row from the `ai_interactions` table (token accounting).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AiInteraction {
    pub id: DbId,
    pub user_id: DbId,
    pub interaction_type: String,
    pub tokens_used: i32,
    pub created_at: Timestamp,
}
