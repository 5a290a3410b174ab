use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;
use upskill_core::roadmap::Roadmap;
use upskill_core::types::{DbId, Timestamp};

/// A row from the `learning_roadmaps` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LearningRoadmap {
    pub id: DbId,
    pub user_id: DbId,
    pub skill_id: DbId,
    pub title: String,
    pub roadmap: Json<Roadmap>,
    pub created_at: Timestamp,
}
