//! Repository for the `learning_roadmaps` table.

use sqlx::types::Json;
use sqlx::PgPool;
use upskill_core::roadmap::Roadmap;
use upskill_core::types::DbId;

use crate::models::roadmap::LearningRoadmap;

const COLUMNS: &str = "id, user_id, skill_id, title, roadmap, created_at";

pub struct RoadmapRepo;

impl RoadmapRepo {
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        skill_id: DbId,
        roadmap: &Roadmap,
    ) -> Result<LearningRoadmap, sqlx::Error> {
        let query = format!(
            "INSERT INTO learning_roadmaps (user_id, skill_id, title, roadmap)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LearningRoadmap>(&query)
            .bind(user_id)
            .bind(skill_id)
            .bind(&roadmap.title)
            .bind(Json(roadmap))
            .fetch_one(pool)
            .await
    }

    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<LearningRoadmap>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM learning_roadmaps
             WHERE user_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, LearningRoadmap>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
