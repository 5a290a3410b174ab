//! Repository for the `ai_interactions` table.

use sqlx::PgPool;
use upskill_core::types::DbId;

use crate::models::ai_interaction::AiInteraction;

const COLUMNS: &str = "id, user_id, interaction_type, tokens_used, created_at";

pub struct AiInteractionRepo;

impl AiInteractionRepo {
    /// Record token usage for one generator call.
    pub async fn record(
        pool: &PgPool,
        user_id: DbId,
        interaction_type: &str,
        tokens_used: i32,
    ) -> Result<AiInteraction, sqlx::Error> {
        let query = format!(
            "INSERT INTO ai_interactions (user_id, interaction_type, tokens_used)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AiInteraction>(&query)
            .bind(user_id)
            .bind(interaction_type)
            .bind(tokens_used)
            .fetch_one(pool)
            .await
    }

    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<AiInteraction>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM ai_interactions
             WHERE user_id = $1
             ORDER BY created_at, id"
        );
        sqlx::query_as::<_, AiInteraction>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
