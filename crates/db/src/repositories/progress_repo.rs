//! Repository for the `progress` table.

use sqlx::PgPool;
use upskill_core::progress::STATUS_COMPLETED;
use upskill_core::types::DbId;

use crate::models::progress::{Progress, UpsertProgress};

const COLUMNS: &str = "\
    id, user_id, module_id, module_type, completion_percentage, status, \
    completed_at, created_at, updated_at";

pub struct ProgressRepo;

impl ProgressRepo {
    /// Insert or update a user's progress on a module.
    ///
    /// `completed_at` is stamped the first time the status becomes
    /// `completed` and cleared if the module is reopened.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        dto: &UpsertProgress,
    ) -> Result<Progress, sqlx::Error> {
        let query = format!(
            "INSERT INTO progress
                 (user_id, module_id, module_type, completion_percentage, status, completed_at)
             VALUES ($1, $2, $3, $4, $5, CASE WHEN $5 = $6 THEN NOW() END)
             ON CONFLICT (user_id, module_type, module_id) DO UPDATE SET
                 completion_percentage = EXCLUDED.completion_percentage,
                 status = EXCLUDED.status,
                 completed_at = CASE
                     WHEN EXCLUDED.status <> $6 THEN NULL
                     ELSE COALESCE(progress.completed_at, EXCLUDED.completed_at)
                 END,
                 updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Progress>(&query)
            .bind(user_id)
            .bind(dto.module_id)
            .bind(&dto.module_type)
            .bind(dto.completion_percentage)
            .bind(dto.status.as_str())
            .bind(STATUS_COMPLETED)
            .fetch_one(pool)
            .await
    }

    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Progress>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM progress
             WHERE user_id = $1
             ORDER BY module_type, module_id"
        );
        sqlx::query_as::<_, Progress>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// All progress rows for a set of users (e.g. a team's members).
    pub async fn list_for_users(
        pool: &PgPool,
        user_ids: &[DbId],
    ) -> Result<Vec<Progress>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM progress
             WHERE user_id = ANY($1)
             ORDER BY user_id, module_type, module_id"
        );
        sqlx::query_as::<_, Progress>(&query)
            .bind(user_ids)
            .fetch_all(pool)
            .await
    }
}
