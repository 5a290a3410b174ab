//! Repository for the `learning_sessions` table.

use sqlx::PgPool;
use upskill_core::types::DbId;

use crate::models::learning_session::{LearningSession, StartSession};

const COLUMNS: &str = "\
    id, user_id, course_id, session_type, started_at, ended_at, duration_minutes";

pub struct LearningSessionRepo;

impl LearningSessionRepo {
    /// Open a new session.
    ///
    /// Fails with a unique violation on `uq_learning_sessions_open_per_user`
    /// if the user already has an open session.
    pub async fn start(
        pool: &PgPool,
        user_id: DbId,
        input: &StartSession,
    ) -> Result<LearningSession, sqlx::Error> {
        let query = format!(
            "INSERT INTO learning_sessions (user_id, course_id, session_type)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LearningSession>(&query)
            .bind(user_id)
            .bind(input.course_id)
            .bind(input.session_type.as_str())
            .fetch_one(pool)
            .await
    }

    /// Close an open session owned by `user_id` in one statement.
    ///
    /// The duration is computed here from the stored start time, rounded to
    /// whole minutes. Returns `None` if no open session matched (missing,
    /// owned by someone else, or already closed).
    pub async fn stop(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<LearningSession>, sqlx::Error> {
        let query = format!(
            "UPDATE learning_sessions SET
                 ended_at = NOW(),
                 duration_minutes = ROUND(EXTRACT(EPOCH FROM (NOW() - started_at)) / 60)::INTEGER
             WHERE id = $1 AND user_id = $2 AND ended_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LearningSession>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<LearningSession>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM learning_sessions WHERE id = $1");
        sqlx::query_as::<_, LearningSession>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<LearningSession>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM learning_sessions
             WHERE user_id = $1
             ORDER BY started_at DESC"
        );
        sqlx::query_as::<_, LearningSession>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
