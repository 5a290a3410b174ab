//! Repository for the `courses` table.
//!
//! Courses are managed elsewhere; this service reads their title and
//! difficulty.

use std::collections::HashMap;

use sqlx::PgPool;
use upskill_core::types::DbId;

use crate::models::course::{Course, CreateCourse};

const COLUMNS: &str = "id, title, description, difficulty_level, created_at";

pub struct CourseRepo;

impl CourseRepo {
    pub async fn create(pool: &PgPool, input: &CreateCourse) -> Result<Course, sqlx::Error> {
        let query = format!(
            "INSERT INTO courses (title, description, difficulty_level)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.difficulty_level)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Course>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM courses WHERE id = $1");
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Map course id to difficulty level for the given ids. Unknown ids are
    /// simply absent from the map.
    pub async fn difficulty_by_ids(
        pool: &PgPool,
        ids: &[DbId],
    ) -> Result<HashMap<DbId, i16>, sqlx::Error> {
        let rows: Vec<(DbId, i16)> =
            sqlx::query_as("SELECT id, difficulty_level FROM courses WHERE id = ANY($1)")
                .bind(ids)
                .fetch_all(pool)
                .await?;
        Ok(rows.into_iter().collect())
    }
}
