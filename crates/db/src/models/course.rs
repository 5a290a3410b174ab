use serde::Serialize;
use sqlx::FromRow;
use upskill_core::types::{DbId, Timestamp};

/// A row from the `courses` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Course {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub difficulty_level: i16,
    pub created_at: Timestamp,
}

/// DTO for inserting a course.
#[derive(Debug, Clone)]
pub struct CreateCourse {
    pub title: String,
    pub description: Option<String>,
    pub difficulty_level: i16,
}
