//! Skill reference data, assessment questions, and per-user skill levels.

use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;
use upskill_core::assessment::WeightedQuestion;
use upskill_core::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `skills` table. Static reference data.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Skill {
    pub id: DbId,
    pub name: String,
    pub category: String,
    pub industry: String,
    pub difficulty_level: i16,
    pub created_at: Timestamp,
}

/// A row from the `skill_questions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SkillQuestion {
    pub id: DbId,
    pub skill_id: DbId,
    pub position: i32,
    pub question: String,
    pub options: Json<Vec<String>>,
    #[serde(skip_serializing)]
    pub correct_option: i32,
    pub weight: i32,
    pub created_at: Timestamp,
}

impl SkillQuestion {
    /// The scoring-relevant view used by the assessment scorer.
    pub fn weighted(&self) -> WeightedQuestion {
        WeightedQuestion {
            id: self.id,
            option_count: self.options.0.len() as i32,
            correct_option: self.correct_option,
            weight: self.weight,
        }
    }
}

/// A row from the `user_skills` table. One per (user, skill).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserSkill {
    pub id: DbId,
    pub user_id: DbId,
    pub skill_id: DbId,
    pub current_level: i32,
    pub target_level: i32,
    pub status: String,
    pub assessed_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// DTO for inserting a skill.
#[derive(Debug, Clone)]
pub struct CreateSkill {
    pub name: String,
    pub category: String,
    pub industry: String,
    pub difficulty_level: i16,
}

/// DTO for inserting an assessment question.
#[derive(Debug, Clone)]
pub struct CreateSkillQuestion {
    pub skill_id: DbId,
    pub position: i32,
    pub question: String,
    pub options: Vec<String>,
    pub correct_option: i32,
    pub weight: i32,
}
