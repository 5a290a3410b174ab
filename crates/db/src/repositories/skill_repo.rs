//! Repository for `skills`, `skill_questions`, and `user_skills`.

use sqlx::types::Json;
use sqlx::PgPool;
use upskill_core::assessment::STATUS_ASSESSED;
use upskill_core::types::DbId;

use crate::models::skill::{CreateSkill, CreateSkillQuestion, Skill, SkillQuestion, UserSkill};

const SKILL_COLUMNS: &str = "id, name, category, industry, difficulty_level, created_at";

const QUESTION_COLUMNS: &str = "\
    id, skill_id, position, question, options, correct_option, weight, created_at";

const USER_SKILL_COLUMNS: &str = "\
    id, user_id, skill_id, current_level, target_level, status, \
    assessed_at, created_at, updated_at";

pub struct SkillRepo;

impl SkillRepo {
    // -- skills --

    pub async fn create(pool: &PgPool, input: &CreateSkill) -> Result<Skill, sqlx::Error> {
        let query = format!(
            "INSERT INTO skills (name, category, industry, difficulty_level)
             VALUES ($1, $2, $3, $4)
             RETURNING {SKILL_COLUMNS}"
        );
        sqlx::query_as::<_, Skill>(&query)
            .bind(&input.name)
            .bind(&input.category)
            .bind(&input.industry)
            .bind(input.difficulty_level)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Skill>, sqlx::Error> {
        let query = format!("SELECT {SKILL_COLUMNS} FROM skills WHERE id = $1");
        sqlx::query_as::<_, Skill>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List skills, optionally filtered by industry, ordered by name.
    pub async fn list(pool: &PgPool, industry: Option<&str>) -> Result<Vec<Skill>, sqlx::Error> {
        let query = format!(
            "SELECT {SKILL_COLUMNS} FROM skills
             WHERE ($1::TEXT IS NULL OR industry = $1)
             ORDER BY name, id"
        );
        sqlx::query_as::<_, Skill>(&query)
            .bind(industry)
            .fetch_all(pool)
            .await
    }

    // -- skill_questions --

    pub async fn create_question(
        pool: &PgPool,
        input: &CreateSkillQuestion,
    ) -> Result<SkillQuestion, sqlx::Error> {
        let query = format!(
            "INSERT INTO skill_questions
                 (skill_id, position, question, options, correct_option, weight)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {QUESTION_COLUMNS}"
        );
        sqlx::query_as::<_, SkillQuestion>(&query)
            .bind(input.skill_id)
            .bind(input.position)
            .bind(&input.question)
            .bind(Json(&input.options))
            .bind(input.correct_option)
            .bind(input.weight)
            .fetch_one(pool)
            .await
    }

    /// Assessment questions for a skill, in position order.
    pub async fn list_questions(
        pool: &PgPool,
        skill_id: DbId,
    ) -> Result<Vec<SkillQuestion>, sqlx::Error> {
        let query = format!(
            "SELECT {QUESTION_COLUMNS} FROM skill_questions
             WHERE skill_id = $1
             ORDER BY position"
        );
        sqlx::query_as::<_, SkillQuestion>(&query)
            .bind(skill_id)
            .fetch_all(pool)
            .await
    }

    // -- user_skills --

    /// Record an assessed level for (user, skill) in a single statement.
    ///
    /// A first assessment inserts the row with `target_level`; later ones
    /// only move `current_level`, `assessed_at`, and `status`, leaving the
    /// target untouched.
    pub async fn upsert_assessed_level(
        pool: &PgPool,
        user_id: DbId,
        skill_id: DbId,
        level: i32,
        target_level: i32,
    ) -> Result<UserSkill, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_skills
                 (user_id, skill_id, current_level, target_level, status, assessed_at)
             VALUES ($1, $2, $3, $4, $5, NOW())
             ON CONFLICT (user_id, skill_id) DO UPDATE SET
                 current_level = EXCLUDED.current_level,
                 assessed_at = EXCLUDED.assessed_at,
                 status = EXCLUDED.status,
                 updated_at = NOW()
             RETURNING {USER_SKILL_COLUMNS}"
        );
        sqlx::query_as::<_, UserSkill>(&query)
            .bind(user_id)
            .bind(skill_id)
            .bind(level)
            .bind(target_level)
            .bind(STATUS_ASSESSED)
            .fetch_one(pool)
            .await
    }

    pub async fn list_user_skills(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<UserSkill>, sqlx::Error> {
        let query = format!(
            "SELECT {USER_SKILL_COLUMNS} FROM user_skills
             WHERE user_id = $1
             ORDER BY skill_id"
        );
        sqlx::query_as::<_, UserSkill>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    pub async fn find_user_skill(
        pool: &PgPool,
        user_id: DbId,
        skill_id: DbId,
    ) -> Result<Option<UserSkill>, sqlx::Error> {
        let query = format!(
            "SELECT {USER_SKILL_COLUMNS} FROM user_skills
             WHERE user_id = $1 AND skill_id = $2"
        );
        sqlx::query_as::<_, UserSkill>(&query)
            .bind(user_id)
            .bind(skill_id)
            .fetch_optional(pool)
            .await
    }
}
