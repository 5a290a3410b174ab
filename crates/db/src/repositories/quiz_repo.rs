//! Repository for `quizzes` and `quiz_responses`.

use sqlx::types::Json;
use sqlx::PgPool;
use upskill_core::types::DbId;

use crate::models::quiz::{CreateQuiz, CreateQuizResponse, Quiz, QuizResponse};

const QUIZ_COLUMNS: &str = "\
    id, user_id, course_id, module_id, difficulty_level, questions, created_at";

const RESPONSE_COLUMNS: &str = "\
    id, user_id, quiz_id, answers, grade_percentage, passed, feedback, completed_at";

pub struct QuizRepo;

impl QuizRepo {
    pub async fn create(pool: &PgPool, input: &CreateQuiz) -> Result<Quiz, sqlx::Error> {
        let query = format!(
            "INSERT INTO quizzes (user_id, course_id, module_id, difficulty_level, questions)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {QUIZ_COLUMNS}"
        );
        sqlx::query_as::<_, Quiz>(&query)
            .bind(input.user_id)
            .bind(input.course_id)
            .bind(input.module_id)
            .bind(input.difficulty_level)
            .bind(Json(&input.questions))
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Quiz>, sqlx::Error> {
        let query = format!("SELECT {QUIZ_COLUMNS} FROM quizzes WHERE id = $1");
        sqlx::query_as::<_, Quiz>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn count_for_user(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM quizzes WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// Insert one graded attempt. Retakes are new rows, never updates.
    pub async fn create_response(
        pool: &PgPool,
        input: &CreateQuizResponse,
    ) -> Result<QuizResponse, sqlx::Error> {
        let query = format!(
            "INSERT INTO quiz_responses
                 (user_id, quiz_id, answers, grade_percentage, passed, feedback)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {RESPONSE_COLUMNS}"
        );
        sqlx::query_as::<_, QuizResponse>(&query)
            .bind(input.user_id)
            .bind(input.quiz_id)
            .bind(Json(&input.answers))
            .bind(input.grade_percentage)
            .bind(input.passed)
            .bind(Json(&input.feedback))
            .fetch_one(pool)
            .await
    }

    /// A user's attempts at one quiz, oldest first.
    pub async fn list_responses(
        pool: &PgPool,
        quiz_id: DbId,
        user_id: DbId,
    ) -> Result<Vec<QuizResponse>, sqlx::Error> {
        let query = format!(
            "SELECT {RESPONSE_COLUMNS} FROM quiz_responses
             WHERE quiz_id = $1 AND user_id = $2
             ORDER BY completed_at, id"
        );
        sqlx::query_as::<_, QuizResponse>(&query)
            .bind(quiz_id)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
