//! Generated quizzes and graded quiz responses.

use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;
use upskill_core::quiz::{AnswerSheet, Question, QuizFeedback};
use upskill_core::types::{DbId, Timestamp};

/// A row from the `quizzes` table. Immutable once created.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Quiz {
    pub id: DbId,
    pub user_id: DbId,
    pub course_id: Option<DbId>,
    pub module_id: DbId,
    pub difficulty_level: i16,
    pub questions: Json<Vec<Question>>,
    pub created_at: Timestamp,
}

/// A row from the `quiz_responses` table. One per submitted attempt.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuizResponse {
    pub id: DbId,
    pub user_id: DbId,
    pub quiz_id: DbId,
    pub answers: Json<AnswerSheet>,
    pub grade_percentage: i32,
    pub passed: bool,
    pub feedback: Json<QuizFeedback>,
    pub completed_at: Timestamp,
}

/// DTO for persisting a validated quiz.
#[derive(Debug, Clone)]
pub struct CreateQuiz {
    pub user_id: DbId,
    pub course_id: Option<DbId>,
    pub module_id: DbId,
    pub difficulty_level: i16,
    pub questions: Vec<Question>,
}

/// DTO for persisting a graded attempt.
#[derive(Debug, Clone)]
pub struct CreateQuizResponse {
    pub user_id: DbId,
    pub quiz_id: DbId,
    pub answers: AnswerSheet,
    pub grade_percentage: i32,
    pub passed: bool,
    pub feedback: QuizFeedback,
}
