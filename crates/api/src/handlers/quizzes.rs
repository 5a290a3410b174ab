//! Handlers for the quiz lifecycle.
//!
//! `POST /quizzes` covers `Requested -> Generated -> InProgress`: the
//! generator output is validated and persisted before any question is shown.
//! `POST /quizzes/{id}/responses` covers `Submitted -> Graded`; every
//! accepted submission becomes its own response row.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use upskill_core::enrichment::{Enriched, Enrichment};
use upskill_core::error::CoreError;
use upskill_core::quiz::{
    needs_ai_feedback, validate_difficulty, validate_submission, AnswerSheet, PublicQuestion,
    Question, QuizFeedback,
};
use upskill_core::scoring::{score_answers, ScoreReport};
use upskill_core::types::{DbId, Timestamp};
use upskill_db::models::ai_interaction::{INTERACTION_QUIZ_FEEDBACK, INTERACTION_QUIZ_GENERATION};
use upskill_db::models::quiz::{CreateQuiz, CreateQuizResponse, Quiz, QuizResponse};
use upskill_db::repositories::{CourseRepo, QuizRepo};
use upskill_generation::{parse, prompts};

use crate::ai::complete_and_record;
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response DTOs
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct GenerateQuizRequest {
    pub course_id: Option<DbId>,
    pub module_id: DbId,
    /// Defaults to the course title when a course is given.
    pub module_title: Option<String>,
    pub module_content: String,
    pub difficulty_level: i16,
}

#[derive(Debug, Deserialize)]
pub struct SubmitQuizRequest {
    pub answers: AnswerSheet,
}

/// A quiz as shown to the learner taking it.
#[derive(Debug, Serialize)]
pub struct QuizView<'a> {
    pub id: DbId,
    pub course_id: Option<DbId>,
    pub module_id: DbId,
    pub difficulty_level: i16,
    pub questions: Vec<PublicQuestion<'a>>,
    pub created_at: Timestamp,
}

impl<'a> QuizView<'a> {
    fn from_quiz(quiz: &'a Quiz) -> Self {
        Self {
            id: quiz.id,
            course_id: quiz.course_id,
            module_id: quiz.module_id,
            difficulty_level: quiz.difficulty_level,
            questions: quiz.questions.0.iter().map(Question::public_view).collect(),
            created_at: quiz.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GradedAttempt {
    pub response: QuizResponse,
    pub correct_count: usize,
    pub total_questions: usize,
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// POST /api/v1/quizzes
///
/// Generate exactly five questions for a module and persist the quiz. A
/// malformed or wrong-sized generation fails the request and stores nothing.
pub async fn generate_quiz(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(input): Json<GenerateQuizRequest>,
) -> AppResult<impl IntoResponse> {
    validate_difficulty(input.difficulty_level)?;
    if input.module_content.trim().is_empty() {
        return Err(CoreError::Validation("module_content must not be empty".into()).into());
    }

    let mut module_title = input.module_title.clone();
    if let Some(course_id) = input.course_id {
        let course = CourseRepo::find_by_id(&state.pool, course_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Course",
                id: course_id,
            })?;
        module_title.get_or_insert(course.title);
    }

    let request = prompts::quiz_generation(
        module_title.as_deref(),
        &input.module_content,
        input.difficulty_level,
        state.config.generation.max_tokens,
    );
    let content =
        complete_and_record(&state, user.user_id, INTERACTION_QUIZ_GENERATION, &request).await?;
    let questions = parse::parse_quiz_questions(&content)?;

    let quiz = QuizRepo::create(
        &state.pool,
        &CreateQuiz {
            user_id: user.user_id,
            course_id: input.course_id,
            module_id: input.module_id,
            difficulty_level: input.difficulty_level,
            questions,
        },
    )
    .await?;

    tracing::info!(
        user_id = user.user_id,
        quiz_id = quiz.id,
        module_id = quiz.module_id,
        difficulty_level = quiz.difficulty_level,
        "Quiz generated",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(QuizView::from_quiz(&quiz))),
    )
        .into_response())
}

/// GET /api/v1/quizzes/{id}
pub async fn get_quiz(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(quiz_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let quiz = find_owned_quiz(&state, &user, quiz_id).await?;
    Ok(Json(DataResponse::new(QuizView::from_quiz(&quiz))).into_response())
}

// ---------------------------------------------------------------------------
// Submission and grading
// ---------------------------------------------------------------------------

/// POST /api/v1/quizzes/{id}/responses
///
/// Reject the submission if any question is unanswered. Otherwise grade it,
/// ask for AI feedback below the feedback threshold, and store one response
/// row. A feedback failure is reported in `enrichment` and never fails the
/// attempt.
pub async fn submit_quiz(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(quiz_id): Path<DbId>,
    Json(input): Json<SubmitQuizRequest>,
) -> AppResult<impl IntoResponse> {
    let quiz = find_owned_quiz(&state, &user, quiz_id).await?;
    let questions = &quiz.questions.0;

    validate_submission(questions, &input.answers)?;
    let report = score_answers(questions, &input.answers);

    let enrichment = if needs_ai_feedback(report.grade_percentage) {
        let result = request_feedback(&state, user.user_id, questions, &report).await;
        if let Err(e) = &result {
            tracing::warn!(
                user_id = user.user_id,
                quiz_id,
                error = %e,
                "AI feedback failed; storing the graded attempt without it",
            );
        }
        Enrichment::from_result(result)
    } else {
        Enrichment::Skipped
    };

    let response = QuizRepo::create_response(
        &state.pool,
        &CreateQuizResponse {
            user_id: user.user_id,
            quiz_id,
            answers: input.answers,
            grade_percentage: report.grade_percentage,
            passed: report.passed,
            feedback: QuizFeedback {
                results: report.results.clone(),
                ai_feedback: enrichment.value().cloned(),
            },
        },
    )
    .await?;

    tracing::info!(
        user_id = user.user_id,
        quiz_id,
        response_id = response.id,
        grade = report.grade_percentage,
        passed = report.passed,
        "Quiz graded",
    );

    let graded = Enriched {
        primary: GradedAttempt {
            response,
            correct_count: report.correct_count,
            total_questions: report.total_questions,
        },
        enrichment,
    };
    Ok((StatusCode::CREATED, Json(DataResponse::new(graded))))
}

/// GET /api/v1/quizzes/{id}/responses
///
/// The caller's attempts at a quiz, oldest first.
pub async fn list_responses(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(quiz_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    find_owned_quiz(&state, &user, quiz_id).await?;
    let responses = QuizRepo::list_responses(&state.pool, quiz_id, user.user_id).await?;
    Ok(Json(DataResponse::new(responses)))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Quizzes are private to the learner they were generated for; other
/// callers see the same 404 as for a missing quiz.
async fn find_owned_quiz(state: &AppState, user: &AuthUser, quiz_id: DbId) -> AppResult<Quiz> {
    QuizRepo::find_by_id(&state.pool, quiz_id)
        .await?
        .filter(|quiz| quiz.user_id == user.user_id)
        .ok_or_else(|| {
            CoreError::NotFound {
                entity: "Quiz",
                id: quiz_id,
            }
            .into()
        })
}

async fn request_feedback(
    state: &AppState,
    user_id: DbId,
    questions: &[Question],
    report: &ScoreReport,
) -> Result<String, upskill_generation::GenerationError> {
    let request = prompts::quiz_feedback(questions, &report.results, report.grade_percentage);
    let content = complete_and_record(state, user_id, INTERACTION_QUIZ_FEEDBACK, &request).await?;
    Ok(content.trim().to_string())
}
