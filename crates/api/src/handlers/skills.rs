//! Handlers for the skill catalogue and skill assessments.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use upskill_core::assessment::{initial_target_level, score_assessment, AssessmentAnswers};
use upskill_core::error::CoreError;
use upskill_core::types::DbId;
use upskill_db::models::skill::{SkillQuestion, UserSkill};
use upskill_db::repositories::SkillRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response DTOs
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct SkillListParams {
    pub industry: Option<String>,
}

/// Answers keyed by assessment question id, valued by selected option index.
#[derive(Debug, Deserialize)]
pub struct AssessmentRequest {
    pub answers: AssessmentAnswers,
}

#[derive(Debug, Serialize)]
pub struct AssessmentResult {
    pub user_skill: UserSkill,
    pub level: i32,
}

// ---------------------------------------------------------------------------
// Catalogue
// ---------------------------------------------------------------------------

/// GET /api/v1/skills?industry=
pub async fn list_skills(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<SkillListParams>,
) -> AppResult<impl IntoResponse> {
    let skills = SkillRepo::list(&state.pool, params.industry.as_deref()).await?;
    Ok(Json(DataResponse::new(skills)))
}

/// GET /api/v1/skills/{id}/questions
///
/// Assessment questions for a skill. The correct option is never serialized.
pub async fn list_questions(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(skill_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_skill_exists(&state, skill_id).await?;
    let questions: Vec<SkillQuestion> = SkillRepo::list_questions(&state.pool, skill_id).await?;
    Ok(Json(DataResponse::new(questions)))
}

/// GET /api/v1/user/skills
pub async fn list_user_skills(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let skills = SkillRepo::list_user_skills(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse::new(skills)))
}

// ---------------------------------------------------------------------------
// Assessment
// ---------------------------------------------------------------------------

/// POST /api/v1/skills/{id}/assessment
///
/// Score the answers with weighted partial credit and record the resulting
/// level. The first assessment creates the user's skill row; later ones
/// update it in place.
pub async fn record_assessment(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(skill_id): Path<DbId>,
    Json(input): Json<AssessmentRequest>,
) -> AppResult<impl IntoResponse> {
    ensure_skill_exists(&state, skill_id).await?;

    let questions = SkillRepo::list_questions(&state.pool, skill_id).await?;
    if questions.is_empty() {
        return Err(CoreError::Validation(format!(
            "Skill {skill_id} has no assessment questions"
        ))
        .into());
    }

    let weighted: Vec<_> = questions.iter().map(SkillQuestion::weighted).collect();
    let outcome = score_assessment(&weighted, &input.answers)?;

    let user_skill = SkillRepo::upsert_assessed_level(
        &state.pool,
        user.user_id,
        skill_id,
        outcome.level,
        initial_target_level(outcome.level),
    )
    .await?;

    tracing::info!(
        user_id = user.user_id,
        skill_id,
        level = outcome.level,
        score = outcome.total_score,
        max_score = outcome.max_score,
        "Skill assessment recorded",
    );

    Ok(Json(DataResponse::new(AssessmentResult {
        level: outcome.level,
        user_skill,
    })))
}

async fn ensure_skill_exists(state: &AppState, skill_id: DbId) -> AppResult<()> {
    SkillRepo::find_by_id(&state.pool, skill_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Skill",
            id: skill_id,
        })?;
    Ok(())
}
