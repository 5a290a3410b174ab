//! Handlers for generated learning roadmaps.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use upskill_core::error::CoreError;
use upskill_core::types::DbId;
use upskill_db::models::ai_interaction::INTERACTION_ROADMAP;
use upskill_db::repositories::{RoadmapRepo, SkillRepo};
use upskill_generation::{parse, prompts};

use crate::ai::complete_and_record;
use crate::error::AppResult;
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateRoadmapRequest {
    pub skill_id: DbId,
    pub goal: Option<String>,
}

/// POST /api/v1/roadmaps
///
/// Generate a roadmap for a skill, seeded with the caller's assessed level
/// when there is one. Resources the generator describes badly are kept as
/// `unknown` entries rather than dropped.
pub async fn generate_roadmap(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(input): Json<GenerateRoadmapRequest>,
) -> AppResult<impl IntoResponse> {
    let skill = SkillRepo::find_by_id(&state.pool, input.skill_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Skill",
            id: input.skill_id,
        })?;
    let current = SkillRepo::find_user_skill(&state.pool, user.user_id, skill.id).await?;

    let goal = input.goal.as_deref().map(str::trim).filter(|g| !g.is_empty());
    let request = prompts::roadmap(
        &skill.name,
        current.map(|s| s.current_level),
        goal,
        state.config.generation.max_tokens,
    );
    let content = complete_and_record(&state, user.user_id, INTERACTION_ROADMAP, &request).await?;
    let roadmap = parse::parse_roadmap_content(&content)?;

    let quarantined = roadmap
        .steps
        .iter()
        .flat_map(|step| &step.resources)
        .filter(|r| r.is_unknown())
        .count();
    if quarantined > 0 {
        tracing::warn!(
            user_id = user.user_id,
            skill_id = skill.id,
            quarantined,
            "Roadmap contains unrecognised resources",
        );
    }

    let saved = RoadmapRepo::create(&state.pool, user.user_id, skill.id, &roadmap).await?;
    tracing::info!(
        user_id = user.user_id,
        skill_id = skill.id,
        roadmap_id = saved.id,
        steps = roadmap.steps.len(),
        "Roadmap generated",
    );

    Ok((StatusCode::CREATED, Json(DataResponse::new(saved))))
}

/// GET /api/v1/user/roadmaps
pub async fn list_roadmaps(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let roadmaps = RoadmapRepo::list_for_user(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse::new(roadmaps)))
}

