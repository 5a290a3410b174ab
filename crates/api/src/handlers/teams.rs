//! Handlers for teams and the manager's team progress view.
//!
//! Managers act on teams they manage; admins act on any team.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use upskill_core::error::CoreError;
use upskill_core::progress::{summarize_team, DEFAULT_TOP_PERFORMERS, MODULE_TYPE_COURSE};
use upskill_core::types::DbId;
use upskill_db::models::progress::Progress;
use upskill_db::models::team::{AddTeamMember, CreateTeam, Team};
use upskill_db::repositories::{CourseRepo, ProfileRepo, ProgressRepo, TeamRepo};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireManager;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TeamProgressParams {
    /// Number of top performers to return (default: 5).
    pub top: Option<usize>,
}

/// POST /api/v1/teams
///
/// The caller becomes the team's manager.
pub async fn create_team(
    RequireManager(user): RequireManager,
    State(state): State<AppState>,
    Json(input): Json<CreateTeam>,
) -> AppResult<impl IntoResponse> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(CoreError::Validation("Team name must not be empty".into()).into());
    }

    let team = TeamRepo::create(&state.pool, name, user.user_id).await?;
    tracing::info!(user_id = user.user_id, team_id = team.id, "Team created");

    Ok((StatusCode::CREATED, Json(DataResponse::new(team))))
}

/// POST /api/v1/teams/{id}/members
pub async fn add_member(
    RequireManager(user): RequireManager,
    State(state): State<AppState>,
    Path(team_id): Path<DbId>,
    Json(input): Json<AddTeamMember>,
) -> AppResult<impl IntoResponse> {
    let team = find_managed_team(&state, &user, team_id).await?;

    ProfileRepo::find_by_id(&state.pool, input.user_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Profile",
            id: input.user_id,
        })?;

    // A repeat add hits `uq_team_members_team_user` and becomes a 409.
    let member = TeamRepo::add_member(&state.pool, team.id, input.user_id).await?;
    tracing::info!(
        user_id = user.user_id,
        team_id,
        member_id = input.user_id,
        "Team member added",
    );

    Ok((StatusCode::CREATED, Json(DataResponse::new(member))))
}

/// GET /api/v1/teams/{id}/progress?top=
///
/// Roll up every member's progress: overall averages, a breakdown by
/// module type and by course difficulty, and the top performers.
pub async fn team_progress(
    RequireManager(user): RequireManager,
    State(state): State<AppState>,
    Path(team_id): Path<DbId>,
    Query(params): Query<TeamProgressParams>,
) -> AppResult<impl IntoResponse> {
    let team = find_managed_team(&state, &user, team_id).await?;

    let member_ids = TeamRepo::member_ids(&state.pool, team.id).await?;
    let rows = ProgressRepo::list_for_users(&state.pool, &member_ids).await?;
    let records: Vec<_> = rows.iter().map(Progress::to_record).collect();

    let mut course_ids: Vec<DbId> = records
        .iter()
        .filter(|r| r.module_type == MODULE_TYPE_COURSE)
        .map(|r| r.module_id)
        .collect();
    course_ids.sort_unstable();
    course_ids.dedup();
    let difficulty = CourseRepo::difficulty_by_ids(&state.pool, &course_ids).await?;

    let summary = summarize_team(
        &member_ids,
        &records,
        &difficulty,
        params.top.unwrap_or(DEFAULT_TOP_PERFORMERS),
    );

    Ok(Json(DataResponse::new(summary)))
}

async fn find_managed_team(state: &AppState, user: &AuthUser, team_id: DbId) -> AppResult<Team> {
    let team = TeamRepo::find_by_id(&state.pool, team_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Team",
            id: team_id,
        })?;

    if !user.is_admin() && team.manager_id != user.user_id {
        return Err(CoreError::Forbidden("You do not manage this team".into()).into());
    }
    Ok(team)
}
