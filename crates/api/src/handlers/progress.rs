//! Handlers for per-module progress and the per-user rollup.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use upskill_core::error::CoreError;
use upskill_core::progress::summarize_user;
use upskill_db::models::progress::{Progress, UpsertProgress};
use upskill_db::repositories::ProgressRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// PUT /api/v1/progress
///
/// Create or update the caller's progress on one module.
pub async fn upsert_progress(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(input): Json<UpsertProgress>,
) -> AppResult<impl IntoResponse> {
    if !(0..=100).contains(&input.completion_percentage) {
        return Err(CoreError::Validation(format!(
            "completion_percentage must be between 0 and 100, got {}",
            input.completion_percentage
        ))
        .into());
    }
    if input.module_type.trim().is_empty() {
        return Err(CoreError::Validation("module_type must not be empty".into()).into());
    }

    let progress = ProgressRepo::upsert(&state.pool, user.user_id, &input).await?;

    tracing::info!(
        user_id = user.user_id,
        module_id = input.module_id,
        module_type = %input.module_type,
        completion = input.completion_percentage,
        status = input.status.as_str(),
        "Progress updated",
    );

    Ok(Json(DataResponse::new(progress)))
}

/// GET /api/v1/user/progress
pub async fn list_progress(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let rows = ProgressRepo::list_for_user(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse::new(rows)))
}

/// GET /api/v1/user/progress/summary
pub async fn progress_summary(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let rows = ProgressRepo::list_for_user(&state.pool, user.user_id).await?;
    let records: Vec<_> = rows.iter().map(Progress::to_record).collect();
    Ok(Json(DataResponse::new(summarize_user(user.user_id, &records))))
}
