use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use upskill_core::error::CoreError;
use upskill_db::repositories::ProfileRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/user/profile
pub async fn get_profile(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let profile = ProfileRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Profile",
            id: user.user_id,
        })?;
    Ok(Json(DataResponse::new(profile)))
}
