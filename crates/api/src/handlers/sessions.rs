//! Handlers for timed learning sessions.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use upskill_core::error::CoreError;
use upskill_core::sessions::session_stats;
use upskill_core::types::DbId;
use upskill_db::models::learning_session::{LearningSession, StartSession};
use upskill_db::repositories::{CourseRepo, LearningSessionRepo};

use crate::error::AppResult;
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/sessions
///
/// Start a session for the caller. At most one session per user may be
/// open; a second start is rejected with 409 by the
/// `uq_learning_sessions_open_per_user` index.
pub async fn start_session(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(input): Json<StartSession>,
) -> AppResult<impl IntoResponse> {
    if let Some(course_id) = input.course_id {
        CourseRepo::find_by_id(&state.pool, course_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Course",
                id: course_id,
            })?;
    }

    let session = LearningSessionRepo::start(&state.pool, user.user_id, &input).await?;

    tracing::info!(
        user_id = user.user_id,
        session_id = session.id,
        session_type = input.session_type.as_str(),
        "Learning session started",
    );

    Ok((StatusCode::CREATED, Json(DataResponse::new(session))))
}

/// POST /api/v1/sessions/{id}/stop
///
/// Close an open session; the duration is computed by the database clock.
pub async fn stop_session(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(session_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if let Some(session) = LearningSessionRepo::stop(&state.pool, session_id, user.user_id).await? {
        tracing::info!(
            user_id = user.user_id,
            session_id,
            duration_minutes = session.duration_minutes,
            "Learning session stopped",
        );
        return Ok(Json(DataResponse::new(session)));
    }

    // Nothing was updated: tell "not yours / missing" apart from "already closed".
    match LearningSessionRepo::find_by_id(&state.pool, session_id).await? {
        Some(session) if session.user_id == user.user_id => {
            Err(CoreError::Conflict(format!("Session {session_id} is not open")).into())
        }
        _ => Err(CoreError::NotFound {
            entity: "LearningSession",
            id: session_id,
        }
        .into()),
    }
}

/// GET /api/v1/user/sessions
pub async fn list_sessions(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let sessions = LearningSessionRepo::list_for_user(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse::new(sessions)))
}

/// GET /api/v1/user/sessions/stats
///
/// Total minutes, session counts, and the current daily streak (UTC days).
pub async fn get_session_stats(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let sessions = LearningSessionRepo::list_for_user(&state.pool, user.user_id).await?;
    let spans: Vec<_> = sessions.iter().map(LearningSession::span).collect();
    let today = chrono::Utc::now().date_naive();
    Ok(Json(DataResponse::new(session_stats(&spans, today))))
}
