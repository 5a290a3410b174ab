//! Routes scoped to the authenticated user.

use axum::routing::get;
use axum::Router;

use crate::handlers::{profile, progress, roadmaps, sessions, skills};
use crate::state::AppState;

/// Routes mounted at `/user`.
///
/// ```text
/// GET    /profile             -> get_profile
/// GET    /skills              -> list_user_skills
/// GET    /progress            -> list_progress
/// GET    /progress/summary    -> progress_summary
/// GET    /sessions            -> list_sessions
/// GET    /sessions/stats      -> get_session_stats
/// GET    /roadmaps            -> list_roadmaps
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/profile", get(profile::get_profile))
        .route("/skills", get(skills::list_user_skills))
        .route("/progress", get(progress::list_progress))
        .route("/progress/summary", get(progress::progress_summary))
        .route("/sessions", get(sessions::list_sessions))
        .route("/sessions/stats", get(sessions::get_session_stats))
        .route("/roadmaps", get(roadmaps::list_roadmaps))
}
