use axum::routing::{get, post};
use axum::Router;

use crate::handlers::skills;
use crate::state::AppState;

/// Routes mounted at `/skills`.
///
/// ```text
/// GET    /                    -> list_skills (?industry=)
/// GET    /{id}/questions      -> list_questions
/// POST   /{id}/assessment     -> record_assessment
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(skills::list_skills))
        .route("/{id}/questions", get(skills::list_questions))
        .route("/{id}/assessment", post(skills::record_assessment))
}
