use axum::routing::{get, post};
use axum::Router;

use crate::handlers::quizzes;
use crate::state::AppState;

/// Routes mounted at `/quizzes`.
///
/// ```text
/// POST   /                    -> generate_quiz
/// GET    /{id}                -> get_quiz
/// GET    /{id}/responses      -> list_responses
/// POST   /{id}/responses      -> submit_quiz
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(quizzes::generate_quiz))
        .route("/{id}", get(quizzes::get_quiz))
        .route(
            "/{id}/responses",
            get(quizzes::list_responses).post(quizzes::submit_quiz),
        )
}
