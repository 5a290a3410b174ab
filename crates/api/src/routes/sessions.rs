use axum::routing::post;
use axum::Router;

use crate::handlers::sessions;
use crate::state::AppState;

/// Routes mounted at `/sessions`.
///
/// ```text
/// POST   /                    -> start_session
/// POST   /{id}/stop           -> stop_session
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(sessions::start_session))
        .route("/{id}/stop", post(sessions::stop_session))
}
