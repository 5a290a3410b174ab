//! Team routes. All require the `manager` or `admin` role.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::teams;
use crate::state::AppState;

/// Routes mounted at `/teams`.
///
/// ```text
/// POST   /                    -> create_team
/// POST   /{id}/members        -> add_member
/// GET    /{id}/progress       -> team_progress (?top=)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(teams::create_team))
        .route("/{id}/members", post(teams::add_member))
        .route("/{id}/progress", get(teams::team_progress))
}
