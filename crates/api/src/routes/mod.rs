pub mod health;
pub mod quizzes;
pub mod sessions;
pub mod skills;
pub mod teams;
pub mod user;

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /skills                                  list (?industry=)
/// /skills/{id}/questions                   assessment questions
/// /skills/{id}/assessment                  record assessment (POST)
///
/// /quizzes                                 generate (POST)
/// /quizzes/{id}                            get (owner only)
/// /quizzes/{id}/responses                  list attempts, submit (POST)
///
/// /progress                                upsert own progress (PUT)
///
/// /teams                                   create (POST, manager)
/// /teams/{id}/members                      add member (POST, manager)
/// /teams/{id}/progress                     team rollup (manager)
///
/// /sessions                                start (POST)
/// /sessions/{id}/stop                      stop (POST)
///
/// /roadmaps                                generate (POST)
/// /insights/trends                         trend insights (?industry=)
///
/// /user/profile                            own profile
/// /user/skills                             own assessed skills
/// /user/progress                           own progress rows
/// /user/progress/summary                   own rollup
/// /user/sessions                           own sessions
/// /user/sessions/stats                     minutes, counts, streak
/// /user/roadmaps                           own roadmaps
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/skills", skills::router())
        .nest("/quizzes", quizzes::router())
        .route("/progress", put(handlers::progress::upsert_progress))
        .nest("/teams", teams::router())
        .nest("/sessions", sessions::router())
        .route("/roadmaps", post(handlers::roadmaps::generate_roadmap))
        .route("/insights/trends", get(handlers::insights::get_trends))
        .nest("/user", user::router())
}
