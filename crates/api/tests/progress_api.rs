//! Progress upserts, per-user summaries, and team rollups over HTTP.

mod common;

use axum::http::StatusCode;
use axum::Router;
use common::{expect_data, expect_error, get, post_json, put_json, ScriptedGenerator};
use serde_json::json;
use sqlx::PgPool;
use upskill_db::models::course::CreateCourse;
use upskill_db::repositories::{CourseRepo, ProgressRepo};

async fn put_progress(app: &Router, token: &str, module_id: i64, pct: i32, status: &str) {
    let response = put_json(
        app,
        "/api/v1/progress",
        token,
        json!({
            "module_id": module_id,
            "module_type": "course",
            "completion_percentage": pct,
            "status": status
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_progress_upsert_updates_single_row(pool: PgPool) {
    let (user_id, token) = common::create_user(&pool, "l@example.com", "learner").await;
    let app = common::build_test_app(pool.clone(), ScriptedGenerator::new());

    put_progress(&app, &token, 7, 40, "in_progress").await;
    put_progress(&app, &token, 7, 100, "completed").await;

    let rows = ProgressRepo::list_for_user(&pool, user_id).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].completion_percentage, 100);
    assert!(rows[0].completed_at.is_some());

    let listed = expect_data(
        get(&app, "/api/v1/user/progress", &token).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["status"], "completed");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_progress_percentage_out_of_range_is_400(pool: PgPool) {
    let (_, token) = common::create_user(&pool, "l@example.com", "learner").await;
    let app = common::build_test_app(pool, ScriptedGenerator::new());

    let response = put_json(
        &app,
        "/api/v1/progress",
        &token,
        json!({
            "module_id": 1,
            "module_type": "course",
            "completion_percentage": 101,
            "status": "in_progress"
        }),
    )
    .await;
    assert_eq!(expect_error(response, StatusCode::BAD_REQUEST).await, "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_user_summary_is_zeroed_without_records(pool: PgPool) {
    let (_, token) = common::create_user(&pool, "l@example.com", "learner").await;
    let app = common::build_test_app(pool, ScriptedGenerator::new());

    let summary = expect_data(
        get(&app, "/api/v1/user/progress/summary", &token).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(summary["module_count"], 0);
    assert_eq!(summary["average_completion"], 0.0);
    assert_eq!(summary["completed_count"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_team_rollup_and_top_performers(pool: PgPool) {
    let (_, manager) = common::create_user(&pool, "m@example.com", "manager").await;
    let (alice_id, alice) = common::create_user(&pool, "alice@example.com", "learner").await;
    let (bob_id, bob) = common::create_user(&pool, "bob@example.com", "learner").await;

    let easy = CourseRepo::create(
        &pool,
        &CreateCourse {
            title: "Intro".into(),
            description: None,
            difficulty_level: 1,
        },
    )
    .await
    .unwrap();
    let hard = CourseRepo::create(
        &pool,
        &CreateCourse {
            title: "Advanced".into(),
            description: None,
            difficulty_level: 3,
        },
    )
    .await
    .unwrap();

    let app = common::build_test_app(pool, ScriptedGenerator::new());

    let team = expect_data(
        post_json(&app, "/api/v1/teams", &manager, json!({"name": "Platform"})).await,
        StatusCode::CREATED,
    )
    .await;
    let team_id = team["id"].as_i64().unwrap();

    for member in [alice_id, bob_id] {
        let response = post_json(
            &app,
            &format!("/api/v1/teams/{team_id}/members"),
            &manager,
            json!({"user_id": member}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    put_progress(&app, &alice, easy.id, 100, "completed").await;
    put_progress(&app, &alice, hard.id, 60, "in_progress").await;
    put_progress(&app, &bob, easy.id, 20, "in_progress").await;

    let summary = expect_data(
        get(&app, &format!("/api/v1/teams/{team_id}/progress"), &manager).await,
        StatusCode::OK,
    )
    .await;

    assert_eq!(summary["member_count"], 2);
    assert_eq!(summary["module_count"], 3);
    assert_eq!(summary["average_completion"], 60.0);
    assert_eq!(summary["completed_count"], 1);
    assert_eq!(summary["by_difficulty"].as_array().unwrap().len(), 2);
    assert_eq!(summary["top_performers"][0]["user_id"], alice_id);
    assert_eq!(summary["top_performers"][1]["user_id"], bob_id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_only_owning_manager_sees_team(pool: PgPool) {
    let (_, owner) = common::create_user(&pool, "m1@example.com", "manager").await;
    let (_, stranger) = common::create_user(&pool, "m2@example.com", "manager").await;
    let (_, admin) = common::create_user(&pool, "a@example.com", "admin").await;
    let app = common::build_test_app(pool, ScriptedGenerator::new());

    let team = expect_data(
        post_json(&app, "/api/v1/teams", &owner, json!({"name": "Data"})).await,
        StatusCode::CREATED,
    )
    .await;
    let uri = format!("/api/v1/teams/{}/progress", team["id"]);

    assert_eq!(get(&app, &uri, &stranger).await.status(), StatusCode::FORBIDDEN);
    assert_eq!(get(&app, &uri, &admin).await.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_member_is_conflict(pool: PgPool) {
    let (_, manager) = common::create_user(&pool, "m@example.com", "manager").await;
    let (member_id, _) = common::create_user(&pool, "l@example.com", "learner").await;
    let app = common::build_test_app(pool, ScriptedGenerator::new());

    let team = expect_data(
        post_json(&app, "/api/v1/teams", &manager, json!({"name": "Data"})).await,
        StatusCode::CREATED,
    )
    .await;
    let uri = format!("/api/v1/teams/{}/members", team["id"]);

    let body = json!({"user_id": member_id});
    assert_eq!(
        post_json(&app, &uri, &manager, body.clone()).await.status(),
        StatusCode::CREATED
    );
    let response = post_json(&app, &uri, &manager, body).await;
    assert_eq!(expect_error(response, StatusCode::CONFLICT).await, "CONFLICT");
}
