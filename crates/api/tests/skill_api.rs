//! Skill catalogue and assessment over HTTP.

mod common;

use axum::http::StatusCode;
use common::{expect_data, expect_error, get, post_json, ScriptedGenerator};
use serde_json::json;
use sqlx::PgPool;
use upskill_core::types::DbId;
use upskill_db::models::skill::{CreateSkill, CreateSkillQuestion};
use upskill_db::repositories::SkillRepo;

/// A skill with three weight-10 questions whose correct option is 1.
async fn seed_skill(pool: &PgPool, name: &str, industry: &str) -> (DbId, Vec<DbId>) {
    let skill = SkillRepo::create(
        pool,
        &CreateSkill {
            name: name.to_string(),
            category: "engineering".to_string(),
            industry: industry.to_string(),
            difficulty_level: 2,
        },
    )
    .await
    .unwrap();

    let mut question_ids = Vec::new();
    for position in 1..=3 {
        let q = SkillRepo::create_question(
            pool,
            &CreateSkillQuestion {
                skill_id: skill.id,
                position,
                question: format!("Question {position}"),
                options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
                correct_option: 1,
                weight: 10,
            },
        )
        .await
        .unwrap();
        question_ids.push(q.id);
    }
    (skill.id, question_ids)
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_skills_filters_by_industry(pool: PgPool) {
    let (_, token) = common::create_user(&pool, "l@example.com", "learner").await;
    seed_skill(&pool, "Rust", "technology").await;
    seed_skill(&pool, "Underwriting", "finance").await;
    let app = common::build_test_app(pool, ScriptedGenerator::new());

    let all = expect_data(get(&app, "/api/v1/skills", &token).await, StatusCode::OK).await;
    assert_eq!(all.as_array().unwrap().len(), 2);

    let finance = expect_data(
        get(&app, "/api/v1/skills?industry=finance", &token).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(finance.as_array().unwrap().len(), 1);
    assert_eq!(finance[0]["name"], "Underwriting");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_questions_hide_correct_option(pool: PgPool) {
    let (_, token) = common::create_user(&pool, "l@example.com", "learner").await;
    let (skill_id, _) = seed_skill(&pool, "Rust", "technology").await;
    let app = common::build_test_app(pool, ScriptedGenerator::new());

    let questions = expect_data(
        get(&app, &format!("/api/v1/skills/{skill_id}/questions"), &token).await,
        StatusCode::OK,
    )
    .await;
    let questions = questions.as_array().unwrap();
    assert_eq!(questions.len(), 3);
    assert!(questions.iter().all(|q| q.get("correct_option").is_none()));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_assessment_scores_partial_credit_and_updates_in_place(pool: PgPool) {
    let (user_id, token) = common::create_user(&pool, "l@example.com", "learner").await;
    let (skill_id, q) = seed_skill(&pool, "Rust", "technology").await;
    let app = common::build_test_app(pool.clone(), ScriptedGenerator::new());
    let uri = format!("/api/v1/skills/{skill_id}/assessment");

    // Exact, adjacent, far: 10 + 5 + 0 of 30.
    let mut answers = serde_json::Map::new();
    answers.insert(q[0].to_string(), json!(1));
    answers.insert(q[1].to_string(), json!(2));
    answers.insert(q[2].to_string(), json!(3));
    let first = expect_data(
        post_json(&app, &uri, &token, json!({ "answers": answers })).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(first["level"], 50);
    assert_eq!(first["user_skill"]["current_level"], 50);
    assert_eq!(first["user_skill"]["target_level"], 80);
    assert_eq!(first["user_skill"]["status"], "assessed");

    let mut answers = serde_json::Map::new();
    for id in &q {
        answers.insert(id.to_string(), json!(1));
    }
    let second = expect_data(
        post_json(&app, &uri, &token, json!({ "answers": answers })).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(second["level"], 100);
    assert_eq!(second["user_skill"]["id"], first["user_skill"]["id"]);
    // The target is only set on the first assessment.
    assert_eq!(second["user_skill"]["target_level"], 80);

    let rows = SkillRepo::list_user_skills(&pool, user_id).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].current_level, 100);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_assessment_rejects_out_of_range_option(pool: PgPool) {
    let (user_id, token) = common::create_user(&pool, "l@example.com", "learner").await;
    let (skill_id, q) = seed_skill(&pool, "Rust", "technology").await;
    let app = common::build_test_app(pool.clone(), ScriptedGenerator::new());

    let mut answers = serde_json::Map::new();
    answers.insert(q[0].to_string(), json!(9));
    let response = post_json(
        &app,
        &format!("/api/v1/skills/{skill_id}/assessment"),
        &token,
        json!({ "answers": answers }),
    )
    .await;

    assert_eq!(expect_error(response, StatusCode::BAD_REQUEST).await, "VALIDATION_ERROR");
    assert!(SkillRepo::list_user_skills(&pool, user_id).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_assessment_of_unknown_skill_is_404(pool: PgPool) {
    let (_, token) = common::create_user(&pool, "l@example.com", "learner").await;
    let app = common::build_test_app(pool, ScriptedGenerator::new());

    let response = post_json(
        &app,
        "/api/v1/skills/999999/assessment",
        &token,
        json!({ "answers": {} }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
