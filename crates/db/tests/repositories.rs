use assert_matches::assert_matches;
use sqlx::PgPool;
use upskill_core::progress::ProgressStatus;
use upskill_core::quiz::{AnswerSheet, Question, QuestionType, QuizFeedback};
use upskill_core::sessions::SessionType;
use upskill_core::types::DbId;
use upskill_db::models::profile::CreateProfile;
use upskill_db::models::progress::UpsertProgress;
use upskill_db::models::learning_session::StartSession;
use upskill_db::models::quiz::{CreateQuiz, CreateQuizResponse};
use upskill_db::models::skill::CreateSkill;
use upskill_db::repositories::{
    LearningSessionRepo, ProfileRepo, ProgressRepo, QuizRepo, SkillRepo, TeamRepo,
};

async fn profile(pool: &PgPool, email: &str) -> DbId {
    ProfileRepo::create(
        pool,
        &CreateProfile {
            email: email.to_string(),
            full_name: Some("Test User".to_string()),
            role: "learner".to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

fn is_unique_violation(err: &sqlx::Error, constraint: &str) -> bool {
    match err {
        sqlx::Error::Database(db) => {
            db.code().as_deref() == Some("23505") && db.constraint() == Some(constraint)
        }
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// User skills
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_assessed_level_upsert_keeps_one_row(pool: PgPool) {
    let user_id = profile(&pool, "a@example.com").await;
    let skill = SkillRepo::create(
        &pool,
        &CreateSkill {
            name: "SQL".into(),
            category: "data".into(),
            industry: "technology".into(),
            difficulty_level: 1,
        },
    )
    .await
    .unwrap();

    let first = SkillRepo::upsert_assessed_level(&pool, user_id, skill.id, 40, 70)
        .await
        .unwrap();
    let second = SkillRepo::upsert_assessed_level(&pool, user_id, skill.id, 65, 95)
        .await
        .unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.current_level, 65);
    assert_eq!(second.target_level, 70);
    assert!(second.assessed_at >= first.assessed_at);
    assert_eq!(SkillRepo::list_user_skills(&pool, user_id).await.unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Learning sessions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_one_open_session_per_user(pool: PgPool) {
    let user_id = profile(&pool, "a@example.com").await;
    let input = StartSession {
        course_id: None,
        session_type: SessionType::Course,
    };

    let open = LearningSessionRepo::start(&pool, user_id, &input).await.unwrap();
    let err = LearningSessionRepo::start(&pool, user_id, &input)
        .await
        .unwrap_err();
    assert!(is_unique_violation(&err, "uq_learning_sessions_open_per_user"));

    // Closing frees the slot.
    let closed = LearningSessionRepo::stop(&pool, open.id, user_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(closed.duration_minutes, Some(0));
    LearningSessionRepo::start(&pool, user_id, &input).await.unwrap();
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_stop_is_once_and_owner_only(pool: PgPool) {
    let owner = profile(&pool, "a@example.com").await;
    let other = profile(&pool, "b@example.com").await;
    let session = LearningSessionRepo::start(
        &pool,
        owner,
        &StartSession {
            course_id: None,
            session_type: SessionType::Practice,
        },
    )
    .await
    .unwrap();

    assert_matches!(LearningSessionRepo::stop(&pool, session.id, other).await, Ok(None));
    assert_matches!(LearningSessionRepo::stop(&pool, session.id, owner).await, Ok(Some(_)));
    assert_matches!(LearningSessionRepo::stop(&pool, session.id, owner).await, Ok(None));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duration_is_rounded_minutes(pool: PgPool) {
    let user_id = profile(&pool, "a@example.com").await;
    let session = LearningSessionRepo::start(
        &pool,
        user_id,
        &StartSession {
            course_id: None,
            session_type: SessionType::Course,
        },
    )
    .await
    .unwrap();

    // Backdate the start by 14.5 minutes; rounds to 15.
    sqlx::query(
        "UPDATE learning_sessions SET started_at = NOW() - INTERVAL '870 seconds' WHERE id = $1",
    )
    .bind(session.id)
    .execute(&pool)
    .await
    .unwrap();

    let closed = LearningSessionRepo::stop(&pool, session.id, user_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(closed.duration_minutes, Some(15));
}

// ---------------------------------------------------------------------------
// Quizzes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_quiz_responses_are_independent_rows(pool: PgPool) {
    let user_id = profile(&pool, "a@example.com").await;
    let questions: Vec<Question> = (1..=5)
        .map(|id| Question {
            id,
            question: format!("Q{id}"),
            question_type: QuestionType::TrueFalse,
            options: None,
            correct_answer: "true".into(),
            explanation: String::new(),
            difficulty: "easy".into(),
        })
        .collect();

    let quiz = QuizRepo::create(
        &pool,
        &CreateQuiz {
            user_id,
            course_id: None,
            module_id: 1,
            difficulty_level: 1,
            questions: questions.clone(),
        },
    )
    .await
    .unwrap();
    assert_eq!(quiz.questions.0, questions);

    for grade in [40, 100] {
        let answers: AnswerSheet = (1..=5).map(|id| (id, "true".to_string())).collect();
        QuizRepo::create_response(
            &pool,
            &CreateQuizResponse {
                user_id,
                quiz_id: quiz.id,
                answers,
                grade_percentage: grade,
                passed: grade >= 70,
                feedback: QuizFeedback {
                    results: Vec::new(),
                    ai_feedback: None,
                },
            },
        )
        .await
        .unwrap();
    }

    let responses = QuizRepo::list_responses(&pool, quiz.id, user_id).await.unwrap();
    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0].grade_percentage, 40);
    assert_eq!(responses[1].grade_percentage, 100);
    assert_eq!(responses[1].answers.0.get(&3).map(String::as_str), Some("true"));
}

// ---------------------------------------------------------------------------
// Progress and teams
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_progress_completed_at_follows_status(pool: PgPool) {
    let user_id = profile(&pool, "a@example.com").await;
    let upsert = |pct, status| UpsertProgress {
        module_id: 9,
        module_type: "course".into(),
        completion_percentage: pct,
        status,
    };

    let done = ProgressRepo::upsert(&pool, user_id, &upsert(100, ProgressStatus::Completed))
        .await
        .unwrap();
    assert!(done.completed_at.is_some());

    let reopened = ProgressRepo::upsert(&pool, user_id, &upsert(50, ProgressStatus::InProgress))
        .await
        .unwrap();
    assert_eq!(reopened.id, done.id);
    assert!(reopened.completed_at.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_team_members_are_unique(pool: PgPool) {
    let manager = profile(&pool, "m@example.com").await;
    let member = profile(&pool, "a@example.com").await;
    let team = TeamRepo::create(&pool, "Support", manager).await.unwrap();

    TeamRepo::add_member(&pool, team.id, member).await.unwrap();
    let err = TeamRepo::add_member(&pool, team.id, member).await.unwrap_err();
    assert!(is_unique_violation(&err, "uq_team_members_team_user"));

    assert_eq!(TeamRepo::member_ids(&pool, team.id).await.unwrap(), vec![member]);
}
