#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use upskill_api::auth::jwt::{generate_access_token, JwtConfig};
use upskill_api::cache::TtlCache;
use upskill_api::config::{GenerationConfig, ServerConfig};
use upskill_api::router::build_app_router;
use upskill_api::state::AppState;
use upskill_core::types::DbId;
use upskill_db::models::profile::CreateProfile;
use upskill_db::repositories::ProfileRepo;
use upskill_generation::{Completion, CompletionRequest, GenerationError, TextGenerator};

pub const TEST_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: TEST_SECRET.to_string(),
            access_token_expiry_mins: 15,
        },
        generation: GenerationConfig {
            api_url: "http://generation.invalid/v1".to_string(),
            api_key: Some("test-key".to_string()),
            model: "test-model".to_string(),
            max_tokens: 2000,
        },
        trend_cache_ttl_secs: 3600,
    }
}

// ---------------------------------------------------------------------------
// Scripted generator
// ---------------------------------------------------------------------------

/// A [`TextGenerator`] that replays queued results in order.
///
/// Running out of script is an error, so a test that queues nothing also
/// asserts that no generation happens.
#[derive(Default)]
pub struct ScriptedGenerator {
    script: Mutex<VecDeque<Result<Completion, GenerationError>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedGenerator {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue a successful completion.
    pub fn push(&self, content: impl Into<String>) {
        self.script.lock().unwrap().push_back(Ok(Completion {
            content: content.into(),
            total_tokens: 100,
        }));
    }

    pub fn push_err(&self, err: GenerationError) {
        self.script.lock().unwrap().push_back(Err(err));
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, GenerationError> {
        self.requests.lock().unwrap().push(request.clone());
        self.script.lock().unwrap().pop_front().unwrap_or_else(|| {
            Err(GenerationError::MalformedResponse(
                "scripted generator has nothing queued".into(),
            ))
        })
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build the production router over `pool` with a scripted generator.
pub fn build_test_app(pool: PgPool, generator: Arc<ScriptedGenerator>) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        generator,
        trend_cache: Arc::new(TtlCache::new(config.trend_cache_ttl())),
    };
    build_app_router(state, &config)
}

/// Insert a profile and return `(id, bearer token)`.
pub async fn create_user(pool: &PgPool, email: &str, role: &str) -> (DbId, String) {
    let profile = ProfileRepo::create(
        pool,
        &CreateProfile {
            email: email.to_string(),
            full_name: None,
            role: role.to_string(),
        },
    )
    .await
    .unwrap();
    (profile.id, token_for(profile.id, role))
}

pub fn token_for(user_id: DbId, role: &str) -> String {
    let jwt = test_config().jwt;
    generate_access_token(user_id, role, &jwt).unwrap()
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn get_anonymous(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

async fn with_json(
    app: &Router,
    method: &str,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json(
    app: &Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    with_json(app, "POST", uri, token, body).await
}

pub async fn put_json(
    app: &Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    with_json(app, "PUT", uri, token, body).await
}

pub async fn post_empty(app: &Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert the status and return the `data` field of a success envelope.
pub async fn expect_data(response: Response<Body>, status: StatusCode) -> serde_json::Value {
    assert_eq!(response.status(), status);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    json["data"].clone()
}

/// Assert the status and return the `code` of an error envelope.
pub async fn expect_error(response: Response<Body>, status: StatusCode) -> String {
    assert_eq!(response.status(), status);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    json["code"].as_str().unwrap_or_default().to_string()
}
