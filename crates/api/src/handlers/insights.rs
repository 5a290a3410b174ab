//! Handlers for industry trend insights.
//!
//! Lookup order: the in-memory TTL cache, then a `trend_insights` row
//! younger than the TTL, then a fresh generation. Storing a fresh
//! generation is best-effort; the caller gets the trends either way.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use upskill_core::enrichment::Enrichment;
use upskill_core::error::CoreError;
use upskill_core::trends::Trend;
use upskill_core::types::DbId;
use upskill_db::models::ai_interaction::INTERACTION_TRENDS;
use upskill_db::repositories::TrendInsightRepo;
use upskill_generation::{parse, prompts};

use crate::ai::complete_and_record;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TrendParams {
    pub industry: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendSource {
    Cache,
    Database,
    Generated,
}

#[derive(Debug, Serialize)]
pub struct TrendInsightsView {
    pub industry: String,
    pub source: TrendSource,
    pub trends: Vec<Trend>,
    /// Outcome of storing a fresh generation; `skipped` for cached results.
    pub stored: Enrichment<DbId>,
}

/// GET /api/v1/insights/trends?industry=
pub async fn get_trends(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<TrendParams>,
) -> AppResult<impl IntoResponse> {
    let industry = params.industry.trim().to_lowercase();
    if industry.is_empty() {
        return Err(CoreError::Validation("industry must not be empty".into()).into());
    }

    let view = |source: TrendSource, trends: Vec<Trend>, stored: Enrichment<DbId>| {
        TrendInsightsView {
            industry: industry.clone(),
            source,
            trends,
            stored,
        }
    };

    if let Some(trends) = state.trend_cache.get(&industry).await {
        return Ok(Json(DataResponse::new(view(
            TrendSource::Cache,
            trends,
            Enrichment::Skipped,
        ))));
    }

    let since = chrono::Duration::from_std(state.config.trend_cache_ttl())
        .ok()
        .and_then(|ttl| chrono::Utc::now().checked_sub_signed(ttl))
        .ok_or_else(|| AppError::InternalError("Trend cache TTL is out of range".into()))?;
    if let Some(row) = TrendInsightRepo::find_fresh(&state.pool, &industry, since).await? {
        state
            .trend_cache
            .insert(industry.clone(), row.trends.0.clone())
            .await;
        return Ok(Json(DataResponse::new(view(
            TrendSource::Database,
            row.trends.0,
            Enrichment::Skipped,
        ))));
    }

    let request = prompts::trends(&industry, state.config.generation.max_tokens);
    let content = complete_and_record(&state, user.user_id, INTERACTION_TRENDS, &request).await?;
    let trends = parse::parse_trends_content(&content)?;

    let stored = TrendInsightRepo::create(&state.pool, &industry, &trends)
        .await
        .map(|row| row.id);
    if let Err(e) = &stored {
        tracing::warn!(industry = %industry, error = %e, "Failed to store trend insights");
    }

    state.trend_cache.insert(industry.clone(), trends.clone()).await;
    tracing::info!(
        user_id = user.user_id,
        industry = %industry,
        count = trends.len(),
        "Trend insights generated",
    );

    Ok(Json(DataResponse::new(view(
        TrendSource::Generated,
        trends,
        Enrichment::from_result(stored),
    ))))
}
