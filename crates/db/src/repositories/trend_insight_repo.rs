//! Repository for the `trend_insights` table.

use sqlx::types::Json;
use sqlx::PgPool;
use upskill_core::trends::Trend;
use upskill_core::types::Timestamp;

use crate::models::trend_insight::TrendInsight;

const COLUMNS: &str = "id, industry, trends, created_at";

pub struct TrendInsightRepo;

impl TrendInsightRepo {
    pub async fn create(
        pool: &PgPool,
        industry: &str,
        trends: &[Trend],
    ) -> Result<TrendInsight, sqlx::Error> {
        let query = format!(
            "INSERT INTO trend_insights (industry, trends)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TrendInsight>(&query)
            .bind(industry)
            .bind(Json(trends))
            .fetch_one(pool)
            .await
    }

    /// The newest row for `industry` created after `since`, if any.
    pub async fn find_fresh(
        pool: &PgPool,
        industry: &str,
        since: Timestamp,
    ) -> Result<Option<TrendInsight>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM trend_insights
             WHERE industry = $1 AND created_at > $2
             ORDER BY created_at DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, TrendInsight>(&query)
            .bind(industry)
            .bind(since)
            .fetch_optional(pool)
            .await
    }
}
