use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;
use upskill_core::trends::Trend;
use upskill_core::types::{DbId, Timestamp};

/// A row from the `trend_insights` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TrendInsight {
    pub id: DbId,
    pub industry: String,
    pub trends: Json<Vec<Trend>>,
    pub created_at: Timestamp,
}
