use serde::Serialize;
use sqlx::FromRow;
use upskill_core::types::{DbId, Timestamp};

/// A row from the `profiles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Profile {
    pub id: DbId,
    pub email: String,
    pub full_name: Option<String>,
    pub role: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a profile.
#[derive(Debug, Clone)]
pub struct CreateProfile {
    pub email: String,
    pub full_name: Option<String>,
    pub role: String,
}
