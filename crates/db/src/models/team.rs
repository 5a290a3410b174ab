use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use upskill_core::types::{DbId, Timestamp};

/// A row from the `teams` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Team {
    pub id: DbId,
    pub name: String,
    pub manager_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `team_members` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TeamMember {
    pub id: DbId,
    pub team_id: DbId,
    pub user_id: DbId,
    pub joined_at: Timestamp,
}

/// DTO for creating a team. The manager is the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTeam {
    pub name: String,
}

/// DTO for adding a member to a team.
#[derive(Debug, Clone, Deserialize)]
pub struct AddTeamMember {
    pub user_id: DbId,
}
