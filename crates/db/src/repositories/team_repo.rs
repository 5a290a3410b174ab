//! Repository for `teams` and `team_members`.
//!
//! Teams are purely an aggregation scope: rollups always go through
//! [`TeamRepo::member_ids`].

use sqlx::PgPool;
use upskill_core::types::DbId;

use crate::models::team::{Team, TeamMember};

const TEAM_COLUMNS: &str = "id, name, manager_id, created_at, updated_at";
const MEMBER_COLUMNS: &str = "id, team_id, user_id, joined_at";

pub struct TeamRepo;

impl TeamRepo {
    pub async fn create(pool: &PgPool, name: &str, manager_id: DbId) -> Result<Team, sqlx::Error> {
        let query = format!(
            "INSERT INTO teams (name, manager_id)
             VALUES ($1, $2)
             RETURNING {TEAM_COLUMNS}"
        );
        sqlx::query_as::<_, Team>(&query)
            .bind(name)
            .bind(manager_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Team>, sqlx::Error> {
        let query = format!("SELECT {TEAM_COLUMNS} FROM teams WHERE id = $1");
        sqlx::query_as::<_, Team>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Add a user to a team. Duplicate membership violates
    /// `uq_team_members_team_user`.
    pub async fn add_member(
        pool: &PgPool,
        team_id: DbId,
        user_id: DbId,
    ) -> Result<TeamMember, sqlx::Error> {
        let query = format!(
            "INSERT INTO team_members (team_id, user_id)
             VALUES ($1, $2)
             RETURNING {MEMBER_COLUMNS}"
        );
        sqlx::query_as::<_, TeamMember>(&query)
            .bind(team_id)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// User ids of a team's members, ascending.
    pub async fn member_ids(pool: &PgPool, team_id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> = sqlx::query_as(
            "SELECT user_id FROM team_members WHERE team_id = $1 ORDER BY user_id",
        )
        .bind(team_id)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }
}
