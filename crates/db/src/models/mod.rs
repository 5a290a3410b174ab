//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` DTOs for the writes the API accepts

pub mod ai_interaction;
pub mod course;
pub mod learning_session;
pub mod profile;
pub mod progress;
pub mod quiz;
pub mod roadmap;
pub mod skill;
pub mod team;
pub mod trend_insight;
