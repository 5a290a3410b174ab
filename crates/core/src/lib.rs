//! Domain logic for the upskill backend.
//!
//! This crate holds the pure parts of the system: answer scoring, skill
//! assessment, the quiz lifecycle rules, progress aggregation, session
//! streaks, and validation of generator payloads. It has no database or
//! HTTP dependencies; callers load data and pass it in.

pub mod assessment;
pub mod enrichment;
pub mod error;
pub mod progress;
pub mod quiz;
pub mod roadmap;
pub mod roles;
pub mod scoring;
pub mod sessions;
pub mod trends;
pub mod types;
