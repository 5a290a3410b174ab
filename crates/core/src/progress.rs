//! Progress aggregation for learners and teams.
//!
//! Callers load `progress` rows (already scoped to the relevant users) and
//! pass them in as [`ProgressRecord`]s. Course metadata needed for the
//! difficulty breakdown is supplied by the caller as well; this module
//! does not own course data.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::types::DbId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const STATUS_NOT_STARTED: &str = "not_started";
pub const STATUS_IN_PROGRESS: &str = "in_progress";
pub const STATUS_COMPLETED: &str = "completed";

/// All valid progress status strings.
pub const VALID_PROGRESS_STATUSES: &[&str] =
    &[STATUS_NOT_STARTED, STATUS_IN_PROGRESS, STATUS_COMPLETED];

/// Module type whose `module_id` is a course id.
pub const MODULE_TYPE_COURSE: &str = "course";

/// Default size of the top performers list.
pub const DEFAULT_TOP_PERFORMERS: usize = 5;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    NotStarted,
    InProgress,
    Completed,
}

impl ProgressStatus {
    /// Convert from a database string value.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            STATUS_NOT_STARTED => Ok(Self::NotStarted),
            STATUS_IN_PROGRESS => Ok(Self::InProgress),
            STATUS_COMPLETED => Ok(Self::Completed),
            _ => Err(format!(
                "Invalid progress status '{s}'. Must be one of: {}",
                VALID_PROGRESS_STATUSES.join(", ")
            )),
        }
    }

    /// Convert to the database string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => STATUS_NOT_STARTED,
            Self::InProgress => STATUS_IN_PROGRESS,
            Self::Completed => STATUS_COMPLETED,
        }
    }
}

// ---------------------------------------------------------------------------
// Input / output types
// ---------------------------------------------------------------------------

/// One per-module progress row, as consumed by the aggregator.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressRecord {
    pub user_id: DbId,
    pub module_id: DbId,
    pub module_type: String,
    pub completion_percentage: i32,
    pub status: ProgressStatus,
}

/// Running totals for one group of records.
#[derive(Debug, Clone, Copy, Default)]
struct Tally {
    modules: usize,
    completion_sum: i64,
    completed: usize,
}

impl Tally {
    fn add(&mut self, record: &ProgressRecord) {
        self.modules += 1;
        self.completion_sum += i64::from(record.completion_percentage);
        if record.status == ProgressStatus::Completed {
            self.completed += 1;
        }
    }

    fn average(&self) -> f64 {
        if self.modules == 0 {
            return 0.0;
        }
        self.completion_sum as f64 / self.modules as f64
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserProgressSummary {
    pub user_id: DbId,
    pub module_count: usize,
    pub average_completion: f64,
    pub completed_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleTypeBreakdown {
    pub module_type: String,
    pub module_count: usize,
    pub average_completion: f64,
    pub completed_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DifficultyBreakdown {
    pub difficulty_level: i16,
    pub module_count: usize,
    pub average_completion: f64,
    pub completed_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamProgressSummary {
    pub member_count: usize,
    pub module_count: usize,
    pub average_completion: f64,
    pub completed_count: usize,
    pub by_module_type: Vec<ModuleTypeBreakdown>,
    pub by_difficulty: Vec<DifficultyBreakdown>,
    pub top_performers: Vec<UserProgressSummary>,
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Summarize one user's records. Records for other users are ignored.
pub fn summarize_user(user_id: DbId, records: &[ProgressRecord]) -> UserProgressSummary {
    let mut tally = Tally::default();
    for record in records.iter().filter(|r| r.user_id == user_id) {
        tally.add(record);
    }
    user_summary(user_id, &tally)
}

/// Summarize every user that appears in `records` or in `member_ids`.
///
/// Members with no records get a zeroed summary. Output is ordered by
/// user id.
pub fn summarize_users(
    member_ids: &[DbId],
    records: &[ProgressRecord],
) -> Vec<UserProgressSummary> {
    let mut tallies: BTreeMap<DbId, Tally> =
        member_ids.iter().map(|id| (*id, Tally::default())).collect();
    for record in records {
        tallies.entry(record.user_id).or_default().add(record);
    }
    tallies
        .iter()
        .map(|(user_id, tally)| user_summary(*user_id, tally))
        .collect()
}

/// Rank users by average completion (descending), then completed count
/// (descending). Equal users keep their input order.
pub fn rank_top_performers(
    mut summaries: Vec<UserProgressSummary>,
    limit: usize,
) -> Vec<UserProgressSummary> {
    summaries.sort_by(|a, b| {
        b.average_completion
            .total_cmp(&a.average_completion)
            .then_with(|| b.completed_count.cmp(&a.completed_count))
    });
    summaries.truncate(limit);
    summaries
}

/// Roll up a team's records.
///
/// `course_difficulty` maps course ids to their difficulty level; records
/// whose module is not a known course are left out of `by_difficulty`.
pub fn summarize_team(
    member_ids: &[DbId],
    records: &[ProgressRecord],
    course_difficulty: &HashMap<DbId, i16>,
    top_n: usize,
) -> TeamProgressSummary {
    let mut overall = Tally::default();
    let mut by_type: BTreeMap<&str, Tally> = BTreeMap::new();
    let mut by_difficulty: BTreeMap<i16, Tally> = BTreeMap::new();

    for record in records {
        overall.add(record);
        by_type.entry(&record.module_type).or_default().add(record);

        if record.module_type == MODULE_TYPE_COURSE {
            if let Some(level) = course_difficulty.get(&record.module_id) {
                by_difficulty.entry(*level).or_default().add(record);
            }
        }
    }

    let users = summarize_users(member_ids, records);

    TeamProgressSummary {
        member_count: users.len(),
        module_count: overall.modules,
        average_completion: overall.average(),
        completed_count: overall.completed,
        by_module_type: by_type
            .into_iter()
            .map(|(module_type, t)| ModuleTypeBreakdown {
                module_type: module_type.to_string(),
                module_count: t.modules,
                average_completion: t.average(),
                completed_count: t.completed,
            })
            .collect(),
        by_difficulty: by_difficulty
            .into_iter()
            .map(|(difficulty_level, t)| DifficultyBreakdown {
                difficulty_level,
                module_count: t.modules,
                average_completion: t.average(),
                completed_count: t.completed,
            })
            .collect(),
        top_performers: rank_top_performers(users, top_n),
    }
}

fn user_summary(user_id: DbId, tally: &Tally) -> UserProgressSummary {
    UserProgressSummary {
        user_id,
        module_count: tally.modules,
        average_completion: tally.average(),
        completed_count: tally.completed,
    }
}
