//! Learning session types and streak calculation.

use std::collections::HashSet;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

pub const SESSION_TYPE_COURSE: &str = "course";
pub const SESSION_TYPE_ASSESSMENT: &str = "assessment";
pub const SESSION_TYPE_PRACTICE: &str = "practice";

/// All valid session type strings.
pub const VALID_SESSION_TYPES: &[&str] = &[
    SESSION_TYPE_COURSE,
    SESSION_TYPE_ASSESSMENT,
    SESSION_TYPE_PRACTICE,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionType {
    Course,
    Assessment,
    Practice,
}

impl SessionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Course => SESSION_TYPE_COURSE,
            Self::Assessment => SESSION_TYPE_ASSESSMENT,
            Self::Practice => SESSION_TYPE_PRACTICE,
        }
    }
}

/// The parts of a learning session needed for statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSpan {
    pub started_at: Timestamp,
    /// `None` while the session is still open.
    pub duration_minutes: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionStats {
    pub total_minutes: i64,
    pub completed_sessions: usize,
    pub open_sessions: usize,
    pub streak_days: u32,
}

/// Count consecutive calendar days, walking back from `today`, that have
/// at least one closed session. A day without one ends the streak, so a
/// learner with nothing today has a streak of 0.
pub fn calculate_streak(sessions: &[SessionSpan], today: NaiveDate) -> u32 {
    let active_days: HashSet<NaiveDate> = sessions
        .iter()
        .filter(|s| s.duration_minutes.is_some())
        .map(|s| s.started_at.date_naive())
        .collect();

    let mut streak = 0;
    let mut day = today;
    while active_days.contains(&day) {
        streak += 1;
        match day.checked_sub_days(Days::new(1)) {
            Some(previous) => day = previous,
            None => break,
        }
    }
    streak
}

/// Totals and streak over one user's sessions.
pub fn session_stats(sessions: &[SessionSpan], today: NaiveDate) -> SessionStats {
    let closed = sessions.iter().filter_map(|s| s.duration_minutes);
    SessionStats {
        total_minutes: closed.clone().map(i64::from).sum(),
        completed_sessions: closed.count(),
        open_sessions: sessions.iter().filter(|s| s.duration_minutes.is_none()).count(),
        streak_days: calculate_streak(sessions, today),
    }
}
