//! Structured skill assessment scoring.
//!
//! Unlike quiz grading, skill assessments award partial credit: full weight
//! for the correct option, half weight for an adjacent option index, and
//! nothing otherwise. The resulting level feeds the `user_skills` upsert.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::scoring::rounded_percentage;
use crate::types::DbId;

/// Weight used for assessment questions that don't specify one.
pub const DEFAULT_QUESTION_WEIGHT: i32 = 10;

/// Headroom added to the first assessed level to derive the target level.
pub const TARGET_LEVEL_HEADROOM: i32 = 30;

/// Skill levels are percentages.
pub const MAX_LEVEL: i32 = 100;

/// Status written to `user_skills.status` on every assessment.
pub const STATUS_ASSESSED: &str = "assessed";

/// Selected option indices keyed by assessment question id.
pub type AssessmentAnswers = HashMap<DbId, i32>;

/// The scoring-relevant part of an assessment question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightedQuestion {
    pub id: DbId,
    pub option_count: i32,
    pub correct_option: i32,
    pub weight: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Credit {
    Full,
    Half,
    None,
}

impl Credit {
    /// Credit for selecting `selected` when `correct` is right.
    pub fn for_selection(correct: i32, selected: i32) -> Self {
        match (selected - correct).abs() {
            0 => Self::Full,
            1 => Self::Half,
            _ => Self::None,
        }
    }

    pub fn points(self, weight: i32) -> f64 {
        match self {
            Self::Full => f64::from(weight),
            Self::Half => f64::from(weight) / 2.0,
            Self::None => 0.0,
        }
    }
}

/// Outcome of scoring one assessment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentOutcome {
    pub level: i32,
    pub total_score: f64,
    pub max_score: f64,
    pub credits: Vec<(DbId, Credit)>,
}

/// Score an assessment with weighted partial credit.
///
/// Unanswered questions earn no credit. Answers referring to unknown
/// questions or out-of-range option indices are rejected.
pub fn score_assessment(
    questions: &[WeightedQuestion],
    answers: &AssessmentAnswers,
) -> Result<AssessmentOutcome, CoreError> {
    if let Some(unknown) = answers
        .keys()
        .find(|id| !questions.iter().any(|q| q.id == **id))
    {
        return Err(CoreError::Validation(format!(
            "Answer refers to unknown assessment question {unknown}"
        )));
    }

    let mut total_score = 0.0;
    let mut max_score = 0.0;
    let mut credits = Vec::with_capacity(questions.len());

    for q in questions {
        let credit = match answers.get(&q.id) {
            Some(&selected) if !(0..q.option_count).contains(&selected) => {
                return Err(CoreError::Validation(format!(
                    "Option {selected} is out of range for question {}",
                    q.id
                )));
            }
            Some(&selected) => Credit::for_selection(q.correct_option, selected),
            None => Credit::None,
        };

        total_score += credit.points(q.weight);
        max_score += f64::from(q.weight);
        credits.push((q.id, credit));
    }

    Ok(AssessmentOutcome {
        level: rounded_percentage(total_score, max_score),
        total_score,
        max_score,
        credits,
    })
}

/// Target level set when a skill is assessed for the first time.
pub fn initial_target_level(level: i32) -> i32 {
    (level + TARGET_LEVEL_HEADROOM).min(MAX_LEVEL)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn questions() -> Vec<WeightedQuestion> {
        (1..=3)
            .map(|id| WeightedQuestion {
                id,
                option_count: 4,
                correct_option: 1,
                weight: DEFAULT_QUESTION_WEIGHT,
            })
            .collect()
    }

    #[test]
    fn credit_by_distance() {
        assert_eq!(Credit::for_selection(2, 2), Credit::Full);
        assert_eq!(Credit::for_selection(2, 1), Credit::Half);
        assert_eq!(Credit::for_selection(2, 3), Credit::Half);
        assert_eq!(Credit::for_selection(2, 0), Credit::None);
    }

    #[test]
    fn correct_partial_incorrect_gives_fifty() {
        // Weights earned: 10, 5, 0 out of 30.
        let answers: AssessmentAnswers = [(1, 1), (2, 2), (3, 3)].into_iter().collect();
        let outcome = score_assessment(&questions(), &answers).unwrap();

        assert_eq!(outcome.total_score, 15.0);
        assert_eq!(outcome.max_score, 30.0);
        assert_eq!(outcome.level, 50);
        assert_eq!(initial_target_level(outcome.level), 80);
    }

    #[test]
    fn unanswered_earns_nothing() {
        let answers: AssessmentAnswers = [(1, 1)].into_iter().collect();
        let outcome = score_assessment(&questions(), &answers).unwrap();
        assert_eq!(outcome.level, 33);
        assert_eq!(outcome.credits[2], (3, Credit::None));
    }

    #[test]
    fn out_of_range_option_is_rejected() {
        let answers: AssessmentAnswers = [(1, 4)].into_iter().collect();
        assert_matches!(
            score_assessment(&questions(), &answers),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn unknown_question_is_rejected() {
        let answers: AssessmentAnswers = [(99, 0)].into_iter().collect();
        assert_matches!(
            score_assessment(&questions(), &answers),
            Err(CoreError::Validation(msg)) if msg.contains("99")
        );
    }

    #[test]
    fn no_questions_is_level_zero() {
        let outcome = score_assessment(&[], &AssessmentAnswers::new()).unwrap();
        assert_eq!(outcome.level, 0);
    }

    #[test]
    fn target_level_is_capped() {
        assert_eq!(initial_target_level(50), 80);
        assert_eq!(initial_target_level(85), 100);
        assert_eq!(initial_target_level(100), 100);
    }
}
