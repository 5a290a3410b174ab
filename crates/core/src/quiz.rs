//! Quiz lifecycle rules.
//!
//! A quiz attempt moves through `Requested -> Generated -> InProgress ->
//! Submitted -> Graded`. Each stage is represented by the data that exists
//! at that point:
//!
//! - [`GeneratedQuestion`] is what the external generator hands back.
//! - [`validate_generated_questions`] turns that into exactly
//!   [`REQUIRED_QUESTION_COUNT`] [`Question`]s, or rejects the whole batch.
//! - A persisted quiz row is the at-most-once key for responses.
//! - [`validate_submission`] gates `InProgress -> Submitted`.
//! - [`QuizFeedback`] is what gets persisted with a graded response.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::scoring::QuestionResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// A generated quiz must contain exactly this many questions.
pub const REQUIRED_QUESTION_COUNT: usize = 5;

/// Grades strictly below this percentage get supplementary AI feedback.
pub const FEEDBACK_THRESHOLD_PCT: i32 = 80;

/// Minimum number of options for a multiple-choice question.
pub const MIN_CHOICE_OPTIONS: usize = 2;

/// Valid quiz difficulty range (inclusive).
pub const MIN_DIFFICULTY: i16 = 1;
pub const MAX_DIFFICULTY: i16 = 3;

/// Submitted answers keyed by question id (1-based sequence position).
pub type AnswerSheet = HashMap<u32, String>;

// ---------------------------------------------------------------------------
// Question types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    MultipleChoice,
    TrueFalse,
    ShortAnswer,
}

/// A validated quiz question as stored in `quizzes.questions`.
///
/// `options` is present if and only if the question is multiple-choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: u32,
    pub question: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    pub correct_answer: String,
    pub explanation: String,
    pub difficulty: String,
}

/// A question as returned by the generator, before validation.
///
/// Any `id` the generator sends is ignored; ids are assigned from position.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedQuestion {
    pub question: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    #[serde(default)]
    pub options: Option<Vec<String>>,
    pub correct_answer: String,
    pub explanation: String,
    pub difficulty: String,
}

/// A question with its answer and explanation removed, for learners
/// taking the quiz.
#[derive(Debug, Clone, Serialize)]
pub struct PublicQuestion<'a> {
    pub id: u32,
    pub question: &'a str,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<&'a [String]>,
    pub difficulty: &'a str,
}

impl Question {
    pub fn public_view(&self) -> PublicQuestion<'_> {
        PublicQuestion {
            id: self.id,
            question: &self.question,
            question_type: self.question_type,
            options: self.options.as_deref(),
            difficulty: &self.difficulty,
        }
    }
}

/// Feedback persisted alongside a graded quiz response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizFeedback {
    pub results: Vec<QuestionResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_feedback: Option<String>,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a requested quiz difficulty level.
pub fn validate_difficulty(level: i16) -> Result<(), CoreError> {
    if !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&level) {
        return Err(CoreError::Validation(format!(
            "difficulty_level must be between {MIN_DIFFICULTY} and {MAX_DIFFICULTY}, got {level}"
        )));
    }
    Ok(())
}

/// Validate a generated batch and assign 1-based ids.
///
/// The whole batch is rejected on any problem; nothing is repaired.
pub fn validate_generated_questions(
    generated: Vec<GeneratedQuestion>,
) -> Result<Vec<Question>, CoreError> {
    if generated.len() != REQUIRED_QUESTION_COUNT {
        return Err(CoreError::Validation(format!(
            "Expected exactly {REQUIRED_QUESTION_COUNT} questions, got {}",
            generated.len()
        )));
    }

    generated
        .into_iter()
        .enumerate()
        .map(|(idx, q)| validate_question(idx as u32 + 1, q))
        .collect()
}

fn validate_question(id: u32, q: GeneratedQuestion) -> Result<Question, CoreError> {
    let invalid = |reason: &str| CoreError::Validation(format!("Question {id}: {reason}"));

    if q.question.trim().is_empty() {
        return Err(invalid("question text is empty"));
    }
    if q.correct_answer.trim().is_empty() {
        return Err(invalid("correctAnswer is empty"));
    }

    // An empty options array is the same as no options.
    let options = q.options.filter(|opts| !opts.is_empty());

    match (q.question_type, &options) {
        (QuestionType::MultipleChoice, None) => {
            return Err(invalid("multiple-choice question has no options"));
        }
        (QuestionType::MultipleChoice, Some(opts)) if opts.len() < MIN_CHOICE_OPTIONS => {
            return Err(invalid("multiple-choice question needs at least two options"));
        }
        (QuestionType::TrueFalse | QuestionType::ShortAnswer, Some(_)) => {
            return Err(invalid("only multiple-choice questions may have options"));
        }
        _ => {}
    }

    Ok(Question {
        id,
        question: q.question,
        question_type: q.question_type,
        options,
        correct_answer: q.correct_answer,
        explanation: q.explanation,
        difficulty: q.difficulty,
    })
}

/// Ids of questions with no answer, or only whitespace, in the sheet.
pub fn unanswered_questions(questions: &[Question], answers: &AnswerSheet) -> Vec<u32> {
    questions
        .iter()
        .filter(|q| answers.get(&q.id).map_or(true, |a| a.trim().is_empty()))
        .map(|q| q.id)
        .collect()
}

/// Gate for `InProgress -> Submitted`: every question must be answered.
pub fn validate_submission(questions: &[Question], answers: &AnswerSheet) -> Result<(), CoreError> {
    let missing = unanswered_questions(questions, answers);
    if missing.is_empty() {
        return Ok(());
    }

    let ids: Vec<String> = missing.iter().map(u32::to_string).collect();
    Err(CoreError::Validation(format!(
        "All questions must be answered before submitting. Unanswered: {}",
        ids.join(", ")
    )))
}

/// Whether a graded attempt should request supplementary AI feedback.
pub fn needs_ai_feedback(grade_percentage: i32) -> bool {
    grade_percentage < FEEDBACK_THRESHOLD_PCT
}
