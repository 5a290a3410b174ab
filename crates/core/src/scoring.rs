//! Objective answer scoring for quizzes.
//!
//! Pure functions only; persisting the outcome is the caller's job.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::quiz::{AnswerSheet, Question, QuestionType};

/// Minimum grade percentage that counts as a pass.
pub const PASS_THRESHOLD_PCT: i32 = 70;

/// Per-question outcome, echoing the canonical answer and explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResult {
    pub question_id: u32,
    pub submitted_answer: Option<String>,
    pub is_correct: bool,
    pub correct_answer: String,
    pub explanation: String,
}

/// Aggregate outcome of scoring one answer sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreReport {
    pub results: Vec<QuestionResult>,
    pub correct_count: usize,
    pub total_questions: usize,
    pub grade_percentage: i32,
    pub passed: bool,
}

/// ASCII punctuation plus any Unicode punctuation mark, e.g. curly quotes.
static PUNCTUATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[[:punct:]\p{P}]").expect("valid regex"));

/// `round(100 * part / whole)`, or 0 when `whole` is 0.
pub fn rounded_percentage(part: f64, whole: f64) -> i32 {
    if whole <= 0.0 {
        return 0;
    }
    (100.0 * part / whole).round() as i32
}

/// Lowercase, strip punctuation, and trim a short answer.
///
/// This is a lenient textual match, not semantic grading: `"don't"` and
/// `"dont"` compare equal, and so do `"3.14"` and `"314"`.
pub fn normalize_short_answer(answer: &str) -> String {
    let lowered = answer.to_lowercase();
    PUNCTUATION_RE.replace_all(&lowered, "").trim().to_string()
}

/// Whether `submitted` is correct for `question`.
///
/// Choice questions compare exactly (letter codes are case-sensitive);
/// short answers compare after [`normalize_short_answer`].
pub fn is_correct(question: &Question, submitted: &str) -> bool {
    match question.question_type {
        QuestionType::MultipleChoice | QuestionType::TrueFalse => {
            submitted == question.correct_answer
        }
        QuestionType::ShortAnswer => {
            normalize_short_answer(submitted) == normalize_short_answer(&question.correct_answer)
        }
    }
}

/// Score an answer sheet against the quiz questions.
///
/// A question with no submitted answer is scored incorrect.
pub fn score_answers(questions: &[Question], answers: &AnswerSheet) -> ScoreReport {
    let results: Vec<QuestionResult> = questions
        .iter()
        .map(|q| {
            let submitted = answers.get(&q.id).cloned();
            let is_correct = submitted.as_deref().is_some_and(|a| is_correct(q, a));
            QuestionResult {
                question_id: q.id,
                submitted_answer: submitted,
                is_correct,
                correct_answer: q.correct_answer.clone(),
                explanation: q.explanation.clone(),
            }
        })
        .collect();

    let correct_count = results.iter().filter(|r| r.is_correct).count();
    let total_questions = results.len();
    let grade_percentage = rounded_percentage(correct_count as f64, total_questions as f64);

    ScoreReport {
        results,
        correct_count,
        total_questions,
        grade_percentage,
        passed: grade_percentage >= PASS_THRESHOLD_PCT,
    }
}
