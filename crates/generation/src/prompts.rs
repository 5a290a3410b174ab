//! Request builders for each AI-backed operation.
//!
//! Every builder asks for strict JSON so the result can go through
//! [`crate::parse`] without heuristics beyond fence stripping.

use upskill_core::quiz::{Question, REQUIRED_QUESTION_COUNT};
use upskill_core::scoring::QuestionResult;

use crate::{ChatMessage, CompletionRequest};

/// Token budget for the short free-text feedback on a graded quiz.
pub const FEEDBACK_MAX_TOKENS: u32 = 500;

const JSON_ONLY: &str = "Respond with valid JSON only. Do not wrap it in markdown.";

fn difficulty_label(level: i16) -> &'static str {
    match level {
        1 => "beginner",
        2 => "intermediate",
        _ => "advanced",
    }
}

/// Ask for exactly [`REQUIRED_QUESTION_COUNT`] questions about a module.
pub fn quiz_generation(
    module_title: Option<&str>,
    module_content: &str,
    difficulty_level: i16,
    max_tokens: u32,
) -> CompletionRequest {
    let system_prompt = format!(
        "You are an expert instructional designer who writes assessment quizzes. \
         Create exactly {REQUIRED_QUESTION_COUNT} questions at {level} level. \
         {JSON_ONLY} Return an object of the form \
         {{\"questions\": [{{\"question\": string, \"type\": \"multiple-choice\" | \"true-false\" | \"short-answer\", \
         \"options\": [string] (multiple-choice only, each prefixed \"A) \", \"B) \", ...), \
         \"correctAnswer\": string (the option letter for multiple-choice, \"true\"/\"false\", or the expected answer), \
         \"explanation\": string, \"difficulty\": string}}]}}.",
        level = difficulty_label(difficulty_level),
    );

    let mut user = String::new();
    if let Some(title) = module_title {
        user.push_str(&format!("Module: {title}\n\n"));
    }
    user.push_str("Content:\n");
    user.push_str(module_content);

    CompletionRequest {
        system_prompt,
        messages: vec![ChatMessage::user(user)],
        max_tokens,
    }
}

/// Ask for encouraging feedback on the questions a learner got wrong.
pub fn quiz_feedback(
    questions: &[Question],
    results: &[QuestionResult],
    grade_percentage: i32,
) -> CompletionRequest {
    let mut user = format!("The learner scored {grade_percentage}%. Incorrect answers:\n");
    for result in results.iter().filter(|r| !r.is_correct) {
        let text = questions
            .iter()
            .find(|q| q.id == result.question_id)
            .map_or("", |q| q.question.as_str());
        user.push_str(&format!(
            "- Q{}: {text}\n  Answered: {}\n  Correct: {}\n",
            result.question_id,
            result.submitted_answer.as_deref().unwrap_or("(none)"),
            result.correct_answer,
        ));
    }

    CompletionRequest {
        system_prompt: "You are a supportive tutor. In under 150 words, explain the \
                        misconceptions behind the incorrect answers and suggest what to \
                        review next. Plain text only."
            .into(),
        messages: vec![ChatMessage::user(user)],
        max_tokens: FEEDBACK_MAX_TOKENS,
    }
}

pub fn roadmap(
    skill_name: &str,
    current_level: Option<i32>,
    goal: Option<&str>,
    max_tokens: u32,
) -> CompletionRequest {
    let system_prompt = format!(
        "You are a career coach who designs learning roadmaps. {JSON_ONLY} Return \
         {{\"title\": string, \"steps\": [{{\"title\": string, \"description\": string, \
         \"duration_weeks\": integer, \"resources\": [{{\"type\": \"link\" | \"video\" | \"document\", \
         \"title\": string, \"url\": string}}]}}]}} with at most 10 steps."
    );

    let mut user = format!("Skill: {skill_name}\n");
    match current_level {
        Some(level) => user.push_str(&format!("Current level: {level}/100\n")),
        None => user.push_str("Current level: not assessed\n"),
    }
    if let Some(goal) = goal {
        user.push_str(&format!("Goal: {goal}\n"));
    }

    CompletionRequest {
        system_prompt,
        messages: vec![ChatMessage::user(user)],
        max_tokens,
    }
}

pub fn trends(industry: &str, max_tokens: u32) -> CompletionRequest {
    CompletionRequest {
        system_prompt: format!(
            "You are a workforce analyst tracking in-demand skills. {JSON_ONLY} Return \
             {{\"trends\": [{{\"name\": string, \"growth\": string, \"summary\": string}}]}} \
             with 3 to 6 entries."
        ),
        messages: vec![ChatMessage::user(format!(
            "Which skills are growing fastest in the {industry} industry right now?"
        ))],
        max_tokens,
    }
}
