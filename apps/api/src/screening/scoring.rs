//! Answer scoring: exact, case-insensitive, whitespace-trimmed comparison. No partial credit.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Score {
    pub per_question: Vec<bool>,
    pub total: usize,
    pub correct_count: usize,
}

/// Scores index-aligned answers. Both slices come from the same session, so they
/// have equal length; callers validate external input before getting here.
pub fn score(user_answers: &[String], correct_answers: &[String]) -> Score {
    debug_assert_eq!(user_answers.len(), correct_answers.len());

    let per_question: Vec<bool> = user_answers
        .iter()
        .zip(correct_answers)
        .map(|(given, expected)| answers_match(given, expected))
        .collect();
    let correct_count = per_question.iter().filter(|ok| **ok).count();

    Score {
        total: correct_answers.len(),
        per_question,
        correct_count,
    }
}

pub fn answers_match(given: &str, expected: &str) -> bool {
    given.trim().to_lowercase() == expected.trim().to_lowercase()
}
