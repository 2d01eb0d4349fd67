//! Question generator: collects unique fill-in-the-blank questions from the model.
//!
//! The model is asked for one question per call. Replies are parsed on the literal
//! `Question:` / `Answer:` markers; malformed replies and case-insensitive duplicates
//! are discarded. The loop stops at the target count or when the attempt budget
//! (`target * attempt_multiplier`) runs out, whichever comes first.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::llm_client::{InferenceClient, LlmError};
use crate::screening::prompts::question_prompt;

const QUESTION_MARKER: &str = "Question:";
const ANSWER_MARKER: &str = "Answer:";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionAnswer {
    pub question: String,
    pub answer: String,
}

/// Parses `Question: <q>\nAnswer: <a>`.
///
/// The text before the first `Answer:` (with every `Question:` label removed) is the
/// question; the text between the first and any second `Answer:` is the answer.
/// Returns `None` when there is no `Answer:` marker.
pub fn parse_question(raw: &str) -> Option<QuestionAnswer> {
    let mut parts = raw.split(ANSWER_MARKER);
    let head = parts.next()?;
    let answer = parts.next()?;

    Some(QuestionAnswer {
        question: head.replace(QUESTION_MARKER, "").trim().to_string(),
        answer: answer.trim().to_string(),
    })
}

#[derive(Debug, Clone, Copy)]
pub struct QuestionGenerator {
    pub target_count: usize,
    pub attempt_multiplier: usize,
}

/// Accepted pairs plus how many model calls it took to get them.
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    pub pairs: Vec<QuestionAnswer>,
    pub attempts: usize,
}

impl QuestionGenerator {
    pub fn new(target_count: usize, attempt_multiplier: usize) -> Self {
        Self {
            target_count,
            attempt_multiplier,
        }
    }

    pub fn max_attempts(&self) -> usize {
        self.target_count.saturating_mul(self.attempt_multiplier)
    }

    /// Runs the bounded generation loop. Client failures abort the whole run.
    pub async fn generate(
        &self,
        llm: &dyn InferenceClient,
        jd_text: &str,
    ) -> Result<GenerationOutcome, LlmError> {
        let prompt = question_prompt(jd_text);
        let max_attempts = self.max_attempts();

        let mut accepted: Vec<QuestionAnswer> = Vec::with_capacity(self.target_count);
        let mut seen: HashSet<String> = HashSet::new();
        let mut attempts = 0;

        while accepted.len() < self.target_count && attempts < max_attempts {
            let raw = llm.complete(&prompt).await?;
            attempts += 1;

            let Some(pair) = parse_question(&raw) else {
                debug!(attempt = attempts, "Discarding reply without answer marker");
                continue;
            };

            if !seen.insert(pair.question.to_lowercase()) {
                debug!(attempt = attempts, question = %pair.question, "Discarding duplicate question");
                continue;
            }

            accepted.push(pair);
        }

        if accepted.len() < self.target_count {
            warn!(
                "Attempt budget exhausted: {} of {} questions after {} attempts",
                accepted.len(),
                self.target_count,
                attempts
            );
        } else {
            info!("Generated {} questions in {} attempts", accepted.len(), attempts);
        }

        Ok(GenerationOutcome {
            pairs: accepted,
            attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedClient;

    fn reply(q: &str, a: &str) -> String {
        format!("Question: {q}\nAnswer: {a}")
    }

    #[test]
    fn test_parse_well_formed() {
        let pair = parse_question("Question: Fill in __\nAnswer: widget").unwrap();
        assert_eq!(
            pair,
            QuestionAnswer {
                question: "Fill in __".to_string(),
                answer: "widget".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_garbled_is_none() {
        assert!(parse_question("garbled text with no markers").is_none());
        assert!(parse_question("Question: only a question").is_none());
        assert!(parse_question("").is_none());
    }

    #[test]
    fn test_parse_tolerates_preamble_and_padding() {
        let pair =
            parse_question("Sure! Here it is:\n\nQuestion: The service is written in ____.  \nAnswer:  Go \n")
                .unwrap();
        assert_eq!(pair.question, "Sure! Here it is:\n\n The service is written in ____.");
        assert_eq!(pair.answer, "Go");
    }

    #[test]
    fn test_parse_second_answer_marker_truncates_answer() {
        let pair = parse_question("Question: q\nAnswer: first\nAnswer: second").unwrap();
        assert_eq!(pair.answer, "first");
    }

    #[test]
    fn test_parse_without_question_label() {
        let pair = parse_question("We deploy on ____.\nAnswer: Kubernetes").unwrap();
        assert_eq!(pair.question, "We deploy on ____.");
        assert_eq!(pair.answer, "Kubernetes");
    }

    #[test]
    fn test_max_attempts_is_target_times_multiplier() {
        assert_eq!(QuestionGenerator::new(5, 3).max_attempts(), 15);
        assert_eq!(QuestionGenerator::new(2, 1).max_attempts(), 2);
    }

    #[tokio::test]
    async fn test_generates_target_count_of_unique_questions() {
        let llm = ScriptedClient::new([
            reply("Q1 __", "a1"),
            reply("Q2 __", "a2"),
            reply("Q3 __", "a3"),
        ]);
        let outcome = QuestionGenerator::new(3, 3)
            .generate(&llm, "Senior Go Engineer")
            .await
            .unwrap();

        assert_eq!(outcome.pairs.len(), 3);
        assert_eq!(outcome.attempts, 3);
        assert_eq!(llm.calls(), 3);
        assert_eq!(outcome.pairs[1].question, "Q2 __");
        assert_eq!(outcome.pairs[1].answer, "a2");
        assert!(llm.prompts()[0].contains("Senior Go Engineer"));
    }

    #[tokio::test]
    async fn test_duplicates_are_case_insensitive() {
        let llm = ScriptedClient::new([
            reply("The language is ____.", "Go"),
            reply("THE LANGUAGE IS ____.", "Go"),
            reply("the language is ____.", "go"),
            reply("The database is ____.", "Postgres"),
        ]);
        let outcome = QuestionGenerator::new(2, 3)
            .generate(&llm, "jd")
            .await
            .unwrap();

        let questions: Vec<_> = outcome.pairs.iter().map(|p| p.question.as_str()).collect();
        assert_eq!(questions, vec!["The language is ____.", "The database is ____."]);
        assert_eq!(outcome.attempts, 4);
    }

    #[tokio::test]
    async fn test_malformed_replies_are_skipped_not_fatal() {
        let llm = ScriptedClient::new([
            "garbled text with no markers".to_string(),
            reply("Q1", "a1"),
            "still garbled".to_string(),
            reply("Q2", "a2"),
        ]);
        let outcome = QuestionGenerator::new(2, 3)
            .generate(&llm, "jd")
            .await
            .unwrap();

        assert_eq!(outcome.pairs.len(), 2);
        assert_eq!(outcome.attempts, 4);
    }

    #[tokio::test]
    async fn test_attempt_budget_bounds_model_calls() {
        // Same question forever: only the first is accepted.
        let llm = ScriptedClient::repeating("Question: Same __\nAnswer: same");
        let outcome = QuestionGenerator::new(5, 3)
            .generate(&llm, "jd")
            .await
            .unwrap();

        assert_eq!(outcome.pairs.len(), 1);
        assert_eq!(outcome.attempts, 15);
        assert_eq!(llm.calls(), 15);
    }

    #[tokio::test]
    async fn test_never_exceeds_target() {
        let replies: Vec<String> = (0..20).map(|i| reply(&format!("Q{i}"), "a")).collect();
        let llm = ScriptedClient::new(replies);
        let outcome = QuestionGenerator::new(4, 3)
            .generate(&llm, "jd")
            .await
            .unwrap();

        assert_eq!(outcome.pairs.len(), 4);
        assert_eq!(llm.calls(), 4);
    }

    #[tokio::test]
    async fn test_all_garbled_returns_empty() {
        let llm = ScriptedClient::repeating("nothing useful");
        let outcome = QuestionGenerator::new(2, 3)
            .generate(&llm, "jd")
            .await
            .unwrap();

        assert!(outcome.pairs.is_empty());
        assert_eq!(llm.calls(), 6);
    }

    #[tokio::test]
    async fn test_client_failure_aborts_generation() {
        let llm = ScriptedClient::failing(503);
        let err = QuestionGenerator::new(5, 3)
            .generate(&llm, "jd")
            .await
            .unwrap_err();

        assert!(matches!(err, LlmError::Api { status: 503, .. }));
        assert_eq!(llm.calls(), 1);
    }
}
