//! Session state machine
//!
//! ```text
//! Empty → MatchPending → Matched | NotMatched
//! Matched → Generating → ReadyForInput → Submitted
//! ```
//!
//! `NotMatched` and `Submitted` are terminal. A failed generation rolls back from
//! `Generating` to `Matched`, so `generated` flips from false to true at most once.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::extract::DocumentFormat;
use crate::screening::questions::QuestionAnswer;
use crate::screening::scoring::{score, Score};
use crate::session::SessionError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Empty,
    MatchPending,
    Matched,
    NotMatched,
    Generating,
    ReadyForInput,
    Submitted,
}

impl SessionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionPhase::Empty => "empty",
            SessionPhase::MatchPending => "match_pending",
            SessionPhase::Matched => "matched",
            SessionPhase::NotMatched => "not_matched",
            SessionPhase::Generating => "generating",
            SessionPhase::ReadyForInput => "ready_for_input",
            SessionPhase::Submitted => "submitted",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionPhase::NotMatched | SessionPhase::Submitted)
    }
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the user typed and how it scored.
#[derive(Clone, Debug)]
pub struct Submission {
    pub user_answers: Vec<String>,
    pub score: Score,
}

/// One evaluation attempt: a job description, a resume, and everything derived
/// from them. `questions` and `answers` are index-aligned.
#[derive(Clone, Debug)]
pub struct Session {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub job_description: String,
    pub resume_text: String,
    pub resume_format: DocumentFormat,
    match_decision: Option<bool>,
    questions: Vec<String>,
    answers: Vec<String>,
    generated: bool,
    phase: SessionPhase,
    submission: Option<Submission>,
}

impl Session {
    pub fn new(job_description: String, resume_text: String, resume_format: DocumentFormat) -> Self {
        Session {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            job_description,
            resume_text,
            resume_format,
            match_decision: None,
            questions: Vec::new(),
            answers: Vec::new(),
            generated: false,
            phase: SessionPhase::Empty,
            submission: None,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn match_decision(&self) -> Option<bool> {
        self.match_decision
    }

    pub fn generated(&self) -> bool {
        self.generated
    }

    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    pub fn submission(&self) -> Option<&Submission> {
        self.submission.as_ref()
    }

    pub fn begin_match(&mut self) -> Result<(), SessionError> {
        self.expect_phase(SessionPhase::Empty, "evaluate match")?;
        self.phase = SessionPhase::MatchPending;
        Ok(())
    }

    pub fn record_match(&mut self, matched: bool) -> Result<(), SessionError> {
        self.expect_phase(SessionPhase::MatchPending, "record match")?;
        self.match_decision = Some(matched);
        self.phase = if matched {
            SessionPhase::Matched
        } else {
            SessionPhase::NotMatched
        };
        Ok(())
    }

    /// Claims the one-time generation slot.
    pub fn begin_generation(&mut self) -> Result<(), SessionError> {
        if self.generated {
            return Err(SessionError::AlreadyGenerated);
        }
        self.expect_phase(SessionPhase::Matched, "generate questions")?;
        self.phase = SessionPhase::Generating;
        Ok(())
    }

    pub fn complete_generation(&mut self, pairs: Vec<QuestionAnswer>) -> Result<(), SessionError> {
        self.expect_phase(SessionPhase::Generating, "complete generation")?;
        let (questions, answers): (Vec<String>, Vec<String>) =
            pairs.into_iter().map(|p| (p.question, p.answer)).unzip();
        self.questions = questions;
        self.answers = answers;
        self.generated = true;
        self.phase = SessionPhase::ReadyForInput;
        Ok(())
    }

    /// Releases the generation slot after a failed run so it can be retried.
    pub fn abort_generation(&mut self) -> Result<(), SessionError> {
        self.expect_phase(SessionPhase::Generating, "abort generation")?;
        self.phase = SessionPhase::Matched;
        Ok(())
    }

    pub fn submit(&mut self, user_answers: Vec<String>) -> Result<&Submission, SessionError> {
        self.expect_phase(SessionPhase::ReadyForInput, "submit answers")?;
        if user_answers.len() != self.answers.len() {
            return Err(SessionError::AnswerCountMismatch {
                expected: self.answers.len(),
                actual: user_answers.len(),
            });
        }

        let score = score(&user_answers, &self.answers);
        self.phase = SessionPhase::Submitted;
        Ok(&*self.submission.insert(Submission {
            user_answers,
            score,
        }))
    }

    fn expect_phase(&self, expected: SessionPhase, action: &'static str) -> Result<(), SessionError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(SessionError::WrongPhase {
                action,
                phase: self.phase,
            })
        }
    }
}
