//! Screening flow: one function per user action, each working on an explicit session.
//!
//! start → (match) → generate once → submit. Sessions live in `AppState::sessions`;
//! no lock is held while the model is being called.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extract::{extract_text, DocumentFormat, UNSUPPORTED_TEXT};
use crate::screening::matcher::evaluate_match;
use crate::session::{Session, SessionError, SessionPhase, Submission};
use crate::state::AppState;

pub const NOT_MATCHED_NOTICE: &str =
    "Resume does not match the Job Description. Questions not generated.";
pub const NO_QUESTIONS_NOTICE: &str = "No questions could be generated from the job description.";

/// Everything the form submits when the user starts over.
#[derive(Debug)]
pub struct NewInteraction {
    pub job_description: String,
    pub resume_file_name: String,
    pub resume_bytes: Bytes,
    pub previous_session_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct SubmitAnswersRequest {
    pub answers: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct QuestionView {
    pub number: usize,
    pub prompt: String,
}

#[derive(Debug, Serialize)]
pub struct QuestionResult {
    pub number: usize,
    pub question: String,
    pub submitted: String,
    pub correct: bool,
    /// Only revealed for wrong answers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ScoreReport {
    pub results: Vec<QuestionResult>,
    pub correct_count: usize,
    pub total: usize,
    /// `"<score> / <total>"`
    pub summary: String,
}

impl ScoreReport {
    fn build(questions: &[String], answers: &[String], submission: &Submission) -> Self {
        let results = questions
            .iter()
            .zip(answers)
            .zip(&submission.user_answers)
            .zip(&submission.score.per_question)
            .enumerate()
            .map(|(i, (((question, answer), submitted), correct))| QuestionResult {
                number: i + 1,
                question: question.clone(),
                submitted: submitted.clone(),
                correct: *correct,
                correct_answer: (!correct).then(|| answer.clone()),
            })
            .collect();

        ScoreReport {
            results,
            correct_count: submission.score.correct_count,
            total: submission.score.total,
            summary: format!(
                "{} / {}",
                submission.score.correct_count, submission.score.total
            ),
        }
    }
}

/// What the form renders for a session. Correct answers never appear here
/// before submission.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub session_id: Uuid,
    pub phase: SessionPhase,
    /// No further action is possible on this session.
    pub terminal: bool,
    pub matched: Option<bool>,
    pub resume_format: DocumentFormat,
    pub notices: Vec<String>,
    pub questions: Vec<QuestionView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ScoreReport>,
}

impl From<&Session> for SessionView {
    fn from(session: &Session) -> Self {
        let mut notices = Vec::new();
        if session.resume_format == DocumentFormat::Unsupported {
            notices.push(UNSUPPORTED_TEXT.to_string());
        }
        if session.phase() == SessionPhase::NotMatched {
            notices.push(NOT_MATCHED_NOTICE.to_string());
        }
        if session.generated() && session.questions().is_empty() {
            notices.push(NO_QUESTIONS_NOTICE.to_string());
        }

        SessionView {
            session_id: session.id,
            phase: session.phase(),
            terminal: session.phase().is_terminal(),
            matched: session.match_decision(),
            resume_format: session.resume_format,
            notices,
            questions: session
                .questions()
                .iter()
                .enumerate()
                .map(|(i, q)| QuestionView {
                    number: i + 1,
                    prompt: q.clone(),
                })
                .collect(),
            result: session
                .submission()
                .map(|s| ScoreReport::build(session.questions(), session.answers(), s)),
        }
    }
}

/// Starts a fresh session: discards the previous one, extracts the resume, runs the
/// match check and, on a match, the one-time question generation.
pub async fn start_interaction(
    state: &AppState,
    input: NewInteraction,
) -> Result<SessionView, AppError> {
    if input.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }

    if let Some(previous) = input.previous_session_id {
        if state.sessions.remove(previous).await.is_some() {
            info!(session_id = %previous, "Discarded previous session");
        }
    }

    let file_name = input.resume_file_name;
    let bytes = input.resume_bytes;
    let document = tokio::task::spawn_blocking(move || extract_text(&file_name, &bytes))
        .await
        .map_err(|e| AppError::Internal(e.into()))??;

    if !document.is_supported() {
        warn!("Unsupported resume file type; continuing with placeholder text");
    }

    let mut session = Session::new(input.job_description, document.text, document.format);
    session.begin_match()?;
    let matched = evaluate_match(
        state.llm.as_ref(),
        &session.job_description,
        &session.resume_text,
    )
    .await?;
    session.record_match(matched)?;

    let id = state.sessions.insert(session).await;
    let active_sessions = state.sessions.len().await;
    info!(session_id = %id, matched, active_sessions, "Session created");

    if matched {
        ensure_questions(state, id).await
    } else {
        session_view(state, id).await
    }
}

/// Generates the session's questions unless that already happened.
pub async fn ensure_questions(state: &AppState, id: Uuid) -> Result<SessionView, AppError> {
    let claimed = state
        .sessions
        .update(id, |session| {
            if session.generated() {
                return Ok(None);
            }
            session.begin_generation()?;
            Ok(Some(session.job_description.clone()))
        })
        .await?;

    let Some(jd_text) = claimed else {
        return session_view(state, id).await;
    };

    match state.generator.generate(state.llm.as_ref(), &jd_text).await {
        Ok(outcome) => {
            state
                .sessions
                .update(id, |session| session.complete_generation(outcome.pairs))
                .await?;
        }
        Err(e) => {
            if let Err(rollback) = state.sessions.update(id, Session::abort_generation).await {
                warn!(session_id = %id, "Could not roll back failed generation: {rollback}");
            }
            return Err(e.into());
        }
    }

    session_view(state, id).await
}

pub async fn session_view(state: &AppState, id: Uuid) -> Result<SessionView, AppError> {
    let session = state.sessions.get(id).await?;
    Ok(SessionView::from(&session))
}

pub async fn submit_answers(
    state: &AppState,
    id: Uuid,
    request: SubmitAnswersRequest,
) -> Result<ScoreReport, AppError> {
    let report = state
        .sessions
        .update(id, |session| {
            let submission = session.submit(request.answers)?.clone();
            Ok(ScoreReport::build(
                session.questions(),
                session.answers(),
                &submission,
            ))
        })
        .await?;

    info!(session_id = %id, score = %report.summary, "Answers submitted");
    Ok(report)
}

pub async fn discard_session(state: &AppState, id: Uuid) -> Result<(), AppError> {
    state
        .sessions
        .remove(id)
        .await
        .map(|_| ())
        .ok_or_else(|| SessionError::NotFound(id).into())
}
