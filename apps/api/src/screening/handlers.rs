//! Axum route handlers for the Screening API.

use axum::{
    extract::{
        multipart::{Field, MultipartRejection},
        rejection::{JsonRejection, PathRejection},
        Multipart, Path, State,
    },
    http::StatusCode,
    Json,
};
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::screening::flow::{
    discard_session, ensure_questions, session_view, start_interaction, submit_answers,
    NewInteraction, ScoreReport, SessionView, SubmitAnswersRequest,
};
use crate::state::AppState;

/// POST /api/v1/sessions
///
/// Multipart form: `job_description`, `resume` (file), optional `previous_session_id`.
/// Runs extraction, the match check and, on a match, question generation.
pub async fn handle_create_session(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<SessionView>), AppError> {
    let input = read_interaction(multipart?).await?;
    let view = start_interaction(&state, input).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<SessionView>, AppError> {
    let Path(id) = id?;
    Ok(Json(session_view(&state, id).await?))
}

/// POST /api/v1/sessions/:id/questions
///
/// Idempotent: returns stored questions if generation already completed.
pub async fn handle_generate_questions(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<SessionView>, AppError> {
    let Path(id) = id?;
    Ok(Json(ensure_questions(&state, id).await?))
}

/// POST /api/v1/sessions/:id/answers
pub async fn handle_submit_answers(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    request: Result<Json<SubmitAnswersRequest>, JsonRejection>,
) -> Result<Json<ScoreReport>, AppError> {
    let Path(id) = id?;
    let Json(request) = request?;
    Ok(Json(submit_answers(&state, id, request).await?))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = id?;
    discard_session(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn read_interaction(mut multipart: Multipart) -> Result<NewInteraction, AppError> {
    let mut job_description = None;
    let mut resume = None;
    let mut previous_session_id = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "job_description" => job_description = Some(field_text(field).await?),
            "resume" => {
                let file_name = field
                    .file_name()
                    .map(str::to_string)
                    .ok_or_else(|| AppError::Validation("resume must be uploaded as a file".to_string()))?;
                let bytes = field.bytes().await?;
                resume = Some((file_name, bytes));
            }
            "previous_session_id" => {
                let raw = field_text(field).await?;
                let raw = raw.trim();
                if !raw.is_empty() {
                    let id = Uuid::parse_str(raw).map_err(|_| {
                        AppError::Validation(format!("previous_session_id '{raw}' is not a valid id"))
                    })?;
                    previous_session_id = Some(id);
                }
            }
            other => debug!("Ignoring unknown multipart field '{other}'"),
        }
    }

    let job_description = job_description
        .ok_or_else(|| AppError::Validation("job_description is required".to_string()))?;
    let (resume_file_name, resume_bytes) =
        resume.ok_or_else(|| AppError::Validation("resume file is required".to_string()))?;

    Ok(NewInteraction {
        job_description,
        resume_file_name,
        resume_bytes,
        previous_session_id,
    })
}

async fn field_text(field: Field<'_>) -> Result<String, AppError> {
    Ok(field.text().await?)
}
