use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};

use tracing::info;

use crate::api::{CreateFeedbackRequest, MessageResponse, StatusResponse};
use crate::db::Database;
use crate::error::FeedbackError;
use crate::model::Feedback;
use crate::validate;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
}

pub async fn healthcheck() -> impl IntoResponse {
    info!("got healthcheck request");
    Json(StatusResponse::new("ok"))
}

pub async fn create_feedback(
    State(state): State<AppState>,
    payload: Result<Json<CreateFeedbackRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Feedback>), FeedbackError> {
    let Json(payload) = payload?;
    let input = validate::new_feedback(payload)?;

    let feedback = state
        .db
        .insert_feedback(&input)
        .await
        .map_err(|e| FeedbackError::storage("Database error", e))?;

    info!(id = feedback.id, course = %feedback.course_code, "feedback created");
    Ok((StatusCode::CREATED, Json(feedback)))
}

pub async fn list_feedback(State(state): State<AppState>) -> Result<Json<Vec<Feedback>>, FeedbackError> {
    let feedback = state
        .db
        .list_feedback()
        .await
        .map_err(|e| FeedbackError::storage("Database error", e))?;

    Ok(Json(feedback))
}

pub async fn delete_feedback(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<MessageResponse>, FeedbackError> {
    let Path(id) = id.map_err(|e| {
        tracing::debug!(error = %e, "rejected feedback id");
        FeedbackError::InvalidId
    })?;
    // Well-formed but beyond i64 cannot name a stored row.
    let id = parse_id(&id)?.ok_or(FeedbackError::NotFound)?;

    let deleted = state
        .db
        .delete_feedback(id)
        .await
        .map_err(|e| FeedbackError::storage("Delete failed", e))?;

    if !deleted {
        return Err(FeedbackError::NotFound);
    }

    info!(id, "feedback deleted");
    Ok(Json(MessageResponse::new("Deleted")))
}

/// Accepts only ASCII digit strings. `Ok(None)` means the digits do not fit
/// in an `i64`.
fn parse_id(raw: &str) -> Result<Option<i64>, FeedbackError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FeedbackError::InvalidId);
    }
    Ok(raw.parse().ok())
}
