use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::api::ErrorResponse;
use crate::validate::ValidationError;

#[derive(Debug, Error)]
pub enum FeedbackError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Invalid JSON body")]
    InvalidBody(#[from] JsonRejection),
    #[error("Invalid ID")]
    InvalidId,
    #[error("Feedback not found")]
    NotFound,
    /// Opaque to the caller; `error` is only logged.
    #[error("{context}")]
    Storage {
        context: &'static str,
        error: anyhow::Error,
    },
}

impl FeedbackError {
    pub fn storage(context: &'static str, error: anyhow::Error) -> Self {
        FeedbackError::Storage { context, error }
    }

    pub fn status(&self) -> StatusCode {
        use FeedbackError::*;
        match self {
            Validation(_) | InvalidBody(_) | InvalidId => StatusCode::BAD_REQUEST,
            NotFound => StatusCode::NOT_FOUND,
            Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for FeedbackError {
    fn into_response(self) -> Response {
        match &self {
            FeedbackError::Storage { context, error } => {
                tracing::error!(error = %format!("{error:#}"), "{}", context);
            }
            FeedbackError::InvalidBody(rejection) => {
                tracing::debug!(error = %rejection, "rejected request body");
            }
            _ => {}
        }

        let body = ErrorResponse {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(
            FeedbackError::from(ValidationError::MissingFields).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(FeedbackError::InvalidId.status(), StatusCode::BAD_REQUEST);
        assert_eq!(FeedbackError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            FeedbackError::storage("Database error", anyhow::anyhow!("disk I/O error")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn storage_message_hides_cause() {
        let err = FeedbackError::storage("Delete failed", anyhow::anyhow!("no such table: Feedback"));
        assert_eq!(err.to_string(), "Delete failed");
    }

    #[test]
    fn validation_message_passes_through() {
        let err = FeedbackError::from(ValidationError::InvalidRating);
        assert_eq!(err.to_string(), "Rating must be an integer 1-5");
    }
}
