use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /api/feedback`. Fields are kept as raw JSON so that missing
/// or wrongly typed values surface as validation errors rather than extractor
/// rejections.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFeedbackRequest {
    #[serde(default)]
    pub student_name: Option<Value>,
    #[serde(default)]
    pub course_code: Option<Value>,
    #[serde(default)]
    pub comments: Option<Value>,
    #[serde(default)]
    pub rating: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
}

impl MessageResponse {
    pub fn new(msg: &str) -> Self {
        MessageResponse {
            message: msg.to_owned(),
        }
    }
}

impl StatusResponse {
    pub fn new(msg: &str) -> Self {
        StatusResponse {
            status: msg.to_owned(),
        }
    }
}
