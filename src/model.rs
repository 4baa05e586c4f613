use serde::Serialize;

/// A stored feedback row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: i64,
    pub student_name: String,
    pub course_code: String,
    pub comments: Option<String>,
    pub rating: i32,
}

/// Validated, trimmed input for a new feedback row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFeedback {
    pub student_name: String,
    pub course_code: String,
    pub comments: Option<String>,
    pub rating: i32,
}
