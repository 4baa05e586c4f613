use serde_json::{Number, Value};
use thiserror::Error;

use crate::api::CreateFeedbackRequest;
use crate::model::NewFeedback;

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing required fields")]
    MissingFields,
    #[error("Rating must be an integer 1-5")]
    InvalidRating,
}

/// Non-string values count as absent.
fn trimmed(value: Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(v)) => Some(v.trim().to_string()).filter(|v| !v.is_empty()),
        _ => None,
    }
}

/// Accepts any JSON number with no fractional part, so `5` and `5.0` are
/// both a rating of five.
fn parse_rating(value: &Number) -> Result<i32, ValidationError> {
    let integral = match value.as_i64() {
        Some(n) => n,
        None => {
            let n = value.as_f64().ok_or(ValidationError::InvalidRating)?;
            if !n.is_finite() || n.fract() != 0.0 {
                return Err(ValidationError::InvalidRating);
            }
            // Saturating cast, out-of-range values fail the bounds check.
            n as i64
        }
    };

    if !(i64::from(MIN_RATING)..=i64::from(MAX_RATING)).contains(&integral) {
        return Err(ValidationError::InvalidRating);
    }
    Ok(integral as i32)
}

pub fn new_feedback(req: CreateFeedbackRequest) -> Result<NewFeedback, ValidationError> {
    let (Some(student_name), Some(course_code), Some(raw_rating)) =
        (trimmed(req.student_name), trimmed(req.course_code), req.rating)
    else {
        return Err(ValidationError::MissingFields);
    };

    let rating = match raw_rating {
        Value::Number(n) => parse_rating(&n)?,
        _ => return Err(ValidationError::InvalidRating),
    };

    Ok(NewFeedback {
        student_name,
        course_code,
        comments: trimmed(req.comments),
        rating,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, course: &str, rating: serde_json::Value) -> CreateFeedbackRequest {
        serde_json::from_value(serde_json::json!({
            "studentName": name,
            "courseCode": course,
            "rating": rating,
        }))
        .unwrap()
    }

    #[test]
    fn trims_text_fields() {
        let mut req = request("  Alice ", "\tCS101\n", serde_json::json!(5));
        req.comments = Some("  great course  ".into());

        let fb = new_feedback(req).unwrap();
        assert_eq!(fb.student_name, "Alice");
        assert_eq!(fb.course_code, "CS101");
        assert_eq!(fb.comments.as_deref(), Some("great course"));
        assert_eq!(fb.rating, 5);
    }

    #[test]
    fn blank_comments_become_none() {
        let mut req = request("Alice", "CS101", serde_json::json!(3));
        req.comments = Some("   ".into());
        assert_eq!(new_feedback(req).unwrap().comments, None);
    }

    #[test]
    fn missing_or_blank_required_fields() {
        assert_eq!(
            new_feedback(request("", "CS101", serde_json::json!(4))),
            Err(ValidationError::MissingFields)
        );
        assert_eq!(
            new_feedback(request("Alice", "   ", serde_json::json!(4))),
            Err(ValidationError::MissingFields)
        );
        assert_eq!(
            new_feedback(CreateFeedbackRequest {
                student_name: Some("Alice".into()),
                course_code: Some("CS101".into()),
                ..Default::default()
            }),
            Err(ValidationError::MissingFields)
        );
    }

    #[test]
    fn missing_fields_reported_before_rating() {
        assert_eq!(
            new_feedback(request("", "CS101", serde_json::json!(9))),
            Err(ValidationError::MissingFields)
        );
    }

    #[test]
    fn rating_bounds() {
        for bad in [serde_json::json!(0), serde_json::json!(6), serde_json::json!(-1)] {
            assert_eq!(
                new_feedback(request("Alice", "CS101", bad)),
                Err(ValidationError::InvalidRating)
            );
        }
        for good in 1..=5 {
            let fb = new_feedback(request("Alice", "CS101", serde_json::json!(good))).unwrap();
            assert_eq!(fb.rating, good);
        }
    }

    #[test]
    fn rating_must_be_integral() {
        assert_eq!(
            new_feedback(request("Alice", "CS101", serde_json::json!(4.5))),
            Err(ValidationError::InvalidRating)
        );
        assert_eq!(
            new_feedback(request("Alice", "CS101", serde_json::json!(4.0)))
                .unwrap()
                .rating,
            4
        );
        assert_eq!(
            new_feedback(request("Alice", "CS101", serde_json::json!(u64::MAX))),
            Err(ValidationError::InvalidRating)
        );
    }

    #[test]
    fn non_string_text_fields_count_as_missing() {
        assert_eq!(
            new_feedback(serde_json::from_value(serde_json::json!({
                "studentName": 3,
                "courseCode": "CS101",
                "rating": 5,
            })).unwrap()),
            Err(ValidationError::MissingFields)
        );

        let mut req = request("Alice", "CS101", serde_json::json!(5));
        req.comments = Some(serde_json::json!(["not", "text"]));
        assert_eq!(new_feedback(req).unwrap().comments, None);
    }

    #[test]
    fn non_number_rating_is_invalid() {
        for bad in [serde_json::json!("5"), serde_json::json!(true), serde_json::json!({"value": 5})] {
            assert_eq!(
                new_feedback(request("Alice", "CS101", bad)),
                Err(ValidationError::InvalidRating)
            );
        }
    }
}
