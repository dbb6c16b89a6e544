//! Enrollment payload validation
//!
//! Rules:
//! - `studentRa`: required, same 6-12 uppercase alphanumeric pattern as the
//!   student registration code
//! - `course`: required, non-empty after trimming, minimum 3 characters
//!
//! When both fields fail, the `studentRa` message precedes the `course`
//! message, matching the declared field order.

use serde_json::Value;

use super::student::RA_RE;
use super::types::NewEnrollment;
use super::FieldErrors;

pub const MSG_STUDENT_RA: &str =
    "O RA do aluno é obrigatório e deve ter entre 6 e 12 caracteres, apenas letras e números.";
pub const MSG_COURSE_REQUIRED: &str = "O curso é obrigatório.";
pub const MSG_COURSE_MIN: &str = "O nome do curso deve ter pelo menos 3 caracteres.";

/// Validates an enrollment creation payload.
///
/// Returns the normalized payload (course trimmed), or every violated-field
/// message in declared field order (studentRa, course).
pub fn validate_new_enrollment(input: &Value) -> Result<NewEnrollment, FieldErrors> {
    let mut errors = Vec::new();

    let student_ra = match input.get("studentRa").and_then(Value::as_str) {
        Some(s) if RA_RE.is_match(s) => Some(s.to_string()),
        _ => {
            errors.push(MSG_STUDENT_RA.to_string());
            None
        }
    };

    let course = match input.get("course").and_then(Value::as_str) {
        Some(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                errors.push(MSG_COURSE_REQUIRED.to_string());
                None
            } else if trimmed.chars().count() < 3 {
                errors.push(MSG_COURSE_MIN.to_string());
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        None => {
            errors.push(MSG_COURSE_REQUIRED.to_string());
            None
        }
    };

    match (student_ra, course) {
        (Some(student_ra), Some(course)) => Ok(NewEnrollment { student_ra, course }),
        _ => Err(errors),
    }
}
