//! Student payload validation
//!
//! Rules:
//! - `name`: string, 3-100 characters
//! - `email`: syntactically valid e-mail address
//! - `ra`: 6-12 uppercase alphanumeric characters
//! - `cpf`: exactly 11 numeric digits
//!
//! The partial-update variant makes every field optional, but any field
//! present must satisfy its full rule.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::types::{NewStudent, StudentPatch};
use super::FieldErrors;

pub const MSG_NAME_MIN: &str = "O nome deve ter pelo menos 3 caracteres.";
pub const MSG_NAME_MAX: &str = "O nome pode ter no máximo 100 caracteres.";
pub const MSG_EMAIL: &str = "Formato de e-mail inválido.";
pub const MSG_RA: &str = "RA deve ter entre 6 e 12 caracteres, apenas letras e números.";
pub const MSG_CPF: &str = "CPF deve conter exatamente 11 dígitos numéricos.";

pub(crate) static RA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9]{6,12}$").unwrap());

static CPF_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{11}$").unwrap());

// Deliberately loose: one @, non-empty local part, dotted domain, no
// whitespace. Full RFC 5322 parsing is out of scope.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Validates a student creation payload.
///
/// Returns the normalized payload, or every violated-field message in
/// declared field order (name, email, ra, cpf).
pub fn validate_new_student(input: &Value) -> Result<NewStudent, FieldErrors> {
    let mut errors = Vec::new();

    let name = collect(check_name(input.get("name")), &mut errors);
    let email = collect(check_email(input.get("email")), &mut errors);
    let ra = collect(check_ra(input.get("ra")), &mut errors);
    let cpf = collect(check_cpf(input.get("cpf")), &mut errors);

    match (name, email, ra, cpf) {
        (Some(name), Some(email), Some(ra), Some(cpf)) => Ok(NewStudent {
            ra,
            name,
            email,
            cpf,
        }),
        _ => Err(errors),
    }
}

/// Validates a student partial-update payload.
///
/// Absent fields are left unchanged; present fields obey their full rule.
/// `ra` is immutable and ignored if present in the body.
pub fn validate_student_patch(input: &Value) -> Result<StudentPatch, FieldErrors> {
    let mut errors = Vec::new();
    let mut patch = StudentPatch::default();

    if input.get("name").is_some() {
        patch.name = collect(check_name(input.get("name")), &mut errors);
    }
    if input.get("email").is_some() {
        patch.email = collect(check_email(input.get("email")), &mut errors);
    }
    if input.get("cpf").is_some() {
        patch.cpf = collect(check_cpf(input.get("cpf")), &mut errors);
    }

    if errors.is_empty() {
        Ok(patch)
    } else {
        Err(errors)
    }
}

/// Records the failure message, if any, and yields the normalized value.
fn collect(result: Result<String, &'static str>, errors: &mut Vec<String>) -> Option<String> {
    match result {
        Ok(value) => Some(value),
        Err(message) => {
            errors.push(message.to_string());
            None
        }
    }
}

fn check_name(value: Option<&Value>) -> Result<String, &'static str> {
    match value.and_then(Value::as_str) {
        Some(s) if s.chars().count() > 100 => Err(MSG_NAME_MAX),
        Some(s) if s.chars().count() >= 3 => Ok(s.to_string()),
        // Missing or non-string values fail the minimum-length rule
        _ => Err(MSG_NAME_MIN),
    }
}

fn check_email(value: Option<&Value>) -> Result<String, &'static str> {
    match value.and_then(Value::as_str) {
        Some(s) if EMAIL_RE.is_match(s) => Ok(s.to_string()),
        _ => Err(MSG_EMAIL),
    }
}

fn check_ra(value: Option<&Value>) -> Result<String, &'static str> {
    match value.and_then(Value::as_str) {
        Some(s) if RA_RE.is_match(s) => Ok(s.to_string()),
        _ => Err(MSG_RA),
    }
}

fn check_cpf(value: Option<&Value>) -> Result<String, &'static str> {
    match value.and_then(Value::as_str) {
        Some(s) if CPF_RE.is_match(s) => Ok(s.to_string()),
        _ => Err(MSG_CPF),
    }
}
