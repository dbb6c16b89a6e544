//! Validation layer
//!
//! Pure functions that check the shape and content of incoming student and
//! enrollment payloads. Each validator takes an untyped JSON value and
//! returns either a normalized, fully-typed payload or the ordered list of
//! every violated-field message. No I/O, no panics for control flow.
//!
//! All violated fields are reported at once rather than short-circuiting on
//! the first failure; message order follows declared field order
//! (students: name, email, ra, cpf; enrollments: studentRa, course).

mod enrollment;
mod student;
pub mod types;

pub use enrollment::{
    validate_new_enrollment, MSG_COURSE_MIN, MSG_COURSE_REQUIRED, MSG_STUDENT_RA,
};
pub use student::{
    validate_new_student, validate_student_patch, MSG_CPF, MSG_EMAIL, MSG_NAME_MAX, MSG_NAME_MIN,
    MSG_RA,
};

/// Ordered, human-readable field-level error messages
pub type FieldErrors = Vec<String>;
