//! Normalized payload types produced by the validation layer

/// A validated payload for creating a student.
///
/// All fields have passed their full rule: `ra` matches the 6-12 uppercase
/// alphanumeric pattern, `cpf` is exactly 11 digits, `email` is
/// syntactically valid and `name` is 3-100 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub ra: String,
    pub name: String,
    pub email: String,
    pub cpf: String,
}

/// A validated partial update for a student.
///
/// Every field is optional, but any field present satisfied its full rule.
/// `ra` is immutable and never part of a patch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub cpf: Option<String>,
}

impl StudentPatch {
    /// True when the patch carries no fields (a no-op update).
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.cpf.is_none()
    }
}

/// A validated payload for creating an enrollment.
///
/// `course` is stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEnrollment {
    pub student_ra: String,
    pub course: String,
}
