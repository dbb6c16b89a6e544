//! Persistence gateway
//!
//! A thin accessor pair over the relational store, one trait per table.
//! The service layer consumes the traits only, which keeps storage concerns
//! out of the business logic and makes the gateway mockable: the Postgres
//! implementation backs the running server, the in-memory implementation
//! backs tests while enforcing the same uniqueness and referential
//! invariants.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::schema::types::{NewEnrollment, NewStudent, StudentPatch};

/// A persisted student record, keyed by registration code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub ra: String,
    pub name: String,
    pub email: String,
    pub cpf: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A persisted enrollment record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub id: i32,
    pub student_ra: String,
    pub course: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Student column protected by a unique constraint.
///
/// Ordering matters: when a unique violation cannot be attributed to a
/// single constraint, classification tries email, then ra, then cpf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudentField {
    Email,
    Ra,
    Cpf,
}

/// Gateway errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique constraint on the students table rejected the write
    #[error("duplicate value for unique student field")]
    UniqueStudentField(StudentField),

    /// The composite (student_ra, course) index rejected the insert
    #[error("enrollment already exists for this student and course")]
    DuplicateEnrollment,

    /// The foreign key to students.ra rejected the insert
    #[error("referenced student does not exist")]
    MissingStudent,

    /// Gateway invariant broken in-process (lock poisoned, etc.)
    #[error("store internal error: {0}")]
    Internal(String),

    /// Unclassified database failure
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Result type for gateway operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Accessor over the `students` table
#[async_trait]
pub trait StudentStore: Send + Sync {
    /// Look up a student by registration code.
    async fn find_by_ra(&self, ra: &str) -> StoreResult<Option<Student>>;

    /// Return the full collection.
    async fn list(&self) -> StoreResult<Vec<Student>>;

    /// Case-insensitive substring search across ra, name and cpf.
    async fn search(&self, query: &str) -> StoreResult<Vec<Student>>;

    /// Insert a new student, rejecting duplicate email/ra/cpf.
    async fn insert(&self, new: NewStudent) -> StoreResult<Student>;

    /// Apply the supplied fields to an existing student.
    ///
    /// Returns `None` when no student carries the given ra.
    async fn update(&self, ra: &str, patch: StudentPatch) -> StoreResult<Option<Student>>;

    /// Delete a student; owned enrollments go with it.
    ///
    /// Returns whether a row was removed.
    async fn delete(&self, ra: &str) -> StoreResult<bool>;
}

/// Accessor over the `enrollments` table
#[async_trait]
pub trait EnrollmentStore: Send + Sync {
    /// Look up an enrollment by surrogate id.
    async fn find_by_id(&self, id: i32) -> StoreResult<Option<Enrollment>>;

    /// Look up the enrollment for a (student, course) pair, if any.
    async fn find_by_student_and_course(
        &self,
        student_ra: &str,
        course: &str,
    ) -> StoreResult<Option<Enrollment>>;

    /// Return the full collection.
    async fn list(&self) -> StoreResult<Vec<Enrollment>>;

    /// Insert a new enrollment, rejecting duplicate (student, course) pairs
    /// and unknown students.
    async fn insert(&self, new: NewEnrollment) -> StoreResult<Enrollment>;

    /// Delete an enrollment by surrogate id.
    ///
    /// Returns whether a row was removed.
    async fn delete(&self, id: i32) -> StoreResult<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_student_serializes_camel_case() {
        let student = Student {
            ra: "RA123456".to_string(),
            name: "João Silva".to_string(),
            email: "joao@example.com".to_string(),
            cpf: "12345678901".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let value = serde_json::to_value(&student).unwrap();
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
        assert_eq!(value["ra"], json!("RA123456"));
    }

    #[test]
    fn test_enrollment_serializes_camel_case() {
        let enrollment = Enrollment {
            id: 1,
            student_ra: "RA123456".to_string(),
            course: "Programação Web".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let value = serde_json::to_value(&enrollment).unwrap();
        assert_eq!(value["studentRa"], json!("RA123456"));
        assert!(value.get("student_ra").is_none());
    }
}
