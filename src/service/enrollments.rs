//! Enrollment operations
//!
//! An enrollment is a dependent record: creation requires the referenced
//! student to exist and the (student, course) pair to be new. Both checks
//! run proactively before the insert; the storage-level constraints remain
//! the backstop for races, and their rejections map to the same messages so
//! the observable contract does not depend on the race outcome. Enrollments
//! are immutable once created: there is no update, only delete and
//! recreate.

use std::sync::Arc;

use serde_json::Value;

use crate::observability::Logger;
use crate::schema::validate_new_enrollment;
use crate::store::{Enrollment, EnrollmentStore, StoreError, StudentStore};

use super::messages;
use super::{ServiceError, ServiceResult};

fn unexpected(operation: &'static str, message: &'static str, err: &StoreError) -> ServiceError {
    Logger::error(
        "STORE_ERROR",
        &[("operation", operation), ("detail", &err.to_string())],
    );
    ServiceError::Unexpected(message)
}

/// Orchestrates enrollment operations over the persistence gateway.
#[derive(Clone)]
pub struct EnrollmentService {
    students: Arc<dyn StudentStore>,
    enrollments: Arc<dyn EnrollmentStore>,
}

impl EnrollmentService {
    pub fn new(students: Arc<dyn StudentStore>, enrollments: Arc<dyn EnrollmentStore>) -> Self {
        Self {
            students,
            enrollments,
        }
    }

    /// Create an enrollment from an untyped payload.
    ///
    /// Outcome order: validation errors, then unknown student (404), then
    /// duplicate (student, course) pair (conflict).
    pub async fn create(&self, payload: &Value) -> ServiceResult<Enrollment> {
        let new = validate_new_enrollment(payload).map_err(ServiceError::Validation)?;

        let student = self
            .students
            .find_by_ra(&new.student_ra)
            .await
            .map_err(|e| unexpected("enrollment.create", messages::CREATE_ENROLLMENT_FAILED, &e))?;
        if student.is_none() {
            return Err(ServiceError::NotFound(messages::STUDENT_NOT_FOUND));
        }

        let existing = self
            .enrollments
            .find_by_student_and_course(&new.student_ra, &new.course)
            .await
            .map_err(|e| unexpected("enrollment.create", messages::CREATE_ENROLLMENT_FAILED, &e))?;
        if existing.is_some() {
            return Err(ServiceError::Conflict(messages::DUPLICATE_ENROLLMENT));
        }

        match self.enrollments.insert(new).await {
            Ok(enrollment) => Ok(enrollment),
            // A concurrent create won the race; same message as the check
            Err(StoreError::DuplicateEnrollment) => {
                Err(ServiceError::Conflict(messages::DUPLICATE_ENROLLMENT))
            }
            // A concurrent student delete won the race
            Err(StoreError::MissingStudent) => {
                Err(ServiceError::NotFound(messages::STUDENT_NOT_FOUND))
            }
            Err(err) => Err(unexpected(
                "enrollment.create",
                messages::CREATE_ENROLLMENT_FAILED,
                &err,
            )),
        }
    }

    /// Fetch one enrollment by surrogate id.
    pub async fn get(&self, id: i32) -> ServiceResult<Enrollment> {
        self.enrollments
            .find_by_id(id)
            .await
            .map_err(|e| unexpected("enrollment.get", messages::GET_ENROLLMENT_FAILED, &e))?
            .ok_or(ServiceError::NotFound(messages::ENROLLMENT_NOT_FOUND))
    }

    /// Fetch the full collection.
    pub async fn list(&self) -> ServiceResult<Vec<Enrollment>> {
        self.enrollments.list().await.map_err(|err| {
            Logger::error(
                "STORE_ERROR",
                &[
                    ("operation", "enrollment.list"),
                    ("detail", &err.to_string()),
                ],
            );
            ServiceError::Internal(messages::LIST_ENROLLMENTS_FAILED)
        })
    }

    /// Delete an enrollment by surrogate id.
    ///
    /// Returns the confirmation message.
    pub async fn delete(&self, id: i32) -> ServiceResult<&'static str> {
        let removed = self
            .enrollments
            .delete(id)
            .await
            .map_err(|e| unexpected("enrollment.delete", messages::DELETE_ENROLLMENT_FAILED, &e))?;

        if removed {
            Ok(messages::ENROLLMENT_DELETED)
        } else {
            Err(ServiceError::NotFound(messages::ENROLLMENT_NOT_FOUND))
        }
    }
}
