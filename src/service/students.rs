//! Student operations
//!
//! All lookups are keyed by the registration code (ra). Duplicate-key
//! conflicts detected by the gateway are classified into field-specific
//! messages, with email taking priority over ra, and ra over cpf, when more
//! than one constraint could apply.

use std::sync::Arc;

use serde_json::Value;

use crate::observability::Logger;
use crate::schema::{validate_new_student, validate_student_patch};
use crate::store::{StoreError, Student, StudentField, StudentStore};

use super::messages;
use super::{ServiceError, ServiceResult};

/// Field-specific conflict text for a unique-constraint rejection.
fn duplicate_message(field: StudentField) -> &'static str {
    match field {
        StudentField::Email => messages::DUPLICATE_EMAIL,
        StudentField::Ra => messages::DUPLICATE_RA,
        StudentField::Cpf => messages::DUPLICATE_CPF,
    }
}

/// Logs the storage failure and yields the fixed per-operation message.
fn unexpected(operation: &'static str, message: &'static str, err: &StoreError) -> ServiceError {
    Logger::error(
        "STORE_ERROR",
        &[("operation", operation), ("detail", &err.to_string())],
    );
    ServiceError::Unexpected(message)
}

/// Orchestrates student CRUD over the persistence gateway.
#[derive(Clone)]
pub struct StudentService {
    store: Arc<dyn StudentStore>,
}

impl StudentService {
    pub fn new(store: Arc<dyn StudentStore>) -> Self {
        Self { store }
    }

    /// Create a student from an untyped payload.
    pub async fn create(&self, payload: &Value) -> ServiceResult<Student> {
        let new = validate_new_student(payload).map_err(ServiceError::Validation)?;

        match self.store.insert(new).await {
            Ok(student) => Ok(student),
            Err(StoreError::UniqueStudentField(field)) => {
                Err(ServiceError::Conflict(duplicate_message(field)))
            }
            Err(err) => Err(unexpected(
                "student.create",
                messages::CREATE_STUDENT_FAILED,
                &err,
            )),
        }
    }

    /// Apply a partial update to the student with the given ra.
    pub async fn update(&self, ra: &str, payload: &Value) -> ServiceResult<Student> {
        let existing = self
            .store
            .find_by_ra(ra)
            .await
            .map_err(|e| unexpected("student.update", messages::UPDATE_STUDENT_FAILED, &e))?;
        if existing.is_none() {
            return Err(ServiceError::NotFound(messages::STUDENT_NOT_FOUND));
        }

        let patch = validate_student_patch(payload).map_err(ServiceError::Validation)?;

        match self.store.update(ra, patch).await {
            Ok(Some(student)) => Ok(student),
            // Deleted between the existence check and the write
            Ok(None) => Err(ServiceError::NotFound(messages::STUDENT_NOT_FOUND)),
            Err(StoreError::UniqueStudentField(field)) => {
                Err(ServiceError::Conflict(duplicate_message(field)))
            }
            Err(err) => Err(unexpected(
                "student.update",
                messages::UPDATE_STUDENT_FAILED,
                &err,
            )),
        }
    }

    /// Delete the student with the given ra; enrollments cascade.
    ///
    /// Returns the confirmation message.
    pub async fn delete(&self, ra: &str) -> ServiceResult<&'static str> {
        let removed = self
            .store
            .delete(ra)
            .await
            .map_err(|e| unexpected("student.delete", messages::DELETE_STUDENT_FAILED, &e))?;

        if removed {
            Ok(messages::STUDENT_DELETED)
        } else {
            Err(ServiceError::NotFound(messages::STUDENT_NOT_FOUND))
        }
    }

    /// Fetch one student by ra.
    pub async fn get(&self, ra: &str) -> ServiceResult<Student> {
        self.store
            .find_by_ra(ra)
            .await
            .map_err(|e| unexpected("student.get", messages::GET_STUDENT_FAILED, &e))?
            .ok_or(ServiceError::NotFound(messages::STUDENT_NOT_FOUND))
    }

    /// Fetch the full collection.
    pub async fn list(&self) -> ServiceResult<Vec<Student>> {
        self.store.list().await.map_err(|err| {
            Logger::error(
                "STORE_ERROR",
                &[("operation", "student.list"), ("detail", &err.to_string())],
            );
            ServiceError::Internal(messages::LIST_STUDENTS_FAILED)
        })
    }

    /// Case-insensitive substring search across ra, name and cpf.
    ///
    /// A missing or empty query is a user error, not an empty-result
    /// success.
    pub async fn search(&self, query: Option<&str>) -> ServiceResult<Vec<Student>> {
        let query = match query {
            Some(q) if !q.is_empty() => q,
            _ => return Err(ServiceError::BadRequest(messages::SEARCH_QUERY_REQUIRED)),
        };

        self.store
            .search(query)
            .await
            .map_err(|e| unexpected("student.search", messages::SEARCH_STUDENTS_FAILED, &e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{MSG_CPF, MSG_NAME_MIN};
    use crate::store::MemoryStore;
    use serde_json::json;

    fn service() -> StudentService {
        StudentService::new(Arc::new(MemoryStore::new()))
    }

    fn joao() -> Value {
        json!({
            "name": "João Silva",
            "email": "joao@example.com",
            "cpf": "12345678901",
            "ra": "RA123456"
        })
    }

    #[tokio::test]
    async fn test_create_echoes_stored_record() {
        let service = service();
        let student = service.create(&joao()).await.unwrap();
        assert_eq!(student.ra, "RA123456");
        assert_eq!(student.name, "João Silva");

        let fetched = service.get("RA123456").await.unwrap();
        assert_eq!(fetched, student);
    }

    #[tokio::test]
    async fn test_create_reports_all_violated_fields() {
        let service = service();
        let err = service
            .create(&json!({
                "name": "x",
                "email": "joao@example.com",
                "cpf": "bad",
                "ra": "RA123456"
            }))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ServiceError::Validation(vec![MSG_NAME_MIN.to_string(), MSG_CPF.to_string()])
        );
    }

    #[tokio::test]
    async fn test_duplicate_ra_names_the_field() {
        let service = service();
        service.create(&joao()).await.unwrap();

        // Same ra, different email and cpf
        let err = service
            .create(&json!({
                "name": "Maria Silva",
                "email": "maria@example.com",
                "cpf": "12345678902",
                "ra": "RA123456"
            }))
            .await
            .unwrap_err();
        assert_eq!(err, ServiceError::Conflict(messages::DUPLICATE_RA));
    }

    #[tokio::test]
    async fn test_duplicate_email_and_cpf_name_their_fields() {
        let service = service();
        service.create(&joao()).await.unwrap();

        let err = service
            .create(&json!({
                "name": "Maria Silva",
                "email": "joao@example.com",
                "cpf": "12345678902",
                "ra": "RA654321"
            }))
            .await
            .unwrap_err();
        assert_eq!(err, ServiceError::Conflict(messages::DUPLICATE_EMAIL));

        let err = service
            .create(&json!({
                "name": "Maria Silva",
                "email": "maria@example.com",
                "cpf": "12345678901",
                "ra": "RA654321"
            }))
            .await
            .unwrap_err();
        assert_eq!(err, ServiceError::Conflict(messages::DUPLICATE_CPF));
    }

    #[tokio::test]
    async fn test_update_unknown_ra_is_not_found() {
        let service = service();
        let err = service
            .update("RA999999", &json!({ "name": "Maria Silva" }))
            .await
            .unwrap_err();
        assert_eq!(err, ServiceError::NotFound(messages::STUDENT_NOT_FOUND));
    }

    #[tokio::test]
    async fn test_update_applies_partial_payload() {
        let service = service();
        service.create(&joao()).await.unwrap();

        let updated = service
            .update("RA123456", &json!({ "name": "João Pedro Silva" }))
            .await
            .unwrap();
        assert_eq!(updated.name, "João Pedro Silva");
        assert_eq!(updated.email, "joao@example.com");
    }

    #[tokio::test]
    async fn test_update_rejects_invalid_field() {
        let service = service();
        service.create(&joao()).await.unwrap();

        let err = service
            .update("RA123456", &json!({ "cpf": "123" }))
            .await
            .unwrap_err();
        assert_eq!(err, ServiceError::Validation(vec![MSG_CPF.to_string()]));
    }

    #[tokio::test]
    async fn test_update_conflict_names_the_field() {
        let service = service();
        service.create(&joao()).await.unwrap();
        service
            .create(&json!({
                "name": "Maria Silva",
                "email": "maria@example.com",
                "cpf": "12345678902",
                "ra": "RA654321"
            }))
            .await
            .unwrap();

        let err = service
            .update("RA654321", &json!({ "email": "joao@example.com" }))
            .await
            .unwrap_err();
        assert_eq!(err, ServiceError::Conflict(messages::DUPLICATE_EMAIL));
    }

    #[tokio::test]
    async fn test_delete_then_get_both_not_found() {
        let service = service();
        service.create(&joao()).await.unwrap();

        assert_eq!(
            service.delete("RA123456").await.unwrap(),
            messages::STUDENT_DELETED
        );

        let err = service.get("RA123456").await.unwrap_err();
        assert_eq!(err, ServiceError::NotFound(messages::STUDENT_NOT_FOUND));

        // Deleting again is a clean not-found, not a fault
        let err = service.delete("RA123456").await.unwrap_err();
        assert_eq!(err, ServiceError::NotFound(messages::STUDENT_NOT_FOUND));
    }

    #[tokio::test]
    async fn test_list_returns_full_collection() {
        let service = service();
        service.create(&joao()).await.unwrap();
        assert_eq!(service.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_search_requires_query() {
        let service = service();

        let err = service.search(None).await.unwrap_err();
        assert_eq!(
            err,
            ServiceError::BadRequest(messages::SEARCH_QUERY_REQUIRED)
        );

        let err = service.search(Some("")).await.unwrap_err();
        assert_eq!(
            err,
            ServiceError::BadRequest(messages::SEARCH_QUERY_REQUIRED)
        );
    }

    #[tokio::test]
    async fn test_search_matches_substring() {
        let service = service();
        service.create(&joao()).await.unwrap();

        let hits = service.search(Some("joão")).await.unwrap();
        assert_eq!(hits.len(), 1);

        let hits = service.search(Some("nobody")).await.unwrap();
        assert!(hits.is_empty());
    }
}
