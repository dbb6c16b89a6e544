//! Service-level lifecycle properties
//!
//! Exercises the record services over the in-memory gateway, including the
//! race backstop: a storage-level constraint rejection must surface as the
//! same message as the proactive check.

use std::sync::Arc;

use serde_json::json;

use matricula::schema::types::NewEnrollment;
use matricula::service::{messages, EnrollmentService, ServiceError, StudentService};
use matricula::store::{EnrollmentStore, MemoryStore, StoreError};

fn services() -> (Arc<MemoryStore>, StudentService, EnrollmentService) {
    let store = Arc::new(MemoryStore::new());
    (
        store.clone(),
        StudentService::new(store.clone()),
        EnrollmentService::new(store.clone(), store),
    )
}

fn student(ra: &str, email: &str, cpf: &str) -> serde_json::Value {
    json!({ "name": "Maria Silva", "email": email, "cpf": cpf, "ra": ra })
}

#[tokio::test]
async fn test_create_get_round_trip_preserves_fields() {
    let (_, students, _) = services();

    let created = students
        .create(&student("RA1001", "maria@test.com", "12345678901"))
        .await
        .unwrap();
    let fetched = students.get("RA1001").await.unwrap();

    assert_eq!(created, fetched);
    assert_eq!(fetched.name, "Maria Silva");
    assert_eq!(fetched.email, "maria@test.com");
    assert_eq!(fetched.cpf, "12345678901");
}

#[tokio::test]
async fn test_full_lifecycle_absent_present_absent() {
    let (_, students, enrollments) = services();

    // Absent
    assert!(matches!(
        students.get("RA1001").await,
        Err(ServiceError::NotFound(_))
    ));

    // Present
    students
        .create(&student("RA1001", "maria@test.com", "12345678901"))
        .await
        .unwrap();
    let enrollment = enrollments
        .create(&json!({ "studentRa": "RA1001", "course": "Programação Web" }))
        .await
        .unwrap();

    // Absent again, dependents included
    students.delete("RA1001").await.unwrap();
    assert!(matches!(
        students.get("RA1001").await,
        Err(ServiceError::NotFound(_))
    ));
    assert!(matches!(
        enrollments.get(enrollment.id).await,
        Err(ServiceError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_enrollment_is_immutable_delete_and_recreate() {
    let (_, students, enrollments) = services();
    students
        .create(&student("RA1001", "maria@test.com", "12345678901"))
        .await
        .unwrap();

    let first = enrollments
        .create(&json!({ "studentRa": "RA1001", "course": "Programação Web" }))
        .await
        .unwrap();
    enrollments.delete(first.id).await.unwrap();

    // The pair is free again after deletion
    let second = enrollments
        .create(&json!({ "studentRa": "RA1001", "course": "Programação Web" }))
        .await
        .unwrap();
    assert_ne!(first.id, second.id);
}

#[tokio::test]
async fn test_storage_rejection_matches_proactive_check_message() {
    let (store, students, enrollments) = services();
    students
        .create(&student("RA1001", "maria@test.com", "12345678901"))
        .await
        .unwrap();

    // Simulate losing the race: the pair is inserted after the service's
    // duplicate check would have run, directly through the gateway.
    store
        .insert(NewEnrollment {
            student_ra: "RA1001".to_string(),
            course: "Programação Web".to_string(),
        })
        .await
        .unwrap();

    // The gateway rejects the duplicate the same way the check reports it
    let err = store
        .insert(NewEnrollment {
            student_ra: "RA1001".to_string(),
            course: "Programação Web".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::DuplicateEnrollment));

    let err = enrollments
        .create(&json!({ "studentRa": "RA1001", "course": "Programação Web" }))
        .await
        .unwrap_err();
    assert_eq!(err, ServiceError::Conflict(messages::DUPLICATE_ENROLLMENT));
}

#[tokio::test]
async fn test_duplicate_field_priority_email_over_ra_over_cpf() {
    let (_, students, _) = services();
    students
        .create(&student("RA1001", "maria@test.com", "12345678901"))
        .await
        .unwrap();

    // All three collide: email wins
    let err = students
        .create(&student("RA1001", "maria@test.com", "12345678901"))
        .await
        .unwrap_err();
    assert_eq!(err, ServiceError::Conflict(messages::DUPLICATE_EMAIL));

    // ra and cpf collide: ra wins
    let err = students
        .create(&student("RA1001", "other@test.com", "12345678901"))
        .await
        .unwrap_err();
    assert_eq!(err, ServiceError::Conflict(messages::DUPLICATE_RA));
}
