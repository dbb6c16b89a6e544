//! Enrollment HTTP routes
//!
//! Nested under `/enrollments` by the server. The surrogate id arrives as a
//! path string; a non-numeric id cannot name an existing enrollment and is
//! reported through the per-operation unexpected message, keeping the error
//! envelope uniform.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::Value;

use crate::service::{messages, ServiceError};
use crate::store::Enrollment;

use super::response::MessageResponse;
use super::server::AppState;

/// Create the enrollment routes
pub fn enrollment_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/",
            get(list_enrollments_handler).post(create_enrollment_handler),
        )
        .route(
            "/{id}",
            get(get_enrollment_handler).delete(delete_enrollment_handler),
        )
        .with_state(state)
}

fn parse_id(id: &str, failure: &'static str) -> Result<i32, ServiceError> {
    id.parse().map_err(|_| ServiceError::Unexpected(failure))
}

async fn create_enrollment_handler(
    State(state): State<AppState>,
    body: Option<Json<Value>>,
) -> Result<(StatusCode, Json<Enrollment>), ServiceError> {
    let payload = body.map(|Json(v)| v).unwrap_or(Value::Null);
    let enrollment = state.enrollments.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(enrollment)))
}

async fn list_enrollments_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Enrollment>>, ServiceError> {
    let enrollments = state.enrollments.list().await?;
    Ok(Json(enrollments))
}

async fn get_enrollment_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Enrollment>, ServiceError> {
    let id = parse_id(&id, messages::GET_ENROLLMENT_FAILED)?;
    let enrollment = state.enrollments.get(id).await?;
    Ok(Json(enrollment))
}

async fn delete_enrollment_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ServiceError> {
    let id = parse_id(&id, messages::DELETE_ENROLLMENT_FAILED)?;
    let message = state.enrollments.delete(id).await?;
    Ok(Json(MessageResponse::new(message)))
}
