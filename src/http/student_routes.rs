//! Student HTTP routes
//!
//! Nested under `/students` by the server. Bodies arrive as untyped JSON
//! and go through the validation layer; a missing or non-JSON body is
//! treated as an absent payload so validation reports the full field list
//! instead of a transport-level rejection.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;

use crate::service::ServiceError;
use crate::store::Student;

use super::response::MessageResponse;
use super::server::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
}

/// Create the student routes
pub fn student_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/",
            get(list_students_handler).post(create_student_handler),
        )
        .route("/search", get(search_students_handler))
        .route(
            "/{ra}",
            get(get_student_handler)
                .put(update_student_handler)
                .delete(delete_student_handler),
        )
        .with_state(state)
}

async fn create_student_handler(
    State(state): State<AppState>,
    body: Option<Json<Value>>,
) -> Result<(StatusCode, Json<Student>), ServiceError> {
    let payload = body.map(|Json(v)| v).unwrap_or(Value::Null);
    let student = state.students.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

async fn list_students_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Student>>, ServiceError> {
    let students = state.students.list().await?;
    Ok(Json(students))
}

async fn search_students_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Student>>, ServiceError> {
    let students = state.students.search(params.query.as_deref()).await?;
    Ok(Json(students))
}

async fn get_student_handler(
    State(state): State<AppState>,
    Path(ra): Path<String>,
) -> Result<Json<Student>, ServiceError> {
    let student = state.students.get(&ra).await?;
    Ok(Json(student))
}

async fn update_student_handler(
    State(state): State<AppState>,
    Path(ra): Path<String>,
    body: Option<Json<Value>>,
) -> Result<Json<Student>, ServiceError> {
    let payload = body.map(|Json(v)| v).unwrap_or(Value::Null);
    let student = state.students.update(&ra, &payload).await?;
    Ok(Json(student))
}

async fn delete_student_handler(
    State(state): State<AppState>,
    Path(ra): Path<String>,
) -> Result<Json<MessageResponse>, ServiceError> {
    let message = state.students.delete(&ra).await?;
    Ok(Json(MessageResponse::new(message)))
}
