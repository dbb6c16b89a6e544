//! Service-error to HTTP translation
//!
//! Error body shape: `{"error": string}` for single messages,
//! `{"error": [string, ...]}` for validation failures (ordered, all
//! violated rules included).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::service::ServiceError;

/// A single message or the ordered validation list
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ErrorMessage {
    Single(String),
    Many(Vec<String>),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorMessage,
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServiceError::Validation(_)
            | ServiceError::BadRequest(_)
            | ServiceError::Conflict(_)
            | ServiceError::Unexpected(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let error = match self {
            ServiceError::Validation(messages) => ErrorMessage::Many(messages),
            ServiceError::BadRequest(message)
            | ServiceError::NotFound(message)
            | ServiceError::Conflict(message)
            | ServiceError::Unexpected(message)
            | ServiceError::Internal(message) => ErrorMessage::Single(message.to_string()),
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_message_shape() {
        let body = ErrorResponse {
            error: ErrorMessage::Single("Aluno não encontrado".to_string()),
        };
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, "{\"error\":\"Aluno não encontrado\"}");
    }

    #[test]
    fn test_validation_list_shape() {
        let body = ErrorResponse {
            error: ErrorMessage::Many(vec!["a".to_string(), "b".to_string()]),
        };
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, "{\"error\":[\"a\",\"b\"]}");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ServiceError::NotFound("x").into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ServiceError::Conflict("x").into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServiceError::Validation(vec!["x".to_string()])
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServiceError::Internal("x").into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
