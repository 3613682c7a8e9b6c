use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use contracts::shared::validation::FieldError;
use serde::Serialize;
use thiserror::Error;

/// Ошибки доменных операций.
///
/// Validation/State/NotFound/Forbidden/ConcurrencyConflict возвращаются вызывающей
/// стороне с конкретной причиной; Persistence логируется и отдаётся как 500.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation failed: {}", join_fields(.0))]
    Validation(Vec<FieldError>),

    #[error("invalid state: {0}")]
    State(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("concurrency conflict: {0}")]
    ConcurrencyConflict(String),

    #[error("persistence error: {0}")]
    Persistence(String),
}

pub type AppResult<T> = Result<T, AppError>;

fn join_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl AppError {
    /// Ошибка валидации одного поля
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        AppError::Validation(vec![FieldError::new(field, message)])
    }

    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::State(_) => "STATE_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Forbidden(_) => "FORBIDDEN",
            AppError::ConcurrencyConflict(_) => "CONCURRENCY_CONFLICT",
            AppError::Persistence(_) => "PERSISTENCE_ERROR",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::State(_) => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::ConcurrencyConflict(_) => StatusCode::CONFLICT,
            AppError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(e: sea_orm::DbErr) -> Self {
        AppError::Persistence(e.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        AppError::Persistence(format!("{:#}", e))
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<Vec<FieldError>>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            AppError::Persistence(ref detail) => {
                // Детали хранилища клиенту не отдаём
                tracing::error!(error = %detail, "persistence failure");
                ErrorBody {
                    error: self.kind(),
                    message: "internal server error".into(),
                    fields: None,
                }
            }
            AppError::Validation(ref fields) => ErrorBody {
                error: self.kind(),
                message: self.to_string(),
                fields: Some(fields.clone()),
            },
            ref other => ErrorBody {
                error: other.kind(),
                message: other.to_string(),
                fields: None,
            },
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            AppError::field("description", "too short").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::State("terminal".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Forbidden("admin only".into()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::ConcurrencyConflict("x".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::Persistence("disk full".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_persistence_details_are_not_exposed() {
        let response = AppError::Persistence("UNIQUE constraint failed".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(!text.contains("UNIQUE"));
        assert!(text.contains("PERSISTENCE_ERROR"));
    }

    #[tokio::test]
    async fn test_validation_body_lists_fields() {
        let err = AppError::Validation(vec![
            FieldError::new("description", "must be at least 10 characters long"),
            FieldError::new("evidencePhotos", "must contain at least 1 item(s)"),
        ]);
        let response = err.into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["error"], "VALIDATION_ERROR");
        assert_eq!(json["fields"].as_array().unwrap().len(), 2);
        assert_eq!(json["fields"][1]["field"], "evidencePhotos");
    }
}
