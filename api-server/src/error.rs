//! Error handling

use axum::{
    extract::rejection::JsonRejection,
    response::{IntoResponse, Response},
    http::StatusCode,
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    // Input errors
    #[error("URL is required")]
    MissingInput,

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    // Pipeline errors
    #[error("Prediction failed: {0}")]
    PredictionFailed(String),

    #[error("Feature extraction failed: {0}")]
    ExtractionFailed(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message, details) = match &self {
            AppError::MissingInput => (StatusCode::BAD_REQUEST, "URL is required", None),
            AppError::InvalidBody(msg) => (StatusCode::BAD_REQUEST, "Invalid request body", Some(msg)),
            AppError::PredictionFailed(msg) => {
                tracing::error!("Prediction error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Prediction failed", Some(msg))
            }
            AppError::ExtractionFailed(msg) => {
                tracing::error!("Feature extraction error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Feature extraction failed", Some(msg))
            }
        };

        let body = match details {
            Some(details) => json!({ "error": error_message, "details": details }),
            None => json!({ "error": error_message }),
        };

        (status, Json(body)).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(_: validator::ValidationErrors) -> Self {
        // `url` is the only validated field
        AppError::MissingInput
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidBody(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn body_of(error: AppError) -> (StatusCode, Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_pipeline_failures_carry_details() {
        let (status, body) = body_of(AppError::PredictionFailed(
            "feature encoding failed: row width 3 does not match 5".into(),
        ))
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Prediction failed");
        assert_eq!(body["details"], "feature encoding failed: row width 3 does not match 5");

        let (status, body) = body_of(AppError::ExtractionFailed(
            "feature extraction failed: malformed input".into(),
        ))
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Feature extraction failed");
        assert_eq!(body["details"], "feature extraction failed: malformed input");
    }

    #[tokio::test]
    async fn test_missing_input_has_no_details() {
        let (_, body) = body_of(AppError::MissingInput).await;
        assert_eq!(body, serde_json::json!({ "error": "URL is required" }));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::MissingInput.into_response().status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::InvalidBody("x".into()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::PredictionFailed("x".into()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::ExtractionFailed("x".into()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
