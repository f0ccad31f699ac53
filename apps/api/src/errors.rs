use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extraction::document::DocumentError;
use crate::extraction::pipeline::ExtractionError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<MultipartError> for AppError {
    fn from(e: MultipartError) -> Self {
        AppError::Validation(format!("Invalid multipart upload: {}", e.body_text()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut raw_response = None;

        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Document(e) => {
                tracing::error!("Document error: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, "DOCUMENT_ERROR", e.to_string())
            }
            AppError::Extraction(e @ ExtractionError::ModelCallFailed(_)) => {
                tracing::error!("Model call failed: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "MODEL_CALL_FAILED",
                    e.to_string(),
                )
            }
            AppError::Extraction(e @ ExtractionError::ModelResponseMalformed) => {
                tracing::error!("{e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "MODEL_RESPONSE_MALFORMED",
                    e.to_string(),
                )
            }
            AppError::Extraction(ExtractionError::AiResponseNotJson { raw }) => {
                raw_response = Some(raw.clone());
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "AI_RESPONSE_NOT_JSON",
                    "AI response was not a valid JSON object. The AI may have failed to structure the data correctly. Check raw AI response for details.".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let mut error = json!({
            "code": code,
            "message": message
        });
        if let Some(raw) = raw_response {
            error["raw_response"] = json!(raw);
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use serde_json::Value;

    use super::*;

    async fn render(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_not_json_is_unprocessable_with_raw_response() {
        let (status, body) = render(AppError::from(ExtractionError::AiResponseNotJson {
            raw: "not json at all".into(),
        }))
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "AI_RESPONSE_NOT_JSON");
        assert_eq!(body["error"]["raw_response"], "not json at all");
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .starts_with("AI response was not a valid JSON object."));
    }

    #[tokio::test]
    async fn test_model_failures_are_server_errors_with_distinct_codes() {
        let (status, body) =
            render(ExtractionError::ModelCallFailed("connection refused".into()).into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "MODEL_CALL_FAILED");
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("connection refused"));
        assert!(body["error"].get("raw_response").is_none());

        let (status, body) = render(ExtractionError::ModelResponseMalformed.into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "MODEL_RESPONSE_MALFORMED");
    }

    #[tokio::test]
    async fn test_validation_is_bad_request() {
        let (status, body) = render(AppError::Validation("bad file".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["message"], "bad file");
    }

    #[tokio::test]
    async fn test_internal_error_hides_details() {
        let (status, body) = render(anyhow::anyhow!("secret path /etc/x").into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["message"], "An internal server error occurred");
    }
}
