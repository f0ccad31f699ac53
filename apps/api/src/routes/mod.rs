pub mod health;
pub mod pages;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::extraction::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let max_upload_bytes = state.config.max_upload_bytes;
    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/", get(pages::index_handler))
        .route(
            "/upload",
            post(handlers::handle_upload).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .nest_service("/static", static_files)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::extraction::document::tests::docx_bytes;
    use crate::extraction::pipeline::tests::ScriptedModel;
    use crate::llm_client::{LlmError, RawResponse};

    const BOUNDARY: &str = "resume-test-boundary";

    fn test_config(root: &std::path::Path) -> Config {
        Config {
            gemini_api_key: "test-key".into(),
            gemini_model: "scripted".into(),
            gemini_api_base: "http://localhost:0".into(),
            model_timeout_secs: 5,
            port: 0,
            rust_log: "info".into(),
            static_dir: root.join("static").display().to_string(),
            templates_dir: root.join("templates").display().to_string(),
            cors_origins: vec![],
            max_upload_bytes: 1024 * 1024,
        }
    }

    fn app(model: ScriptedModel, root: &std::path::Path) -> Router {
        build_router(AppState {
            model: Arc::new(model),
            config: test_config(root),
        })
    }

    fn upload_request(field: &str, filename: &str, data: &[u8]) -> Request<Body> {
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn test_health() {
        let root = tempfile::tempdir().unwrap();
        let request = Request::get("/health").body(Body::empty()).unwrap();
        let (status, body) = send(app(ScriptedModel::with_text("{}"), root.path()), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "resume-parser-api");
    }

    #[tokio::test]
    async fn test_upload_docx_returns_scored_record() {
        let root = tempfile::tempdir().unwrap();
        let model = ScriptedModel::with_text(
            r#"{"firstName": "Jane", "lastName": "Doe", "skills": [{"name": "Python"}]}"#,
        );
        let data = docx_bytes(&["Jane Doe", "Skills: Python"]);

        let (status, body) = send(
            app(model, root.path()),
            upload_request("file", "Jane_Doe.docx", &data),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_object().unwrap().len(), 3);
        assert_eq!(body["completenessPercentage"], 21);
        assert_eq!(body["extractedData"]["firstName"], "Jane");
        assert_eq!(body["extractedData"]["skills"][0]["level"], "Beginner");
        let remaining = body["remainingFields"].as_array().unwrap();
        assert_eq!(remaining.len(), 11);
        assert!(!remaining.contains(&Value::from("skills")));
    }

    #[tokio::test]
    async fn test_upload_rejects_unsupported_extension() {
        let root = tempfile::tempdir().unwrap();
        let (status, body) = send(
            app(ScriptedModel::with_text("{}"), root.path()),
            upload_request("file", "resume.txt", b"Jane Doe"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"]["message"],
            "Unsupported file type. Allowed types are PDF and DOCX."
        );
    }

    #[tokio::test]
    async fn test_upload_requires_file_field() {
        let root = tempfile::tempdir().unwrap();
        let (status, body) = send(
            app(ScriptedModel::with_text("{}"), root.path()),
            upload_request("document", "resume.pdf", b"%PDF"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_upload_rejects_document_without_text() {
        let root = tempfile::tempdir().unwrap();
        let data = docx_bytes(&[]);
        let (status, body) = send(
            app(ScriptedModel::with_text("{}"), root.path()),
            upload_request("file", "blank.docx", &data),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"]["message"],
            "Could not extract text from the document or document is empty."
        );
    }

    #[tokio::test]
    async fn test_upload_reports_unreadable_document() {
        let root = tempfile::tempdir().unwrap();
        let (status, body) = send(
            app(ScriptedModel::with_text("{}"), root.path()),
            upload_request("file", "broken.docx", b"not a zip archive"),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "DOCUMENT_ERROR");
    }

    #[tokio::test]
    async fn test_upload_surfaces_raw_text_when_model_returns_garbage() {
        let root = tempfile::tempdir().unwrap();
        let data = docx_bytes(&["Jane Doe"]);
        let (status, body) = send(
            app(ScriptedModel::with_text("  not json at all  "), root.path()),
            upload_request("file", "cv.docx", &data),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "AI_RESPONSE_NOT_JSON");
        assert_eq!(body["error"]["raw_response"], "not json at all");
    }

    #[tokio::test]
    async fn test_upload_reports_model_outage() {
        let root = tempfile::tempdir().unwrap();
        let data = docx_bytes(&["Jane Doe"]);
        let model = ScriptedModel::replying(Err(LlmError::Api {
            status: 500,
            message: "internal".into(),
        }));
        let (status, body) = send(
            app(model, root.path()),
            upload_request("file", "cv.docx", &data),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "MODEL_CALL_FAILED");
    }

    #[tokio::test]
    async fn test_upload_reports_empty_model_reply() {
        let root = tempfile::tempdir().unwrap();
        let data = docx_bytes(&["Jane Doe"]);
        let model = ScriptedModel::replying(Ok(RawResponse::Empty));
        let (status, body) = send(
            app(model, root.path()),
            upload_request("file", "cv.docx", &data),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "MODEL_RESPONSE_MALFORMED");
    }

    #[tokio::test]
    async fn test_index_serves_scaffolded_page() {
        let root = tempfile::tempdir().unwrap();
        crate::frontend::ensure_assets(&root.path().join("static"), &root.path().join("templates"))
            .await
            .unwrap();

        let response = app(ScriptedModel::with_text("{}"), root.path())
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8_lossy(&bytes).contains("Upload Your Resume"));

        let response = app(ScriptedModel::with_text("{}"), root.path())
            .oneshot(Request::get("/static/style.css").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
