//! Axum route handler for resume upload.

use anyhow::Context;
use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::document::{extract_text, DocumentFormat};
use crate::extraction::models::UploadResult;
use crate::extraction::pipeline::run_extraction;
use crate::state::AppState;

const UPLOAD_FIELD: &str = "file";
const UNSUPPORTED_TYPE: &str = "Unsupported file type. Allowed types are PDF and DOCX.";
const EMPTY_DOCUMENT: &str = "Could not extract text from the document or document is empty.";

/// POST /upload
///
/// Accepts a multipart `file` (PDF or DOCX), extracts its text, and runs the
/// extraction pipeline. The upload is processed in memory and never written to disk.
pub async fn handle_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<UploadResult>, AppError> {
    let request_id = Uuid::new_v4();
    async move {
        let (filename, data) = read_upload(multipart).await?;
        let format = DocumentFormat::from_filename(&filename)
            .ok_or_else(|| AppError::Validation(UNSUPPORTED_TYPE.to_string()))?;

        info!(
            "Upload received: {filename} ({}, {} bytes)",
            format.as_str(),
            data.len()
        );

        let text = tokio::task::spawn_blocking(move || extract_text(&data, format))
            .await
            .context("text extraction task failed")??;

        if text.trim().is_empty() {
            return Err(AppError::Validation(EMPTY_DOCUMENT.to_string()));
        }
        info!("Extracted {} characters of text", text.chars().count());

        let result = run_extraction(&text, state.model.as_ref()).await?;
        Ok(Json(result))
    }
    .instrument(info_span!("upload", %request_id))
    .await
}

/// Pulls the `file` field out of the multipart body.
async fn read_upload(mut multipart: Multipart) -> Result<(String, Bytes), AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let filename = field
            .file_name()
            .map(|name| name.to_string())
            .ok_or_else(|| AppError::Validation(UNSUPPORTED_TYPE.to_string()))?;
        let data = field.bytes().await?;
        return Ok((filename, data));
    }

    Err(AppError::Validation(format!(
        "Missing multipart field '{UPLOAD_FIELD}'"
    )))
}
