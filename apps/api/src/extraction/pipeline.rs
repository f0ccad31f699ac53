//! Extraction pipeline: prompt → model → parse → score → `UploadResult`.
//!
//! Stateless per call. The model request is the only await point; any failure
//! there or in parsing aborts the run and no partial result is produced.

use thiserror::Error;
use tracing::info;

use crate::extraction::completeness::compute_completeness;
use crate::extraction::models::UploadResult;
use crate::extraction::parser::parse_extraction;
use crate::extraction::prompts::build_extraction_prompt;
use crate::llm_client::ModelClient;

#[derive(Debug, Error)]
pub enum ExtractionError {
    /// Transport or provider failure on the outbound model call.
    #[error("Failed to communicate with AI model: {0}")]
    ModelCallFailed(String),

    /// The provider replied, but neither access path carried any text.
    #[error("AI model response did not contain expected content structure")]
    ModelResponseMalformed,

    /// Covers both malformed JSON and well-formed JSON that is not an object.
    #[error("AI response was not a JSON object")]
    AiResponseNotJson { raw: String },
}

/// Runs one extraction over already-extracted document text.
pub async fn run_extraction(
    resume_text: &str,
    model: &dyn ModelClient,
) -> Result<UploadResult, ExtractionError> {
    let prompt = build_extraction_prompt(resume_text);
    info!(
        "Requesting extraction from {} (prompt_chars={})",
        model.model(),
        prompt.chars().count()
    );

    let raw_text = model
        .generate(&prompt)
        .await
        .map_err(|e| ExtractionError::ModelCallFailed(e.to_string()))?
        .into_text()
        .ok_or(ExtractionError::ModelResponseMalformed)?;

    let record = parse_extraction(&raw_text)?;
    let completeness = compute_completeness(&record);

    info!(
        "Extraction complete: {}% populated, {} fields missing",
        completeness.percentage,
        completeness.missing_fields.len()
    );

    Ok(UploadResult::new(record, completeness))
}
