use serde_json::Value;
use tracing::warn;

use crate::extraction::models::ExtractedRecord;
use crate::extraction::pipeline::ExtractionError;

/// Decodes the model's text payload into an `ExtractedRecord`.
///
/// Anything that parses as a JSON object is accepted; field-level gaps are left to
/// the completeness scorer. Text that is not a JSON object fails with
/// `AiResponseNotJson`, carrying the trimmed text for diagnosis. Code fences are
/// not stripped: the prompt forbids them and a fenced reply is reported as-is.
pub fn parse_extraction(raw_text: &str) -> Result<ExtractedRecord, ExtractionError> {
    let text = raw_text.trim();
    let not_json = || ExtractionError::AiResponseNotJson {
        raw: text.to_string(),
    };

    let value: Value = serde_json::from_str(text).map_err(|e| {
        warn!("Model response was not valid JSON ({e}). Raw response: {text}");
        not_json()
    })?;

    // Derived struct decoding would also take a JSON array as a positional record.
    if !value.is_object() {
        warn!("Model response was JSON but not an object. Raw response: {text}");
        return Err(not_json());
    }

    serde_json::from_value(value).map_err(|e| {
        warn!("Model response object could not be decoded ({e}). Raw response: {text}");
        not_json()
    })
}
