use serde::Serialize;

use crate::extraction::models::{ExtractedRecord, FieldValue, SchemaEntry};
use crate::extraction::schema::{FieldShape, SchemaField, EXTRACTION_SCHEMA};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletenessResult {
    /// 0..=100, truncated.
    pub percentage: u8,
    /// Unpopulated schema fields, in schema order.
    pub missing_fields: Vec<&'static str>,
}

/// Scores a record against the extraction schema.
pub fn compute_completeness(record: &ExtractedRecord) -> CompletenessResult {
    score_against(EXTRACTION_SCHEMA, record)
}

fn score_against(schema: &[SchemaField], record: &ExtractedRecord) -> CompletenessResult {
    let total_fields = schema.len();
    let mut populated_fields = 0usize;
    let mut missing_fields = Vec::new();

    for field in schema {
        let populated = record
            .field(field.name)
            .is_some_and(|value| is_populated(field, &value));

        if populated {
            populated_fields += 1;
        } else {
            missing_fields.push(field.name);
        }
    }

    if total_fields == 0 {
        return CompletenessResult {
            percentage: 0,
            missing_fields,
        };
    }

    // Integer division truncates, matching floor(populated / total * 100).
    let percentage = (populated_fields * 100 / total_fields).min(100);

    CompletenessResult {
        percentage: percentage as u8,
        missing_fields,
    }
}

fn is_populated(field: &SchemaField, value: &FieldValue<'_>) -> bool {
    match (&field.shape, value) {
        (FieldShape::Scalar { .. }, FieldValue::Scalar(s)) => {
            s.is_some_and(|s| !s.trim().is_empty())
        }
        // All-or-nothing: one incomplete entry disqualifies the whole list.
        (FieldShape::Records { .. }, FieldValue::Records(entries)) => {
            !entries.is_empty() && entries.iter().all(|e| entry_is_complete(field, *e))
        }
        (FieldShape::Strings { .. }, FieldValue::Strings(items)) => !items.is_empty(),
        _ => false,
    }
}

fn entry_is_complete(field: &SchemaField, entry: &dyn SchemaEntry) -> bool {
    field
        .required_sub_fields()
        .all(|name| entry.sub_field(name).is_some_and(|s| !s.is_empty()))
}
