// Resume extraction prompt. The JSON structure section is rendered from
// `EXTRACTION_SCHEMA` so the model is asked for exactly the fields that get scored.

use crate::extraction::schema::{FieldShape, SchemaField, EXTRACTION_SCHEMA, LOWEST_TIER};

const PREAMBLE: &str = "\
Analyze the following resume text and extract the specified information.
Return the information as a single, valid JSON object. Do NOT use markdown like ```json ... ```.
The JSON object must strictly adhere to the following keys and structures.
If a key's information is not found, use `null` for string fields or an empty array `[]` for array fields.
For arrays of objects, if no suitable entry is found, the array should be empty `[]`.";

const TEXT_DELIMITER: &str = "---";

/// Renders the full extraction request for one document's text.
///
/// The text is embedded verbatim; length limits belong to the model client.
pub fn build_extraction_prompt(resume_text: &str) -> String {
    let mut prompt = String::with_capacity(PREAMBLE.len() + resume_text.len() + 4096);

    prompt.push_str(PREAMBLE);
    prompt.push_str("\n\nExpected JSON Structure:\n");
    prompt.push_str(&render_structure(EXTRACTION_SCHEMA));
    prompt.push_str("\n\n");
    prompt.push_str(
        "Ensure the entire output is ONLY the JSON object, with no surrounding text, explanations, or markdown.\n",
    );
    prompt.push_str(
        "Pay close attention to extracting all details for work experience and education, including dates and locations.\n",
    );
    prompt.push_str(&format!(
        "For skills and languages, always include a 'level' field, defaulting to '{LOWEST_TIER}' if no explicit level is found.\n"
    ));
    prompt.push_str("\nResume Text to Analyze:\n");
    prompt.push_str(TEXT_DELIMITER);
    prompt.push('\n');
    prompt.push_str(resume_text);
    prompt.push('\n');
    prompt.push_str(TEXT_DELIMITER);
    prompt.push('\n');

    prompt
}

fn render_structure(schema: &[SchemaField]) -> String {
    let fields: Vec<String> = schema.iter().map(render_field).collect();
    format!("{{\n{}\n}}", fields.join(",\n"))
}

fn render_field(field: &SchemaField) -> String {
    match &field.shape {
        FieldShape::Scalar { hint } => format!("  \"{}\": \"string ({hint})\"", field.name),
        FieldShape::Strings { hint } => {
            format!("  \"{}\": [\n    \"string ({hint})\"\n  ]", field.name)
        }
        FieldShape::Records { sub_fields, tiers } => {
            let lines: Vec<String> = sub_fields
                .iter()
                .map(|sub| match (sub.name, tiers) {
                    ("level", Some(tiers)) => {
                        let examples = tiers
                            .iter()
                            .map(|t| format!("'{t}'"))
                            .collect::<Vec<_>>()
                            .join(", ");
                        format!(
                            "      \"level\": \"string (e.g., {examples}). If no level is specified in the resume, default to '{LOWEST_TIER}'.\""
                        )
                    }
                    _ => format!("      \"{}\": \"string ({})\"", sub.name, sub.hint),
                })
                .collect();
            format!(
                "  \"{}\": [\n    {{\n{}\n    }}\n  ]",
                field.name,
                lines.join(",\n")
            )
        }
    }
}
