use std::path::Path;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl DocumentFormat {
    /// Resolves the format from a file name's extension, case-insensitively.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let extension = Path::new(filename).extension()?.to_str()?;
        match extension.to_ascii_lowercase().as_str() {
            "pdf" => Some(DocumentFormat::Pdf),
            "docx" => Some(DocumentFormat::Docx),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
        }
    }
}

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Error extracting text from PDF: {0}")]
    Pdf(String),

    #[error("Error extracting text from DOCX: {0}")]
    Docx(String),
}

/// Converts an uploaded document into plain text. CPU-bound; call from a blocking task.
pub fn extract_text(data: &[u8], format: DocumentFormat) -> Result<String, DocumentError> {
    match format {
        DocumentFormat::Pdf => pdf_extract::extract_text_from_mem(data)
            .map_err(|e| DocumentError::Pdf(e.to_string())),
        DocumentFormat::Docx => extract_docx_text(data),
    }
}

/// One line per body paragraph. Run text is concatenated, including hyperlink runs; tabs and
/// line breaks are kept as `\t` and `\n`.
fn extract_docx_text(data: &[u8]) -> Result<String, DocumentError> {
    let docx = docx_rs::read_docx(data).map_err(|e| DocumentError::Docx(e.to_string()))?;

    let paragraphs: Vec<String> = docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            docx_rs::DocumentChild::Paragraph(p) => Some(paragraph_text(p)),
            _ => None,
        })
        .collect();

    Ok(paragraphs.join("\n"))
}

fn paragraph_text(paragraph: &docx_rs::Paragraph) -> String {
    let mut text = String::new();
    push_children_text(&paragraph.children, &mut text);
    text
}

/// Hyperlinks nest their own runs, so email and profile links sit one level down.
fn push_children_text(children: &[docx_rs::ParagraphChild], text: &mut String) {
    for child in children {
        match child {
            docx_rs::ParagraphChild::Run(run) => push_run_text(run, text),
            docx_rs::ParagraphChild::Hyperlink(link) => push_children_text(&link.children, text),
            _ => {}
        }
    }
}

fn push_run_text(run: &docx_rs::Run, text: &mut String) {
    for run_child in &run.children {
        match run_child {
            docx_rs::RunChild::Text(t) => text.push_str(&t.text),
            docx_rs::RunChild::Tab(_) => text.push('\t'),
            docx_rs::RunChild::Break(_) => text.push('\n'),
            _ => {}
        }
    }
}
