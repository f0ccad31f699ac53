use std::path::Path;

use anyhow::Context;
use axum::{extract::State, response::Html};

use crate::errors::AppError;
use crate::frontend::INDEX_FILE;
use crate::state::AppState;

/// GET /
/// Serves the upload page from the templates directory.
pub async fn index_handler(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let path = Path::new(&state.config.templates_dir).join(INDEX_FILE);
    let html = tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(Html(html))
}
