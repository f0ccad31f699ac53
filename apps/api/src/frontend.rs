use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

const INDEX_HTML: &str = include_str!("../assets/index.html");
const STYLE_CSS: &str = include_str!("../assets/style.css");

pub const INDEX_FILE: &str = "index.html";
const STYLE_FILE: &str = "style.css";

/// Creates the static and templates directories and writes the bundled page and
/// stylesheet into them. Files that already exist are left untouched.
pub async fn ensure_assets(static_dir: &Path, templates_dir: &Path) -> Result<()> {
    write_if_missing(&static_dir.join(STYLE_FILE), STYLE_CSS).await?;
    write_if_missing(&templates_dir.join(INDEX_FILE), INDEX_HTML).await?;
    Ok(())
}

async fn write_if_missing(path: &Path, contents: &str) -> Result<()> {
    if let Some(dir) = path.parent() {
        tokio::fs::create_dir_all(dir)
            .await
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    if tokio::fs::try_exists(path).await.unwrap_or(false) {
        return Ok(());
    }

    tokio::fs::write(path, contents)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Created {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_creates_missing_assets() {
        let root = tempfile::tempdir().unwrap();
        let static_dir = root.path().join("static");
        let templates_dir = root.path().join("templates");

        ensure_assets(&static_dir, &templates_dir).await.unwrap();

        let css = std::fs::read_to_string(static_dir.join(STYLE_FILE)).unwrap();
        let html = std::fs::read_to_string(templates_dir.join(INDEX_FILE)).unwrap();
        assert_eq!(css, STYLE_CSS);
        assert!(html.contains("/static/style.css"));
        assert!(html.contains("/upload"));
    }

    #[tokio::test]
    async fn test_existing_assets_are_not_overwritten() {
        let root = tempfile::tempdir().unwrap();
        let templates_dir = root.path().join("templates");
        std::fs::create_dir_all(&templates_dir).unwrap();
        std::fs::write(templates_dir.join(INDEX_FILE), "<p>custom</p>").unwrap();

        ensure_assets(&root.path().join("static"), &templates_dir)
            .await
            .unwrap();

        let html = std::fs::read_to_string(templates_dir.join(INDEX_FILE)).unwrap();
        assert_eq!(html, "<p>custom</p>");
    }
}
