use anyhow::{Context, Result};
use std::path::Path;

/// Creates `dir` and any missing parents. Succeeds silently when it already exists.
pub async fn prepare_output_dir(dir: &Path) -> Result<()> {
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("failed to create output directory {}", dir.display()))
}
