//! Download trigger — materializes the customized document onto disk.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;

/// File name for a saved document, embedding the current date.
pub fn document_filename() -> String {
    format!("customized_resume_{}.docx", Utc::now().format("%Y-%m-%d"))
}

/// Writes the document into `dir` and returns the full path.
pub fn save_document(document: &[u8], dir: &Path) -> Result<PathBuf> {
    let path = dir.join(document_filename());
    fs::write(&path, document)
        .with_context(|| format!("Failed to write '{}'", path.display()))?;
    Ok(path)
}
