//! PDF text extraction boundary.
//!
//! Extraction is delegated to the `pdf-extract` crate; this module only
//! shapes the result into an immutable [`Document`] for the pipeline.

use crate::error::{FortellError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, instrument};

/// The extracted content of one source document.
///
/// Produced once per input file and immutable afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Full extracted text.
    pub text: String,
    /// Document title, if one could be derived.
    pub title: Option<String>,
    /// Number of pages detected.
    pub page_count: usize,
    /// Per-page image captions, when available. Extraction backends that do
    /// not produce captions leave this empty.
    pub image_captions: Vec<String>,
}

impl Document {
    /// Total character count of the extracted text.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// Extract a [`Document`] from a PDF file.
///
/// Fails with [`FortellError::Extraction`] if the file cannot be parsed and
/// with [`FortellError::InvalidInput`] if it contains no extractable text
/// (e.g. a scanned/image-only PDF).
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn extract_pdf(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;

    let text = pdf_extract::extract_text_from_mem(&bytes)
        .map_err(|e| FortellError::Extraction(format!("{}: {}", path.display(), e)))?;

    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(FortellError::InvalidInput(format!(
            "No extractable text in {} (scanned or image-only PDF?)",
            path.display()
        )));
    }

    // pdf-extract returns all text as one string; form feed characters
    // typically separate pages.
    let page_count = if text.contains('\x0C') {
        text.split('\x0C').filter(|p| !p.trim().is_empty()).count()
    } else {
        1
    };

    let title = path
        .file_stem()
        .map(|s| s.to_string_lossy().replace(['_', '-'], " "));

    debug!("Extracted {} characters across {} pages", trimmed.chars().count(), page_count);

    Ok(Document {
        text: trimmed.to_string(),
        title,
        page_count,
        image_captions: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_io_error() {
        let result = extract_pdf("/nonexistent/input.pdf");
        assert!(matches!(result, Err(FortellError::Io(_))));
    }

    #[test]
    fn test_garbage_bytes_fail_extraction() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("not-a-pdf.pdf");
        std::fs::write(&path, b"definitely not a pdf").unwrap();

        let result = extract_pdf(&path);
        assert!(matches!(result, Err(FortellError::Extraction(_))));
    }
}
