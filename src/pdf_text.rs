// src/pdf_text.rs

use lopdf::Document;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// A document that cannot be opened or decoded at all. Page-level
/// decode failures are not errors; they degrade to empty page text.
#[derive(Debug, Error)]
#[error("cannot open or decode PDF: {0}")]
pub struct ReadError(#[from] lopdf::Error);

/// Extract the full text of a PDF, page by page in document order,
/// concatenated into one string. A page whose content cannot be
/// decoded contributes empty text.
pub fn extract_document_text(path: &Path) -> Result<String, ReadError> {
    let doc = Document::load(path)?;
    let pages = doc.get_pages();

    let mut full_text = String::new();
    for page_number in pages.keys() {
        match doc.extract_text(&[*page_number]) {
            Ok(text) => full_text.push_str(&text),
            Err(e) => {
                debug!(page = page_number, error = %e, "page text extraction failed");
            }
        }
    }

    info!(
        pages = pages.len(),
        chars = full_text.len(),
        "text extracted"
    );
    Ok(full_text)
}
