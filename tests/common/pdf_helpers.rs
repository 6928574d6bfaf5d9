//! PDF inspection helpers.

use anyhow::Result;
use std::path::Path;

/// Number of pages in an in-memory PDF.
pub fn page_count(bytes: &[u8]) -> Result<usize> {
    let doc = ::lopdf::Document::load_mem(bytes)?;
    Ok(doc.get_pages().len())
}

/// Number of pages in a PDF on disk.
pub fn page_count_of(path: &Path) -> Result<usize> {
    page_count(&std::fs::read(path)?)
}

/// Extracts text from an in-memory PDF, returning an error instead of panicking.
pub fn extract_text(bytes: &[u8]) -> Result<String> {
    pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| anyhow::anyhow!("Failed to extract text: {}", e))
}

/// True when `needle` occurs in the PDF text once all whitespace is removed.
///
/// Extraction may split or join words at arbitrary points, so both sides
/// are compared without whitespace.
pub fn pdf_contains(bytes: &[u8], needle: &str) -> Result<bool> {
    let squash = |s: &str| s.chars().filter(|c| !c.is_whitespace()).collect::<String>();
    Ok(squash(&extract_text(bytes)?).contains(&squash(needle)))
}

/// Validates that a PDF is loadable and has basic structure.
pub fn is_valid_pdf(path: &Path) -> bool {
    ::lopdf::Document::load(path).is_ok()
}
