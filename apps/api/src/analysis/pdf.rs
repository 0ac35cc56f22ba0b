//! PDF text extraction for uploaded resumes.

use thiserror::Error;

const PDF_MAGIC: &[u8] = b"%PDF-";

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Uploaded file is empty")]
    Empty,

    #[error("Only PDF files are allowed")]
    NotPdf,

    #[error("PDF extraction error: {0}")]
    Extraction(String),

    #[error("PDF contains no extractable text")]
    NoText,
}

/// Extracts the text layer of a PDF held in memory.
/// Whitespace runs are collapsed so the result reads like one page-joined string.
pub fn extract_text(bytes: &[u8]) -> Result<String, PdfError> {
    if bytes.is_empty() {
        return Err(PdfError::Empty);
    }
    if !bytes.starts_with(PDF_MAGIC) {
        return Err(PdfError::NotPdf);
    }

    let raw = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| PdfError::Extraction(e.to_string()))?;

    let text = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if text.is_empty() {
        return Err(PdfError::NoText);
    }
    Ok(text)
}
