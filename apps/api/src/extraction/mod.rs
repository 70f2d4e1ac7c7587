//! Resume text extraction: turns an uploaded PDF or DOCX into plain text.
//!
//! The format is decided from the upload's filename extension before any
//! parsing happens. Every parse failure is an `ExtractionError`, which the
//! HTTP layer reports as a client error.

use std::path::Path;

use bytes::Bytes;
use thiserror::Error;

pub mod docx;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod pdf;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file format. Please upload PDF or DOCX (got '{0}')")]
    UnsupportedFormat(String),

    #[error("Failed to extract text from PDF: {0}")]
    Pdf(String),

    #[error("Failed to extract text from DOCX: {0}")]
    Docx(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl DocumentFormat {
    /// Resolves the format from a filename extension, case-insensitively.
    pub fn from_filename(filename: &str) -> Result<Self, ExtractionError> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("pdf") => Ok(DocumentFormat::Pdf),
            Some("docx") => Ok(DocumentFormat::Docx),
            _ => Err(ExtractionError::UnsupportedFormat(filename.to_string())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
        }
    }
}

/// Raw upload bytes tagged with their declared format. Lives for one request.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub format: DocumentFormat,
    pub bytes: Bytes,
}

impl UploadedDocument {
    pub fn from_upload(filename: &str, bytes: Bytes) -> Result<Self, ExtractionError> {
        Ok(Self {
            format: DocumentFormat::from_filename(filename)?,
            bytes,
        })
    }
}

/// Extracts the full plain text of a document. Blocking and CPU-bound:
/// async callers should run it on the blocking pool.
pub fn extract(document: &UploadedDocument) -> Result<String, ExtractionError> {
    match document.format {
        DocumentFormat::Pdf => pdf::extract_pdf(&document.bytes),
        DocumentFormat::Docx => docx::extract_docx(&document.bytes),
    }
}
