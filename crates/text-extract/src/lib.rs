//! Plain-text extraction for uploaded legal documents
//!
//! Supports PDF (via `pdf-extract`) and DOCX (the paragraphs of
//! `word/document.xml`). The format is picked from the file extension.
//!
//! # Example
//! ```no_run
//! use text_extract::{extract_text, ExtractError};
//!
//! fn load(bytes: &[u8]) -> Result<(), ExtractError> {
//!     let text = extract_text("lease.pdf", bytes)?;
//!     println!("Extracted {} characters", text.len());
//!     Ok(())
//! }
//! ```

pub mod docx;
pub mod pdf;

use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur while turning an upload into text
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid PDF: {0}")]
    InvalidPdf(String),

    #[error("Password-protected PDF")]
    PasswordProtected,

    #[error("Invalid DOCX: {0}")]
    InvalidDocx(String),

    #[error("Text extraction failed: {0}")]
    Extraction(String),
}

/// Upload formats recognised by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl DocumentFormat {
    pub fn from_filename(filename: &str) -> Option<Self> {
        let lower = filename.to_lowercase();
        if lower.ends_with(".pdf") {
            Some(DocumentFormat::Pdf)
        } else if lower.ends_with(".docx") {
            Some(DocumentFormat::Docx)
        } else {
            None
        }
    }
}

/// Extract the text of an uploaded file, one line per page line or paragraph.
///
/// A readable file with no text yields an empty string, not an error.
pub fn extract_text(filename: &str, bytes: &[u8]) -> Result<String, ExtractError> {
    let format = DocumentFormat::from_filename(filename)
        .ok_or_else(|| ExtractError::UnsupportedFormat(filename.to_string()))?;

    let text = match format {
        DocumentFormat::Pdf => pdf::extract_pdf_text(bytes)?,
        DocumentFormat::Docx => docx::extract_docx_text(bytes)?,
    };

    if text.trim().is_empty() {
        warn!(filename, ?format, "Document contains no extractable text");
    }

    debug!(filename, ?format, chars = text.len(), "Extracted document text");
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_filename() {
        assert_eq!(DocumentFormat::from_filename("lease.pdf"), Some(DocumentFormat::Pdf));
        assert_eq!(DocumentFormat::from_filename("LEASE.PDF"), Some(DocumentFormat::Pdf));
        assert_eq!(DocumentFormat::from_filename("nda.docx"), Some(DocumentFormat::Docx));
        assert_eq!(DocumentFormat::from_filename("notes.txt"), None);
        assert_eq!(DocumentFormat::from_filename("archive.docx.zip"), None);
    }

    #[test]
    fn test_unsupported_extension_is_rejected() {
        let result = extract_text("notes.txt", b"plain text");
        assert!(matches!(result, Err(ExtractError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_garbage_pdf_is_rejected() {
        // Empty bytes are not a valid PDF
        assert!(extract_text("lease.pdf", b"").is_err());
    }

    #[test]
    fn test_garbage_docx_is_rejected() {
        let result = extract_text("lease.docx", b"not a zip");
        assert!(matches!(result, Err(ExtractError::InvalidDocx(_))));
    }

    #[test]
    fn test_blank_docx_yields_empty_text() {
        use std::io::{Cursor, Write};

        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("word/document.xml", zip::write::SimpleFileOptions::default())
            .unwrap();
        writer
            .write_all(b"<w:document><w:body><w:p/><w:p/></w:body></w:document>")
            .unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        let text = extract_text("blank.docx", &bytes).unwrap();
        assert!(text.trim().is_empty());
    }
}
