//! Resume text extraction. Dispatches on the uploaded file's suffix.
//!
//! Unknown suffixes are a soft failure: the caller gets the `UNSUPPORTED_TEXT`
//! sentinel as the document text and the pipeline carries on. Parse failures in a
//! supported format are hard errors.

mod docx;

use serde::Serialize;
use thiserror::Error;

/// Text substituted for documents whose type is not recognised.
pub const UNSUPPORTED_TEXT: &str = "Unsupported file type.";

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Failed to extract text from PDF: {0}")]
    Pdf(String),

    #[error("Failed to read DOCX document: {0}")]
    Docx(String),

    #[error("Text file is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Txt,
    Unsupported,
}

impl DocumentFormat {
    pub fn from_file_name(file_name: &str) -> Self {
        let lower = file_name.to_ascii_lowercase();
        if lower.ends_with(".pdf") {
            DocumentFormat::Pdf
        } else if lower.ends_with(".docx") {
            DocumentFormat::Docx
        } else if lower.ends_with(".txt") {
            DocumentFormat::Txt
        } else {
            DocumentFormat::Unsupported
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    pub format: DocumentFormat,
    pub text: String,
}

impl ExtractedDocument {
    pub fn is_supported(&self) -> bool {
        self.format != DocumentFormat::Unsupported
    }
}

/// Extracts plain text from an uploaded document.
///
/// - `.pdf`: text of every page, in page order
/// - `.docx`: body paragraphs joined with `\n`
/// - `.txt`: raw bytes decoded as UTF-8
/// - anything else: `UNSUPPORTED_TEXT`
pub fn extract_text(file_name: &str, bytes: &[u8]) -> Result<ExtractedDocument, ExtractError> {
    let format = DocumentFormat::from_file_name(file_name);
    let text = match format {
        DocumentFormat::Pdf => pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| ExtractError::Pdf(e.to_string()))?,
        DocumentFormat::Docx => docx::extract_paragraphs(bytes)?.join("\n"),
        DocumentFormat::Txt => String::from_utf8(bytes.to_vec())?,
        DocumentFormat::Unsupported => UNSUPPORTED_TEXT.to_string(),
    };
    Ok(ExtractedDocument { format, text })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_dispatch_by_suffix() {
        assert_eq!(DocumentFormat::from_file_name("cv.pdf"), DocumentFormat::Pdf);
        assert_eq!(DocumentFormat::from_file_name("cv.docx"), DocumentFormat::Docx);
        assert_eq!(DocumentFormat::from_file_name("notes.txt"), DocumentFormat::Txt);
        assert_eq!(DocumentFormat::from_file_name("CV.PDF"), DocumentFormat::Pdf);
    }

    #[test]
    fn test_unknown_suffixes_are_unsupported() {
        for name in ["cv.doc", "cv.rtf", "resume", "cv.pdf.zip", "photo.png"] {
            assert_eq!(
                DocumentFormat::from_file_name(name),
                DocumentFormat::Unsupported,
                "{name}"
            );
        }
    }

    #[test]
    fn test_txt_decoded_as_utf8() {
        let doc = extract_text("resume.txt", "Go engineer, 5 years, Zürich".as_bytes()).unwrap();
        assert_eq!(doc.format, DocumentFormat::Txt);
        assert_eq!(doc.text, "Go engineer, 5 years, Zürich");
        assert!(doc.is_supported());
    }

    #[test]
    fn test_invalid_utf8_txt_is_an_error() {
        let err = extract_text("resume.txt", &[0xff, 0xfe, 0x41]).unwrap_err();
        assert!(matches!(err, ExtractError::Utf8(_)));
    }

    #[test]
    fn test_unsupported_yields_sentinel_not_error() {
        let doc = extract_text("resume.odt", b"whatever").unwrap();
        assert_eq!(doc.format, DocumentFormat::Unsupported);
        assert_eq!(doc.text, UNSUPPORTED_TEXT);
        assert!(!doc.is_supported());
    }

    #[test]
    fn test_garbage_pdf_is_an_error() {
        let err = extract_text("resume.pdf", b"not a pdf at all").unwrap_err();
        assert!(matches!(err, ExtractError::Pdf(_)));
    }
}
