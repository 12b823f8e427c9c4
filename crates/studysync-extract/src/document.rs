//! Reading syllabus documents from disk.

use std::path::Path;

use crate::ExtractError;

/// How a document's text will be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Pdf,
    Text,
}

/// Decide how to read a file: extension first, then magic bytes.
pub fn detect_source_kind(path: &Path, data: &[u8]) -> SourceKind {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    if ext == "pdf" || data.starts_with(b"%PDF-") {
        SourceKind::Pdf
    } else {
        SourceKind::Text
    }
}

/// Read the full text of a syllabus document.
///
/// PDFs go through `pdf-extract`; everything else is treated as plain text
/// and decoded lossily so stray non-UTF-8 bytes never fail an upload.
pub fn read_document_text(path: &Path) -> Result<String, ExtractError> {
    let data = std::fs::read(path)?;
    read_document_text_from_bytes(path, &data)
}

/// In-memory variant of [`read_document_text`] for already-uploaded bytes.
pub fn read_document_text_from_bytes(path: &Path, data: &[u8]) -> Result<String, ExtractError> {
    match detect_source_kind(path, data) {
        SourceKind::Pdf => {
            tracing::debug!(path = %path.display(), "extracting PDF text");
            pdf_extract::extract_text_from_mem(data).map_err(|e| ExtractError::Pdf(e.to_string()))
        }
        SourceKind::Text => Ok(String::from_utf8_lossy(data).into_owned()),
    }
}
