use axum::extract::Multipart;

use studysync_extract::SourceKind;

/// An uploaded syllabus file with its data and metadata.
pub struct UploadedFile {
    pub filename: String,
    pub data: Vec<u8>,
    pub kind: SourceKind,
}

/// Parsed form fields from the multipart upload.
pub struct UploadForm {
    pub file: UploadedFile,
    pub exam_board: Option<String>,
    pub year: Option<String>,
}

/// Parse a multipart form upload into structured form fields.
pub async fn parse_multipart(mut multipart: Multipart) -> Result<UploadForm, String> {
    let mut file: Option<UploadedFile> = None;
    let mut exam_board: Option<String> = None;
    let mut year: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| format!("Failed to read form field: {}", e))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or("syllabus.txt").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| format!("Failed to read file data: {}", e))?
                    .to_vec();

                if data.is_empty() {
                    return Err("Uploaded file is empty".to_string());
                }

                let kind = detect_upload_kind(&filename, &data)?;

                file = Some(UploadedFile {
                    filename,
                    data,
                    kind,
                });
            }
            "exam_board" => {
                let val = field
                    .text()
                    .await
                    .map_err(|e| format!("Failed to read exam_board: {}", e))?;
                if !val.trim().is_empty() {
                    exam_board = Some(val.trim().to_string());
                }
            }
            "year" => {
                let val = field
                    .text()
                    .await
                    .map_err(|e| format!("Failed to read year: {}", e))?;
                if !val.trim().is_empty() {
                    year = Some(val.trim().to_string());
                }
            }
            _ => {
                // Ignore unknown fields
                let _ = field.bytes().await;
            }
        }
    }

    let file = file.ok_or("No file uploaded")?;

    Ok(UploadForm {
        file,
        exam_board,
        year,
    })
}

/// Detect the upload kind from extension and magic bytes.
///
/// `.pdf` uploads must carry the PDF magic; everything else is treated as
/// plain text, which matches what the extractor will do with it.
fn detect_upload_kind(filename: &str, data: &[u8]) -> Result<SourceKind, String> {
    let lower = filename.to_lowercase();

    if lower.ends_with(".pdf") {
        if !data.starts_with(b"%PDF-") {
            return Err("File has .pdf extension but doesn't appear to be a valid PDF".to_string());
        }
        return Ok(SourceKind::Pdf);
    }

    if data.starts_with(b"%PDF-") {
        return Ok(SourceKind::Pdf);
    }

    Ok(SourceKind::Text)
}

/// Build a unique on-disk name for an upload, keeping a sanitized version of
/// the original name for readability.
pub fn storage_filename(guide_epoch: i64, original: &str) -> String {
    let safe: String = original
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{guide_epoch}_{safe}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_pdf_by_extension_and_magic() {
        assert_eq!(
            detect_upload_kind("maths.pdf", b"%PDF-1.4 ...").unwrap(),
            SourceKind::Pdf
        );
    }

    #[test]
    fn test_detect_pdf_extension_without_magic_rejected() {
        assert!(detect_upload_kind("maths.pdf", b"hello").is_err());
    }

    #[test]
    fn test_detect_pdf_magic_without_extension() {
        assert_eq!(
            detect_upload_kind("upload", b"%PDF-1.7").unwrap(),
            SourceKind::Pdf
        );
    }

    #[test]
    fn test_detect_text_fallback() {
        assert_eq!(
            detect_upload_kind("maths.txt", b"Mathematics\n").unwrap(),
            SourceKind::Text
        );
        assert_eq!(
            detect_upload_kind("notes", b"plain").unwrap(),
            SourceKind::Text
        );
    }

    #[test]
    fn test_storage_filename_sanitized() {
        let name = storage_filename(1_700_000_000, "my maths (final).pdf");
        assert_eq!(name, "1700000000_my_maths__final_.pdf");
    }
}
