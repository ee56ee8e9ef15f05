//! Resume file → plain text. PDF goes through `pdf-extract`; plain text is
//! decoded as UTF-8. Output lines are trimmed and blank lines dropped.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResumeFileError {
    #[error("unsupported resume file '{file_name}'; upload a PDF or .txt file")]
    Unsupported { file_name: String },

    #[error("no text could be extracted from the resume file")]
    Empty,

    #[error("resume text file is not valid UTF-8")]
    InvalidUtf8,

    #[error("failed to read PDF: {0}")]
    Pdf(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResumeFormat {
    Pdf,
    PlainText,
}

fn detect_format(file_name: &str, content_type: Option<&str>) -> Option<ResumeFormat> {
    let lower = file_name.to_lowercase();
    let mime = content_type.unwrap_or_default();

    if lower.ends_with(".pdf") || mime == "application/pdf" {
        Some(ResumeFormat::Pdf)
    } else if lower.ends_with(".txt") || mime.starts_with("text/plain") {
        Some(ResumeFormat::PlainText)
    } else {
        None
    }
}

/// Extracts normalized resume text from an uploaded file.
pub fn extract_resume_text(
    file_name: &str,
    content_type: Option<&str>,
    data: &[u8],
) -> Result<String, ResumeFileError> {
    let raw = match detect_format(file_name, content_type) {
        Some(ResumeFormat::Pdf) => pdf_extract::extract_text_from_mem(data)
            .map_err(|e| ResumeFileError::Pdf(e.to_string()))?,
        Some(ResumeFormat::PlainText) => {
            String::from_utf8(data.to_vec()).map_err(|_| ResumeFileError::InvalidUtf8)?
        }
        None => {
            return Err(ResumeFileError::Unsupported {
                file_name: file_name.to_string(),
            })
        }
    };

    let text = normalize_lines(&raw);
    if text.is_empty() {
        return Err(ResumeFileError::Empty);
    }

    tracing::debug!(
        file_name,
        lines = text.lines().count(),
        "Extracted resume text"
    );
    Ok(text)
}

/// Trims every line and drops blank ones. Handles `\r\n` input.
pub fn normalize_lines(raw: &str) -> String {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
