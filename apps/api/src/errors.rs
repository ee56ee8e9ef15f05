use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::resume_file::ResumeFileError;

/// Rejections raised before any analysis runs. Each carries user-facing copy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("job description is empty")]
    EmptyJd,

    #[error("resume is empty")]
    EmptyResume,

    #[error("job description has {word_count} words; at least 30 are required")]
    LowInformationJd { word_count: usize },
}

impl ValidationError {
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::EmptyJd => "EMPTY_JD",
            ValidationError::EmptyResume => "EMPTY_RESUME",
            ValidationError::LowInformationJd { .. } => "LOW_INFORMATION_JD",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ValidationError::EmptyJd => "Invalid Job Description",
            ValidationError::EmptyResume => "Invalid Resume",
            ValidationError::LowInformationJd { .. } => "Insufficient Job Description",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ValidationError::EmptyJd => "Please provide a valid job description.",
            ValidationError::EmptyResume => "Please provide a valid resume.",
            ValidationError::LowInformationJd { .. } => {
                "The job description provided is too short to infer real role expectations."
            }
        }
    }

    pub fn guidance(&self) -> &'static [&'static str] {
        match self {
            ValidationError::EmptyJd => &[
                "The job description field cannot be empty.",
                "Please paste a complete job description with responsibilities and requirements.",
            ],
            ValidationError::EmptyResume => &[
                "The resume field cannot be empty.",
                "Please paste your resume text or upload a resume file.",
            ],
            ValidationError::LowInformationJd { .. } => &[
                "Paste a fuller job description with responsibilities and requirements.",
                "One-word or very short descriptions don't provide enough context.",
                "RoleAudit avoids generating misleading scores when inputs are vague.",
            ],
        }
    }
}

const ANALYSIS_ERROR_TITLE: &str = "Analysis Error";
const ANALYSIS_ERROR_MESSAGE: &str =
    "An unexpected error occurred during analysis. Please check your inputs and try again.";
const ANALYSIS_ERROR_GUIDANCE: &[&str] = &[
    "Ensure your job description and resume are valid text inputs.",
    "Avoid extremely long or malformed inputs.",
];

const UNSUPPORTED_MEDIA_GUIDANCE: &[&str] = &[
    "Upload the resume as a PDF or a plain .txt file.",
    "Word documents (.doc, .docx) are not read; export them to PDF or paste the text instead.",
];

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unsupported media: {0}")]
    UnsupportedMedia(String),

    /// Unexpected failure inside the analysis pipeline.
    #[error("Analysis error: {0}")]
    Analysis(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ResumeFileError> for AppError {
    fn from(err: ResumeFileError) -> Self {
        match err {
            ResumeFileError::Unsupported { .. } => AppError::UnsupportedMedia(err.to_string()),
            ResumeFileError::Empty | ResumeFileError::InvalidUtf8 | ResumeFileError::Pdf(_) => {
                AppError::BadRequest(err.to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Validation(err) => {
                tracing::warn!(code = err.code(), "Rejected analysis input: {err}");
                (
                    StatusCode::BAD_REQUEST,
                    json!({
                        "code": err.code(),
                        "title": err.title(),
                        "message": err.message(),
                        "guidance": err.guidance(),
                    }),
                )
            }
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                json!({ "code": "BAD_REQUEST", "message": msg }),
            ),
            AppError::UnsupportedMedia(msg) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                json!({
                    "code": "UNSUPPORTED_MEDIA_TYPE",
                    "message": msg,
                    "guidance": UNSUPPORTED_MEDIA_GUIDANCE,
                }),
            ),
            AppError::Analysis(msg) => {
                tracing::error!("Analysis error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "code": "ANALYSIS_ERROR",
                        "title": ANALYSIS_ERROR_TITLE,
                        "message": ANALYSIS_ERROR_MESSAGE,
                        "guidance": ANALYSIS_ERROR_GUIDANCE,
                    }),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "code": "INTERNAL_ERROR",
                        "message": "An internal server error occurred",
                    }),
                )
            }
        };

        (status, Json(json!({ "error": body }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_validation_copy() {
        let err = ValidationError::LowInformationJd { word_count: 4 };
        assert_eq!(err.title(), "Insufficient Job Description");
        assert_eq!(err.guidance().len(), 3);
        assert!(err.to_string().contains("4 words"));
    }

    #[tokio::test]
    async fn test_validation_error_response_shape() {
        let response = AppError::from(ValidationError::EmptyJd).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "EMPTY_JD");
        assert_eq!(body["error"]["title"], "Invalid Job Description");
        assert_eq!(body["error"]["guidance"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_analysis_error_hides_detail() {
        let response = AppError::Analysis("worker panicked".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"]["message"], ANALYSIS_ERROR_MESSAGE);
        assert!(!body.to_string().contains("panicked"));
    }

    #[tokio::test]
    async fn test_unsupported_media_explains_accepted_formats() {
        let err = AppError::from(ResumeFileError::Unsupported {
            file_name: "cv.docx".to_string(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        let body = body_json(response).await;
        let guidance = body["error"]["guidance"].as_array().unwrap();
        assert!(guidance.iter().any(|g| g.as_str().unwrap().contains("Word")));
    }

    #[test]
    fn test_resume_file_errors_map_to_client_errors() {
        let unsupported = AppError::from(ResumeFileError::Unsupported {
            file_name: "cv.docx".to_string(),
        });
        assert!(matches!(unsupported, AppError::UnsupportedMedia(_)));
        assert!(matches!(
            AppError::from(ResumeFileError::Empty),
            AppError::BadRequest(_)
        ));
    }
}
