//! Axum route handlers for the Analysis API.

use axum::{
    extract::{Multipart, State},
    http::header,
    response::IntoResponse,
    Json,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::analysis::export::render_text_report;
use crate::analysis::report::AnalysisResult;
use crate::errors::AppError;
use crate::resume_file::extract_resume_text;
use crate::state::AppState;

/// Multipart field carrying the resume upload.
const RESUME_FIELD: &str = "resume";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub jd_text: String,
    pub resume_text: String,
    #[serde(default)]
    pub cover_letter_text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub analysis_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub analysis: AnalysisResult,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractResumeResponse {
    pub text: String,
    pub line_count: usize,
}

async fn run_analysis(
    state: &AppState,
    request: AnalyzeRequest,
) -> Result<AnalysisResult, AppError> {
    let analysis = state
        .analyzer
        .analyze(
            request.jd_text,
            request.resume_text,
            request.cover_letter_text.unwrap_or_default(),
        )
        .await?;

    info!(
        backend = state.analyzer.backend(),
        score = analysis.score,
        band = %analysis.band,
        "Analysis complete"
    );
    Ok(analysis)
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analyze
///
/// Scores a resume (and optional cover letter) against a job description.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let analysis = run_analysis(&state, request).await?;

    Ok(Json(AnalyzeResponse {
        analysis_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        analysis,
    }))
}

/// POST /api/v1/analyze/report
///
/// Same input as `/analyze`; returns the plain-text report.
pub async fn handle_analyze_report(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<impl IntoResponse, AppError> {
    let analysis = run_analysis(&state, request).await?;

    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        render_text_report(&analysis),
    ))
}

/// POST /api/v1/resume/extract
///
/// Accepts a PDF or .txt upload in the `resume` field and returns its text.
pub async fn handle_extract_resume(
    mut multipart: Multipart,
) -> Result<Json<ExtractResumeResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(RESUME_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or("resume").to_string();
        let content_type = field.content_type().map(str::to_string);
        let data: Bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {e}")))?;

        info!(file_name = %file_name, size = data.len(), "Extracting resume text");

        let text = tokio::task::spawn_blocking(move || {
            extract_resume_text(&file_name, content_type.as_deref(), &data)
        })
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("resume extraction task failed: {e}")))??;

        return Ok(Json(ExtractResumeResponse {
            line_count: text.lines().count(),
            text,
        }));
    }

    Err(AppError::BadRequest(format!(
        "Missing '{RESUME_FIELD}' file field"
    )))
}
