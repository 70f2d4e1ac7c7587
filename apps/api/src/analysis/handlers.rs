//! Axum route handler for resume analysis.

use anyhow::Context;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use bytes::Bytes;
use tracing::info;

use crate::analysis::result::AnalysisResult;
use crate::errors::AppError;
use crate::extraction::{extract, UploadedDocument};
use crate::state::AppState;

struct ResumeUpload {
    filename: String,
    bytes: Bytes,
}

#[derive(Default)]
struct AnalyzeForm {
    resume: Option<ResumeUpload>,
    job_description: Option<String>,
}

/// POST /api/analyze
///
/// Multipart form: file field `resume` (.pdf or .docx) and text field `job_description`.
/// Extracts the resume text and returns the analysis. Model failures never
/// surface here; the orchestrator answers them with the keyword fallback.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalysisResult>, AppError> {
    let multipart = multipart
        .map_err(|e| AppError::Validation(format!("Invalid multipart form: {}", e.body_text())))?;
    let form = read_analyze_form(multipart).await?;

    let (Some(resume), Some(job_description)) = (form.resume, form.job_description) else {
        return Err(AppError::Validation(
            "Missing resume file or job description".to_string(),
        ));
    };

    if resume.filename.is_empty() {
        return Err(AppError::Validation("No selected file".to_string()));
    }

    let document = UploadedDocument::from_upload(&resume.filename, resume.bytes)?;
    info!(
        format = document.format.as_str(),
        size_bytes = document.bytes.len(),
        "Extracting resume text"
    );

    let resume_text = tokio::task::spawn_blocking(move || extract(&document))
        .await
        .context("resume extraction task did not complete")??;

    let result = state
        .orchestrator
        .analyze(&resume_text, &job_description)
        .await;

    Ok(Json(result))
}

/// Collects the two known fields; anything else in the form is ignored.
/// A `resume` part without a filename is not a file upload and is skipped,
/// as is a `job_description` part sent as a file.
async fn read_analyze_form(mut multipart: Multipart) -> Result<AnalyzeForm, AppError> {
    let mut form = AnalyzeForm::default();

    while let Some(field) = multipart.next_field().await.map_err(invalid_form)? {
        let name = field.name().map(str::to_owned);
        let filename = field.file_name().map(str::to_owned);

        match (name.as_deref(), filename) {
            (Some("resume"), Some(filename)) => {
                let bytes = field.bytes().await.map_err(invalid_form)?;
                form.resume = Some(ResumeUpload { filename, bytes });
            }
            (Some("job_description"), None) => {
                form.job_description = Some(field.text().await.map_err(invalid_form)?);
            }
            _ => {}
        }
    }

    Ok(form)
}

fn invalid_form(err: axum::extract::multipart::MultipartError) -> AppError {
    AppError::Validation(format!("Invalid multipart form: {}", err.body_text()))
}
