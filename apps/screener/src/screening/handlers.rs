//! Axum route handlers for the Screening API.

use std::path::{Path, PathBuf};

use axum::{
    extract::{Multipart, Path as AxumPath, State},
    http::header,
    response::IntoResponse,
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::offers::{sanitize_file_component, OFFER_LETTER_SUFFIX};
use crate::scheduling::InterviewOutcome;
use crate::screening::pipeline::{
    process_screening, InterviewRequest, OfferRequest, ScreeningOutcome, ScreeningRequest,
};
use crate::screening::scorer::ScoreResult;
use crate::state::AppState;

const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// An uploaded file held in memory until it is staged on disk.
#[derive(Debug)]
pub struct UploadedFile {
    pub file_name: String,
    pub data: Bytes,
}

/// Multipart form fields of `POST /api/v1/screenings`.
#[derive(Debug, Default)]
pub struct ScreeningForm {
    pub job_description: Option<UploadedFile>,
    pub template: Option<UploadedFile>,
    pub resumes: Vec<UploadedFile>,
    pub schedule_interview: bool,
    pub interview_date: String,
    pub interview_time: String,
    pub generate_offer: bool,
    pub role: String,
    pub joining_date: String,
    pub candidate_name: String,
}

#[derive(Debug, Serialize)]
pub struct ScreeningResponse {
    pub run_id: Uuid,
    pub results: Vec<ScoreResult>,
    pub interviews: Vec<InterviewOutcome>,
    pub analysis_report: String,
    pub interview_report: String,
    /// File names, downloadable from `/api/v1/offer-letters/:file_name`.
    pub offer_letters: Vec<String>,
}

impl From<ScreeningOutcome> for ScreeningResponse {
    fn from(outcome: ScreeningOutcome) -> Self {
        Self {
            run_id: outcome.run_id,
            results: outcome.results,
            interviews: outcome.interviews,
            analysis_report: outcome.analysis_report,
            interview_report: outcome.interview_report,
            offer_letters: outcome
                .offer_letters
                .iter()
                .filter_map(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .collect(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/screenings
///
/// Scores uploaded resumes against the uploaded job description and, when asked,
/// schedules interviews and fills the offer-letter template for eligible candidates.
pub async fn handle_create_screening(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ScreeningResponse>, AppError> {
    let form = read_form(multipart).await?;

    // Staged uploads live until this handler returns.
    let staging = tempfile::tempdir().map_err(|e| AppError::Internal(e.into()))?;
    let request = stage_form(form, staging.path()).await?;

    let encoder = state.encoder.clone();
    let offer_dir = state.config.offer_letter_dir.clone();
    let outcome = tokio::task::spawn_blocking(move || {
        process_screening(&request, encoder.as_ref(), &offer_dir)
    })
    .await
    .map_err(|e| AppError::Internal(e.into()))??;

    Ok(Json(outcome.into()))
}

/// GET /api/v1/offer-letters/:file_name
///
/// Downloads a previously generated offer letter.
pub async fn handle_download_offer_letter(
    State(state): State<AppState>,
    AxumPath(file_name): AxumPath<String>,
) -> Result<impl IntoResponse, AppError> {
    if !is_offer_letter_name(&file_name) {
        return Err(AppError::Validation(format!(
            "'{file_name}' is not an offer letter file name"
        )));
    }

    let path = state.config.offer_letter_dir.join(&file_name);
    let data = match tokio::fs::read(&path).await {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(AppError::NotFound(format!("Offer letter '{file_name}'")));
        }
        Err(e) => return Err(AppError::Internal(e.into())),
    };

    info!(%file_name, bytes = data.len(), "offer letter downloaded");
    Ok((
        [
            (header::CONTENT_TYPE, DOCX_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name.replace('"', "")),
            ),
        ],
        data,
    ))
}

// ────────────────────────────────────────────────────────────────────────────
// Form handling
// ────────────────────────────────────────────────────────────────────────────

async fn read_form(mut multipart: Multipart) -> Result<ScreeningForm, AppError> {
    let mut form = ScreeningForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "job_description" | "template" | "resumes" => {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read '{name}': {e}")))?;
                let file = UploadedFile { file_name, data };
                match name.as_str() {
                    "job_description" => form.job_description = Some(file),
                    "template" => form.template = Some(file),
                    _ => form.resumes.push(file),
                }
            }
            _ => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read '{name}': {e}")))?;
                apply_text_field(&mut form, &name, value);
            }
        }
    }

    Ok(form)
}

fn apply_text_field(form: &mut ScreeningForm, name: &str, value: String) {
    match name {
        "schedule_interview" => form.schedule_interview = parse_choice(&value),
        "interview_date" => form.interview_date = value,
        "interview_time" => form.interview_time = value,
        "generate_offer" => form.generate_offer = parse_choice(&value),
        "role" => form.role = value,
        "joining_date" => form.joining_date = value,
        "candidate_name" => form.candidate_name = value,
        other => warn!(field = other, "ignoring unknown form field"),
    }
}

/// "Yes"/"No" radio values; "true"/"1" are accepted too.
fn parse_choice(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "yes" | "y" | "true" | "1"
    )
}

/// Writes uploads under `dir`, keeping original file names so format detection
/// by extension works. Every upload gets its own subdirectory
/// (`job_description/`, `template/`, `resumes/<idx>/`), so equal names never collide.
async fn stage_form(form: ScreeningForm, dir: &Path) -> Result<ScreeningRequest, AppError> {
    let job_description = match form.job_description {
        Some(file) => Some(stage_file(&dir.join("job_description"), &file).await?),
        None => None,
    };
    let template = match form.template {
        Some(file) => Some(stage_file(&dir.join("template"), &file).await?),
        None => None,
    };

    let mut resumes = Vec::with_capacity(form.resumes.len());
    for (idx, file) in form.resumes.iter().enumerate() {
        let resume_dir = dir.join("resumes").join(idx.to_string());
        resumes.push(stage_file(&resume_dir, file).await?);
    }

    let interview = form.schedule_interview.then(|| InterviewRequest {
        date: form.interview_date,
        time: form.interview_time,
    });
    let offer = form.generate_offer.then(|| OfferRequest {
        role: form.role,
        joining_date: form.joining_date,
        candidate_name: Some(form.candidate_name.trim().to_string()).filter(|n| !n.is_empty()),
    });

    Ok(ScreeningRequest {
        job_description,
        template,
        resumes,
        interview,
        offer,
    })
}

async fn stage_file(dir: &Path, file: &UploadedFile) -> Result<PathBuf, AppError> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| AppError::Internal(e.into()))?;
    let path = dir.join(sanitize_file_component(&file.file_name));
    tokio::fs::write(&path, &file.data)
        .await
        .map_err(|e| AppError::Internal(e.into()))?;
    Ok(path)
}

fn is_offer_letter_name(file_name: &str) -> bool {
    file_name.ends_with(OFFER_LETTER_SUFFIX)
        && !file_name.contains(['/', '\\'])
        && !file_name.contains("..")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_choice() {
        assert!(parse_choice("Yes"));
        assert!(parse_choice(" yes "));
        assert!(parse_choice("true"));
        assert!(!parse_choice("No"));
        assert!(!parse_choice(""));
    }

    #[test]
    fn test_is_offer_letter_name() {
        assert!(is_offer_letter_name("Jane Doe_20240115143000_Offer_Letter.docx"));
        assert!(!is_offer_letter_name("../Jane_Offer_Letter.docx"));
        assert!(!is_offer_letter_name("a/b_Offer_Letter.docx"));
        assert!(!is_offer_letter_name("passwd"));
    }

    #[test]
    fn test_apply_text_fields() {
        let mut form = ScreeningForm::default();
        apply_text_field(&mut form, "schedule_interview", "Yes".to_string());
        apply_text_field(&mut form, "interview_time", "02:30 PM".to_string());
        apply_text_field(&mut form, "generate_offer", "No".to_string());
        apply_text_field(&mut form, "unexpected", "ignored".to_string());
        assert!(form.schedule_interview);
        assert!(!form.generate_offer);
        assert_eq!(form.interview_time, "02:30 PM");
    }

    #[tokio::test]
    async fn test_stage_form_writes_files_and_builds_request() {
        let dir = tempfile::tempdir().unwrap();
        let form = ScreeningForm {
            job_description: Some(UploadedFile {
                file_name: "jd.txt".to_string(),
                data: Bytes::from_static(b"Rust engineer"),
            }),
            template: None,
            resumes: vec![
                UploadedFile {
                    file_name: "cv.txt".to_string(),
                    data: Bytes::from_static(b"first"),
                },
                UploadedFile {
                    file_name: "cv.txt".to_string(),
                    data: Bytes::from_static(b"second"),
                },
            ],
            schedule_interview: true,
            interview_date: "2024-01-15".to_string(),
            interview_time: "02:30 PM".to_string(),
            generate_offer: true,
            role: "Engineer".to_string(),
            joining_date: "2024-02-01".to_string(),
            candidate_name: "  ".to_string(),
        };

        let request = stage_form(form, dir.path()).await.unwrap();

        let jd = request.job_description.unwrap();
        assert_eq!(std::fs::read_to_string(jd).unwrap(), "Rust engineer");
        assert!(request.template.is_none());
        assert_eq!(request.resumes.len(), 2);
        assert_eq!(std::fs::read_to_string(&request.resumes[0]).unwrap(), "first");
        assert_eq!(std::fs::read_to_string(&request.resumes[1]).unwrap(), "second");
        assert_eq!(request.resumes[1].file_name().unwrap(), "cv.txt");
        assert_eq!(request.interview.unwrap().time, "02:30 PM");
        let offer = request.offer.unwrap();
        assert_eq!(offer.role, "Engineer");
        assert!(offer.candidate_name.is_none());
    }

    #[tokio::test]
    async fn test_uploads_with_equal_names_are_kept_apart() {
        let dir = tempfile::tempdir().unwrap();
        let upload = |data: &'static [u8]| UploadedFile {
            file_name: "upload".to_string(),
            data: Bytes::from_static(data),
        };
        let form = ScreeningForm {
            job_description: Some(upload(b"JOB DESCRIPTION TEXT")),
            template: Some(upload(b"PK\x03\x04template-bytes")),
            resumes: vec![upload(b"resume text")],
            ..Default::default()
        };

        let request = stage_form(form, dir.path()).await.unwrap();

        let jd = request.job_description.unwrap();
        let template = request.template.unwrap();
        assert_ne!(jd, template);
        assert_eq!(std::fs::read_to_string(&jd).unwrap(), "JOB DESCRIPTION TEXT");
        assert_eq!(std::fs::read(&template).unwrap(), b"PK\x03\x04template-bytes");
        assert_eq!(std::fs::read_to_string(&request.resumes[0]).unwrap(), "resume text");
    }

    #[tokio::test]
    async fn test_job_description_named_like_staging_dir() {
        let dir = tempfile::tempdir().unwrap();
        let form = ScreeningForm {
            job_description: Some(UploadedFile {
                file_name: "resumes".to_string(),
                data: Bytes::from_static(b"Rust engineer"),
            }),
            resumes: vec![UploadedFile {
                file_name: "cv.txt".to_string(),
                data: Bytes::from_static(b"cv"),
            }],
            ..Default::default()
        };

        let request = stage_form(form, dir.path()).await.unwrap();

        assert_eq!(std::fs::read_to_string(request.job_description.unwrap()).unwrap(), "Rust engineer");
        assert_eq!(std::fs::read_to_string(&request.resumes[0]).unwrap(), "cv");
    }
}
