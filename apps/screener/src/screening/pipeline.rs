//! Screening pipeline: one run over a job description and a batch of resumes.
//!
//! Order of checks matches the upload form it replaces: resume count first,
//! then required files, then loading, then scoring.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::documents::load_job_description;
use crate::embedding::SentenceEncoder;
use crate::errors::ScreeningError;
use crate::offers::{OfferFields, OfferLetterTemplate};
use crate::scheduling::{schedule_interview, InterviewOutcome};
use crate::screening::scorer::{ScoreResult, SimilarityScorer};

pub const MAX_RESUMES: usize = 10;

#[derive(Debug, Clone)]
pub struct InterviewRequest {
    pub date: String,
    pub time: String,
}

#[derive(Debug, Clone)]
pub struct OfferRequest {
    pub role: String,
    pub joining_date: String,
    /// Overrides the extracted name in every generated letter.
    pub candidate_name: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ScreeningRequest {
    pub job_description: Option<PathBuf>,
    pub template: Option<PathBuf>,
    pub resumes: Vec<PathBuf>,
    pub interview: Option<InterviewRequest>,
    /// Only acted on for candidates whose interview was scheduled.
    pub offer: Option<OfferRequest>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScreeningOutcome {
    pub run_id: Uuid,
    pub results: Vec<ScoreResult>,
    pub interviews: Vec<InterviewOutcome>,
    pub analysis_report: String,
    pub interview_report: String,
    pub offer_letters: Vec<PathBuf>,
}

/// Runs a full screening pass. Synchronous; call from a blocking context.
pub fn process_screening(
    request: &ScreeningRequest,
    encoder: &dyn SentenceEncoder,
    offer_dir: &Path,
) -> Result<ScreeningOutcome, ScreeningError> {
    if request.resumes.len() > MAX_RESUMES {
        return Err(ScreeningError::TooManyResumes {
            count: request.resumes.len(),
            max: MAX_RESUMES,
        });
    }

    let job_description_path = request
        .job_description
        .as_deref()
        .ok_or(ScreeningError::MissingInput("job description"))?;
    let template_path = request
        .template
        .as_deref()
        .ok_or(ScreeningError::MissingInput("offer letter template"))?;
    if request.resumes.is_empty() {
        return Err(ScreeningError::MissingInput("resumes"));
    }

    let run_id = Uuid::new_v4();
    info!(%run_id, resumes = request.resumes.len(), encoder = encoder.name(), "screening run started");

    let job_description = load_job_description(job_description_path)?;
    let template = OfferLetterTemplate::load(template_path)?;

    let results = SimilarityScorer::new(encoder, &job_description)?.check_similarity(&request.resumes);

    let mut interviews = Vec::new();
    let mut offer_letters = Vec::new();

    if let Some(interview) = &request.interview {
        for (idx, result) in results.iter().enumerate() {
            let Some(extracted_name) = result
                .candidate_name
                .as_deref()
                .filter(|_| result.eligibility.is_eligible())
            else {
                continue;
            };
            let candidate = candidate_label(idx);

            let outcome = schedule_interview(&candidate, &interview.date, &interview.time);
            let scheduled = matches!(outcome, InterviewOutcome::Scheduled { .. });
            interviews.push(outcome);
            if !scheduled {
                continue;
            }

            match &request.offer {
                Some(offer) => {
                    let fields = OfferFields {
                        candidate_name: offer.candidate_name.as_deref().unwrap_or(extracted_name),
                        role: &offer.role,
                        joining_date: &offer.joining_date,
                    };
                    offer_letters.push(template.create_offer_letter(offer_dir, &fields)?);
                }
                None => interviews.push(InterviewOutcome::OfferSkipped { candidate }),
            }
        }
    }

    if !results.iter().any(|r| r.eligibility.is_eligible()) {
        interviews.push(InterviewOutcome::NoEligibleCandidates);
    }

    let eligible = results.iter().filter(|r| r.eligibility.is_eligible()).count();
    info!(%run_id, eligible, offers = offer_letters.len(), "screening run finished");

    Ok(ScreeningOutcome {
        run_id,
        analysis_report: format_analysis_report(&results, offer_letters.len()),
        interview_report: format_interview_report(&interviews),
        results,
        interviews,
        offer_letters,
    })
}

/// "Candidate N", 1-based in upload order.
pub fn candidate_label(idx: usize) -> String {
    format!("Candidate {}", idx + 1)
}

pub fn format_analysis_report(results: &[ScoreResult], offer_count: usize) -> String {
    let mut lines = vec!["Analysis Results:".to_string()];
    for (idx, result) in results.iter().enumerate() {
        lines.push(format!(
            "{}, Similarity Percentage: {:.2}% - Status: {}",
            candidate_label(idx),
            result.score * 100.0,
            result.eligibility
        ));
    }
    if offer_count > 0 {
        lines.push("\nGenerated Offer Letters:".to_string());
        for idx in 0..offer_count {
            lines.push(format!("- {} Offer Letter", candidate_label(idx)));
        }
    }
    lines.join("\n")
}

pub fn format_interview_report(interviews: &[InterviewOutcome]) -> String {
    if interviews.is_empty() {
        return "No interviews scheduled.".to_string();
    }
    std::iter::once("Interview Schedule:".to_string())
        .chain(interviews.iter().map(ToString::to_string))
        .collect::<Vec<_>>()
        .join("\n")
}
