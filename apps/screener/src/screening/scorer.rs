//! Embedding Similarity Scorer: job description vs resume text.
//!
//! Per-resume problems (unsupported format, unreadable file, encoder failure)
//! score 0 and are reported through `ScoreResult::warning`; they never abort a run.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Serialize, Serializer};
use tracing::{debug, warn};

use crate::documents::extract_text;
use crate::embedding::{cosine_similarity, SentenceEncoder};
use crate::errors::ScreeningError;
use crate::screening::name_extractor::extract_candidate_name;

/// Scores at or above this are "Eligible". Fixed, not configurable.
pub const ELIGIBILITY_THRESHOLD: f32 = 0.50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    Eligible,
    NotEligible,
}

impl Eligibility {
    pub fn from_score(score: f32) -> Self {
        if score >= ELIGIBILITY_THRESHOLD {
            Eligibility::Eligible
        } else {
            Eligibility::NotEligible
        }
    }

    pub fn is_eligible(self) -> bool {
        self == Eligibility::Eligible
    }
}

impl fmt::Display for Eligibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Eligibility::Eligible => f.write_str("Eligible"),
            Eligibility::NotEligible => f.write_str("Not Eligible"),
        }
    }
}

impl Serialize for Eligibility {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Outcome of scoring a single resume.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreResult {
    pub resume: String,
    pub score: f32, // -1.0 – 1.0
    pub eligibility: Eligibility,
    /// Only extracted for eligible resumes.
    pub candidate_name: Option<String>,
    /// Why the resume was scored zero, if it was skipped.
    pub warning: Option<String>,
}

impl ScoreResult {
    fn skipped(resume: String, warning: Option<String>) -> Self {
        Self {
            resume,
            score: 0.0,
            eligibility: Eligibility::NotEligible,
            candidate_name: None,
            warning,
        }
    }
}

/// Compares resumes against one job description with a borrowed encoder.
/// The job description is encoded once, in `new`.
pub struct SimilarityScorer<'a> {
    encoder: &'a dyn SentenceEncoder,
    job_embedding: Vec<f32>,
}

impl<'a> SimilarityScorer<'a> {
    /// Failing to encode the job description is an error, since nothing could be scored.
    pub fn new(encoder: &'a dyn SentenceEncoder, job_description: &str) -> Result<Self, ScreeningError> {
        let job_embedding = encoder.encode(job_description)?;
        Ok(Self {
            encoder,
            job_embedding,
        })
    }

    /// Similarity between the job description and one resume's text.
    /// Empty resume text yields 0.0 without touching the encoder.
    pub fn score(&self, resume_text: &str) -> Result<f32, ScreeningError> {
        if resume_text.trim().is_empty() {
            return Ok(0.0);
        }
        let resume_embedding = self.encoder.encode(resume_text)?;
        Ok(cosine_similarity(&self.job_embedding, &resume_embedding))
    }

    /// Scores each resume file in order.
    pub fn check_similarity(&self, resumes: &[PathBuf]) -> Vec<ScoreResult> {
        resumes.iter().map(|path| self.score_resume(path)).collect()
    }

    fn score_resume(&self, path: &Path) -> ScoreResult {
        let resume = resume_label(path);

        let text = match extract_text(path) {
            Ok(text) => text,
            Err(e) => {
                warn!(path = %path.display(), "resume skipped: {e}");
                return ScoreResult::skipped(resume, Some(e.to_string()));
            }
        };

        let score = match self.score(&text) {
            Ok(score) => score,
            Err(e) => {
                warn!(path = %path.display(), "resume encoding failed: {e}");
                return ScoreResult::skipped(resume, Some(e.to_string()));
            }
        };

        let eligibility = Eligibility::from_score(score);
        let candidate_name = eligibility
            .is_eligible()
            .then(|| extract_candidate_name(&text));

        debug!(%resume, score, %eligibility, "resume scored");
        ScoreResult {
            resume,
            score,
            eligibility,
            candidate_name,
            warning: None,
        }
    }
}

fn resume_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
