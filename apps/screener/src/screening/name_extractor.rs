use lazy_static::lazy_static;
use regex::Regex;

pub const UNKNOWN_CANDIDATE: &str = "Unknown Candidate";

lazy_static! {
    // "Capitalized word, space, Capitalized word", e.g. "John Smith".
    static ref NAME_RE: Regex = Regex::new(r"\b([A-Z][a-z]+ [A-Z][a-z]+)\b").unwrap();
}

/// Guesses the candidate's name: the first two consecutive capitalized words.
///
/// Heuristic only. No middle names, hyphenated names or non-Latin scripts;
/// a capitalized heading such as "Work Experience" wins if it comes first.
pub fn extract_candidate_name(resume_text: &str) -> String {
    NAME_RE
        .captures(resume_text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| UNKNOWN_CANDIDATE.to_string())
}
