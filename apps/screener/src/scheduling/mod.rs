//! Interview scheduling: validates `YYYY-MM-DD` + `HH:MM AM/PM` input.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::errors::ScreeningError;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%I:%M %p";
const DISPLAY_FORMAT: &str = "%Y-%m-%d at %I:%M %p";

/// Parses an interview date and a 12-hour clock time.
/// Surrounding whitespace from form fields is ignored.
pub fn validate_date_time(date: &str, time: &str) -> Result<NaiveDateTime, ScreeningError> {
    let invalid = || ScreeningError::InvalidDateTime {
        date: date.to_string(),
        time: time.to_string(),
    };
    let date_obj = NaiveDate::parse_from_str(date.trim(), DATE_FORMAT).map_err(|_| invalid())?;
    let time_obj = NaiveTime::parse_from_str(time.trim(), TIME_FORMAT).map_err(|_| invalid())?;
    Ok(date_obj.and_time(time_obj))
}

/// Validates the slot for a candidate. Bad input is reported, never raised.
pub fn schedule_interview(candidate: &str, date: &str, time: &str) -> InterviewOutcome {
    let candidate = candidate.to_string();
    match validate_date_time(date, time) {
        Ok(at) => InterviewOutcome::Scheduled { candidate, at },
        Err(_) => InterviewOutcome::InvalidDateTime { candidate },
    }
}

/// One line of the interview report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InterviewOutcome {
    Scheduled { candidate: String, at: NaiveDateTime },
    InvalidDateTime { candidate: String },
    OfferSkipped { candidate: String },
    NoEligibleCandidates,
}

impl fmt::Display for InterviewOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterviewOutcome::Scheduled { candidate, at } => write!(
                f,
                "Interview scheduled for {candidate} on {}",
                at.format(DISPLAY_FORMAT)
            ),
            InterviewOutcome::InvalidDateTime { candidate } => write!(
                f,
                "Invalid date or time format for {candidate}. Use YYYY-MM-DD for date and HH:MM AM/PM for time."
            ),
            InterviewOutcome::OfferSkipped { candidate } => {
                write!(f, "Offer letter not generated for {candidate}.")
            }
            InterviewOutcome::NoEligibleCandidates => {
                f.write_str("No eligible candidates for interview scheduling.")
            }
        }
    }
}
