// Resume screening: similarity scoring, name extraction and the run orchestration.
// Scoring is synchronous; the HTTP handlers move each run onto the blocking pool.

pub mod handlers;
pub mod name_extractor;
pub mod pipeline;
pub mod scorer;
