//! Core building blocks for routine generation: time normalization,
//! schedule extraction, conflict predicates, window admissibility and
//! candidate scoring. The enumeration loop itself lives in
//! `routine-engine`; this crate holds everything it composes.

pub mod conflict;
pub mod extract;
pub mod scoring;
pub mod time;
pub mod windows;

use async_trait::async_trait;
use thiserror::Error;
use types::{ConflictRecord, RoutineRequest};

pub use scoring::CandidateSummary;
pub use windows::TimeWindow;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("No courses selected")]
    NoCoursesSelected,
    #[error("No days selected")]
    NoDaysSelected,
    #[error("No time slots selected")]
    NoTimesSelected,
    #[error("No sections found for course {0}")]
    NoSectionsForCourse(String),
    #[error("{}", conflict::format_exam_conflicts(.0))]
    ExamConflicts(Vec<ConflictRecord>),
    #[error("Could not find a valid combination without conflicts. Please try different sections or time slots.")]
    NoValidCombination,
}

/// Request-shape validation, checked before any catalog work.
pub fn validate_request(req: &RoutineRequest) -> Result<(), GenerateError> {
    if req.courses.is_empty() {
        return Err(GenerateError::NoCoursesSelected);
    }
    if req.days.is_empty() {
        return Err(GenerateError::NoDaysSelected);
    }
    if req.times.is_empty() {
        return Err(GenerateError::NoTimesSelected);
    }
    Ok(())
}

/// Breaks ties between equally good candidates. Implementations may
/// call out to external services; a failed or nonsensical ranking is
/// recoverable and callers fall back to the first candidate.
#[async_trait]
pub trait Ranker: Send + Sync {
    async fn rank(
        &self,
        candidates: &[CandidateSummary],
        commute_text: &str,
    ) -> anyhow::Result<usize>;
}

/// Trivial ranker: always picks the first tied candidate.
pub struct FirstCandidate;

#[async_trait]
impl Ranker for FirstCandidate {
    async fn rank(
        &self,
        _candidates: &[CandidateSummary],
        _commute_text: &str,
    ) -> anyhow::Result<usize> {
        Ok(0)
    }
}
