// Batch screening: scores a set of candidates against one job description and
// filter set, then ranks, shortlists and exports them.
// Scoring goes through the eligibility engine; nothing here computes scores.

pub mod export;
pub mod handlers;
pub mod shortlist;

use serde::Serialize;

use crate::eligibility::weights::Weights;
use crate::eligibility::{compute_eligibility, EligibilityResult};
use crate::models::candidate::{AnalysisResult, CandidateSubmission};
use crate::models::filters::FilterCriteria;

/// A scored candidate: the extractor's analysis merged with the eligibility result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateReport {
    #[serde(flatten)]
    pub analysis: AnalysisResult,
    #[serde(flatten)]
    pub result: EligibilityResult,
}

impl CandidateReport {
    pub fn ats_score(&self) -> u32 {
        self.result.ats_score
    }
}

/// Scores every submission with the same weight snapshot and ranks them by
/// score, highest first. Equal scores keep submission order.
pub fn screen_batch(
    submissions: Vec<CandidateSubmission>,
    filters: &FilterCriteria,
    job_description: &str,
    weights: &Weights,
) -> Vec<CandidateReport> {
    let mut reports: Vec<CandidateReport> = submissions
        .into_iter()
        .map(|submission| {
            let result = compute_eligibility(
                &submission.analysis,
                &submission.resume_text,
                filters,
                job_description,
                weights,
            );
            CandidateReport {
                analysis: submission.analysis,
                result,
            }
        })
        .collect();

    reports.sort_by(|a, b| b.ats_score().cmp(&a.ats_score()));
    reports
}
