//! Eligibility Engine: deterministic, weighted multi-factor candidate scoring.
//!
//! Given the extractor's `AnalysisResult`, the raw resume text, the recruiter's
//! `FilterCriteria` and the job description, produce a 0–100 score, a
//! three-tier verdict and the full breakdown that led there.
//!
//! Pure and synchronous: the only shared input is the weight snapshot taken
//! at the start of each call. Malformed input never fails; every field has a
//! default, so one bad record cannot abort a batch.

pub mod handlers;
pub mod heuristics;
pub mod keywords;
pub mod weights;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::eligibility::heuristics::{extract_years, DegreeTier};
use crate::eligibility::keywords::extract_job_keywords;
use crate::eligibility::weights::{WeightConfig, Weights};
use crate::models::candidate::AnalysisResult;
use crate::models::filters::{EducationLevel, ExperienceLevel, FilterCriteria};

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

/// Three-tier verdict derived from the final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Eligibility {
    #[serde(rename = "Eligible")]
    Eligible,
    #[serde(rename = "Potential Fit")]
    PotentialFit,
    #[serde(rename = "Not a Fit")]
    NotAFit,
}

impl Eligibility {
    pub const ELIGIBLE_THRESHOLD: u32 = 75;
    pub const POTENTIAL_FIT_THRESHOLD: u32 = 50;

    pub fn from_score(score: u32) -> Self {
        if score >= Self::ELIGIBLE_THRESHOLD {
            Eligibility::Eligible
        } else if score >= Self::POTENTIAL_FIT_THRESHOLD {
            Eligibility::PotentialFit
        } else {
            Eligibility::NotAFit
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Eligibility::Eligible => "Eligible",
            Eligibility::PotentialFit => "Potential Fit",
            Eligibility::NotAFit => "Not a Fit",
        }
    }
}

/// Every intermediate score plus the weights used, for audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityBreakdown {
    pub skills_score: u32,
    pub keyword_match_count: usize,
    pub keyword_total: usize,
    pub exp_score: u32,
    pub edu_score: u32,
    pub cert_score: u32,
    pub location_score: u32,
    pub preferred_bonus: u32,
    pub blacklist_penalty: u32,
    pub weights: Weights,
    pub years_of_experience: u32,
    pub job_keywords: Vec<String>,
    pub matched_keywords: Vec<String>,
}

/// Score and verdict for one candidate.
///
/// `eligibility_score` and `ats_score` always carry the same value; both names
/// are part of the response contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityResult {
    pub eligibility: Eligibility,
    pub eligibility_score: u32,
    pub ats_score: u32,
    pub eligibility_breakdown: EligibilityBreakdown,
}

// ────────────────────────────────────────────────────────────────────────────
// Engine
// ────────────────────────────────────────────────────────────────────────────

/// Scores candidates against the weights held by its `WeightConfig`.
pub struct EligibilityEngine {
    weights: WeightConfig,
}

impl EligibilityEngine {
    pub fn new(weights: WeightConfig) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &WeightConfig {
        &self.weights
    }

    /// Scores one candidate with a single snapshot of the current weights.
    pub fn compute(
        &self,
        analysis: &AnalysisResult,
        resume_text: &str,
        filters: &FilterCriteria,
        job_description: &str,
    ) -> EligibilityResult {
        let weights = self.weights.get_weights();
        compute_eligibility(analysis, resume_text, filters, job_description, &weights)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Core scoring algorithm
// ────────────────────────────────────────────────────────────────────────────

/// Rounds halves toward positive infinity (`2.5 → 3`, `-2.5 → -2`).
fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

fn scale(score: u32, factor: f64) -> u32 {
    round_half_up(score as f64 * factor) as u32
}

/// `matched / total` scaled to `0..=scale_to`, rounded.
fn ratio_score(matched: usize, total: usize, scale_to: f64) -> u32 {
    round_half_up(matched as f64 / total as f64 * scale_to) as u32
}

/// Lower-cases terms and drops empty ones.
fn normalize_terms(terms: &[String]) -> Vec<String> {
    terms
        .iter()
        .map(|t| t.to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Lower-cased views of the candidate used for every term lookup.
struct CandidateText {
    resume: String,
    skills: Vec<String>,
}

impl CandidateText {
    /// Substring of the resume text, or an exact extracted skill.
    fn mentions(&self, term: &str) -> bool {
        self.resume.contains(term) || self.skills.iter().any(|s| s == term)
    }

    fn count_mentions(&self, terms: &[String]) -> usize {
        terms.iter().filter(|t| self.mentions(t)).count()
    }
}

fn experience_score(years: u32, level: ExperienceLevel) -> u32 {
    let base = if years == 0 {
        50
    } else {
        (round_half_up(years.min(10) as f64 / 10.0 * 100.0) as u32).min(100)
    };

    match level {
        ExperienceLevel::Any => base,
        ExperienceLevel::Junior => {
            if years <= 2 {
                base.max(95)
            } else if years <= 4 {
                scale(base, 0.7)
            } else {
                scale(base, 0.4)
            }
        }
        ExperienceLevel::Mid => {
            if (3..=6).contains(&years) {
                base.max(95)
            } else {
                scale(base, 0.7)
            }
        }
        ExperienceLevel::Senior => {
            if years >= 7 {
                base.max(95)
            } else {
                scale(base, 0.6)
            }
        }
    }
}

fn education_score(degree_text: &str, minimum: EducationLevel) -> u32 {
    let mut score = DegreeTier::detect(degree_text).base_score();
    if minimum == EducationLevel::Bachelor && score < 75 {
        score = scale(score, 0.6);
    }
    if minimum == EducationLevel::Master && score < 85 {
        score = scale(score, 0.5);
    }
    if minimum == EducationLevel::Phd && score < 95 {
        score = scale(score, 0.4);
    }
    score
}

/// Computes score, verdict and breakdown for one candidate.
pub fn compute_eligibility(
    analysis: &AnalysisResult,
    resume_text: &str,
    filters: &FilterCriteria,
    job_description: &str,
    weights: &Weights,
) -> EligibilityResult {
    let candidate = CandidateText {
        resume: resume_text.to_lowercase(),
        skills: analysis
            .extracted_skills
            .iter()
            .map(|s| s.to_lowercase())
            .collect(),
    };

    let years = extract_years(&analysis.extracted_experience, resume_text);
    let exp_score = experience_score(years, filters.experience);

    let degree_text = analysis
        .extracted_education
        .iter()
        .map(|e| e.degree.as_deref().unwrap_or("").to_lowercase())
        .collect::<Vec<_>>()
        .join(" ");
    let edu_score = education_score(&degree_text, filters.min_education);

    let required_certs = normalize_terms(&filters.required_certs);
    let cert_score = if required_certs.is_empty() {
        100
    } else {
        ratio_score(
            candidate.count_mentions(&required_certs),
            required_certs.len(),
            100.0,
        )
    };

    let location_score = if filters.location.trim().is_empty() {
        100
    } else if candidate.resume.contains(&filters.location.to_lowercase()) {
        100
    } else {
        30
    };

    let preferred = normalize_terms(&filters.preferred_keywords);
    let preferred_bonus = if preferred.is_empty() {
        0
    } else {
        ratio_score(candidate.count_mentions(&preferred), preferred.len(), 10.0).min(10)
    };

    // Blacklist terms only count against the resume text, never the skill list.
    let blacklist = normalize_terms(&filters.blacklist);
    let blacklist_hits = blacklist
        .iter()
        .filter(|b| candidate.resume.contains(b.as_str()))
        .count() as u32;
    let blacklist_penalty = (blacklist_hits * 25).min(50);

    let job_keywords = extract_job_keywords(job_description);
    let matched_keywords: Vec<String> = job_keywords
        .iter()
        .filter(|k| candidate.mentions(k))
        .cloned()
        .collect();
    let keyword_match_ratio = if job_keywords.is_empty() {
        0.0
    } else {
        matched_keywords.len() as f64 / job_keywords.len() as f64
    };

    let required_skills = normalize_terms(&filters.required_skills);
    let skill_ratio = if required_skills.is_empty() {
        (candidate.skills.len() as f64 / 8.0).min(1.0)
    } else {
        candidate.count_mentions(&required_skills) as f64 / required_skills.len() as f64
    };

    let skills_score =
        round_half_up((keyword_match_ratio * 0.7 + skill_ratio * 0.3) * 100.0) as u32;

    let raw = (skills_score as f64 * weights.skills
        + exp_score as f64 * weights.experience
        + edu_score as f64 * weights.education
        + cert_score as f64 * weights.certs
        + location_score as f64 * weights.location)
        / 100.0;

    let score = round_half_up(raw + preferred_bonus as f64 - blacklist_penalty as f64)
        .clamp(0.0, 100.0) as u32;
    let eligibility = Eligibility::from_score(score);

    debug!(
        score,
        years,
        skills_score,
        exp_score,
        edu_score,
        "Computed eligibility: {}",
        eligibility.label()
    );

    EligibilityResult {
        eligibility,
        eligibility_score: score,
        ats_score: score,
        eligibility_breakdown: EligibilityBreakdown {
            skills_score,
            keyword_match_count: matched_keywords.len(),
            keyword_total: job_keywords.len(),
            exp_score,
            edu_score,
            cert_score,
            location_score,
            preferred_bonus,
            blacklist_penalty,
            weights: *weights,
            years_of_experience: years,
            job_keywords,
            matched_keywords,
        },
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
