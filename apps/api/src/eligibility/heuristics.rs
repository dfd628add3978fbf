//! Text heuristics for years of experience and degree tier.
//!
//! These patterns define the scoring behaviour. They are deliberately loose
//! (`ms` matches inside "systems", `ba` inside "database") and must stay that way.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::candidate::Experience;

static DURATION_YEARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]+)\+?\s*year").expect("valid duration regex"));

static DURATION_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9]+)\s*-\s*([0-9]+)\s*years").expect("valid duration range regex")
});

static RESUME_YEARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)([0-9]+)\+?\s*years?").expect("valid resume years regex"));

static DOCTORATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)phd|doctor").expect("valid doctorate regex"));

static MASTERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)master|m.sc|ms|m\.|msc").expect("valid masters regex"));

static BACHELORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)bachelor|b\.sc|bs|b\.|ba").expect("valid bachelors regex"));

/// Digits captured by the patterns above can exceed `u32`; treat those as
/// "a lot of years" since every consumer caps at 10 anyway.
fn parse_years(digits: &str) -> u32 {
    digits.parse().unwrap_or(u32::MAX)
}

/// Years of experience, first match wins:
/// each entry's `duration` in order (`N year` / `N+ year`, then `N-M years`
/// taking `M`), then the resume text (`N years`, any case). Zero when nothing matches.
pub fn extract_years(experience: &[Experience], resume_text: &str) -> u32 {
    for duration in experience.iter().filter_map(|e| e.duration.as_deref()) {
        if duration.is_empty() {
            continue;
        }
        if let Some(caps) = DURATION_YEARS.captures(duration) {
            return parse_years(&caps[1]);
        }
        if let Some(caps) = DURATION_RANGE.captures(duration) {
            return parse_years(&caps[2]);
        }
    }

    RESUME_YEARS
        .captures(resume_text)
        .map(|caps| parse_years(&caps[1]))
        .unwrap_or(0)
}

/// Highest degree family mentioned in the joined degree text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegreeTier {
    Doctorate,
    Masters,
    Bachelors,
    Unknown,
}

impl DegreeTier {
    /// Checks families from the top down; the first hit wins.
    pub fn detect(degree_text: &str) -> Self {
        if DOCTORATE.is_match(degree_text) {
            DegreeTier::Doctorate
        } else if MASTERS.is_match(degree_text) {
            DegreeTier::Masters
        } else if BACHELORS.is_match(degree_text) {
            DegreeTier::Bachelors
        } else {
            DegreeTier::Unknown
        }
    }

    pub fn base_score(self) -> u32 {
        match self {
            DegreeTier::Doctorate => 95,
            DegreeTier::Masters => 85,
            DegreeTier::Bachelors => 75,
            DegreeTier::Unknown => 50,
        }
    }
}
