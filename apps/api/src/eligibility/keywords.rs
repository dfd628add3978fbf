//! Deterministic keyword extraction from a job description.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum number of keywords taken from a job description.
pub const MAX_JOB_KEYWORDS: usize = 20;

const STOPWORDS: &[&str] = &[
    "and", "or", "the", "a", "an", "to", "for", "with", "of", "in", "on", "is", "are", "by", "that",
    "this", "as", "be", "from", "at", "we", "you", "will", "can",
];

static TOKEN_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9+.#-]+").expect("valid token separator regex"));

/// Token frequencies that remember the order each token was first seen.
#[derive(Debug, Default)]
struct FrequencyTable {
    index: HashMap<String, usize>,
    counts: Vec<(String, u32)>,
}

impl FrequencyTable {
    fn add(&mut self, token: &str) {
        match self.index.get(token) {
            Some(&slot) => self.counts[slot].1 += 1,
            None => {
                self.index.insert(token.to_string(), self.counts.len());
                self.counts.push((token.to_string(), 1));
            }
        }
    }

    /// Highest counts first; equal counts keep first-seen order (the sort is stable).
    fn into_ranked(mut self) -> Vec<(String, u32)> {
        self.counts.sort_by(|a, b| b.1.cmp(&a.1));
        self.counts
    }
}

/// Splits a job description into candidate keyword tokens: lower-cased, split on
/// anything outside `[a-z0-9+.#-]`, at least two characters, stopwords removed.
pub fn tokenize(job_description: &str) -> Vec<String> {
    let lowered = job_description.to_lowercase();
    TOKEN_SEPARATOR
        .split(&lowered)
        .map(str::trim)
        .filter(|t| t.chars().count() >= 2 && !STOPWORDS.contains(t))
        .map(str::to_string)
        .collect()
}

/// The most frequent tokens of the job description, at most [`MAX_JOB_KEYWORDS`].
pub fn extract_job_keywords(job_description: &str) -> Vec<String> {
    let mut table = FrequencyTable::default();
    for token in tokenize(job_description) {
        table.add(&token);
    }
    table
        .into_ranked()
        .into_iter()
        .take(MAX_JOB_KEYWORDS)
        .map(|(token, _)| token)
        .collect()
}
