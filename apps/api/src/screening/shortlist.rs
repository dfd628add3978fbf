//! Shortlist: narrows and re-orders scored candidates the way a recruiter
//! browses them: free-text search, verdict, minimum score, must-have skills.

use serde::Deserialize;

use crate::models::lenient;
use crate::screening::CandidateReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Score,
    Name,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Shortlist options. All fields optional; the default keeps every candidate
/// ranked by score, highest first.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortlistQuery {
    /// Case-insensitive substring of name, email or any extracted skill.
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub keyword: String,
    /// `all` or a verdict label such as `Potential Fit`.
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub eligibility: String,
    #[serde(default, deserialize_with = "lenient::number")]
    pub min_score: Option<f64>,
    /// Every one of these must appear in the candidate's extracted skills.
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub required_skills: Vec<String>,
    /// `score` (default) or `name`.
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub sort: String,
    /// `asc` or `desc`. Defaults to `desc` for score and `asc` for name.
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub direction: String,
}

impl ShortlistQuery {
    pub fn sort_column(&self) -> SortColumn {
        match self.sort.as_str() {
            "name" => SortColumn::Name,
            _ => SortColumn::Score,
        }
    }

    pub fn sort_direction(&self) -> SortDirection {
        match (self.direction.as_str(), self.sort_column()) {
            ("asc", _) => SortDirection::Asc,
            ("desc", _) => SortDirection::Desc,
            (_, SortColumn::Name) => SortDirection::Asc,
            (_, SortColumn::Score) => SortDirection::Desc,
        }
    }

    fn matches_keyword(&self, report: &CandidateReport) -> bool {
        let keyword = self.keyword.to_lowercase();
        if keyword.is_empty() {
            return true;
        }
        let analysis = &report.analysis;
        let contains = |field: &Option<String>| {
            field
                .as_deref()
                .map(|v| v.to_lowercase().contains(&keyword))
                .unwrap_or(false)
        };
        contains(&analysis.name)
            || contains(&analysis.email)
            || analysis
                .extracted_skills
                .iter()
                .any(|s| s.to_lowercase().contains(&keyword))
    }

    fn matches_eligibility(&self, report: &CandidateReport) -> bool {
        match self.eligibility.as_str() {
            "" | "all" => true,
            label => report.result.eligibility.label() == label,
        }
    }

    fn matches_min_score(&self, report: &CandidateReport) -> bool {
        report.ats_score() as f64 >= self.min_score.unwrap_or(0.0)
    }

    fn matches_required_skills(&self, report: &CandidateReport) -> bool {
        let skills: Vec<String> = report
            .analysis
            .extracted_skills
            .iter()
            .map(|s| s.to_lowercase())
            .collect();
        self.required_skills
            .iter()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .all(|required| skills.contains(&required))
    }
}

fn sort_key_name(report: &CandidateReport) -> String {
    report.analysis.name.as_deref().unwrap_or("").to_lowercase()
}

/// Filters (keyword, verdict, minimum score, required skills) then sorts.
/// The sort is stable, so ties keep their incoming order.
pub fn apply_shortlist(reports: &[CandidateReport], query: &ShortlistQuery) -> Vec<CandidateReport> {
    let mut shortlisted: Vec<CandidateReport> = reports
        .iter()
        .filter(|r| query.matches_keyword(r))
        .filter(|r| query.matches_eligibility(r))
        .filter(|r| query.matches_min_score(r))
        .filter(|r| query.matches_required_skills(r))
        .cloned()
        .collect();

    let column = query.sort_column();
    let direction = query.sort_direction();
    shortlisted.sort_by(|a, b| {
        let ordering = match column {
            SortColumn::Score => a.ats_score().cmp(&b.ats_score()),
            SortColumn::Name => sort_key_name(a).cmp(&sort_key_name(b)),
        };
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
    shortlisted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eligibility::weights::Weights;
    use crate::models::candidate::{AnalysisResult, CandidateSubmission};
    use crate::models::filters::FilterCriteria;
    use crate::screening::screen_batch;
    use serde_json::json;

    fn candidate(name: &str, email: &str, resume: &str, skills: &[&str]) -> CandidateSubmission {
        CandidateSubmission {
            resume_text: resume.to_string(),
            analysis: AnalysisResult {
                name: Some(name.to_string()),
                email: Some(email.to_string()),
                extracted_skills: skills.iter().map(|s| s.to_string()).collect(),
                ..Default::default()
            },
        }
    }

    /// Scores: Carol 81 (Eligible), Bob 53 (Potential Fit), Alice 43 (Not a Fit).
    fn reports() -> Vec<CandidateReport> {
        screen_batch(
            vec![
                candidate("Alice", "alice@example.com", "", &[]),
                candidate("bob", "bob@corp.io", "rust", &["Rust"]),
                candidate(
                    "Carol",
                    "carol@example.com",
                    "rust tokio axum, 8 years",
                    &["rust", "tokio", "axum"],
                ),
            ],
            &FilterCriteria::default(),
            "rust tokio axum",
            &Weights::default(),
        )
    }

    fn names(reports: &[CandidateReport]) -> Vec<String> {
        reports
            .iter()
            .map(|r| r.analysis.name.clone().unwrap_or_default())
            .collect()
    }

    #[test]
    fn test_default_query_keeps_all_ranked_by_score() {
        let shortlisted = apply_shortlist(&reports(), &ShortlistQuery::default());
        assert_eq!(names(&shortlisted), vec!["Carol", "bob", "Alice"]);
    }

    #[test]
    fn test_keyword_matches_name_email_or_skill() {
        let by_email = ShortlistQuery {
            keyword: "CORP".into(),
            ..Default::default()
        };
        assert_eq!(names(&apply_shortlist(&reports(), &by_email)), vec!["bob"]);

        let by_skill = ShortlistQuery {
            keyword: "tok".into(),
            ..Default::default()
        };
        assert_eq!(names(&apply_shortlist(&reports(), &by_skill)), vec!["Carol"]);
    }

    #[test]
    fn test_eligibility_filter() {
        let query = ShortlistQuery {
            eligibility: "Potential Fit".into(),
            ..Default::default()
        };
        assert_eq!(names(&apply_shortlist(&reports(), &query)), vec!["bob"]);

        let all = ShortlistQuery {
            eligibility: "all".into(),
            ..Default::default()
        };
        assert_eq!(apply_shortlist(&reports(), &all).len(), 3);
    }

    #[test]
    fn test_min_score_filter() {
        let query = ShortlistQuery {
            min_score: Some(50.0),
            ..Default::default()
        };
        assert_eq!(names(&apply_shortlist(&reports(), &query)), vec!["Carol", "bob"]);
    }

    #[test]
    fn test_required_skills_must_all_be_present() {
        let query = ShortlistQuery {
            required_skills: vec![" RUST ".into(), "axum".into()],
            ..Default::default()
        };
        assert_eq!(names(&apply_shortlist(&reports(), &query)), vec!["Carol"]);

        let single = ShortlistQuery {
            required_skills: vec!["rust".into()],
            ..Default::default()
        };
        assert_eq!(names(&apply_shortlist(&reports(), &single)), vec!["Carol", "bob"]);
    }

    #[test]
    fn test_sort_by_name_defaults_ascending_case_insensitive() {
        let query = ShortlistQuery {
            sort: "name".into(),
            ..Default::default()
        };
        assert_eq!(
            names(&apply_shortlist(&reports(), &query)),
            vec!["Alice", "bob", "Carol"]
        );
    }

    #[test]
    fn test_sort_by_score_ascending() {
        let query = ShortlistQuery {
            direction: "asc".into(),
            ..Default::default()
        };
        assert_eq!(
            names(&apply_shortlist(&reports(), &query)),
            vec!["Alice", "bob", "Carol"]
        );
    }

    #[test]
    fn test_query_deserializes_leniently() {
        let query: ShortlistQuery = serde_json::from_value(json!({
            "minScore": "60",
            "eligibility": "Eligible",
            "requiredSkills": "not-a-list",
            "sort": 7
        }))
        .unwrap();
        assert_eq!(query.min_score, Some(60.0));
        assert!(query.required_skills.is_empty());
        assert_eq!(query.sort_column(), SortColumn::Score);
        assert_eq!(query.sort_direction(), SortDirection::Desc);
    }
}
