use serde::{Deserialize, Serialize};

use super::lenient;

/// One education entry as returned by the resume extractor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Education {
    #[serde(default, deserialize_with = "lenient::string")]
    pub degree: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub institution: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub year: Option<String>,
}

/// One employment entry. `duration` is free text ("2019-2024 (5 years)", "3+ years", ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub company: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub duration: Option<String>,
}

/// Structured fields extracted from a resume by the ingestion collaborator.
///
/// Only the three `extracted*` collections feed the eligibility engine. The
/// rest are carried through to reports, shortlist filtering and CSV export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub extracted_skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub extracted_soft_skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient::record_list")]
    pub extracted_education: Vec<Education>,
    #[serde(default, deserialize_with = "lenient::record_list")]
    pub extracted_experience: Vec<Experience>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub found_keywords: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub missing_keywords: Vec<String>,
}

/// A candidate as posted to the screening endpoint: raw resume text plus the
/// extractor's analysis, flattened into one object.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateSubmission {
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub resume_text: String,
    #[serde(flatten)]
    pub analysis: AnalysisResult,
}
