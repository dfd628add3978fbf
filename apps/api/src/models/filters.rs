use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::lenient;

/// Experience band a recruiter is hiring for. Drives the experience-score adjustment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    #[default]
    Any,
    Junior,
    Mid,
    Senior,
}

impl ExperienceLevel {
    /// Exact, case-sensitive match; anything unrecognised means no adjustment.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "junior" => Self::Junior,
            "mid" => Self::Mid,
            "senior" => Self::Senior,
            _ => Self::Any,
        }
    }
}

impl<'de> Deserialize<'de> for ExperienceLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(value.as_str().map(Self::parse).unwrap_or_default())
    }
}

/// Minimum education tier. Candidates below it have their education score penalised.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EducationLevel {
    #[default]
    Any,
    Bachelor,
    Master,
    Phd,
}

impl EducationLevel {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "bachelor" => Self::Bachelor,
            "master" => Self::Master,
            "phd" => Self::Phd,
            _ => Self::Any,
        }
    }
}

impl<'de> Deserialize<'de> for EducationLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(value.as_str().map(Self::parse).unwrap_or_default())
    }
}

/// Recruiter-supplied screening policy. Every option is independently optional;
/// an empty object is equivalent to every key set to its default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    #[serde(default)]
    pub experience: ExperienceLevel,
    #[serde(default)]
    pub min_education: EducationLevel,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub required_certs: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub location: String,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub preferred_keywords: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub blacklist: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub required_skills: Vec<String>,
}

impl FilterCriteria {
    /// Reads filters from a request field that may be an object, a JSON-encoded
    /// string (as browser form posts send it), or missing. Anything unusable
    /// yields the defaults.
    pub fn from_loose_value(value: Option<&Value>) -> Self {
        let parsed = match value {
            None | Some(Value::Null) => return Self::default(),
            Some(Value::String(raw)) if raw.trim().is_empty() => return Self::default(),
            Some(Value::String(raw)) => serde_json::from_str::<Self>(raw),
            Some(other) => serde_json::from_value::<Self>(other.clone()),
        };

        parsed.unwrap_or_else(|e| {
            tracing::warn!("Failed to parse filters, using defaults: {e}");
            Self::default()
        })
    }
}
