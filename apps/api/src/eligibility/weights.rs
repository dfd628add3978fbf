//! Category weights for the eligibility score, and the sources they are read from.
//!
//! The active set lives behind `RwLock<Arc<Weights>>`. A reload builds the new
//! `Arc` without holding the lock and swaps it in with a single write, so a
//! reader sees either the old set or the new set in full.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::models::lenient::scalar_to_string;

/// Five non-negative category weights. The composite score divides the weighted
/// sum by 100 regardless of what these add up to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    pub skills: f64,
    pub experience: f64,
    pub education: f64,
    pub certs: f64,
    pub location: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            skills: WeightKey::Skills.default_value(),
            experience: WeightKey::Experience.default_value(),
            education: WeightKey::Education.default_value(),
            certs: WeightKey::Certs.default_value(),
            location: WeightKey::Location.default_value(),
        }
    }
}

impl Weights {
    /// Builds a full set from raw source values. Missing or malformed entries
    /// take the category default.
    pub fn from_raw(raw: &RawWeights) -> Self {
        let value = |key: WeightKey| parse_weight(raw.get(&key).map(String::as_str), key.default_value());
        Self {
            skills: value(WeightKey::Skills),
            experience: value(WeightKey::Experience),
            education: value(WeightKey::Education),
            certs: value(WeightKey::Certs),
            location: value(WeightKey::Location),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeightKey {
    Skills,
    Experience,
    Education,
    Certs,
    Location,
}

impl WeightKey {
    pub const ALL: [WeightKey; 5] = [
        WeightKey::Skills,
        WeightKey::Experience,
        WeightKey::Education,
        WeightKey::Certs,
        WeightKey::Location,
    ];

    /// Key used in JSON weight files and API payloads.
    pub fn name(self) -> &'static str {
        match self {
            WeightKey::Skills => "skills",
            WeightKey::Experience => "experience",
            WeightKey::Education => "education",
            WeightKey::Certs => "certs",
            WeightKey::Location => "location",
        }
    }

    fn env_suffix(self) -> &'static str {
        match self {
            WeightKey::Skills => "SKILLS",
            WeightKey::Experience => "EXPERIENCE",
            WeightKey::Education => "EDUCATION",
            WeightKey::Certs => "CERTS",
            WeightKey::Location => "LOCATION",
        }
    }

    pub fn default_value(self) -> f64 {
        match self {
            WeightKey::Skills => 40.0,
            WeightKey::Experience => 20.0,
            WeightKey::Education => 15.0,
            WeightKey::Certs => 15.0,
            WeightKey::Location => 10.0,
        }
    }
}

/// Unparsed values as a source reports them.
pub type RawWeights = HashMap<WeightKey, String>;

/// Parses one weight. Empty, unparseable or non-finite input yields `fallback`;
/// negative numbers clamp to zero.
pub fn parse_weight(raw: Option<&str>, fallback: f64) -> f64 {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return fallback;
    };
    match raw.parse::<f64>() {
        Ok(n) if n.is_finite() => n.max(0.0),
        _ => fallback,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Sources
// ────────────────────────────────────────────────────────────────────────────

/// Somewhere weight values can be read from. Called once per reload; the
/// returned map is treated as one consistent reading.
pub trait WeightSource: Send + Sync {
    fn read(&self) -> RawWeights;

    fn describe(&self) -> String;
}

/// Reads `ATS_WEIGHT_SKILLS`, `ATS_WEIGHT_EXPERIENCE`, ... from the process environment.
pub struct EnvWeightSource {
    prefix: String,
}

pub const DEFAULT_ENV_PREFIX: &str = "ATS_WEIGHT_";

impl EnvWeightSource {
    pub fn new() -> Self {
        Self::with_prefix(DEFAULT_ENV_PREFIX)
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    fn var_name(&self, key: WeightKey) -> String {
        format!("{}{}", self.prefix, key.env_suffix())
    }
}

impl Default for EnvWeightSource {
    fn default() -> Self {
        Self::new()
    }
}

impl WeightSource for EnvWeightSource {
    fn read(&self) -> RawWeights {
        WeightKey::ALL
            .into_iter()
            .filter_map(|key| std::env::var(self.var_name(key)).ok().map(|v| (key, v)))
            .collect()
    }

    fn describe(&self) -> String {
        format!("env:{}*", self.prefix)
    }
}

/// Reads a JSON object such as `{"skills": 50, "location": "5"}` from disk.
/// The file is re-read on every reload. A missing or malformed file reports
/// no values.
pub struct JsonFileWeightSource {
    path: PathBuf,
}

impl JsonFileWeightSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl WeightSource for JsonFileWeightSource {
    fn read(&self) -> RawWeights {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) => {
                warn!("Weight file {} unreadable: {e}", self.path.display());
                return RawWeights::new();
            }
        };

        let object = match serde_json::from_str::<Value>(&contents) {
            Ok(Value::Object(map)) => map,
            Ok(_) => {
                warn!("Weight file {} is not a JSON object", self.path.display());
                return RawWeights::new();
            }
            Err(e) => {
                warn!("Weight file {} is not valid JSON: {e}", self.path.display());
                return RawWeights::new();
            }
        };

        WeightKey::ALL
            .into_iter()
            .filter_map(|key| {
                object
                    .get(key.name())
                    .and_then(scalar_to_string)
                    .map(|v| (key, v))
            })
            .collect()
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}

/// Consults sources in order; the first one that reports a key wins.
pub struct LayeredWeightSource {
    layers: Vec<Box<dyn WeightSource>>,
}

impl LayeredWeightSource {
    pub fn new(layers: Vec<Box<dyn WeightSource>>) -> Self {
        Self { layers }
    }
}

impl WeightSource for LayeredWeightSource {
    fn read(&self) -> RawWeights {
        let mut merged = RawWeights::new();
        for layer in &self.layers {
            for (key, value) in layer.read() {
                merged.entry(key).or_insert(value);
            }
        }
        merged
    }

    fn describe(&self) -> String {
        self.layers
            .iter()
            .map(|l| l.describe())
            .collect::<Vec<_>>()
            .join(" > ")
    }
}

/// Fixed in-memory values.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct StaticWeightSource {
    values: RawWeights,
}

#[cfg(test)]
impl StaticWeightSource {
    pub fn new<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (WeightKey, V)>,
        V: Into<String>,
    {
        Self {
            values: values.into_iter().map(|(k, v)| (k, v.into())).collect(),
        }
    }
}

#[cfg(test)]
impl WeightSource for StaticWeightSource {
    fn read(&self) -> RawWeights {
        self.values.clone()
    }

    fn describe(&self) -> String {
        "static".to_string()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// WeightConfig
// ────────────────────────────────────────────────────────────────────────────

/// Owns the active weight set and the source it reloads from.
pub struct WeightConfig {
    source: Box<dyn WeightSource>,
    current: RwLock<Arc<Weights>>,
}

impl WeightConfig {
    /// Reads the source once and makes the result the active set.
    pub fn load(source: impl WeightSource + 'static) -> Self {
        let weights = Weights::from_raw(&source.read());
        info!(
            source = %source.describe(),
            "Loaded ATS weights: {:?}",
            weights
        );
        Self {
            source: Box::new(source),
            current: RwLock::new(Arc::new(weights)),
        }
    }

    /// Snapshot of the active set.
    pub fn get_weights(&self) -> Weights {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        **guard
    }

    /// Re-reads every value from the source and swaps the whole set in.
    pub fn reload_weights(&self) -> Weights {
        let fresh = Arc::new(Weights::from_raw(&self.source.read()));
        {
            let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
            *guard = Arc::clone(&fresh);
        }
        info!(source = %self.source.describe(), "Reloaded ATS weights: {:?}", *fresh);
        *fresh
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::thread;

    #[test]
    fn test_defaults() {
        let w = Weights::default();
        assert_eq!(
            (w.skills, w.experience, w.education, w.certs, w.location),
            (40.0, 20.0, 15.0, 15.0, 10.0)
        );
    }

    #[test]
    fn test_parse_weight_rules() {
        assert_eq!(parse_weight(None, 40.0), 40.0);
        assert_eq!(parse_weight(Some(""), 40.0), 40.0);
        assert_eq!(parse_weight(Some("   "), 40.0), 40.0);
        assert_eq!(parse_weight(Some("abc"), 40.0), 40.0);
        assert_eq!(parse_weight(Some("inf"), 40.0), 40.0);
        assert_eq!(parse_weight(Some("NaN"), 40.0), 40.0);
        assert_eq!(parse_weight(Some("-5"), 40.0), 0.0);
        assert_eq!(parse_weight(Some(" 12.5 "), 40.0), 12.5);
        assert_eq!(parse_weight(Some("0"), 40.0), 0.0);
    }

    #[test]
    fn test_from_raw_mixes_values_and_defaults() {
        let source = StaticWeightSource::new([
            (WeightKey::Skills, "60"),
            (WeightKey::Certs, "garbage"),
            (WeightKey::Location, "-1"),
        ]);
        let w = Weights::from_raw(&source.read());
        assert_eq!(w.skills, 60.0);
        assert_eq!(w.experience, 20.0);
        assert_eq!(w.certs, 15.0);
        assert_eq!(w.location, 0.0);
    }

    #[test]
    fn test_env_source_reads_prefixed_vars() {
        let prefix = "SCREENER_TEST_ENV_SOURCE_";
        std::env::set_var(format!("{prefix}SKILLS"), "55");
        std::env::set_var(format!("{prefix}EDUCATION"), "x");

        let w = Weights::from_raw(&EnvWeightSource::with_prefix(prefix).read());
        assert_eq!(w.skills, 55.0);
        assert_eq!(w.education, 15.0);
        assert_eq!(w.experience, 20.0);
    }

    #[test]
    fn test_reload_picks_up_env_changes() {
        let prefix = "SCREENER_TEST_ENV_RELOAD_";
        std::env::set_var(format!("{prefix}LOCATION"), "1");
        let config = WeightConfig::load(EnvWeightSource::with_prefix(prefix));
        assert_eq!(config.get_weights().location, 1.0);

        std::env::set_var(format!("{prefix}LOCATION"), "7");
        assert_eq!(config.get_weights().location, 1.0);
        let reloaded = config.reload_weights();
        assert_eq!(reloaded.location, 7.0);
        assert_eq!(config.get_weights(), reloaded);
    }

    #[test]
    fn test_json_file_source() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"skills": 50, "experience": "25", "certs": null}}"#).unwrap();

        let w = Weights::from_raw(&JsonFileWeightSource::new(file.path()).read());
        assert_eq!(w.skills, 50.0);
        assert_eq!(w.experience, 25.0);
        assert_eq!(w.certs, 15.0);
    }

    #[test]
    fn test_json_file_source_missing_or_malformed_gives_defaults() {
        let missing = JsonFileWeightSource::new("/nonexistent/screener-weights.json");
        assert!(missing.read().is_empty());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[1, 2, 3]").unwrap();
        assert!(JsonFileWeightSource::new(file.path()).read().is_empty());
    }

    #[test]
    fn test_layered_first_source_wins() {
        let env_like = StaticWeightSource::new([(WeightKey::Skills, "70")]);
        let file_like =
            StaticWeightSource::new([(WeightKey::Skills, "10"), (WeightKey::Location, "3")]);
        let layered = LayeredWeightSource::new(vec![Box::new(env_like), Box::new(file_like)]);

        let w = Weights::from_raw(&layered.read());
        assert_eq!(w.skills, 70.0);
        assert_eq!(w.location, 3.0);
    }

    /// Alternates between a set of all 1s and a set of all 2s on every read.
    struct FlipFlop(AtomicU64);

    impl WeightSource for FlipFlop {
        fn read(&self) -> RawWeights {
            let n = self.0.fetch_add(1, Ordering::SeqCst) % 2 + 1;
            WeightKey::ALL.into_iter().map(|k| (k, n.to_string())).collect()
        }

        fn describe(&self) -> String {
            "flip-flop".to_string()
        }
    }

    #[test]
    fn test_reload_is_atomic_for_concurrent_readers() {
        let config = Arc::new(WeightConfig::load(FlipFlop(AtomicU64::new(0))));

        let writer = {
            let config = Arc::clone(&config);
            thread::spawn(move || {
                for _ in 0..2_000 {
                    config.reload_weights();
                }
            })
        };

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let config = Arc::clone(&config);
                thread::spawn(move || {
                    for _ in 0..5_000 {
                        let w = config.get_weights();
                        assert!(
                            w.skills == w.experience
                                && w.experience == w.education
                                && w.education == w.certs
                                && w.certs == w.location,
                            "torn read: {w:?}"
                        );
                    }
                })
            })
            .collect();

        writer.join().unwrap();
        for r in readers {
            r.join().unwrap();
        }
    }
}
