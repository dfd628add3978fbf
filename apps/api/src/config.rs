use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::eligibility::weights::{
    EnvWeightSource, JsonFileWeightSource, LayeredWeightSource, WeightSource,
};

/// Application configuration loaded from environment variables.
/// Every value has a default; only malformed `PORT` aborts startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
    /// Optional JSON file of category weights, overridden per key by `ATS_WEIGHT_*`.
    pub weights_file: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            weights_file: optional_env("ATS_WEIGHTS_FILE").map(PathBuf::from),
        })
    }

    /// Environment first, then the weights file if one is configured.
    pub fn weight_source(&self) -> LayeredWeightSource {
        let mut layers: Vec<Box<dyn WeightSource>> = vec![Box::new(EnvWeightSource::new())];
        if let Some(path) = &self.weights_file {
            layers.push(Box::new(JsonFileWeightSource::new(path.clone())));
        }
        LayeredWeightSource::new(layers)
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
