use std::path::PathBuf;

use serde::Deserialize;

use crate::services::forest::ForestParams;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Path of the JSON document holding user feedback
    #[serde(default = "default_feedback_path")]
    pub feedback_path: PathBuf,

    /// Optional JSON listing catalog; the demo catalog is used when unset
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of trees in the random forest
    #[serde(default = "default_n_estimators")]
    pub n_estimators: usize,

    /// Seed for bootstrap sampling and feature selection
    #[serde(default = "default_random_seed")]
    pub random_seed: u64,

    #[serde(default)]
    pub max_depth: Option<usize>,

    #[serde(default = "default_min_samples_split")]
    pub min_samples_split: usize,

    /// Features considered per split; all features when unset
    #[serde(default)]
    pub max_features: Option<usize>,

    /// Upper bound on a single recommendation computation
    #[serde(default = "default_training_timeout_ms")]
    pub training_timeout_ms: u64,

    /// Recipient of feedback notifications
    #[serde(default = "default_notification_recipient")]
    pub notification_recipient: String,
}

fn default_feedback_path() -> PathBuf {
    PathBuf::from("feedback.json")
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_n_estimators() -> usize {
    100
}

fn default_random_seed() -> u64 {
    42
}

fn default_min_samples_split() -> usize {
    2
}

fn default_training_timeout_ms() -> u64 {
    5_000
}

fn default_notification_recipient() -> String {
    "user@email.com".to_string()
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Regression hyperparameters for the predictive scorer
    pub fn forest_params(&self) -> ForestParams {
        ForestParams {
            n_estimators: self.n_estimators,
            random_seed: self.random_seed,
            max_depth: self.max_depth,
            min_samples_split: self.min_samples_split,
            max_features: self.max_features,
        }
    }
}
