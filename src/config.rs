use crate::policies::PolicyType;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ExperimentConfig {
    pub arm_count: usize,
    pub num_steps: usize,
    pub seed: Option<u64>,
    pub policies: Vec<PolicyType>,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        let mut policies = vec![PolicyType::DecayingEpsilonGreedy];
        policies.extend(
            [1e-4, 1e-3, 1e-2, 1e-1, 0.5]
                .into_iter()
                .map(|epsilon| PolicyType::EpsilonGreedy { epsilon }),
        );

        Self {
            arm_count: 20,
            num_steps: 10_000,
            seed: Some(1023),
            policies,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ReportConfig {
    pub output: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub experiment: ExperimentConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl AppConfig {
    /// Reads `config.toml` if present, then `APP_`-prefixed variables such as
    /// `APP_EXPERIMENT__NUM_STEPS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_builder(
            Config::builder()
                .add_source(File::with_name("config").required(false))
                .add_source(
                    Environment::with_prefix("APP")
                        .prefix_separator("_")
                        .separator("__")
                        .try_parsing(true),
                ),
        )
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, ConfigError> {
        builder.build()?.try_deserialize()
    }
}
