use serde::Deserialize;
use skyscan_results::ResultsConfig;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub provider: ProviderConfig,
    #[serde(default)]
    pub results: ResultsConfig,
    #[serde(default)]
    pub history: HistoryConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    Mock,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    #[serde(default)]
    pub seed: u64,
    #[serde(default = "default_offers_per_search")]
    pub offers_per_search: usize,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub latency_ms: u64,
}

fn default_offers_per_search() -> usize { 24 }
fn default_currency() -> String { "EUR".to_string() }

#[derive(Debug, Deserialize, Clone)]
pub struct HistoryConfig {
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

fn default_max_entries() -> usize { 10 }

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { max_entries: default_max_entries() }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default"))
            // Per-environment overrides, optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local developer overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg.. `SKYSCAN__PROVIDER__SEED=7` sets `provider.seed`
            .add_source(config::Environment::with_prefix("SKYSCAN").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    /// Build from an inline TOML document, without touching the filesystem or env
    pub fn from_toml(source: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}
