use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::core::{engine::EngineConfig, SimilarityMetric};
use crate::error::EngineError;
use crate::lexicon::Lexicon;
use crate::models::ScoringWeights;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub recommendations: RecommendationSettings,
    #[serde(default)]
    pub lexicon: LexiconSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
    #[serde(default = "default_recommendation_threshold")]
    pub recommendation_threshold: f64,
    #[serde(default = "default_high_relevance_threshold")]
    pub high_relevance_threshold: f64,
    #[serde(default)]
    pub similarity: SimilarityMetric,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            weights: WeightsConfig::default(),
            recommendation_threshold: default_recommendation_threshold(),
            high_relevance_threshold: default_high_relevance_threshold(),
            similarity: SimilarityMetric::default(),
        }
    }
}

fn default_recommendation_threshold() -> f64 { 0.6 }
fn default_high_relevance_threshold() -> f64 { 0.8 }

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_sector_weight")]
    pub sector: f64,
    #[serde(default = "default_geography_weight")]
    pub geography: f64,
    #[serde(default = "default_financial_weight")]
    pub financial: f64,
    #[serde(default = "default_temporal_weight")]
    pub temporal: f64,
    #[serde(default = "default_keyword_weight")]
    pub keyword: f64,
    #[serde(default = "default_classification_weight")]
    pub classification: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            sector: default_sector_weight(),
            geography: default_geography_weight(),
            financial: default_financial_weight(),
            temporal: default_temporal_weight(),
            keyword: default_keyword_weight(),
            classification: default_classification_weight(),
        }
    }
}

fn default_sector_weight() -> f64 { 0.25 }
fn default_geography_weight() -> f64 { 0.20 }
fn default_financial_weight() -> f64 { 0.20 }
fn default_temporal_weight() -> f64 { 0.15 }
fn default_keyword_weight() -> f64 { 0.15 }
fn default_classification_weight() -> f64 { 0.05 }

impl From<&WeightsConfig> for ScoringWeights {
    fn from(w: &WeightsConfig) -> Self {
        Self {
            sector: w.sector,
            geography: w.geography,
            financial: w.financial,
            temporal: w.temporal,
            keyword: w.keyword,
            classification: w.classification,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationSettings {
    #[serde(default = "default_limit")]
    pub default_limit: usize,
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
}

impl Default for RecommendationSettings {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
        }
    }
}

fn default_limit() -> usize { 10 }
fn default_max_limit() -> usize { 100 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LexiconSettings {
    /// Alternative keyword catalog, the built-in one is used when unset
    pub catalog_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with TENDER__)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., TENDER__SERVER__PORT -> server.port
            .add_source(env_source())
            .build()?;

        apply_logging_overrides(settings)?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(env_source())
            .build()?;

        settings.try_deserialize()
    }

    /// Validated engine tuning
    pub fn engine_config(&self) -> Result<EngineConfig, EngineError> {
        let config = EngineConfig {
            weights: ScoringWeights::from(&self.scoring.weights),
            recommendation_threshold: self.scoring.recommendation_threshold,
            high_relevance_threshold: self.scoring.high_relevance_threshold,
            similarity: self.scoring.similarity,
        };
        config.validate()?;
        Ok(config)
    }

    /// Configured catalog, or the built-in one
    pub fn load_lexicon(&self) -> Result<Lexicon, EngineError> {
        match &self.lexicon.catalog_path {
            Some(path) => Lexicon::from_file(path),
            None => Ok(Lexicon::builtin()),
        }
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("TENDER")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// LOG_LEVEL and LOG_FORMAT take precedence over the logging section
fn apply_logging_overrides(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(level) = env::var("LOG_LEVEL") {
        builder = builder.set_override("logging.level", level)?;
    }
    if let Ok(format) = env::var("LOG_FORMAT") {
        builder = builder.set_override("logging.format", format)?;
    }

    builder.build()
}
