//! Configuration loading and path resolution
//!
//! Bootstrap configuration comes from a single TOML file. Every field has a
//! built-in default, so a missing file is a warning rather than a startup
//! failure.
//!
//! # Config file resolution priority
//!
//! 1. Command-line argument (`--config`)
//! 2. Environment variable (`CARLEX_CONFIG`)
//! 3. Platform config directory (`~/.config/carlex/config.toml` on Linux)
//! 4. Compiled defaults

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming the TOML config file
pub const CONFIG_ENV_VAR: &str = "CARLEX_CONFIG";

/// Environment variable naming the reference dictionary file
pub const DICTIONARY_ENV_VAR: &str = "CARLEX_DICTIONARY";

/// Environment variable carrying the tagger API token
pub const TAGGER_TOKEN_ENV_VAR: &str = "CARLEX_TAGGER_TOKEN";

/// Bootstrap configuration loaded from TOML file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Reference dictionary source (JSON or TOML)
    #[serde(default)]
    pub dictionary_path: Option<PathBuf>,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub tagger: TaggerConfig,

    #[serde(default)]
    pub text: TextConfig,

    #[serde(default)]
    pub filter: FilterConfig,

    #[serde(default)]
    pub job: JobConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path (optional, logs to stderr if not specified)
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

/// Which tagger backend to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaggerKind {
    /// No statistical tagger; mentions come from dictionary back-fill only
    #[default]
    DictionaryOnly,
    /// Remote token-classification endpoint
    Http,
}

/// Statistical tagger configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaggerConfig {
    #[serde(default)]
    pub kind: TaggerKind,

    /// Token-classification endpoint URL (required for `http`)
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Bearer token (overridden by CARLEX_TAGGER_TOKEN)
    #[serde(default)]
    pub api_token: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Client-side rate limit
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,

    /// Sub-word aggregation requested from the endpoint
    #[serde(default = "default_aggregation_strategy")]
    pub aggregation_strategy: String,
}

impl Default for TaggerConfig {
    fn default() -> Self {
        Self {
            kind: TaggerKind::default(),
            endpoint: None,
            api_token: None,
            timeout_secs: default_timeout_secs(),
            requests_per_second: default_requests_per_second(),
            aggregation_strategy: default_aggregation_strategy(),
        }
    }
}

/// Segmenter configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextConfig {
    /// Added to the built-in English stopword list
    #[serde(default)]
    pub extra_stopwords: Vec<String>,
}

/// Ambiguity filter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    #[serde(default)]
    pub extra_always_exclude: Vec<String>,

    #[serde(default)]
    pub extra_ambiguous_tokens: Vec<String>,

    /// Words inspected on each side of an ambiguous token
    #[serde(default = "default_context_window")]
    pub context_window: usize,

    #[serde(default = "default_min_year")]
    pub min_year: u32,

    #[serde(default = "default_max_year")]
    pub max_year: u32,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            extra_always_exclude: Vec::new(),
            extra_ambiguous_tokens: Vec::new(),
            context_window: default_context_window(),
            min_year: default_min_year(),
            max_year: default_max_year(),
        }
    }
}

/// What the preprocessing job does when the tagger fails on a section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaggerErrorPolicy {
    /// Stop the job and report the error
    #[default]
    Abort,
    /// Retry, then leave the section out of the output
    SkipSection,
}

/// Preprocessing job configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobConfig {
    #[serde(default)]
    pub input_dir: Option<PathBuf>,

    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Threads processed concurrently within one file
    #[serde(default = "default_max_concurrent_documents")]
    pub max_concurrent_documents: usize,

    #[serde(default)]
    pub on_tagger_error: TaggerErrorPolicy,

    /// Extra attempts per section under `skip_section`
    #[serde(default = "default_tagger_retries")]
    pub tagger_retries: u32,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            input_dir: None,
            output_dir: None,
            max_concurrent_documents: default_max_concurrent_documents(),
            on_tagger_error: TaggerErrorPolicy::default(),
            tagger_retries: default_tagger_retries(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_aggregation_strategy() -> String {
    "simple".to_string()
}

fn default_context_window() -> usize {
    3
}

fn default_min_year() -> u32 {
    1900
}

fn default_max_year() -> u32 {
    2030
}

fn default_max_concurrent_documents() -> usize {
    4
}

fn default_tagger_retries() -> u32 {
    1
}

impl TomlConfig {
    /// Parse configuration from TOML text and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: TomlConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Read config {} failed: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Reject values no component can run with
    pub fn validate(&self) -> Result<()> {
        if self.filter.context_window == 0 {
            return Err(Error::Config(
                "filter.context_window must be at least 1".to_string(),
            ));
        }
        if self.filter.min_year > self.filter.max_year {
            return Err(Error::Config(format!(
                "filter.min_year ({}) is greater than filter.max_year ({})",
                self.filter.min_year, self.filter.max_year
            )));
        }
        if self.tagger.kind == TaggerKind::Http && self.tagger.endpoint.is_none() {
            return Err(Error::Config(
                "tagger.kind = \"http\" requires tagger.endpoint".to_string(),
            ));
        }
        if self.tagger.requests_per_second == 0 {
            return Err(Error::Config(
                "tagger.requests_per_second must be at least 1".to_string(),
            ));
        }
        if self.job.max_concurrent_documents == 0 {
            return Err(Error::Config(
                "job.max_concurrent_documents must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Tagger API token, preferring the environment over the file
    pub fn tagger_api_token(&self) -> Option<String> {
        std::env::var(TAGGER_TOKEN_ENV_VAR)
            .ok()
            .filter(|token| !token.trim().is_empty())
            .or_else(|| self.tagger.api_token.clone())
    }
}

/// Resolve and load the bootstrap configuration
///
/// An explicitly named file (CLI or environment) must exist and parse. The
/// platform default file is optional: when absent, compiled defaults apply.
pub fn load_config(cli_arg: Option<&Path>) -> Result<TomlConfig> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        info!("Loading config from {}", path.display());
        return TomlConfig::load(path);
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        info!("Loading config from {} ({})", path, CONFIG_ENV_VAR);
        return TomlConfig::load(Path::new(&path));
    }

    // Priority 3: Platform config directory
    if let Some(path) = default_config_path() {
        if path.exists() {
            info!("Loading config from {}", path.display());
            return TomlConfig::load(&path);
        }
    }

    // Priority 4: Compiled defaults
    warn!("No config file found, using built-in defaults");
    Ok(TomlConfig::default())
}

/// Resolve the reference dictionary path
///
/// **Priority:** CLI → ENV → TOML → platform data directory
pub fn resolve_dictionary_path(cli_arg: Option<&Path>, config: &TomlConfig) -> PathBuf {
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    if let Ok(path) = std::env::var(DICTIONARY_ENV_VAR) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }

    if let Some(path) = &config.dictionary_path {
        return path.clone();
    }

    default_data_dir().join("car_data.json")
}

/// Platform config file location
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("carlex").join("config.toml"))
}

/// Platform data directory for carlex
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("carlex"))
        .unwrap_or_else(|| PathBuf::from("./carlex_data"))
}
