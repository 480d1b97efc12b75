//! # Application Configuration
//!
//! Settings for the `bulletin` binary are layered with the `config` crate:
//! programmatic defaults, then an optional YAML file (with `${VAR}`
//! substitution), then `BULLETIN__*` environment variables.

use bulletin::{prompts::EXTRACTION_SYSTEM_PROMPT, MetadataStyle, ProviderConfig};
use bulletin_sheets::ExportFormat;
use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use regex::Regex;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "bulletin.yml";
pub const ENV_PREFIX: &str = "BULLETIN";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    General(#[from] config::ConfigError),
    #[error("Config file not found at '{0}'")]
    NotFound(String),
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid substitution pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// The fully resolved settings.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// `openai` or `gemini`.
    pub provider: String,
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f32,
    pub system_prompt: String,
    pub output_dir: PathBuf,
    pub metadata_style: MetadataStyle,
    #[serde(default = "default_formats")]
    pub formats: Vec<ExportFormat>,
}

fn default_formats() -> Vec<ExportFormat> {
    vec![ExportFormat::Xlsx]
}

impl AppConfig {
    pub fn provider_config(&self) -> ProviderConfig {
        ProviderConfig {
            provider: self.provider.clone(),
            api_url: self.api_url.clone(),
            api_key: self.api_key.clone(),
            model: self.model.clone(),
            temperature: self.temperature,
        }
    }
}

// Reads a file and replaces `${VAR}` with the variable's value (empty when unset).
// Returns Ok(None) if the file does not exist.
fn read_and_substitute(path: &Path) -> Result<Option<String>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;

    let re = Regex::new(r"\$\{(?P<var>[A-Z0-9_]+)\}")?;
    let expanded_content = re.replace_all(&content, |caps: &regex::Captures| {
        env::var(&caps["var"]).unwrap_or_default()
    });

    Ok(Some(expanded_content.into_owned()))
}

/// The environment variable holding the key for `provider` when none is configured.
pub fn fallback_api_key_var(provider: &str) -> &'static str {
    if provider.eq_ignore_ascii_case("gemini") {
        "GEMINI_API_KEY"
    } else {
        "OPENAI_API_KEY"
    }
}

/// Loads the configuration.
///
/// An explicit `config_path_override` must exist; the default
/// `bulletin.yml` is optional. Nested keys can be overridden with
/// `BULLETIN__<KEY>` (e.g. `BULLETIN__MODEL`, `BULLETIN__FORMATS=xlsx,json`).
pub fn get_config(config_path_override: Option<&Path>) -> Result<AppConfig, ConfigError> {
    // Layer 1: Programmatic defaults.
    let mut builder = ConfigBuilder::builder()
        .set_default("provider", "openai")?
        .set_default("model", "gpt-4o")?
        .set_default("temperature", 0.0)?
        .set_default("system_prompt", EXTRACTION_SYSTEM_PROMPT)?
        .set_default("output_dir", "output")?
        .set_default("metadata_style", "labeled")?;

    // Layer 2: YAML file.
    let (config_path, required) = match config_path_override {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };
    match read_and_substitute(&config_path)? {
        Some(content) => {
            info!("Loading configuration from '{}'.", config_path.display());
            builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
        }
        None if required => {
            return Err(ConfigError::NotFound(config_path.display().to_string()));
        }
        None => debug!("No '{}' found. Using defaults.", config_path.display()),
    }

    // Layer 3: Prefixed environment variables.
    let settings = builder
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("formats")
                .try_parsing(true),
        )
        .build()?;

    let mut config: AppConfig = settings.try_deserialize()?;

    // Substituted but unset variables leave an empty key behind.
    config.api_key = config.api_key.filter(|key| !key.is_empty());
    if config.api_key.is_none() {
        let var = fallback_api_key_var(&config.provider);
        if let Ok(key) = env::var(var) {
            if !key.is_empty() {
                debug!("Using API key from {var}.");
                config.api_key = Some(key);
            }
        }
    }

    Ok(config)
}
