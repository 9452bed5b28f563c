//! Configuration file schema and discovery.
//!
//! Every field is optional; a missing file means built-in defaults.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::language::Language;
use crate::render::ascii::{MIN_HEIGHT, MIN_WIDTH};

/// Config file names searched for in the working directory.
pub const DEFAULT_CONFIG_NAMES: &[&str] =
    &["complexity-analyzer.yaml", ".complexity-analyzer.yaml"];

/// Errors loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub progress: ProgressConfig,
    #[serde(default)]
    pub chart: ChartSettings,
}

/// Analysis backend connection.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout. The backend benchmarks the code, which can take minutes.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Reject parseable responses that violate the result schema.
    #[serde(default = "default_true")]
    pub validate_response: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            validate_response: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct DefaultsConfig {
    #[serde(default)]
    pub language: Language,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ProgressConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Terminal chart settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ChartSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_chart_width")]
    pub width: usize,
    #[serde(default = "default_chart_height")]
    pub height: usize,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            width: default_chart_width(),
            height: default_chart_height(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_timeout_ms() -> u64 {
    600_000
}

fn default_chart_width() -> usize {
    60
}

fn default_chart_height() -> usize {
    12
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Parse a config from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse_str(yaml: &str) -> Result<Self, serde_yaml::Error> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml)
    }

    /// Load the explicit file, else the first discovered one, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>), ConfigError> {
        let path = match explicit {
            Some(p) => Some(p.to_path_buf()),
            None => discover(Path::new(".")),
        };

        let config = match &path {
            Some(p) => Self::parse_file(p)?,
            None => Self::default(),
        };
        validate(&config)?;
        Ok((config, path))
    }
}

/// Find a config file in `dir`, then in the user config directory.
pub fn discover(dir: &Path) -> Option<PathBuf> {
    DEFAULT_CONFIG_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|p| p.is_file())
        .or_else(|| {
            ProjectDirs::from("", "", "complexity-analyzer")
                .map(|dirs| dirs.config_dir().join("config.yaml"))
                .filter(|p| p.is_file())
        })
}

/// Check values serde cannot.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    let url = &config.server.base_url;
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ConfigError::Invalid(format!(
            "server.base_url must start with http:// or https://, got {:?}",
            url
        )));
    }
    if config.server.timeout_ms == 0 {
        return Err(ConfigError::Invalid(
            "server.timeout_ms must be greater than 0".to_string(),
        ));
    }
    if config.chart.width < MIN_WIDTH {
        return Err(ConfigError::Invalid(format!(
            "chart.width must be at least {}",
            MIN_WIDTH
        )));
    }
    if config.chart.height < MIN_HEIGHT {
        return Err(ConfigError::Invalid(format!(
            "chart.height must be at least {}",
            MIN_HEIGHT
        )));
    }
    Ok(())
}
