//! Report configuration.
//!
//! Configuration is read from a YAML, TOML or JSON file chosen by extension.
//! Every field has a default, so an empty file (or no file at all) yields a
//! working configuration that compares `vllm` against `sgl`.

use crate::error::{ReportError, ReportResult};
use crate::record::Metric;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use validator::Validate;

/// Base name of configuration files in the search path.
pub const CONFIG_FILE_STEM: &str = "framebench";

/// Default model shown in report titles.
pub const DEFAULT_MODEL: &str = "meta-llama/Llama-3.1-8B-Instruct";

/// Top-level report configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ReportConfig {
    /// Model name used in report titles.
    #[validate(length(min = 1))]
    pub model: String,

    /// Results file read when no input is given.
    pub input: PathBuf,

    /// Directory exported reports are written to.
    pub output_dir: PathBuf,

    /// Metrics to summarise.
    #[validate(length(min = 1))]
    pub metrics: Vec<Metric>,

    /// The two frameworks compared.
    #[validate(nested)]
    pub frameworks: FrameworkPair,

    /// Index page generation.
    #[validate(nested)]
    pub index: IndexConfig,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            input: PathBuf::from("results.json"),
            output_dir: PathBuf::from("."),
            metrics: Metric::ALL.to_vec(),
            frameworks: FrameworkPair::default(),
            index: IndexConfig::default(),
        }
    }
}

/// The two framework labels a comparison is made between.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct FrameworkPair {
    /// Framework A.
    #[validate(length(min = 1))]
    pub a: String,
    /// Framework B.
    #[validate(length(min = 1))]
    pub b: String,
}

impl FrameworkPair {
    /// Create a pair from two labels.
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
        }
    }
}

impl Default for FrameworkPair {
    fn default() -> Self {
        Self::new("vllm", "sgl")
    }
}

/// Index page settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct IndexConfig {
    /// Directory whose subdirectories are listed.
    pub target_dir: PathBuf,
    /// Page title.
    #[validate(length(min = 1))]
    pub title: String,
    /// Directory names never listed.
    pub exclude: Vec<String>,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            target_dir: PathBuf::from("vllm-benchmarks"),
            title: "Inference Framework Benchmarks".to_string(),
            exclude: vec![".github".to_string(), ".git".to_string()],
        }
    }
}

/// Configuration file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML (`.yaml`, `.yml`).
    Yaml,
    /// TOML (`.toml`).
    Toml,
    /// JSON (`.json`).
    Json,
}

impl ConfigFormat {
    /// Format implied by a file extension.
    pub fn from_path(path: &Path) -> ReportResult<Self> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        ext.parse()
    }

    /// Canonical file extension.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Toml => "toml",
            Self::Json => "json",
        }
    }
}

impl std::str::FromStr for ConfigFormat {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Ok(Self::Yaml),
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            other => Err(ReportError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl ReportConfig {
    /// Parse configuration text in the given format and validate it.
    pub fn parse(content: &str, format: ConfigFormat, origin: &Path) -> ReportResult<Self> {
        let parse_err = |reason: String| ReportError::ConfigParse {
            path: origin.to_path_buf(),
            reason,
        };

        let config: Self = match format {
            ConfigFormat::Yaml if content.trim().is_empty() => Self::default(),
            ConfigFormat::Yaml => {
                serde_yaml::from_str(content).map_err(|e| parse_err(e.to_string()))?
            }
            ConfigFormat::Toml => toml::from_str(content).map_err(|e| parse_err(e.to_string()))?,
            ConfigFormat::Json => {
                serde_json::from_str(content).map_err(|e| parse_err(e.to_string()))?
            }
        };

        config.check()?;
        Ok(config)
    }

    /// Read and validate a configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> ReportResult<Self> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|e| ReportError::io(path, e))?;
        debug!(path = %path.display(), ?format, "Parsing configuration file");
        Self::parse(&content, format, path)
    }

    /// Resolve the configuration to use.
    ///
    /// An explicit path must exist. Otherwise the first existing file in
    /// [`search_paths`] is used, falling back to defaults.
    pub fn load(explicit: Option<&Path>) -> ReportResult<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            let config = Self::from_file(path)?;
            info!(path = %path.display(), "Loaded configuration");
            return Ok((config, Some(path.to_path_buf())));
        }

        match search_paths().into_iter().find(|p| p.is_file()) {
            Some(path) => {
                let config = Self::from_file(&path)?;
                info!(path = %path.display(), "Loaded configuration");
                Ok((config, Some(path)))
            }
            None => {
                debug!("No configuration file found, using defaults");
                Ok((Self::default(), None))
            }
        }
    }

    /// Validate field constraints and cross-field rules.
    pub fn check(&self) -> ReportResult<()> {
        self.validate()?;
        if self.frameworks.a == self.frameworks.b {
            return Err(ReportError::InvalidConfig(format!(
                "frameworks.a and frameworks.b must differ (both are '{}')",
                self.frameworks.a
            )));
        }
        Ok(())
    }

    /// Serialize the configuration in the given format.
    pub fn render(&self, format: ConfigFormat) -> ReportResult<String> {
        match format {
            ConfigFormat::Yaml => {
                serde_yaml::to_string(self).map_err(|e| ReportError::Serialization(e.to_string()))
            }
            ConfigFormat::Toml => {
                toml::to_string_pretty(self).map_err(|e| ReportError::Serialization(e.to_string()))
            }
            ConfigFormat::Json => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}

/// Configuration file search paths, in priority order.
pub fn search_paths() -> Vec<PathBuf> {
    ["yaml", "yml", "toml", "json"]
        .iter()
        .map(|ext| PathBuf::from(format!("./{CONFIG_FILE_STEM}.{ext}")))
        .collect()
}
