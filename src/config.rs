use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::standards::SeverityThresholds;

/// Application-level constants
pub const APP_NAME: &str = "MediSync";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// File name of the analyzer settings inside the config directory.
pub const CONFIG_FILE_NAME: &str = "analyzer.json";

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "medisync_lib=info,medisync=info"
}

/// Per-user config directory, `None` on platforms without one.
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_NAME))
}

/// Default location of the analyzer settings file.
pub fn default_config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config file {0}: {1}")]
    Read(String, String),

    #[error("Cannot parse config file {0}: {1}")]
    Parse(String, String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Tunables for the analysis pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Relative breach thresholds for severity tiers.
    pub thresholds: SeverityThresholds,
    /// Minimum relative change (percent) flagged by the history comparator.
    pub history_change_pct: f64,
    /// Normal results listed in the chat message before collapsing to "... and N more".
    pub max_normal_listed: usize,
    /// Run OCR analyte-name correction before pattern matching.
    pub correct_ocr_terms: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            thresholds: SeverityThresholds::default(),
            history_change_pct: 10.0,
            max_normal_listed: 5,
            correct_ocr_terms: true,
        }
    }
}

impl AnalyzerConfig {
    /// Load and validate settings from a JSON file. Missing fields take defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(path.display().to_string(), e.to_string()))?;
        let config: Self = serde_json::from_str(&json)
            .map_err(|e| ConfigError::Parse(path.display().to_string(), e.to_string()))?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "Loaded analyzer config");
        Ok(config)
    }

    /// Load from `path` if it exists, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) if p.exists() => Self::load(p),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.thresholds;
        if !(t.borderline_pct.is_finite() && t.critical_pct.is_finite()) {
            return Err(ConfigError::Invalid("thresholds must be finite".into()));
        }
        if t.borderline_pct <= 0.0 || t.borderline_pct >= t.critical_pct {
            return Err(ConfigError::Invalid(format!(
                "expected 0 < borderline_pct ({}) < critical_pct ({})",
                t.borderline_pct, t.critical_pct
            )));
        }
        if !self.history_change_pct.is_finite() || self.history_change_pct < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "history_change_pct must be >= 0, got {}",
                self.history_change_pct
            )));
        }
        Ok(())
    }
}
