//! Evaluation Settings - window, alert threshold and NPT cost basis as TOML
//!
//! Each section implements `Default` with the values in `config::defaults`,
//! so a missing file or a partial file behaves exactly like the built-ins.

use super::defaults::{
    DEFAULT_ALERT_THRESHOLD, DEFAULT_CURRENCY, DEFAULT_NPT_COST_PER_HOUR, DEFAULT_TREND_WINDOW,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Environment variable pointing at a settings file.
pub const CONFIG_ENV_VAR: &str = "STUCK_PIPE_CONFIG";

/// Settings file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "early_warning.toml";

// ============================================================================
// Top-Level Settings
// ============================================================================

/// Root configuration.
///
/// Load with `Settings::load()` which searches:
/// 1. `$STUCK_PIPE_CONFIG` env var
/// 2. `./early_warning.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Feature derivation
    #[serde(default)]
    pub features: FeatureConfig,

    /// Early-warning evaluation
    #[serde(default)]
    pub warning: WarningConfig,

    /// Report rendering
    #[serde(default)]
    pub report: ReportConfig,
}

/// `[features]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureConfig {
    /// Trailing samples in the trend moving average
    #[serde(default = "default_window")]
    pub window: usize,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_TREND_WINDOW,
        }
    }
}

/// `[warning]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarningConfig {
    /// Minimum risk probability counted as an alert, in [0, 1]
    #[serde(default = "default_alert_threshold")]
    pub alert_threshold: f64,

    /// NPT cost per hour of lead time
    #[serde(default = "default_cost_per_hour")]
    pub cost_per_hour: f64,

    /// Treat an empty result sequence as an error instead of "no event"
    #[serde(default)]
    pub require_non_empty: bool,
}

impl Default for WarningConfig {
    fn default() -> Self {
        Self {
            alert_threshold: DEFAULT_ALERT_THRESHOLD,
            cost_per_hour: DEFAULT_NPT_COST_PER_HOUR,
            require_non_empty: false,
        }
    }
}

/// `[report]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

fn default_window() -> usize {
    DEFAULT_TREND_WINDOW
}

fn default_alert_threshold() -> f64 {
    DEFAULT_ALERT_THRESHOLD
}

fn default_cost_per_hour() -> f64 {
    DEFAULT_NPT_COST_PER_HOUR
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

// ============================================================================
// Loading
// ============================================================================

impl Settings {
    /// Load settings from the first usable file in `search_paths()`, or
    /// the built-in defaults when none loads.
    ///
    /// A file that fails to load is logged and skipped, never fatal.
    pub fn load() -> Self {
        for (source, path) in Self::search_paths() {
            if !path.is_file() {
                if source == CONFIG_ENV_VAR {
                    warn!(path = %path.display(), "${} names a missing file, skipping", CONFIG_ENV_VAR);
                }
                continue;
            }
            match Self::load_from_file(&path) {
                Ok(settings) => {
                    info!(source, path = %path.display(), "Loaded settings");
                    return settings;
                }
                Err(e) => warn!(source, error = %e, "Skipping unusable settings file"),
            }
        }

        info!("No settings file loaded, using built-in defaults");
        Self::default()
    }

    /// Candidate settings files, highest priority first, each tagged with
    /// where it came from:
    /// 1. `$STUCK_PIPE_CONFIG`, when set
    /// 2. `./early_warning.toml`
    pub fn search_paths() -> Vec<(&'static str, PathBuf)> {
        let from_env = std::env::var_os(CONFIG_ENV_VAR).map(|p| (CONFIG_ENV_VAR, PathBuf::from(p)));
        from_env
            .into_iter()
            .chain(std::iter::once(("working directory", PathBuf::from(LOCAL_CONFIG_FILE))))
            .collect()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents)
    }

    /// Parse and validate settings from a TOML string.
    ///
    /// Unknown keys are logged with a suggested correction but do not fail.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        for w in super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let settings: Self = toml::from_str(contents)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = self.to_toml()?;
        std::fs::write(path, contents).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        info!(path = %path.display(), "Settings saved");
        Ok(())
    }

    /// Reject out-of-range values, collecting every violation.
    ///
    /// Suspicious-but-legal values are logged as warnings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (errors, warnings) = super::validation::validate_ranges(self);
        for w in &warnings {
            warn!("{}", w);
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config I/O error ({}): {}", .0.display(), .1)]
    Io(PathBuf, std::io::Error),

    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Config validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
}
