//! Settings Module
//!
//! Loads the tunables for feature derivation and early-warning evaluation
//! from TOML, replacing hardcoded constants with operator-tunable values.
//!
//! ## Loading Order
//!
//! 1. `STUCK_PIPE_CONFIG` environment variable (path to TOML file)
//! 2. `early_warning.toml` in the current working directory
//! 3. Built-in defaults (see [`defaults`])
//!
//! ## Usage
//!
//! ```ignore
//! let settings = Settings::load();
//! let engine = FeatureEngine::new(settings.features.window)?;
//! let evaluator = WarningEvaluator::from_config(&settings.warning)?;
//! ```

mod settings;
pub mod defaults;
pub mod validation;

pub use settings::*;
