//! Stuck-pipe early warning: feature derivation and impact evaluation
//!
//! Two pure stages around an external risk model:
//!
//! ```text
//! raw telemetry -> features::derive_features -> (risk model) -> results
//!               -> evaluation::evaluate -> ImpactSummary -> report::ImpactRenderer
//! ```
//!
//! - **Features**: trailing-window trend ratios for torque, ROP and SPP plus a
//!   friction factor, warm-up rows dropped
//! - **Evaluation**: first stuck-pipe event, first qualifying alert before it,
//!   lead time and its NPT value
//! - **Report**: narrative, JSON and chart adapters over the summary

pub mod config;
pub mod evaluation;
pub mod features;
pub mod report;
pub mod types;

// Re-export settings
pub use config::Settings;

// Re-export commonly used types
pub use types::{
    FeatureTable, FeatureVector, ImpactSummary, PhaseStatus, ResultRecord, TableError,
    TelemetryField, TelemetrySample, TelemetryTable, WarningOutcome,
};

// Re-export the two stages
pub use evaluation::{estimate_value, evaluate, EvaluationError, WarningEvaluator};
pub use features::{derive_features, FeatureEngine, FeatureError};

// Re-export presentation adapters
pub use report::{ChartRenderer, ImpactRenderer, JsonRenderer, NarrativeRenderer, ReportError};
