//! Presentation adapters for `ImpactSummary`
//!
//! Evaluation returns data only. Anything a person reads or a plotter draws
//! goes through an `ImpactRenderer`, so report formats can be swapped
//! without touching the evaluator.

pub mod chart;
pub mod json;
pub mod narrative;

pub use chart::{ChartPoint, ChartRenderer, ChartSpec};
pub use json::JsonRenderer;
pub use narrative::NarrativeRenderer;

use crate::types::ImpactSummary;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Cannot render: both alert and event timestamps are required")]
    MissingTimestamps,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Turns a summary into a presentable document.
pub trait ImpactRenderer {
    fn render(&self, summary: &ImpactSummary) -> Result<String, ReportError>;
}
