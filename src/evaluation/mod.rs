//! Early-warning evaluation
//!
//! Given time-ordered model risk scores and ground-truth phase labels:
//! 1. Find the first `Stuck` record (the event)
//! 2. Find the first record strictly before the event whose risk reaches the
//!    alert threshold (the warning)
//! 3. Lead time = event - alert; value = lead hours x NPT cost per hour
//!
//! "No event" and "event without warning" are ordinary outcomes carried in
//! the returned `ImpactSummary`, not errors.

pub mod batch;

use crate::config::defaults::{DEFAULT_ALERT_THRESHOLD, DEFAULT_NPT_COST_PER_HOUR};
use crate::config::WarningConfig;
use crate::types::{ImpactSummary, ResultRecord};
use thiserror::Error;
use tracing::{debug, info, warn};

pub use batch::{evaluate_wells, total_estimated_value, WellImpact, WellResults};

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum EvaluationError {
    #[error("Alert threshold must be within [0, 1], got {0}")]
    InvalidThreshold(f64),

    #[error("Cost per hour must be a positive amount, got {0}")]
    InvalidCostPerHour(f64),

    #[error("Result sequence is empty")]
    EmptyInput,
}

/// Scores how early the risk model flagged the first stuck-pipe event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WarningEvaluator {
    alert_threshold: f64,
    cost_per_hour: f64,
    require_non_empty: bool,
}

impl Default for WarningEvaluator {
    fn default() -> Self {
        Self {
            alert_threshold: DEFAULT_ALERT_THRESHOLD,
            cost_per_hour: DEFAULT_NPT_COST_PER_HOUR,
            require_non_empty: false,
        }
    }
}

impl WarningEvaluator {
    /// Evaluator with the default NPT cost basis.
    pub fn new(alert_threshold: f64) -> Result<Self, EvaluationError> {
        Self::default().with_threshold(alert_threshold)
    }

    pub fn from_config(config: &WarningConfig) -> Result<Self, EvaluationError> {
        Ok(Self::new(config.alert_threshold)?
            .with_cost_per_hour(config.cost_per_hour)?
            .require_non_empty(config.require_non_empty))
    }

    pub fn with_threshold(mut self, alert_threshold: f64) -> Result<Self, EvaluationError> {
        // NaN fails the range check too
        if !(0.0..=1.0).contains(&alert_threshold) {
            return Err(EvaluationError::InvalidThreshold(alert_threshold));
        }
        self.alert_threshold = alert_threshold;
        Ok(self)
    }

    pub fn with_cost_per_hour(mut self, cost_per_hour: f64) -> Result<Self, EvaluationError> {
        if !cost_per_hour.is_finite() || cost_per_hour <= 0.0 {
            return Err(EvaluationError::InvalidCostPerHour(cost_per_hour));
        }
        self.cost_per_hour = cost_per_hour;
        Ok(self)
    }

    #[must_use]
    pub const fn require_non_empty(mut self, require: bool) -> Self {
        self.require_non_empty = require;
        self
    }

    pub const fn alert_threshold(&self) -> f64 {
        self.alert_threshold
    }

    pub const fn cost_per_hour(&self) -> f64 {
        self.cost_per_hour
    }

    /// Evaluate a chronologically ordered result sequence.
    pub fn evaluate(&self, results: &[ResultRecord]) -> Result<ImpactSummary, EvaluationError> {
        if results.is_empty() && self.require_non_empty {
            return Err(EvaluationError::EmptyInput);
        }

        let Some(event) = results.iter().find(|r| r.phase_status.is_stuck()) else {
            info!(records = results.len(), "No stuck pipe events detected");
            return Ok(ImpactSummary::no_event());
        };
        let event_ts = event.timestamp;

        // Scan the whole sequence by timestamp, not just the prefix before the
        // event row; the first match in sequence order wins.
        let alert = results
            .iter()
            .find(|r| r.timestamp < event_ts && r.risk_probability >= self.alert_threshold);

        let Some(alert) = alert else {
            warn!(
                event = %event_ts,
                threshold = self.alert_threshold,
                "Stuck pipe event without early warning"
            );
            return Ok(ImpactSummary::missed(event_ts));
        };

        debug!(
            alert = %alert.timestamp,
            risk = alert.risk_probability,
            "First qualifying alert"
        );

        let summary = ImpactSummary::early_warning(alert.timestamp, event_ts, self.cost_per_hour);
        info!(
            event = %event_ts,
            alert = %alert.timestamp,
            lead_hours = summary.lead_time_hours().unwrap_or_default(),
            value = summary.estimated_value().unwrap_or_default(),
            "Early warning before stuck pipe"
        );
        Ok(summary)
    }
}

/// Evaluate with the default NPT cost basis.
pub fn evaluate(
    results: &[ResultRecord],
    alert_threshold: f64,
) -> Result<ImpactSummary, EvaluationError> {
    WarningEvaluator::new(alert_threshold)?.evaluate(results)
}

/// Linear NPT value of a lead time: no cap, no diminishing returns.
pub fn estimate_value(lead_time_hours: f64, cost_per_hour: f64) -> f64 {
    lead_time_hours * cost_per_hour
}
