//! Chart specification for the early-warning timeline
//!
//! Produces the data an external plotter needs: the risk series, the
//! threshold line, the torque overlay and the action window between the
//! alert and the event. Drawing itself is left to the consumer.

use super::{ImpactRenderer, ReportError};
use crate::types::{FeatureTable, ImpactSummary, ResultRecord};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

/// One point on the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint {
    pub timestamp: DateTime<Utc>,
    pub risk_probability: f64,
    /// Surface torque at the same timestamp, when known
    pub torque: Option<f64>,
}

/// Span to shade between detection and failure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ActionWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub hours: f64,
}

/// Everything needed to draw the timeline chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub alert_threshold: f64,
    pub series: Vec<ChartPoint>,
    pub action_window: ActionWindow,
}

/// Builds a `ChartSpec` around a summary and renders it as JSON.
#[derive(Debug, Clone)]
pub struct ChartRenderer {
    alert_threshold: f64,
    series: Vec<ChartPoint>,
}

impl ChartRenderer {
    pub fn new(results: &[ResultRecord], alert_threshold: f64) -> Self {
        Self {
            alert_threshold,
            series: results
                .iter()
                .map(|r| ChartPoint {
                    timestamp: r.timestamp,
                    risk_probability: r.risk_probability,
                    torque: None,
                })
                .collect(),
        }
    }

    /// Overlay torque from a feature table, matched by timestamp.
    #[must_use]
    pub fn with_torque(mut self, features: &FeatureTable) -> Self {
        let torque_at: HashMap<DateTime<Utc>, f64> = features
            .iter()
            .filter_map(|fv| fv.timestamp.map(|ts| (ts, fv.torque)))
            .collect();
        for point in &mut self.series {
            point.torque = torque_at.get(&point.timestamp).copied();
        }
        self
    }

    /// Chart spec for a successful warning; needs both timestamps.
    pub fn spec(&self, summary: &ImpactSummary) -> Result<ChartSpec, ReportError> {
        let (Some(start), Some(end), Some(hours)) = (
            summary.alert_timestamp(),
            summary.event_timestamp(),
            summary.lead_time_hours(),
        ) else {
            return Err(ReportError::MissingTimestamps);
        };

        Ok(ChartSpec {
            title: format!("AI Early Warning System: {hours:.1} Hours Gained"),
            alert_threshold: self.alert_threshold,
            series: self.series.clone(),
            action_window: ActionWindow { start, end, hours },
        })
    }
}

impl ImpactRenderer for ChartRenderer {
    fn render(&self, summary: &ImpactSummary) -> Result<String, ReportError> {
        Ok(serde_json::to_string(&self.spec(summary)?)?)
    }
}
