//! Early-warning evaluation types
//!
//! `ResultRecord` rows come back from the external risk model; the evaluator
//! reduces them to a single `ImpactSummary`.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize, Serializer};

/// Label of the ground-truth failure event.
pub const STUCK_LABEL: &str = "Stuck";

// ============================================================================
// Phase Status
// ============================================================================

/// Ground-truth operating phase recorded against each timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PhaseStatus {
    Normal,
    /// Drill string cannot be moved (the event of interest)
    Stuck,
    /// Any other phase label, kept verbatim
    Other(String),
}

impl PhaseStatus {
    pub const fn is_stuck(&self) -> bool {
        matches!(self, Self::Stuck)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Normal => "Normal",
            Self::Stuck => STUCK_LABEL,
            Self::Other(label) => label,
        }
    }
}

/// Labels match exactly; "stuck" is not the failure label.
impl From<&str> for PhaseStatus {
    fn from(label: &str) -> Self {
        match label {
            STUCK_LABEL => Self::Stuck,
            "Normal" => Self::Normal,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for PhaseStatus {
    fn from(label: String) -> Self {
        Self::from(label.as_str())
    }
}

impl From<PhaseStatus> for String {
    fn from(status: PhaseStatus) -> Self {
        match status {
            PhaseStatus::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for PhaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Result Records
// ============================================================================

/// One timestamp of model output joined with its ground-truth label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub timestamp: DateTime<Utc>,
    /// Model risk output in [0, 1]
    pub risk_probability: f64,
    pub phase_status: PhaseStatus,
}

impl ResultRecord {
    pub fn new(
        timestamp: DateTime<Utc>,
        risk_probability: f64,
        phase_status: impl Into<PhaseStatus>,
    ) -> Self {
        Self {
            timestamp,
            risk_probability,
            phase_status: phase_status.into(),
        }
    }
}

// ============================================================================
// Impact Summary
// ============================================================================

/// Which of the three evaluation outcomes a summary represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningOutcome {
    /// No stuck-pipe event in the sequence
    NoEvent,
    /// Event recorded, no qualifying alert before it
    Missed,
    /// Alert raised strictly before the event
    EarlyWarning,
}

impl std::fmt::Display for WarningOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoEvent => write!(f, "NO EVENT"),
            Self::Missed => write!(f, "MISSED"),
            Self::EarlyWarning => write!(f, "EARLY WARNING"),
        }
    }
}

/// Lead time and economic value of an early warning.
///
/// Built only through the three outcome constructors, and the early-warning
/// one is crate-private, so `estimated_value` is present exactly when both
/// timestamps are and the lead time is always positive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImpactSummary {
    alert_timestamp: Option<DateTime<Utc>>,
    event_timestamp: Option<DateTime<Utc>>,
    #[serde(rename = "lead_time_secs", serialize_with = "serialize_lead_time")]
    lead_time: Option<TimeDelta>,
    estimated_value: Option<f64>,
    /// NPT cost basis behind `estimated_value`
    cost_per_hour: Option<f64>,
}

impl ImpactSummary {
    pub const fn no_event() -> Self {
        Self {
            alert_timestamp: None,
            event_timestamp: None,
            lead_time: None,
            estimated_value: None,
            cost_per_hour: None,
        }
    }

    pub const fn missed(event: DateTime<Utc>) -> Self {
        Self {
            alert_timestamp: None,
            event_timestamp: Some(event),
            lead_time: None,
            estimated_value: None,
            cost_per_hour: None,
        }
    }

    /// Successful warning. `estimated_value` is the lead time in hours times
    /// `cost_per_hour`. Callers guarantee `alert < event`.
    pub(crate) fn early_warning(
        alert: DateTime<Utc>,
        event: DateTime<Utc>,
        cost_per_hour: f64,
    ) -> Self {
        debug_assert!(alert < event, "alert must precede the event");
        let lead_time = event - alert;
        Self {
            alert_timestamp: Some(alert),
            event_timestamp: Some(event),
            lead_time: Some(lead_time),
            estimated_value: Some(crate::evaluation::estimate_value(
                duration_hours(lead_time),
                cost_per_hour,
            )),
            cost_per_hour: Some(cost_per_hour),
        }
    }

    pub const fn alert_timestamp(&self) -> Option<DateTime<Utc>> {
        self.alert_timestamp
    }

    pub const fn event_timestamp(&self) -> Option<DateTime<Utc>> {
        self.event_timestamp
    }

    pub const fn lead_time(&self) -> Option<TimeDelta> {
        self.lead_time
    }

    pub const fn estimated_value(&self) -> Option<f64> {
        self.estimated_value
    }

    pub const fn cost_per_hour(&self) -> Option<f64> {
        self.cost_per_hour
    }

    pub fn lead_time_hours(&self) -> Option<f64> {
        self.lead_time.map(duration_hours)
    }

    pub fn lead_time_days(&self) -> Option<f64> {
        self.lead_time_hours().map(|h| h / 24.0)
    }

    pub const fn outcome(&self) -> WarningOutcome {
        match (self.event_timestamp, self.alert_timestamp) {
            (None, _) => WarningOutcome::NoEvent,
            (Some(_), None) => WarningOutcome::Missed,
            (Some(_), Some(_)) => WarningOutcome::EarlyWarning,
        }
    }
}

/// Fractional hours, microsecond resolution.
pub fn duration_hours(d: TimeDelta) -> f64 {
    duration_secs(d) / 3600.0
}

/// Microseconds overflow i64 past roughly 292 000 years; fall back to
/// milliseconds there.
fn duration_secs(d: TimeDelta) -> f64 {
    d.num_microseconds().map_or_else(
        || d.num_milliseconds() as f64 / 1_000.0,
        |us| us as f64 / 1_000_000.0,
    )
}

fn serialize_lead_time<S: Serializer>(
    lead_time: &Option<TimeDelta>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match lead_time {
        Some(d) => serializer.serialize_some(&duration_secs(*d)),
        None => serializer.serialize_none(),
    }
}
