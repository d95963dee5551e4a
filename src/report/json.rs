//! JSON rendering of an impact summary for dashboards and archives

use super::{ImpactRenderer, ReportError};
use crate::types::{ImpactSummary, WarningOutcome};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer {
    pub pretty: bool,
}

/// Wire shape: the summary plus its outcome tag and derived hours.
#[derive(Serialize)]
struct SummaryDocument<'a> {
    outcome: WarningOutcome,
    #[serde(flatten)]
    summary: &'a ImpactSummary,
    lead_time_hours: Option<f64>,
    generated_at: DateTime<Utc>,
}

impl ImpactRenderer for JsonRenderer {
    fn render(&self, summary: &ImpactSummary) -> Result<String, ReportError> {
        let doc = SummaryDocument {
            outcome: summary.outcome(),
            summary,
            lead_time_hours: summary.lead_time_hours(),
            generated_at: Utc::now(),
        };
        let json = if self.pretty {
            serde_json::to_string_pretty(&doc)?
        } else {
            serde_json::to_string(&doc)?
        };
        Ok(json)
    }
}
