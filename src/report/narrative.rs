//! Template-based value report

use super::{ImpactRenderer, ReportError};
use crate::config::defaults::DEFAULT_CURRENCY;
use crate::config::Settings;
use crate::types::{ImpactSummary, WarningOutcome};

const RULE_WIDTH: usize = 60;

/// Plain-text value report for operators and management.
///
/// The NPT cost basis is read from the summary, so the printed basis is
/// always the one the value was computed with.
#[derive(Debug, Clone)]
pub struct NarrativeRenderer {
    pub currency: String,
}

impl Default for NarrativeRenderer {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

impl NarrativeRenderer {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            currency: settings.report.currency.clone(),
        }
    }
}

impl ImpactRenderer for NarrativeRenderer {
    fn render(&self, summary: &ImpactSummary) -> Result<String, ReportError> {
        let heavy = "=".repeat(RULE_WIDTH);
        let light = "-".repeat(RULE_WIDTH);

        let (Some(event), Some(alert), Some(hours), Some(value), Some(cost_per_hour)) = (
            summary.event_timestamp(),
            summary.alert_timestamp(),
            summary.lead_time_hours(),
            summary.estimated_value(),
            summary.cost_per_hour(),
        ) else {
            return Ok(match summary.outcome() {
                WarningOutcome::NoEvent => "No stuck pipe events detected.".to_string(),
                _ => format!(
                    "{heavy}\n{:^RULE_WIDTH$}\n{heavy}\nAI did not generate early warning.\n",
                    "VALUE REPORT: ARTIFICIAL INTELLIGENCE"
                ),
            });
        };

        let lines = [
            heavy.clone(),
            format!("{:^RULE_WIDTH$}", "VALUE REPORT: ARTIFICIAL INTELLIGENCE"),
            heavy.clone(),
            format!("Critical Event Date (Stuck Pipe):  {}", event.format("%Y-%m-%d %H:%M:%S")),
            format!("Early Detection Date (AI):         {}", alert.format("%Y-%m-%d %H:%M:%S")),
            light.clone(),
            format!(
                "REACTION TIME GAINED:   {hours:.1} HOURS ({:.1} Days)",
                hours / 24.0
            ),
            light,
            "POTENTIAL ECONOMIC IMPACT:".to_string(),
            format!(
                "  (Base: NPT Cost = {} / hour)",
                format_money(cost_per_hour, 0, &self.currency)
            ),
            format!("  VALUE PRESERVED:      {}", format_money(value, 2, &self.currency)),
            heavy,
            String::new(),
        ];
        Ok(lines.join("\n"))
    }
}

/// `12345.678` -> `12,345.68 USD` with the requested decimals.
pub fn format_money(amount: f64, decimals: usize, currency: &str) -> String {
    let formatted = format!("{:.*}", decimals, amount.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f} {currency}"),
        None => format!("{sign}{grouped} {currency}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(5000.0, 0, "USD"), "5,000 USD");
        assert_eq!(format_money(1_234_567.891, 2, "USD"), "1,234,567.89 USD");
        assert_eq!(format_money(999.0, 2, "NOK"), "999.00 NOK");
        assert_eq!(format_money(-1500.0, 0, "USD"), "-1,500 USD");
    }

    #[test]
    fn test_success_report_sections() {
        let alert = DateTime::from_timestamp(1_600_000_000, 0).unwrap();
        let event = DateTime::from_timestamp(1_600_000_000 + 36 * 3600, 0).unwrap();
        let summary = ImpactSummary::early_warning(alert, event, 5000.0);

        let text = NarrativeRenderer::default().render(&summary).unwrap();
        assert!(text.contains("VALUE REPORT: ARTIFICIAL INTELLIGENCE"));
        assert!(text.contains("REACTION TIME GAINED:   36.0 HOURS (1.5 Days)"));
        assert!(text.contains("(Base: NPT Cost = 5,000 USD / hour)"));
        assert!(text.contains("VALUE PRESERVED:      180,000.00 USD"));
        assert!(text.contains("2020-09-13 12:26:40"));
    }

    #[test]
    fn test_cost_basis_follows_summary() {
        let alert = DateTime::from_timestamp(0, 0).unwrap();
        let event = DateTime::from_timestamp(2 * 3600, 0).unwrap();
        let summary = ImpactSummary::early_warning(alert, event, 12_000.0);

        let text = NarrativeRenderer::default().render(&summary).unwrap();
        assert!(text.contains("(Base: NPT Cost = 12,000 USD / hour)"));
        assert!(text.contains("VALUE PRESERVED:      24,000.00 USD"));
        assert!(!text.contains("5,000"));
    }

    #[test]
    fn test_missed_and_no_event_reports() {
        let event = DateTime::from_timestamp(0, 0).unwrap();
        let renderer = NarrativeRenderer::default();

        let missed = renderer.render(&ImpactSummary::missed(event)).unwrap();
        assert!(missed.contains("AI did not generate early warning."));

        let none = renderer.render(&ImpactSummary::no_event()).unwrap();
        assert_eq!(none, "No stuck pipe events detected.");
    }
}
