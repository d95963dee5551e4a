//! Campaign-level evaluation across independent wells
//!
//! Each well's result sequence is evaluated on the rayon pool. Wells share
//! nothing, so no coordination is needed; output order matches input order.

use super::{EvaluationError, WarningEvaluator};
use crate::types::{ImpactSummary, ResultRecord, WarningOutcome};
use rayon::prelude::*;
use tracing::info;

/// One well's model output, ready for evaluation.
#[derive(Debug, Clone)]
pub struct WellResults {
    pub well_id: String,
    pub records: Vec<ResultRecord>,
}

/// Evaluation result for one well.
#[derive(Debug, Clone, PartialEq)]
pub struct WellImpact {
    pub well_id: String,
    pub summary: Result<ImpactSummary, EvaluationError>,
}

/// Evaluate every well in parallel.
pub fn evaluate_wells(evaluator: &WarningEvaluator, wells: &[WellResults]) -> Vec<WellImpact> {
    let impacts: Vec<WellImpact> = wells
        .par_iter()
        .map(|well| WellImpact {
            well_id: well.well_id.clone(),
            summary: evaluator.evaluate(&well.records),
        })
        .collect();

    let warned = impacts
        .iter()
        .filter(|i| matches!(&i.summary, Ok(s) if s.outcome() == WarningOutcome::EarlyWarning))
        .count();
    info!(
        wells = impacts.len(),
        early_warnings = warned,
        total_value = total_estimated_value(&impacts),
        "Campaign evaluation complete"
    );

    impacts
}

/// Sum of estimated values over wells with a successful early warning.
pub fn total_estimated_value(impacts: &[WellImpact]) -> f64 {
    impacts
        .iter()
        .filter_map(|i| i.summary.as_ref().ok())
        .filter_map(ImpactSummary::estimated_value)
        .sum()
}
