//! Feature derivation for the stuck-pipe risk model
//!
//! Converts raw rig telemetry into the model's input table:
//! - `torque_trend`, `rop_trend`, `spp_trend`: value over its trailing mean
//! - `friction_factor`: torque over (WOB x depth + 1)
//!
//! Rows without a full trailing window (the first `window - 1`, plus any
//! window touching a sensor gap) are dropped. Output keeps input order.

pub mod rolling;

use crate::config::defaults::{DEFAULT_TREND_WINDOW, FRICTION_DENOMINATOR_OFFSET};
use crate::types::{FeatureTable, FeatureVector, TelemetryField, TelemetrySample, TelemetryTable};
use rolling::RollingMean;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FeatureError {
    #[error("Required telemetry field missing from input: {0}")]
    MissingField(TelemetryField),

    #[error("Trend window must be at least 1 sample, got {0}")]
    InvalidWindow(usize),
}

/// Derives trend and friction features over a fixed trailing window.
#[derive(Debug, Clone, Copy)]
pub struct FeatureEngine {
    window: usize,
}

impl Default for FeatureEngine {
    fn default() -> Self {
        Self {
            window: DEFAULT_TREND_WINDOW,
        }
    }
}

impl FeatureEngine {
    pub const fn new(window: usize) -> Result<Self, FeatureError> {
        if window == 0 {
            return Err(FeatureError::InvalidWindow(window));
        }
        Ok(Self { window })
    }

    pub const fn window(&self) -> usize {
        self.window
    }

    /// Derive features from a column-oriented table.
    ///
    /// Fails before any computation if a required channel is absent from the
    /// schema. Empty input, or input shorter than the window, yields an empty
    /// table.
    pub fn derive(&self, table: &TelemetryTable) -> Result<FeatureTable, FeatureError> {
        let torque = require(table, TelemetryField::Torque)?;
        let rop = require(table, TelemetryField::Rop)?;
        let spp = require(table, TelemetryField::Spp)?;
        let wob = require(table, TelemetryField::Wob)?;
        let depth = require(table, TelemetryField::Depth)?;

        let mut torque_mean = RollingMean::new(self.window);
        let mut rop_mean = RollingMean::new(self.window);
        let mut spp_mean = RollingMean::new(self.window);

        let mut rows = Vec::with_capacity(table.len().saturating_sub(self.window - 1));

        for row in 0..table.len() {
            // Every accumulator sees every row so the windows stay aligned.
            let torque_trend = trend(torque[row], torque_mean.push(torque[row]));
            let rop_trend = trend(rop[row], rop_mean.push(rop[row]));
            let spp_trend = trend(spp[row], spp_mean.push(spp[row]));

            let (Some(t), Some(r), Some(s), Some(w), Some(d)) =
                (torque[row], rop[row], spp[row], wob[row], depth[row])
            else {
                continue;
            };
            let (Some(torque_trend), Some(rop_trend), Some(spp_trend)) =
                (torque_trend, rop_trend, spp_trend)
            else {
                continue;
            };

            rows.push(FeatureVector {
                row,
                timestamp: table.timestamp(row),
                torque: t,
                rop: r,
                spp: s,
                wob: w,
                depth: d,
                torque_trend,
                rop_trend,
                spp_trend,
                friction_factor: friction_factor(t, w, d),
            });
        }

        debug!(
            rows_in = table.len(),
            rows_out = rows.len(),
            dropped = table.len() - rows.len(),
            window = self.window,
            "Derived drilling features"
        );

        Ok(FeatureTable {
            window: self.window,
            rows,
        })
    }

    /// Derive features from typed samples. The schema is complete by
    /// construction, so only NaN readings can drop extra rows.
    pub fn derive_samples(
        &self,
        samples: &[TelemetrySample],
    ) -> Result<FeatureTable, FeatureError> {
        self.derive(&TelemetryTable::from_samples(samples))
    }
}

/// Derive features with an explicit trailing window (default 30).
pub fn derive_features(table: &TelemetryTable, window: usize) -> Result<FeatureTable, FeatureError> {
    FeatureEngine::new(window)?.derive(table)
}

/// Same as `derive_features` over typed samples.
pub fn derive_from_samples(
    samples: &[TelemetrySample],
    window: usize,
) -> Result<FeatureTable, FeatureError> {
    FeatureEngine::new(window)?.derive_samples(samples)
}

/// `torque / (wob * depth + 1)`; the offset keeps zero load or depth finite.
#[allow(clippy::suboptimal_flops)] // unfused, rounds like the textbook formula
pub fn friction_factor(torque: f64, wob: f64, depth: f64) -> f64 {
    torque / (wob * depth + FRICTION_DENOMINATOR_OFFSET)
}

/// Value over trailing mean. A zero mean (e.g. ROP held at zero through a
/// connection) has no meaningful ratio, so the row is dropped like a gap.
fn trend(value: Option<f64>, trailing_mean: Option<f64>) -> Option<f64> {
    let ratio = value? / trailing_mean?;
    ratio.is_finite().then_some(ratio)
}

fn require(table: &TelemetryTable, field: TelemetryField) -> Result<&[Option<f64>], FeatureError> {
    table.field(field).ok_or(FeatureError::MissingField(field))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_samples(n: usize) -> Vec<TelemetrySample> {
        (0..n)
            .map(|_| TelemetrySample::new(10.0, 20.0, 3000.0, 25.0, 1500.0))
            .collect()
    }

    #[test]
    fn test_zero_window_rejected() {
        assert_eq!(
            FeatureEngine::new(0).unwrap_err(),
            FeatureError::InvalidWindow(0)
        );
    }

    #[test]
    fn test_default_window_is_thirty() {
        assert_eq!(FeatureEngine::default().window(), 30);
    }

    #[test]
    fn test_missing_field_reported_in_schema_order() {
        let mut table = TelemetryTable::with_rows(2);
        table.insert_column("Torque_ft_lb", vec![1.0, 1.0]).unwrap();
        table.insert_column("SPP_PSI", vec![1.0, 1.0]).unwrap();
        let err = derive_features(&table, 1).unwrap_err();
        assert_eq!(err, FeatureError::MissingField(TelemetryField::Rop));
    }

    #[test]
    fn test_missing_field_checked_even_when_empty() {
        let table = TelemetryTable::with_rows(0);
        assert_eq!(
            derive_features(&table, 30).unwrap_err(),
            FeatureError::MissingField(TelemetryField::Torque)
        );
    }

    #[test]
    fn test_friction_factor_zero_load_equals_torque() {
        assert_eq!(friction_factor(12_345.0, 0.0, 0.0), 12_345.0);
        assert_eq!(friction_factor(100.0, 4.0, 0.0), 100.0);
        assert_eq!(friction_factor(100.0, 1.0, 9.0), 10.0);
    }

    #[test]
    fn test_friction_factor_is_unfused() {
        for (t, w, d) in [(12_000.0, 0.1, 0.7), (9_876.5, 23.3, 2_711.9), (1.0, 1e8, 1e-8 + 3.0)] {
            let expected: f64 = t / (w * d + 1.0);
            assert_eq!(friction_factor(t, w, d).to_bits(), expected.to_bits());
        }
    }

    #[test]
    fn test_derive_samples_propagates_result() {
        let engine = FeatureEngine::new(3).unwrap();
        let out = engine.derive_samples(&[]).unwrap();
        assert!(out.is_empty());
        assert_eq!(out.window, 3);
        assert_eq!(engine.derive_samples(&flat_samples(4)).unwrap().len(), 2);
    }

    #[test]
    fn test_warm_up_rows_dropped() {
        let out = derive_from_samples(&flat_samples(10), 4).unwrap();
        assert_eq!(out.len(), 7);
        assert_eq!(out.rows[0].row, 3);
        assert_eq!(out.window, 4);
    }

    #[test]
    fn test_gap_in_wob_drops_only_that_row() {
        let mut table = TelemetryTable::from_samples(&flat_samples(5));
        table
            .insert_optional_column(
                "WOB_klbs",
                vec![Some(25.0), Some(25.0), Some(25.0), None, Some(25.0)],
            )
            .unwrap();
        let out = derive_features(&table, 2).unwrap();
        let kept: Vec<usize> = out.iter().map(|fv| fv.row).collect();
        assert_eq!(kept, vec![1, 2, 4]);
    }

    #[test]
    fn test_zero_trailing_mean_drops_row() {
        let mut table = TelemetryTable::from_samples(&flat_samples(5));
        table.insert_column("ROP_m_hr", vec![0.0; 5]).unwrap();
        let out = derive_features(&table, 3).unwrap();
        assert!(out.is_empty(), "rows={:?}", out.rows);

        // Nonzero ROP after a stop: the window mean recovers and rows return.
        table
            .insert_column("ROP_m_hr", vec![0.0, 0.0, 0.0, 6.0, 6.0])
            .unwrap();
        let out = derive_features(&table, 3).unwrap();
        let kept: Vec<usize> = out.iter().map(|fv| fv.row).collect();
        assert_eq!(kept, vec![3, 4]);
        assert!(out.iter().all(|fv| fv.rop_trend.is_finite()));
    }

    #[test]
    fn test_gap_in_torque_suppresses_following_window() {
        let mut table = TelemetryTable::from_samples(&flat_samples(6));
        table
            .insert_optional_column(
                "Torque_ft_lb",
                vec![Some(10.0), Some(10.0), None, Some(10.0), Some(10.0), Some(10.0)],
            )
            .unwrap();
        let out = derive_features(&table, 2).unwrap();
        let kept: Vec<usize> = out.iter().map(|fv| fv.row).collect();
        assert_eq!(kept, vec![1, 4, 5]);
    }

    #[test]
    fn test_input_table_untouched() {
        let table = TelemetryTable::from_samples(&flat_samples(5));
        let before = table.clone();
        let _ = derive_features(&table, 3).unwrap();
        assert_eq!(table, before);
    }
}
