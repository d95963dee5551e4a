//! Feature Engine Tests
//!
//! Exercises trend normalisation, warm-up trimming and the friction factor
//! through the public API.

use stuck_pipe_warning::features::{derive_from_samples, friction_factor};
use stuck_pipe_warning::{
    derive_features, FeatureEngine, FeatureError, TelemetryField, TelemetrySample, TelemetryTable,
};

fn constant_table(n: usize, torque: f64) -> TelemetryTable {
    let mut table = TelemetryTable::with_rows(n);
    table.insert_column("Torque_ft_lb", vec![torque; n]).unwrap();
    table.insert_column("ROP_m_hr", vec![22.5; n]).unwrap();
    table.insert_column("SPP_PSI", vec![3150.0; n]).unwrap();
    table.insert_column("WOB_klbs", vec![18.0; n]).unwrap();
    table.insert_column("Depth_m", vec![2450.0; n]).unwrap();
    table
}

// ============================================================================
// Trend normalisation
// ============================================================================

#[test]
fn constant_series_has_unit_trends_after_warm_up() {
    let table = constant_table(120, 14_250.7);
    let out = derive_features(&table, 30).unwrap();
    assert!(!out.is_empty());
    for fv in &out {
        assert_eq!(fv.torque_trend, 1.0);
        assert_eq!(fv.rop_trend, 1.0);
        assert_eq!(fv.spp_trend, 1.0);
    }
}

#[test]
fn torque_spike_shows_above_trend() {
    let mut torque = vec![10_000.0; 10];
    torque.push(13_000.0);
    let n = torque.len();
    let mut table = constant_table(n, 0.0);
    table.insert_column("Torque_ft_lb", torque).unwrap();

    let out = derive_features(&table, 5).unwrap();
    let last = out.rows.last().unwrap();
    // 13000 / mean(10000 x4, 13000) = 13000 / 10600
    assert!((last.torque_trend - 13_000.0 / 10_600.0).abs() < 1e-12);
    assert!(last.torque_trend > 1.0);
}

// ============================================================================
// Warm-up length
// ============================================================================

#[test]
fn output_length_is_input_minus_window_plus_one() {
    for (n, window) in [(0, 1), (1, 1), (5, 1), (10, 3), (29, 30), (30, 30), (100, 30), (3, 10)] {
        let out = derive_features(&constant_table(n, 100.0), window).unwrap();
        assert_eq!(
            out.len(),
            (n + 1).saturating_sub(window),
            "n={n} window={window}"
        );
    }
}

#[test]
fn scenario_a_window_three_drops_first_two_rows() {
    let mut table = constant_table(4, 10.0);
    table.insert_column("Torque_ft_lb", vec![10.0, 10.0, 10.0, 10.0]).unwrap();

    let out = derive_features(&table, 3).unwrap();
    assert_eq!(out.len(), 2);
    let rows: Vec<usize> = out.iter().map(|fv| fv.row).collect();
    assert_eq!(rows, vec![2, 3]);
    assert!(out.iter().all(|fv| fv.torque_trend == 1.0));
}

#[test]
fn window_longer_than_input_yields_empty_not_error() {
    let out = derive_features(&constant_table(5, 1.0), 30).unwrap();
    assert!(out.is_empty());
}

#[test]
fn empty_input_yields_empty_output() {
    let out = derive_features(&constant_table(0, 1.0), 30).unwrap();
    assert!(out.is_empty());
}

// ============================================================================
// Friction factor
// ============================================================================

#[test]
fn friction_equals_torque_with_zero_wob_and_depth() {
    let samples: Vec<TelemetrySample> = (0..3)
        .map(|i| TelemetrySample::new(9_000.0 + f64::from(i), 20.0, 3000.0, 0.0, 0.0))
        .collect();
    let out = derive_from_samples(&samples, 1).unwrap();
    assert_eq!(out.len(), 3);
    for fv in &out {
        assert_eq!(fv.friction_factor, fv.torque);
    }
}

#[test]
fn friction_uses_load_times_depth_plus_one() {
    assert_eq!(friction_factor(4_001.0, 2.0, 2_000.0), 1.0);
}

// ============================================================================
// Schema and ordering
// ============================================================================

#[test]
fn missing_depth_column_is_reported() {
    let mut table = TelemetryTable::with_rows(3);
    for name in ["Torque_ft_lb", "ROP_m_hr", "SPP_PSI", "WOB_klbs"] {
        table.insert_column(name, vec![1.0; 3]).unwrap();
    }
    let err = derive_features(&table, 2).unwrap_err();
    assert_eq!(err, FeatureError::MissingField(TelemetryField::Depth));
    assert!(err.to_string().contains("Depth_m"));
}

#[test]
fn lowercase_aliases_satisfy_schema() {
    let mut table = TelemetryTable::with_rows(2);
    for name in ["torque", "rop", "spp", "wob", "depth"] {
        table.insert_column(name, vec![2.0; 2]).unwrap();
    }
    let out = derive_features(&table, 2).unwrap();
    assert_eq!(out.len(), 1);
}

#[test]
fn output_preserves_input_order_and_values() {
    let samples: Vec<TelemetrySample> = (0..20)
        .map(|i| {
            let x = f64::from(i);
            TelemetrySample::new(1000.0 + x, 30.0 - x, 2500.0 + 10.0 * x, 15.0, 1000.0 + x)
        })
        .collect();
    let out = FeatureEngine::new(4).unwrap().derive_samples(&samples).unwrap();
    assert_eq!(out.len(), 17);
    for pair in out.rows.windows(2) {
        assert!(pair[0].row < pair[1].row);
    }
    let first = &out.rows[0];
    assert_eq!(first.row, 3);
    assert_eq!(first.torque, samples[3].torque);
    assert_eq!(first.depth, samples[3].depth);
}
