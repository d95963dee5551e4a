//! System-wide default constants.
//!
//! Centralises the tunables used by feature derivation and early-warning
//! evaluation. Grouped by subsystem for easy discovery.

// ============================================================================
// Feature Derivation
// ============================================================================

/// Trailing samples in the trend moving average.
///
/// 30 samples at one reading per minute = half an hour of recent behaviour.
pub const DEFAULT_TREND_WINDOW: usize = 30;

/// Additive offset in the friction factor denominator `wob * depth + 1`.
///
/// Fixed, not configurable: it only keeps zero WOB or zero depth finite.
pub const FRICTION_DENOMINATOR_OFFSET: f64 = 1.0;

/// Windows above this are accepted but flagged as suspicious.
pub const TREND_WINDOW_SUSPICIOUS_MAX: usize = 10_000;

// ============================================================================
// Early-Warning Evaluation
// ============================================================================

/// Minimum risk probability that counts as an actionable alert (inclusive).
pub const DEFAULT_ALERT_THRESHOLD: f64 = 0.75;

/// Thresholds below this are accepted but flagged as likely to over-alert.
pub const ALERT_THRESHOLD_SUSPICIOUS_MIN: f64 = 0.5;

/// Non-productive time cost basis (currency units per hour).
pub const DEFAULT_NPT_COST_PER_HOUR: f64 = 5_000.0;

// ============================================================================
// Reporting
// ============================================================================

/// Currency code printed next to estimated values.
pub const DEFAULT_CURRENCY: &str = "USD";
