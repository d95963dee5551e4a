//! Settings validation: unknown-key detection with Levenshtein suggestions
//! and range checks.
//!
//! Unknown keys are found by walking the raw `toml::Value` tree before serde
//! deserialization. They only produce warnings, so a typo never stops a run;
//! it just leaves the default in place and says so.

use super::defaults::{ALERT_THRESHOLD_SUSPICIOUS_MIN, TREND_WINDOW_SUSPICIOUS_MAX};
use super::Settings;
use std::collections::HashSet;

/// A non-fatal settings warning (typo, suspicious value).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, " (did you mean '{s}'?)")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Keys
// ============================================================================

/// Every valid dotted key path in `Settings`.
///
/// Kept by hand in step with settings.rs.
pub fn known_config_keys() -> HashSet<&'static str> {
    [
        "features",
        "features.window",
        "warning",
        "warning.alert_threshold",
        "warning.cost_per_hour",
        "warning.require_non_empty",
        "report",
        "report.currency",
    ]
    .into_iter()
    .collect()
}

/// Dotted key paths of a parsed TOML document, each table before its keys.
///
/// `{ a = { b = 1 } }` yields `["a", "a.b"]`. Arrays of tables are not
/// descended; `Settings` has none.
pub fn collect_key_paths(root: &toml::Table) -> Vec<String> {
    let mut paths = Vec::new();
    let mut pending: Vec<(String, &toml::Value)> =
        root.iter().rev().map(|(k, v)| (k.clone(), v)).collect();

    while let Some((path, value)) = pending.pop() {
        if let toml::Value::Table(nested) = value {
            pending.extend(nested.iter().rev().map(|(k, v)| (format!("{path}.{k}"), v)));
        }
        paths.push(path);
    }
    paths
}

// ============================================================================
// Suggestions
// ============================================================================

fn levenshtein(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr = vec![0; b_chars.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_chars.len()]
}

/// Closest known key within edit distance 3. Ties go to the
/// lexicographically smaller key so the suggestion is stable.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    known
        .iter()
        .map(|&k| (levenshtein(unknown, k), k))
        .filter(|&(dist, _)| dist <= 3)
        .min()
        .map(|(_, k)| k.to_string())
}

/// Warnings for every key in `raw_toml` that `Settings` does not know.
///
/// Unparseable input yields no warnings; serde reports the parse error.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let Ok(root) = raw_toml.parse::<toml::Table>() else {
        return Vec::new();
    };

    let known = known_config_keys();
    collect_key_paths(&root)
        .into_iter()
        .filter(|key| !known.contains(key.as_str()))
        .map(|key| ValidationWarning {
            suggestion: suggest_correction(&key, &known),
            message: format!("Unknown config key '{key}'"),
            field: key,
        })
        .collect()
}

// ============================================================================
// Range Validation
// ============================================================================

/// Returns (errors, warnings). Errors are values that make evaluation
/// meaningless; warnings are legal but suspicious.
pub fn validate_ranges(settings: &Settings) -> (Vec<String>, Vec<ValidationWarning>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let window = settings.features.window;
    if window == 0 {
        errors.push("features.window = 0 must be at least 1 sample".to_string());
    } else if window > TREND_WINDOW_SUSPICIOUS_MAX {
        warnings.push(ValidationWarning {
            field: "features.window".to_string(),
            message: format!(
                "features.window = {window} exceeds {TREND_WINDOW_SUSPICIOUS_MAX} samples; most wells will yield no features"
            ),
            suggestion: None,
        });
    }

    let threshold = settings.warning.alert_threshold;
    if !(0.0..=1.0).contains(&threshold) {
        errors.push(format!(
            "warning.alert_threshold = {threshold} is outside [0, 1]"
        ));
    } else if threshold < ALERT_THRESHOLD_SUSPICIOUS_MIN {
        warnings.push(ValidationWarning {
            field: "warning.alert_threshold".to_string(),
            message: format!(
                "warning.alert_threshold = {threshold:.2} is below {ALERT_THRESHOLD_SUSPICIOUS_MIN}; expect early alerts on noise"
            ),
            suggestion: None,
        });
    }

    let cost = settings.warning.cost_per_hour;
    if !cost.is_finite() || cost <= 0.0 {
        errors.push(format!(
            "warning.cost_per_hour = {cost} must be a positive amount"
        ));
    }

    if settings.report.currency.trim().is_empty() {
        errors.push("report.currency must not be empty".to_string());
    }

    (errors, warnings)
}
