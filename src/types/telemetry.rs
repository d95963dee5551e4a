//! Rig telemetry types: raw samples, the column-oriented input table, and
//! the derived feature rows handed to the risk model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

// ============================================================================
// Telemetry Fields
// ============================================================================

/// The five channels every feature derivation needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TelemetryField {
    /// Rotary torque (ft-lb)
    Torque,
    /// Rate of penetration (m/hr)
    Rop,
    /// Standpipe pressure (psi)
    Spp,
    /// Weight on bit (klbs)
    Wob,
    /// Measured depth (m)
    Depth,
}

impl TelemetryField {
    /// All required fields, in the order the schema is checked.
    pub const ALL: [Self; 5] = [Self::Torque, Self::Rop, Self::Spp, Self::Wob, Self::Depth];

    /// Canonical column name as exported by the rig historian.
    pub const fn column_name(self) -> &'static str {
        match self {
            Self::Torque => "Torque_ft_lb",
            Self::Rop => "ROP_m_hr",
            Self::Spp => "SPP_PSI",
            Self::Wob => "WOB_klbs",
            Self::Depth => "Depth_m",
        }
    }

    /// Short lowercase alias, also accepted as a column name.
    pub const fn alias(self) -> &'static str {
        match self {
            Self::Torque => "torque",
            Self::Rop => "rop",
            Self::Spp => "spp",
            Self::Wob => "wob",
            Self::Depth => "depth",
        }
    }
}

impl std::fmt::Display for TelemetryField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.column_name())
    }
}

// ============================================================================
// Raw Samples
// ============================================================================

/// One telemetry reading. Rows are assumed to arrive in chronological order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySample {
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    pub torque: f64,
    pub rop: f64,
    pub spp: f64,
    pub wob: f64,
    pub depth: f64,
}

impl TelemetrySample {
    pub const fn new(torque: f64, rop: f64, spp: f64, wob: f64, depth: f64) -> Self {
        Self {
            timestamp: None,
            torque,
            rop,
            spp,
            wob,
            depth,
        }
    }

    #[must_use]
    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub const fn get(&self, field: TelemetryField) -> f64 {
        match field {
            TelemetryField::Torque => self.torque,
            TelemetryField::Rop => self.rop,
            TelemetryField::Spp => self.spp,
            TelemetryField::Wob => self.wob,
            TelemetryField::Depth => self.depth,
        }
    }
}

// ============================================================================
// Telemetry Table
// ============================================================================

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("Column '{column}' has {actual} rows, table has {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },
}

/// Column-oriented telemetry as handed over by the acquisition layer.
///
/// Cells are optional: a gap in a sensor channel is an absent value, never a
/// NaN. Any NaN passed in is normalised to `None` on insert.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TelemetryTable {
    len: usize,
    timestamps: Option<Vec<DateTime<Utc>>>,
    columns: BTreeMap<String, Vec<Option<f64>>>,
}

impl TelemetryTable {
    /// Empty table with a fixed row count and no columns.
    pub fn with_rows(len: usize) -> Self {
        Self {
            len,
            ..Self::default()
        }
    }

    /// Build a complete table (all five channels) from typed samples.
    ///
    /// Timestamps are carried only when every sample has one.
    pub fn from_samples(samples: &[TelemetrySample]) -> Self {
        let mut table = Self::with_rows(samples.len());
        for field in TelemetryField::ALL {
            let cells = samples.iter().map(|s| Some(s.get(field))).collect();
            table.columns.insert(field.column_name().to_string(), normalise(cells));
        }
        table.timestamps = samples.iter().map(|s| s.timestamp).collect();
        table
    }

    /// Insert (or replace) a column of fully-present values.
    pub fn insert_column(
        &mut self,
        name: impl Into<String>,
        values: Vec<f64>,
    ) -> Result<(), TableError> {
        self.insert_optional_column(name, values.into_iter().map(Some).collect())
    }

    /// Insert (or replace) a column whose cells may be absent.
    pub fn insert_optional_column(
        &mut self,
        name: impl Into<String>,
        values: Vec<Option<f64>>,
    ) -> Result<(), TableError> {
        let name = name.into();
        self.check_len(&name, values.len())?;
        self.columns.insert(name, normalise(values));
        Ok(())
    }

    /// Attach the timestamp index column.
    pub fn set_timestamps(&mut self, timestamps: Vec<DateTime<Utc>>) -> Result<(), TableError> {
        self.check_len("timestamp", timestamps.len())?;
        self.timestamps = Some(timestamps);
        Ok(())
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn timestamp(&self, row: usize) -> Option<DateTime<Utc>> {
        self.timestamps.as_ref().and_then(|ts| ts.get(row).copied())
    }

    pub fn column(&self, name: &str) -> Option<&[Option<f64>]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    /// Look up a required channel by canonical name, falling back to its alias.
    pub fn field(&self, field: TelemetryField) -> Option<&[Option<f64>]> {
        self.column(field.column_name())
            .or_else(|| self.column(field.alias()))
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    fn check_len(&self, column: &str, actual: usize) -> Result<(), TableError> {
        if actual == self.len {
            Ok(())
        } else {
            Err(TableError::LengthMismatch {
                column: column.to_string(),
                expected: self.len,
                actual,
            })
        }
    }
}

fn normalise(cells: Vec<Option<f64>>) -> Vec<Option<f64>> {
    cells
        .into_iter()
        .map(|c| c.filter(|v| !v.is_nan()))
        .collect()
}

// ============================================================================
// Derived Features
// ============================================================================

/// A telemetry row extended with the derived model inputs.
///
/// Only rows where every input and derived value is defined become a
/// `FeatureVector`, so none of these fields is optional.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Position of the source row in the input table
    pub row: usize,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    pub torque: f64,
    pub rop: f64,
    pub spp: f64,
    pub wob: f64,
    pub depth: f64,
    /// Torque over its trailing mean (1.0 = on trend)
    pub torque_trend: f64,
    /// ROP over its trailing mean
    pub rop_trend: f64,
    /// SPP over its trailing mean
    pub spp_trend: f64,
    /// Torque normalised by the load-times-depth proxy
    pub friction_factor: f64,
}

/// Output of feature derivation: rows in input order plus the window used.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureTable {
    pub window: usize,
    pub rows: Vec<FeatureVector>,
}

impl FeatureTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FeatureVector> {
        self.rows.iter()
    }
}

impl<'a> IntoIterator for &'a FeatureTable {
    type Item = &'a FeatureVector;
    type IntoIter = std::slice::Iter<'a, FeatureVector>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
