//! Normalization of loosely typed result records into chart series.
//!
//! Each record is resolved on its own: the label is taken from the first
//! usable field of [`LABEL_FIELDS`], the value from the first usable field
//! of [`VALUE_FIELDS`]. Records that carry neither resolve to `""` / `0`,
//! so the series always has one point per record.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Label field names, in resolution order
pub const LABEL_FIELDS: [&str; 2] = ["label", "name"];

/// Value field names, in resolution order
pub const VALUE_FIELDS: [&str; 2] = ["value", "count"];

/// Canonical chart input: index-aligned labels and values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl Series {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }

    /// Sum of all values
    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Largest value, `0` for an empty series
    pub fn max_value(&self) -> f64 {
        self.values.iter().copied().fold(0.0, f64::max)
    }

    /// Smallest value, `0` for an empty series
    pub fn min_value(&self) -> f64 {
        self.values.iter().copied().fold(0.0, f64::min)
    }
}

/// Build the series for a report's result records
pub fn normalize(records: &[Value]) -> Series {
    let (labels, values) = records
        .iter()
        .map(|record| (resolve_label(record), resolve_value(record)))
        .unzip();
    Series { labels, values }
}

/// First usable label field of a record, `""` when none is present
pub fn resolve_label(record: &Value) -> String {
    LABEL_FIELDS
        .iter()
        .find_map(|field| record.get(field).and_then(label_text))
        .unwrap_or_default()
}

/// First usable value field of a record, `0` when none is present
pub fn resolve_value(record: &Value) -> f64 {
    VALUE_FIELDS
        .iter()
        .find_map(|field| record.get(field).and_then(numeric))
        .unwrap_or(0.0)
}

fn label_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}
