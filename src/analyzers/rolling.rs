//! Trailing moving averages and missing-value detection over aggregate series.

use anyhow::{Result, anyhow};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::analyzers::types::{WageSummary, WageTrend, YearSummary, YearlyTrend};
use crate::analyzers::utility::round_to;

/// Trailing, left-anchored moving average.
///
/// Element `i` averages the present, non-NaN values in
/// `values[max(0, i + 1 - window) ..= i]`, so the window widens from one
/// element up to `window`. `None` when the window holds no usable value,
/// which is every element when `window` is 0.
pub fn rolling_average(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    (0..values.len())
        .map(|i| {
            if window == 0 {
                return None;
            }
            let start = (i + 1).saturating_sub(window);
            let valid: Vec<f64> = values[start..=i]
                .iter()
                .flatten()
                .copied()
                .filter(|v| !v.is_nan())
                .collect();

            if valid.is_empty() {
                None
            } else {
                Some(valid.iter().sum::<f64>() / valid.len() as f64)
            }
        })
        .collect()
}

/// [`rolling_average`] rounded to 2 decimals, as shown next to a series.
pub fn rolling_average_display(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    rolling_average(values, window)
        .into_iter()
        .map(|v| v.map(|avg| round_to(avg, 2)))
        .collect()
}

/// Adds a `rollingAvg_<key>` field to each serialized row.
///
/// Rows must serialize to JSON objects. A row whose `key` is absent or not a
/// number counts as missing in every window that covers it.
pub fn annotate_rolling_average<T: Serialize>(
    rows: &[T],
    key: &str,
    window: usize,
) -> Result<Vec<Value>> {
    let objects = rows
        .iter()
        .map(|row| match serde_json::to_value(row)? {
            Value::Object(map) => Ok(map),
            other => Err(anyhow!("expected an object row, got {other}")),
        })
        .collect::<Result<Vec<Map<String, Value>>>>()?;

    let values: Vec<Option<f64>> = objects
        .iter()
        .map(|obj| obj.get(key).and_then(Value::as_f64))
        .collect();
    let averages = rolling_average_display(&values, window);

    let field = format!("rollingAvg_{key}");
    Ok(objects
        .into_iter()
        .zip(averages)
        .map(|(mut obj, avg)| {
            obj.insert(field.clone(), avg.map_or(Value::Null, Value::from));
            Value::Object(obj)
        })
        .collect())
}

/// True when a value is absent or NaN.
pub fn is_missing(value: Option<f64>) -> bool {
    value.is_none_or(f64::is_nan)
}

/// Rows that can report absent or NaN fields.
pub trait MissingData {
    fn has_missing(&self) -> bool;
}

impl MissingData for YearSummary {
    fn has_missing(&self) -> bool {
        self.avg_days_worked.is_nan() || self.avg_wage_rate.is_nan()
    }
}

impl MissingData for WageSummary {
    fn has_missing(&self) -> bool {
        self.avg_wage_rate.is_nan() || self.avg_days_per_beneficiary.is_nan()
    }
}

impl MissingData for YearlyTrend {
    fn has_missing(&self) -> bool {
        self.summary.has_missing() || is_missing(self.rolling_avg_wage_rate)
    }
}

impl MissingData for WageTrend {
    fn has_missing(&self) -> bool {
        self.summary.has_missing() || is_missing(self.rolling_avg_wage_rate)
    }
}

impl MissingData for Value {
    fn has_missing(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Object(map) => map.values().any(|v| v.is_null()),
            _ => false,
        }
    }
}

/// Sets a `missing` flag on each JSON row without touching its other fields.
pub fn flag_missing(rows: Vec<Value>) -> Vec<Value> {
    rows.into_iter()
        .map(|row| {
            let missing = row.has_missing();
            match row {
                Value::Object(mut map) => {
                    map.insert("missing".to_string(), Value::Bool(missing));
                    Value::Object(map)
                }
                other => other,
            }
        })
        .collect()
}
