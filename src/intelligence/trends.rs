//! Per-type time series for charting: the records inside a trailing window
//! and the first-to-last change across them.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::models::{HealthMetricRecord, MetricType, MetricValue, TrendDirection};

/// Records of `metric_type` measured in the `days` days ending `today`,
/// oldest first. The window is `(today - days, today]`; records dated in
/// the future are left out.
pub fn in_window<'a>(
    metrics: &'a [HealthMetricRecord],
    metric_type: MetricType,
    days: u32,
    today: NaiveDate,
) -> Vec<&'a HealthMetricRecord> {
    let start = today - Duration::days(i64::from(days));
    let mut found: Vec<_> = metrics
        .iter()
        .filter(|m| m.metric_type == metric_type && m.date > start && m.date <= today)
        .collect();
    found.sort_by_key(|m| m.date);
    found
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Trend {
    pub direction: TrendDirection,
    /// Magnitude of the change in percent, one decimal.
    pub percent_change: f64,
}

impl Trend {
    const NEUTRAL: Self = Self {
        direction: TrendDirection::Neutral,
        percent_change: 0.0,
    };
}

/// Systolic for blood pressure, the total for a lipid panel.
fn trend_value(value: &MetricValue) -> Option<f64> {
    match value {
        MetricValue::Scalar { value } => Some(*value),
        MetricValue::BloodPressure { systolic, .. } => Some(*systolic),
        MetricValue::LipidPanel { total, .. } => *total,
    }
}

/// Change from the first to the last entry of a date-ascending series
/// (as returned by [`in_window`]). Fewer than two points is neutral.
pub fn trend(series: &[&HealthMetricRecord]) -> Trend {
    if series.len() < 2 {
        return Trend::NEUTRAL;
    }
    let first = series.first().and_then(|r| trend_value(&r.value));
    let last = series.last().and_then(|r| trend_value(&r.value));
    let (Some(first), Some(last)) = (first, last) else {
        return Trend::NEUTRAL;
    };
    if first == 0.0 {
        return Trend::NEUTRAL;
    }

    let change = last - first;
    let percent_change = ((change / first).abs() * 1000.0).round() / 10.0;
    let direction = if change > 0.0 {
        TrendDirection::Up
    } else if change < 0.0 {
        TrendDirection::Down
    } else {
        return Trend::NEUTRAL;
    };

    Trend {
        direction,
        percent_change,
    }
}
