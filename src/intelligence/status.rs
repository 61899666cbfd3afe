//! Status classification of a metric value against its reference range.
//!
//! Single-valued metrics get Low / Normal / High. Blood pressure is judged as
//! a whole: Normal only when both systolic and diastolic are inside their
//! bounds, otherwise Abnormal. A lipid panel is classified by its total.

use crate::models::{HealthMetricRecord, HealthStatus, MetricCandidate, MetricValue};

use super::reference::{self, ReferenceRange, ValueRange};

/// Classify a value against a range. Never fails: anything that cannot be
/// judged (no range, mismatched shape, non-finite number) is Unknown.
pub fn classify(value: &MetricValue, range: Option<&ReferenceRange>) -> HealthStatus {
    let Some(range) = range else {
        return HealthStatus::Unknown;
    };

    match (value, range) {
        (MetricValue::Scalar { value }, ReferenceRange::Value(r)) => classify_scalar(*value, r),
        (MetricValue::LipidPanel { total, .. }, ReferenceRange::Value(r)) => match total {
            Some(total) => classify_scalar(*total, r),
            None => HealthStatus::Unknown,
        },
        (
            MetricValue::BloodPressure {
                systolic,
                diastolic,
            },
            ReferenceRange::BloodPressure {
                systolic: sys_bounds,
                diastolic: dia_bounds,
            },
        ) => {
            if !systolic.is_finite() || !diastolic.is_finite() {
                return HealthStatus::Unknown;
            }
            if sys_bounds.contains(*systolic) && dia_bounds.contains(*diastolic) {
                HealthStatus::Normal
            } else {
                HealthStatus::Abnormal
            }
        }
        _ => HealthStatus::Unknown,
    }
}

fn classify_scalar(value: f64, range: &ValueRange) -> HealthStatus {
    if !value.is_finite() {
        return HealthStatus::Unknown;
    }
    if value < range.min {
        return HealthStatus::Low;
    }
    if range.higher_is_better {
        return HealthStatus::Normal;
    }
    match range.max {
        Some(max) if value > max => HealthStatus::High,
        _ => HealthStatus::Normal,
    }
}

/// Classify an accepted record using the built-in reference table.
pub fn classify_record(record: &HealthMetricRecord) -> HealthStatus {
    classify(&record.value, reference::lookup(record.metric_type))
}

/// Classify a candidate (not yet validated) using the built-in reference table.
pub fn classify_candidate(candidate: &MetricCandidate) -> HealthStatus {
    classify(&candidate.value, reference::lookup(candidate.metric_type))
}
