use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::enums::{MetricSource, MetricType};

/// Measured payload of a metric record.
///
/// Untagged so the JSON form stays flat: `{"value": 92}`,
/// `{"systolic": 120, "diastolic": 80}` or `{"total": 180, "hdl": 60}`.
/// Variant order matters for deserialization: the lipid panel accepts any
/// map, so it must come last.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    BloodPressure {
        systolic: f64,
        diastolic: f64,
    },
    Scalar {
        value: f64,
    },
    LipidPanel {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        total: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        hdl: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        ldl: Option<f64>,
    },
}

/// Which payload variant a metric type carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueShape {
    Scalar,
    BloodPressure,
    LipidPanel,
}

impl MetricValue {
    pub fn scalar(value: f64) -> Self {
        Self::Scalar { value }
    }

    pub fn blood_pressure(systolic: f64, diastolic: f64) -> Self {
        Self::BloodPressure {
            systolic,
            diastolic,
        }
    }

    pub fn shape(&self) -> ValueShape {
        match self {
            Self::Scalar { .. } => ValueShape::Scalar,
            Self::BloodPressure { .. } => ValueShape::BloodPressure,
            Self::LipidPanel { .. } => ValueShape::LipidPanel,
        }
    }

    /// The single numeric value, if this is a scalar payload.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar { value } => Some(*value),
            _ => None,
        }
    }
}

/// A metric before validation: no identifier, no creation timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricCandidate {
    #[serde(rename = "type")]
    pub metric_type: MetricType,
    pub date: NaiveDate,
    #[serde(flatten)]
    pub value: MetricValue,
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub source: MetricSource,
}

/// An accepted health metric owned by the record collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthMetricRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub metric_type: MetricType,
    pub date: NaiveDate,
    #[serde(flatten)]
    pub value: MetricValue,
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub source: MetricSource,
    pub created_at: DateTime<Utc>,
}

impl HealthMetricRecord {
    pub fn from_candidate(candidate: MetricCandidate, id: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            metric_type: candidate.metric_type,
            date: candidate.date,
            value: candidate.value,
            unit: candidate.unit,
            notes: candidate.notes,
            source: candidate.source,
            created_at,
        }
    }

    /// Strip identity so the record can be re-run through validation.
    pub fn to_candidate(&self) -> MetricCandidate {
        MetricCandidate {
            metric_type: self.metric_type,
            date: self.date,
            value: self.value.clone(),
            unit: self.unit.clone(),
            notes: self.notes.clone(),
            source: self.source,
        }
    }
}
