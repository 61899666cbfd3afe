//! Validator: second line of defense between candidates and the record set.
//!
//! Re-checks every candidate against hard plausibility bounds kept
//! independently of the extraction processors, then assigns identity.
//! Also hosts the manual-entry form validation, which reports problems as a
//! field → message map instead of failing.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ids::{Clock, IdSource};
use crate::models::{
    HealthMetricRecord, MetricCandidate, MetricSource, MetricType, MetricValue, ValueShape,
};
use crate::registry;

// ═══════════════════════════════════════════
// Plausibility bounds
// ═══════════════════════════════════════════

/// Inclusive physiological bounds for a scalar metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlausibleRange {
    pub metric_type: MetricType,
    pub min: f64,
    pub max: f64,
}

const fn plausible(metric_type: MetricType, min: f64, max: f64) -> PlausibleRange {
    PlausibleRange {
        metric_type,
        min,
        max,
    }
}

/// Scalar bounds. Deliberately duplicated from the pattern catalog so that
/// a loosened processor cannot admit bad data on its own.
const PLAUSIBLE_SCALARS: &[PlausibleRange] = &[
    plausible(MetricType::Glucose, 30.0, 500.0),
    plausible(MetricType::FastingGlucose, 30.0, 500.0),
    plausible(MetricType::RandomGlucose, 30.0, 500.0),
    plausible(MetricType::BloodSugar, 30.0, 500.0),
    plausible(MetricType::Hba1c, 3.0, 20.0),
    plausible(MetricType::TotalCholesterol, 50.0, 500.0),
    plausible(MetricType::HdlCholesterol, 10.0, 150.0),
    plausible(MetricType::LdlCholesterol, 10.0, 400.0),
    plausible(MetricType::VldlCholesterol, 2.0, 100.0),
    plausible(MetricType::Triglycerides, 20.0, 2000.0),
    plausible(MetricType::Tsh, 0.01, 100.0),
    plausible(MetricType::T3, 0.1, 10.0),
    plausible(MetricType::FreeT3, 0.5, 30.0),
    plausible(MetricType::T4, 1.0, 30.0),
    plausible(MetricType::FreeT4, 0.1, 10.0),
    plausible(MetricType::VitaminD, 3.0, 200.0),
    plausible(MetricType::VitaminB12, 50.0, 3000.0),
    plausible(MetricType::Hemoglobin, 3.0, 25.0),
    plausible(MetricType::Wbc, 1000.0, 50_000.0),
    plausible(MetricType::Platelets, 10_000.0, 1_000_000.0),
    plausible(MetricType::Creatinine, 0.1, 20.0),
    plausible(MetricType::Urea, 2.0, 300.0),
    plausible(MetricType::Weight, 20.0, 300.0),
    plausible(MetricType::Height, 100.0, 250.0),
    plausible(MetricType::HeartRate, 30.0, 220.0),
    plausible(MetricType::Temperature, 30.0, 45.0),
    plausible(MetricType::Bmi, 10.0, 60.0),
];

const SYSTOLIC: (f64, f64) = (70.0, 250.0);
const DIASTOLIC: (f64, f64) = (40.0, 150.0);
const LIPID_TOTAL: (f64, f64) = (50.0, 500.0);
const LIPID_HDL: (f64, f64) = (10.0, 150.0);
const LIPID_LDL: (f64, f64) = (10.0, 400.0);

pub fn plausible_range(metric_type: MetricType) -> Option<&'static PlausibleRange> {
    PLAUSIBLE_SCALARS.iter().find(|r| r.metric_type == metric_type)
}

// ═══════════════════════════════════════════
// Candidate validation
// ═══════════════════════════════════════════

/// Why a candidate was not accepted.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Rejection {
    #[error("{metric_type} expects a {expected:?} value")]
    ShapeMismatch {
        metric_type: MetricType,
        expected: ValueShape,
    },

    #[error("{field} is not a finite number")]
    NonFinite { field: &'static str },

    #[error("{field} {value} outside plausible range {min}-{max}")]
    OutOfBounds {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Systolic {systolic} must be greater than diastolic {diastolic}")]
    InvertedPressure { systolic: f64, diastolic: f64 },

    #[error("Lipid panel carries no values")]
    EmptyPanel,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RejectedCandidate {
    pub candidate: MetricCandidate,
    pub reason: Rejection,
}

/// Outcome of validating a batch: accepted records plus what was dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    pub accepted: Vec<HealthMetricRecord>,
    pub rejected: Vec<RejectedCandidate>,
}

/// Accepted records only. Implausible candidates are dropped without error.
pub fn validate_health_data(
    candidates: Vec<MetricCandidate>,
    ids: &dyn IdSource,
    clock: &dyn Clock,
) -> Vec<HealthMetricRecord> {
    validate_with_report(candidates, ids, clock).accepted
}

/// Like [`validate_health_data`] but keeps the rejected candidates and reasons.
pub fn validate_with_report(
    candidates: Vec<MetricCandidate>,
    ids: &dyn IdSource,
    clock: &dyn Clock,
) -> ValidationReport {
    let mut report = ValidationReport::default();

    for candidate in candidates {
        match check_candidate(&candidate) {
            Ok(()) => {
                let record = HealthMetricRecord::from_candidate(candidate, ids.next_id(), clock.now());
                report.accepted.push(record);
            }
            Err(reason) => {
                tracing::debug!(
                    metric_type = %candidate.metric_type,
                    reason = %reason,
                    "Candidate dropped by validator"
                );
                report.rejected.push(RejectedCandidate { candidate, reason });
            }
        }
    }

    report
}

/// Bounds and shape check for one candidate.
pub fn check_candidate(candidate: &MetricCandidate) -> Result<(), Rejection> {
    let metric_type = candidate.metric_type;
    let expected = registry::info(metric_type).shape;
    if candidate.value.shape() != expected {
        return Err(Rejection::ShapeMismatch {
            metric_type,
            expected,
        });
    }

    match candidate.value {
        MetricValue::Scalar { value } => {
            finite("value", value)?;
            match plausible_range(metric_type) {
                Some(range) => within("value", value, (range.min, range.max)),
                None => Ok(()),
            }
        }
        MetricValue::BloodPressure {
            systolic,
            diastolic,
        } => {
            within("systolic", systolic, SYSTOLIC)?;
            within("diastolic", diastolic, DIASTOLIC)?;
            if systolic <= diastolic {
                return Err(Rejection::InvertedPressure {
                    systolic,
                    diastolic,
                });
            }
            Ok(())
        }
        MetricValue::LipidPanel { total, hdl, ldl } => {
            if total.is_none() && hdl.is_none() && ldl.is_none() {
                return Err(Rejection::EmptyPanel);
            }
            if let Some(v) = total {
                within("total", v, LIPID_TOTAL)?;
            }
            if let Some(v) = hdl {
                within("hdl", v, LIPID_HDL)?;
            }
            if let Some(v) = ldl {
                within("ldl", v, LIPID_LDL)?;
            }
            Ok(())
        }
    }
}

fn finite(field: &'static str, value: f64) -> Result<(), Rejection> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(Rejection::NonFinite { field })
    }
}

fn within(field: &'static str, value: f64, (min, max): (f64, f64)) -> Result<(), Rejection> {
    finite(field, value)?;
    if value < min || value > max {
        return Err(Rejection::OutOfBounds {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}

// ═══════════════════════════════════════════
// Manual entry
// ═══════════════════════════════════════════

/// Raw form input for a manually logged metric. Every field arrives as text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualEntry {
    #[serde(rename = "type")]
    pub metric_type: Option<String>,
    pub date: Option<String>,
    pub value: Option<String>,
    pub systolic: Option<String>,
    pub diastolic: Option<String>,
    pub total: Option<String>,
    pub hdl: Option<String>,
    pub ldl: Option<String>,
    pub notes: Option<String>,
}

/// Field name → human-readable message. Empty means valid.
#[derive(Error, Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
#[error("{} invalid field(s)", .0.len())]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn insert(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Form bounds, wider or narrower than plausibility depending on the type.
struct FormBounds {
    label: &'static str,
    min: f64,
    max: f64,
}

const fn form(label: &'static str, min: f64, max: f64) -> FormBounds {
    FormBounds { label, min, max }
}

const FORM_SYSTOLIC: FormBounds = form("systolic pressure", 50.0, 300.0);
const FORM_DIASTOLIC: FormBounds = form("diastolic pressure", 30.0, 200.0);
const FORM_LIPID_TOTAL: FormBounds = form("total cholesterol", 50.0, 500.0);

fn form_bounds(metric_type: MetricType) -> Option<FormBounds> {
    use MetricType::*;
    let bounds = match metric_type {
        Glucose | FastingGlucose | RandomGlucose | BloodSugar => form("blood sugar", 20.0, 800.0),
        TotalCholesterol => FORM_LIPID_TOTAL,
        Weight => form("weight", 10.0, 500.0),
        Height => form("height", 50.0, 250.0),
        HeartRate => form("heart rate", 30.0, 250.0),
        Temperature => form("temperature", 30.0, 45.0),
        Hemoglobin => form("hemoglobin", 5.0, 20.0),
        Wbc => form("WBC count", 1000.0, 50_000.0),
        Platelets => form("platelet count", 50_000.0, 1_000_000.0),
        Creatinine => form("creatinine", 0.3, 10.0),
        Urea => form("urea", 5.0, 200.0),
        Bmi => form("BMI", 10.0, 60.0),
        _ => return None,
    };
    Some(bounds)
}

/// Check a manual form and build a candidate from it.
pub fn validate_manual_entry(entry: &ManualEntry) -> Result<MetricCandidate, FieldErrors> {
    let mut errors = FieldErrors::default();

    let metric_type = match non_blank(&entry.metric_type) {
        None => {
            errors.insert("type", "Metric type is required");
            None
        }
        Some(raw) => match raw.parse::<MetricType>() {
            Ok(t) => Some(t),
            Err(_) => {
                errors.insert("type", "Invalid metric type");
                None
            }
        },
    };

    let date = match non_blank(&entry.date) {
        None => {
            errors.insert("date", "Date is required");
            None
        }
        Some(raw) => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Ok(d) => Some(d),
            Err(_) => {
                errors.insert("date", "Valid date (YYYY-MM-DD) is required");
                None
            }
        },
    };

    let value = metric_type.and_then(|t| manual_value(t, entry, &mut errors));

    match (metric_type, date, value) {
        (Some(metric_type), Some(date), Some(value)) if errors.is_empty() => Ok(MetricCandidate {
            metric_type,
            date,
            value,
            unit: registry::canonical_unit(metric_type).to_string(),
            notes: non_blank(&entry.notes).map(str::to_string),
            source: MetricSource::Manual,
        }),
        _ => Err(errors),
    }
}

/// Form check, then the same plausibility check extracted candidates get.
/// A plausibility failure is reported against the offending field.
pub fn accept_manual_entry(
    entry: &ManualEntry,
    ids: &dyn IdSource,
    clock: &dyn Clock,
) -> Result<HealthMetricRecord, FieldErrors> {
    let candidate = validate_manual_entry(entry)?;
    if let Err(reason) = check_candidate(&candidate) {
        let field = match &reason {
            Rejection::OutOfBounds { field, .. } | Rejection::NonFinite { field } => *field,
            Rejection::InvertedPressure { .. } => "diastolic",
            Rejection::EmptyPanel => "total",
            Rejection::ShapeMismatch { .. } => "type",
        };
        let mut errors = FieldErrors::default();
        errors.insert(field, reason.to_string());
        return Err(errors);
    }
    Ok(HealthMetricRecord::from_candidate(candidate, ids.next_id(), clock.now()))
}

fn manual_value(
    metric_type: MetricType,
    entry: &ManualEntry,
    errors: &mut FieldErrors,
) -> Option<MetricValue> {
    match registry::info(metric_type).shape {
        ValueShape::BloodPressure => {
            let systolic = required_number("systolic", &entry.systolic, &FORM_SYSTOLIC, "mmHg", errors);
            let diastolic = required_number("diastolic", &entry.diastolic, &FORM_DIASTOLIC, "mmHg", errors);
            let (systolic, diastolic) = (systolic?, diastolic?);
            if systolic <= diastolic {
                errors.insert("diastolic", "Diastolic pressure must be lower than systolic");
                return None;
            }
            Some(MetricValue::blood_pressure(systolic, diastolic))
        }
        ValueShape::LipidPanel => {
            let total = optional_number("total", &entry.total, Some(&FORM_LIPID_TOTAL), errors);
            let hdl = optional_number("hdl", &entry.hdl, None, errors);
            let ldl = optional_number("ldl", &entry.ldl, None, errors);
            if !errors.is_empty() {
                return None;
            }
            if total.is_none() && hdl.is_none() && ldl.is_none() {
                errors.insert("total", "At least one cholesterol value is required");
                return None;
            }
            Some(MetricValue::LipidPanel { total, hdl, ldl })
        }
        ValueShape::Scalar => {
            let unit = registry::canonical_unit(metric_type);
            let value = match form_bounds(metric_type) {
                Some(bounds) => required_number("value", &entry.value, &bounds, unit, errors)?,
                None => {
                    let Some(value) = non_blank(&entry.value).and_then(parse_finite) else {
                        errors.insert("value", "Valid value is required");
                        return None;
                    };
                    value
                }
            };
            Some(MetricValue::scalar(value))
        }
    }
}

fn required_number(
    field: &str,
    raw: &Option<String>,
    bounds: &FormBounds,
    unit: &str,
    errors: &mut FieldErrors,
) -> Option<f64> {
    let parsed = non_blank(raw)
        .and_then(parse_finite)
        .filter(|v| *v >= bounds.min && *v <= bounds.max);
    if parsed.is_none() {
        errors.insert(field, bounds_message(bounds, unit));
    }
    parsed
}

fn optional_number(
    field: &str,
    raw: &Option<String>,
    bounds: Option<&FormBounds>,
    errors: &mut FieldErrors,
) -> Option<f64> {
    let raw = non_blank(raw)?;
    let parsed = parse_finite(raw).filter(|v| bounds.map_or(true, |b| *v >= b.min && *v <= b.max));
    if parsed.is_none() {
        let message = match bounds {
            Some(b) => bounds_message(b, "mg/dL"),
            None => format!("Valid {field} value is required"),
        };
        errors.insert(field, message);
    }
    parsed
}

fn bounds_message(bounds: &FormBounds, unit: &str) -> String {
    format!(
        "Valid {} ({}-{} {unit}) is required",
        bounds.label, bounds.min, bounds.max
    )
}

fn non_blank(raw: &Option<String>) -> Option<&str> {
    raw.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn parse_finite(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{FixedClock, SequentialIds};

    fn make_candidate(metric_type: MetricType, value: MetricValue) -> MetricCandidate {
        MetricCandidate {
            metric_type,
            date: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            value,
            unit: registry::canonical_unit(metric_type).to_string(),
            notes: Some("Extracted from lab.pdf".into()),
            source: MetricSource::PdfExtraction,
        }
    }

    fn make_scalar(metric_type: MetricType, value: f64) -> MetricCandidate {
        make_candidate(metric_type, MetricValue::scalar(value))
    }

    fn make_entry(metric_type: &str, date: &str, value: &str) -> ManualEntry {
        ManualEntry {
            metric_type: Some(metric_type.into()),
            date: Some(date.into()),
            value: Some(value.into()),
            ..Default::default()
        }
    }

    fn validate(candidates: Vec<MetricCandidate>) -> ValidationReport {
        let ids = SequentialIds::new("m");
        let clock = FixedClock::on(2026, 2, 2).unwrap();
        validate_with_report(candidates, &ids, &clock)
    }

    #[test]
    fn every_scalar_type_has_plausibility_bounds() {
        for t in MetricType::ALL {
            if registry::info(*t).shape == ValueShape::Scalar {
                assert!(plausible_range(*t).is_some(), "{t} has no plausibility bounds");
            }
        }
    }

    #[test]
    fn in_bounds_candidate_is_preserved_with_new_identity() {
        let candidate = make_scalar(MetricType::Tsh, 2.1);
        let report = validate(vec![candidate.clone()]);
        assert!(report.rejected.is_empty());
        let record = &report.accepted[0];
        assert_eq!(record.id, "m-1");
        assert_eq!(record.to_candidate(), candidate);
        assert_eq!(record.created_at, FixedClock::on(2026, 2, 2).unwrap().0);
    }

    #[test]
    fn hba1c_above_bound_is_dropped() {
        let report = validate(vec![make_scalar(MetricType::Hba1c, 25.0)]);
        assert!(report.accepted.is_empty());
        assert!(matches!(
            report.rejected[0].reason,
            Rejection::OutOfBounds { field: "value", .. }
        ));
    }

    #[test]
    fn cholesterol_upper_bound_is_inclusive() {
        let report = validate(vec![
            make_scalar(MetricType::TotalCholesterol, 500.0),
            make_scalar(MetricType::TotalCholesterol, 500.01),
        ]);
        assert_eq!(report.accepted.len(), 1);
        assert_eq!(report.accepted[0].value, MetricValue::scalar(500.0));
        assert_eq!(report.rejected.len(), 1);
    }

    #[test]
    fn ids_are_unique_within_a_batch() {
        let report = validate(vec![
            make_scalar(MetricType::Tsh, 2.0),
            make_scalar(MetricType::VitaminD, 32.0),
            make_scalar(MetricType::Bmi, 22.0),
        ]);
        let ids: Vec<_> = report.accepted.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["m-1", "m-2", "m-3"]);
    }

    #[test]
    fn blood_pressure_checks() {
        let ok = make_candidate(MetricType::BloodPressure, MetricValue::blood_pressure(125.0, 82.0));
        let inverted = make_candidate(MetricType::BloodPressure, MetricValue::blood_pressure(90.0, 95.0));
        let report = validate(vec![ok, inverted]);
        assert_eq!(report.accepted.len(), 1);
        assert!(matches!(report.rejected[0].reason, Rejection::InvertedPressure { .. }));
    }

    #[test]
    fn shape_mismatch_is_rejected() {
        let wrong = make_candidate(MetricType::Tsh, MetricValue::blood_pressure(120.0, 80.0));
        assert_eq!(
            check_candidate(&wrong),
            Err(Rejection::ShapeMismatch {
                metric_type: MetricType::Tsh,
                expected: ValueShape::Scalar,
            })
        );
    }

    #[test]
    fn non_finite_scalar_is_rejected() {
        assert_eq!(
            check_candidate(&make_scalar(MetricType::Weight, f64::NAN)),
            Err(Rejection::NonFinite { field: "value" })
        );
    }

    #[test]
    fn lipid_panel_needs_a_value() {
        let empty = make_candidate(
            MetricType::Cholesterol,
            MetricValue::LipidPanel {
                total: None,
                hdl: None,
                ldl: None,
            },
        );
        assert_eq!(check_candidate(&empty), Err(Rejection::EmptyPanel));

        let partial = make_candidate(
            MetricType::Cholesterol,
            MetricValue::LipidPanel {
                total: Some(190.0),
                hdl: None,
                ldl: Some(120.0),
            },
        );
        assert_eq!(check_candidate(&partial), Ok(()));
    }

    #[test]
    fn validate_health_data_returns_only_accepted() {
        let ids = SequentialIds::new("r");
        let clock = FixedClock::on(2026, 2, 2).unwrap();
        let records = validate_health_data(
            vec![make_scalar(MetricType::Hba1c, 25.0), make_scalar(MetricType::Hba1c, 5.4)],
            &ids,
            &clock,
        );
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].value, MetricValue::scalar(5.4));
    }

    #[test]
    fn manual_entry_requires_type_and_date() {
        let errors = validate_manual_entry(&ManualEntry::default()).unwrap_err();
        assert_eq!(errors.get("type"), Some("Metric type is required"));
        assert_eq!(errors.get("date"), Some("Date is required"));
    }

    #[test]
    fn manual_entry_rejects_unknown_type() {
        let errors = validate_manual_entry(&make_entry("serumIron", "2026-01-10", "80")).unwrap_err();
        assert_eq!(errors.get("type"), Some("Invalid metric type"));
    }

    #[test]
    fn manual_entry_form_bounds_message() {
        let errors = validate_manual_entry(&make_entry("glucose", "2026-01-10", "900")).unwrap_err();
        assert_eq!(errors.get("value"), Some("Valid blood sugar (20-800 mg/dL) is required"));

        let errors = validate_manual_entry(&make_entry("creatinine", "2026-01-10", "abc")).unwrap_err();
        assert_eq!(errors.get("value"), Some("Valid creatinine (0.3-10 mg/dL) is required"));
    }

    #[test]
    fn manual_entry_builds_candidate() {
        let mut entry = make_entry("weight", "2026-01-10", " 72.5 ");
        entry.notes = Some("  after breakfast ".into());
        let candidate = validate_manual_entry(&entry).unwrap();
        assert_eq!(candidate.metric_type, MetricType::Weight);
        assert_eq!(candidate.value, MetricValue::scalar(72.5));
        assert_eq!(candidate.unit, "kg");
        assert_eq!(candidate.source, MetricSource::Manual);
        assert_eq!(candidate.notes.as_deref(), Some("after breakfast"));
    }

    #[test]
    fn manual_blood_pressure() {
        let entry = ManualEntry {
            metric_type: Some("bloodPressure".into()),
            date: Some("2026-01-10".into()),
            systolic: Some("118".into()),
            diastolic: Some("400".into()),
            ..Default::default()
        };
        let errors = validate_manual_entry(&entry).unwrap_err();
        assert_eq!(errors.get("diastolic"), Some("Valid diastolic pressure (30-200 mmHg) is required"));
        assert!(errors.get("systolic").is_none());

        let entry = ManualEntry {
            diastolic: Some("76".into()),
            ..entry
        };
        assert_eq!(
            validate_manual_entry(&entry).unwrap().value,
            MetricValue::blood_pressure(118.0, 76.0)
        );
    }

    #[test]
    fn manual_lipid_panel_needs_one_value() {
        let entry = ManualEntry {
            metric_type: Some("cholesterol".into()),
            date: Some("2026-01-10".into()),
            ..Default::default()
        };
        let errors = validate_manual_entry(&entry).unwrap_err();
        assert_eq!(errors.get("total"), Some("At least one cholesterol value is required"));
    }

    #[test]
    fn accepted_manual_entry_still_passes_plausibility() {
        let ids = SequentialIds::new("m");
        let clock = FixedClock::on(2026, 2, 2).unwrap();

        // Within the form range (20-800) but beyond the plausibility bound (500).
        let errors = accept_manual_entry(&make_entry("glucose", "2026-01-10", "650"), &ids, &clock).unwrap_err();
        assert!(errors.get("value").is_some());

        let record = accept_manual_entry(&make_entry("glucose", "2026-01-10", "98"), &ids, &clock).unwrap();
        assert_eq!(record.id, "m-1");
        assert_eq!(record.source, MetricSource::Manual);
    }

    #[test]
    fn field_errors_serialize_as_flat_map() {
        let mut errors = FieldErrors::default();
        errors.insert("date", "Date is required");
        assert_eq!(
            serde_json::to_string(&errors).unwrap(),
            r#"{"date":"Date is required"}"#
        );
    }
}
