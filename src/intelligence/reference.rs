//! Clinical reference ranges used for status display.
//!
//! These are NOT acceptance bounds: a glucose of 280 mg/dL is stored and
//! flagged High. Extraction noise is rejected by the much wider plausibility
//! bounds in the pattern catalog and validator.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::Serialize;

use crate::models::MetricType;

/// Closed interval for one sub-value of a composite reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Normal range for a single-valued metric.
///
/// When `higher_is_better` is set there is no upper bound (`max` is `None`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    pub min: f64,
    pub max: Option<f64>,
    pub unit: &'static str,
    pub higher_is_better: bool,
    pub fasting_required: bool,
}

impl ValueRange {
    const fn between(min: f64, max: f64, unit: &'static str) -> Self {
        Self {
            min,
            max: Some(max),
            unit,
            higher_is_better: false,
            fasting_required: false,
        }
    }

    const fn at_least(min: f64, unit: &'static str) -> Self {
        Self {
            min,
            max: None,
            unit,
            higher_is_better: true,
            fasting_required: false,
        }
    }

    const fn fasting(self) -> Self {
        Self {
            fasting_required: true,
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReferenceRange {
    Value(ValueRange),
    BloodPressure { systolic: Bounds, diastolic: Bounds },
}

static REFERENCE_RANGES: LazyLock<HashMap<MetricType, ReferenceRange>> = LazyLock::new(|| {
    use MetricType::*;
    use ReferenceRange::Value;

    HashMap::from([
        (Glucose, Value(ValueRange::between(70.0, 100.0, "mg/dL"))),
        (FastingGlucose, Value(ValueRange::between(70.0, 100.0, "mg/dL").fasting())),
        (RandomGlucose, Value(ValueRange::between(70.0, 140.0, "mg/dL"))),
        (BloodSugar, Value(ValueRange::between(70.0, 100.0, "mg/dL"))),
        (Hba1c, Value(ValueRange::between(4.0, 5.6, "%"))),
        (TotalCholesterol, Value(ValueRange::between(0.0, 200.0, "mg/dL"))),
        (Cholesterol, Value(ValueRange::between(0.0, 200.0, "mg/dL"))),
        (HdlCholesterol, Value(ValueRange::at_least(40.0, "mg/dL"))),
        (LdlCholesterol, Value(ValueRange::between(0.0, 100.0, "mg/dL"))),
        (VldlCholesterol, Value(ValueRange::between(5.0, 30.0, "mg/dL"))),
        (Triglycerides, Value(ValueRange::between(0.0, 150.0, "mg/dL").fasting())),
        (Tsh, Value(ValueRange::between(0.27, 4.2, "mIU/L"))),
        (T3, Value(ValueRange::between(0.8, 2.0, "ng/mL"))),
        (FreeT3, Value(ValueRange::between(2.3, 4.2, "pg/mL"))),
        (T4, Value(ValueRange::between(4.5, 12.0, "μg/dL"))),
        (FreeT4, Value(ValueRange::between(0.8, 1.8, "ng/dL"))),
        (VitaminD, Value(ValueRange::between(30.0, 100.0, "ng/mL"))),
        (VitaminB12, Value(ValueRange::between(300.0, 900.0, "pg/mL"))),
        (Hemoglobin, Value(ValueRange::between(12.0, 15.5, "g/dL"))),
        (Wbc, Value(ValueRange::between(4000.0, 11000.0, "/μL"))),
        (Platelets, Value(ValueRange::between(150_000.0, 450_000.0, "/μL"))),
        (Creatinine, Value(ValueRange::between(0.6, 1.3, "mg/dL"))),
        (Urea, Value(ValueRange::between(7.0, 20.0, "mg/dL"))),
        (HeartRate, Value(ValueRange::between(60.0, 100.0, "bpm"))),
        (Temperature, Value(ValueRange::between(36.1, 37.2, "°C"))),
        (Bmi, Value(ValueRange::between(18.5, 24.9, "kg/m²"))),
        (
            BloodPressure,
            ReferenceRange::BloodPressure {
                systolic: Bounds::new(90.0, 120.0),
                diastolic: Bounds::new(60.0, 80.0),
            },
        ),
    ])
});

/// Reference range for a metric type, if one is defined.
/// Weight and height have none: their normality depends on the person.
pub fn lookup(metric_type: MetricType) -> Option<&'static ReferenceRange> {
    REFERENCE_RANGES.get(&metric_type)
}
