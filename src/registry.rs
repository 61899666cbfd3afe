//! Metric type registry: display names, canonical units and payload shape
//! for every supported health parameter.

use std::str::FromStr;

use crate::models::{MetricType, ValueShape};

/// Static description of one metric type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricInfo {
    pub display_name: &'static str,
    pub unit: &'static str,
    pub shape: ValueShape,
}

const fn scalar(display_name: &'static str, unit: &'static str) -> MetricInfo {
    MetricInfo {
        display_name,
        unit,
        shape: ValueShape::Scalar,
    }
}

/// Look up the registry entry for a metric type.
pub fn info(metric_type: MetricType) -> MetricInfo {
    use MetricType::*;
    match metric_type {
        Glucose => scalar("Glucose", "mg/dL"),
        FastingGlucose => scalar("Fasting Glucose", "mg/dL"),
        RandomGlucose => scalar("Random Glucose", "mg/dL"),
        Hba1c => scalar("HbA1c", "%"),
        TotalCholesterol => scalar("Total Cholesterol", "mg/dL"),
        HdlCholesterol => scalar("HDL Cholesterol", "mg/dL"),
        LdlCholesterol => scalar("LDL Cholesterol", "mg/dL"),
        VldlCholesterol => scalar("VLDL Cholesterol", "mg/dL"),
        Triglycerides => scalar("Triglycerides", "mg/dL"),
        Tsh => scalar("TSH", "mIU/L"),
        T3 => scalar("T3", "ng/mL"),
        FreeT3 => scalar("Free T3", "pg/mL"),
        T4 => scalar("T4", "μg/dL"),
        FreeT4 => scalar("Free T4", "ng/dL"),
        VitaminD => scalar("Vitamin D", "ng/mL"),
        VitaminB12 => scalar("Vitamin B12", "pg/mL"),
        Hemoglobin => scalar("Hemoglobin", "g/dL"),
        Wbc => scalar("White Blood Cells", "/μL"),
        Platelets => scalar("Platelets", "/μL"),
        Creatinine => scalar("Creatinine", "mg/dL"),
        Urea => scalar("Urea", "mg/dL"),
        BloodPressure => MetricInfo {
            display_name: "Blood Pressure",
            unit: "mmHg",
            shape: ValueShape::BloodPressure,
        },
        Weight => scalar("Weight", "kg"),
        Height => scalar("Height", "cm"),
        HeartRate => scalar("Heart Rate", "bpm"),
        Temperature => scalar("Temperature", "°C"),
        Bmi => scalar("BMI", "kg/m²"),
        BloodSugar => scalar("Blood Sugar", "mg/dL"),
        Cholesterol => MetricInfo {
            display_name: "Cholesterol",
            unit: "mg/dL",
            shape: ValueShape::LipidPanel,
        },
    }
}

pub fn display_name(metric_type: MetricType) -> &'static str {
    info(metric_type).display_name
}

pub fn canonical_unit(metric_type: MetricType) -> &'static str {
    info(metric_type).unit
}

/// Display name for a raw type tag. Unknown tags get a title-cased label
/// (`"serumIron"` → `"Serum Iron"`) instead of an error.
pub fn display_name_for_tag(tag: &str) -> String {
    match MetricType::from_str(tag) {
        Ok(t) => display_name(t).to_string(),
        Err(_) => title_case(tag),
    }
}

fn title_case(tag: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();

    for ch in tag.chars() {
        if ch == '_' || ch == '-' || ch.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if ch.is_uppercase() && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        current.push(ch);
    }
    if !current.is_empty() {
        words.push(current);
    }

    words
        .iter()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
