//! Dashboard summary, BMI and rule-based insights over the record set.
//!
//! Pure functions of the records plus "today"; nothing here mutates state.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::models::{BmiCategory, HealthMetricRecord, InsightLevel, MetricType, MetricValue};
use crate::registry;

const BLOOD_SUGAR_TYPES: &[MetricType] = &[
    MetricType::BloodSugar,
    MetricType::Glucose,
    MetricType::FastingGlucose,
    MetricType::RandomGlucose,
];
const CHOLESTEROL_TYPES: &[MetricType] = &[MetricType::Cholesterol, MetricType::TotalCholesterol];

/// Records with at least this many entries in the last week earn a tracking note.
const ACTIVE_TRACKING_THRESHOLD: usize = 3;
const TRACKING_WINDOW_DAYS: i64 = 7;

// ═══════════════════════════════════════════
// Summary
// ═══════════════════════════════════════════

/// Most recent record (by measurement date) among the given types.
/// On equal dates the later-inserted record wins.
pub fn latest_of<'a>(
    metrics: &'a [HealthMetricRecord],
    types: &[MetricType],
) -> Option<&'a HealthMetricRecord> {
    metrics
        .iter()
        .filter(|m| types.contains(&m.metric_type))
        .max_by_key(|m| m.date)
}

/// kg / m², one decimal. None for missing or non-positive inputs.
pub fn calculate_bmi(height_cm: f64, weight_kg: f64) -> Option<f64> {
    if !(height_cm.is_finite() && weight_kg.is_finite()) || height_cm <= 0.0 || weight_kg <= 0.0 {
        return None;
    }
    let height_m = height_cm / 100.0;
    Some((weight_kg / (height_m * height_m) * 10.0).round() / 10.0)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthSummary {
    pub total_reports: usize,
    /// (systolic, diastolic)
    pub latest_blood_pressure: Option<(f64, f64)>,
    pub latest_blood_sugar: Option<f64>,
    pub latest_cholesterol: Option<f64>,
    pub latest_height: Option<f64>,
    pub latest_weight: Option<f64>,
    pub current_bmi: Option<f64>,
    pub bmi_category: Option<BmiCategory>,
}

pub fn summarize(metrics: &[HealthMetricRecord], total_reports: usize) -> HealthSummary {
    let latest_blood_pressure =
        latest_of(metrics, &[MetricType::BloodPressure]).and_then(|r| match r.value {
            MetricValue::BloodPressure {
                systolic,
                diastolic,
            } => Some((systolic, diastolic)),
            _ => None,
        });
    let latest_blood_sugar = latest_of(metrics, BLOOD_SUGAR_TYPES).and_then(|r| r.value.as_scalar());
    let latest_cholesterol = latest_of(metrics, CHOLESTEROL_TYPES).and_then(|r| match r.value {
        MetricValue::Scalar { value } => Some(value),
        MetricValue::LipidPanel { total, .. } => total,
        MetricValue::BloodPressure { .. } => None,
    });
    let latest_height = latest_of(metrics, &[MetricType::Height]).and_then(|r| r.value.as_scalar());
    let latest_weight = latest_of(metrics, &[MetricType::Weight]).and_then(|r| r.value.as_scalar());

    let current_bmi = match (latest_height, latest_weight) {
        (Some(h), Some(w)) => calculate_bmi(h, w),
        _ => None,
    };

    HealthSummary {
        total_reports,
        latest_blood_pressure,
        latest_blood_sugar,
        latest_cholesterol,
        latest_height,
        latest_weight,
        current_bmi,
        bmi_category: current_bmi.map(BmiCategory::from_bmi),
    }
}

// ═══════════════════════════════════════════
// Insights
// ═══════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insight {
    pub level: InsightLevel,
    pub title: String,
    pub message: String,
}

impl Insight {
    fn new(level: InsightLevel, title: &str, message: String) -> Self {
        Self {
            level,
            title: title.to_string(),
            message,
        }
    }
}

pub fn generate_insights(
    metrics: &[HealthMetricRecord],
    summary: &HealthSummary,
    today: NaiveDate,
) -> Vec<Insight> {
    let mut insights = Vec::new();

    if let (Some(bmi), Some(category)) = (summary.current_bmi, summary.bmi_category) {
        insights.push(bmi_insight(bmi, category));
    }

    if let Some((systolic, diastolic)) = summary.latest_blood_pressure {
        let reading = format!("{systolic}/{diastolic}");
        let insight = if systolic >= 140.0 || diastolic >= 90.0 {
            Insight::new(
                InsightLevel::Alert,
                "Blood Pressure",
                format!("Your blood pressure ({reading}) is elevated. Please consult your doctor."),
            )
        } else if systolic >= 120.0 || diastolic >= 80.0 {
            Insight::new(
                InsightLevel::Warning,
                "Blood Pressure",
                format!("Your blood pressure ({reading}) is in the elevated range."),
            )
        } else {
            Insight::new(
                InsightLevel::Success,
                "Blood Pressure",
                format!("Your blood pressure ({reading}) is in the normal range."),
            )
        };
        insights.push(insight);
    }

    if let Some(glucose) = summary.latest_blood_sugar {
        let insight = if glucose >= 126.0 {
            Some((InsightLevel::Alert, format!("Your glucose level ({glucose} mg/dL) is high. Please consult your doctor.")))
        } else if glucose >= 100.0 {
            Some((InsightLevel::Warning, format!("Your glucose level ({glucose} mg/dL) is elevated.")))
        } else if glucose >= 70.0 {
            Some((InsightLevel::Success, format!("Your glucose level ({glucose} mg/dL) is in the normal range.")))
        } else {
            None
        };
        if let Some((level, message)) = insight {
            insights.push(Insight::new(level, "Blood Sugar", message));
        }
    }

    if !metrics.is_empty() {
        let week_ago = today - Duration::days(TRACKING_WINDOW_DAYS);
        let recent = metrics.iter().filter(|m| m.date >= week_ago).count();
        if recent >= ACTIVE_TRACKING_THRESHOLD {
            insights.push(Insight::new(
                InsightLevel::Success,
                "Health Tracking",
                format!("Great job! You've logged {recent} health measurements this week."),
            ));
        } else if recent == 0 {
            insights.push(Insight::new(
                InsightLevel::Info,
                "Health Tracking",
                "No recent measurements logged. Consider tracking your health metrics regularly.".to_string(),
            ));
        }
    }

    insights
}

fn bmi_insight(bmi: f64, category: BmiCategory) -> Insight {
    let (level, message) = match category {
        BmiCategory::NormalWeight => (
            InsightLevel::Success,
            format!("Your BMI of {bmi:.1} indicates a healthy weight range."),
        ),
        BmiCategory::Overweight => (
            InsightLevel::Warning,
            format!("Your BMI of {bmi:.1} indicates overweight. Consider consulting with a healthcare provider."),
        ),
        BmiCategory::Underweight => (
            InsightLevel::Warning,
            format!("Your BMI of {bmi:.1} indicates underweight. Consider consulting with a healthcare provider."),
        ),
        BmiCategory::Obese => (
            InsightLevel::Alert,
            format!("Your BMI of {bmi:.1} indicates obesity. Please consult with a healthcare provider."),
        ),
    };
    Insight::new(level, "BMI Status", message)
}

// ═══════════════════════════════════════════
// Display helpers
// ═══════════════════════════════════════════

/// Human-readable value with unit: "120/80", "92 mg/dL", "36.6°C", "7,500 /μL".
pub fn format_value(record: &HealthMetricRecord) -> String {
    let unit = if record.unit.is_empty() {
        registry::canonical_unit(record.metric_type)
    } else {
        record.unit.as_str()
    };

    match (&record.value, record.metric_type) {
        (MetricValue::BloodPressure { systolic, diastolic }, _) => format!("{systolic}/{diastolic}"),
        (MetricValue::LipidPanel { total, hdl, ldl }, _) => match total {
            Some(total) => format!("{total} {unit}"),
            None => {
                let parts: Vec<String> = [("HDL", hdl), ("LDL", ldl)]
                    .into_iter()
                    .filter_map(|(label, v)| v.map(|v| format!("{label} {v}")))
                    .collect();
                format!("{} {unit}", parts.join(" / "))
            }
        },
        (MetricValue::Scalar { value }, MetricType::Wbc | MetricType::Platelets) => {
            format!("{} {unit}", group_thousands(*value))
        }
        (MetricValue::Scalar { value }, MetricType::Temperature) => format!("{value}{unit}"),
        (MetricValue::Scalar { value }, MetricType::Bmi) => value.to_string(),
        (MetricValue::Scalar { value }, _) => format!("{value} {unit}"),
    }
}

fn group_thousands(value: f64) -> String {
    if !value.is_finite() || value.fract() != 0.0 || value.abs() >= 1e15 {
        return value.to_string();
    }
    let digits = (value.abs() as u64).to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value < 0.0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// "Jan 5, 2026"
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// "Today", "Yesterday", "3 days ago", "2 weeks ago", else the formatted date.
pub fn relative_time(date: NaiveDate, today: NaiveDate) -> String {
    let days = (today - date).num_days().abs();
    match days {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        2..=7 => format!("{days} days ago"),
        8..=30 => format!("{} weeks ago", (days + 6) / 7),
        _ => format_date(date),
    }
}
