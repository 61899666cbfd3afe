//! Export of the record set as CSV, a JSON envelope or a plain-text report.
//!
//! Records are first narrowed by type and date range; an export with
//! nothing left is refused rather than written empty.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;
use thiserror::Error;

use super::insights::{format_date, format_value};
use crate::models::{ExportFormat, HealthMetricRecord, MetricType, MetricValue, UploadedReport};

const CSV_HEADER: [&str; 10] = [
    "Date",
    "Type",
    "Value",
    "Unit",
    "Systolic",
    "Diastolic",
    "Total Cholesterol",
    "HDL",
    "LDL",
    "Notes",
];

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("No data to export with current filters")]
    NoData,

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Which measurement dates an export covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportRange {
    All,
    Last7Days,
    Last30Days,
    Last90Days,
    LastYear,
    /// Inclusive on both ends.
    Custom { start: NaiveDate, end: NaiveDate },
}

impl ExportRange {
    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Last7Days => "7days",
            Self::Last30Days => "30days",
            Self::Last90Days => "90days",
            Self::LastYear => "1year",
            Self::Custom { .. } => "custom",
        }
    }

    fn trailing_days(&self) -> Option<i64> {
        match self {
            Self::Last7Days => Some(7),
            Self::Last30Days => Some(30),
            Self::Last90Days => Some(90),
            Self::LastYear => Some(365),
            Self::All | Self::Custom { .. } => None,
        }
    }

    /// Trailing ranges start after `today - N` and have no upper bound.
    pub fn contains(&self, date: NaiveDate, today: NaiveDate) -> bool {
        match *self {
            Self::All => true,
            Self::Custom { start, end } => date >= start && date <= end,
            _ => self
                .trailing_days()
                .is_some_and(|days| date > today - Duration::days(days)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub types: Vec<MetricType>,
    pub range: ExportRange,
    /// JSON only: append upload bookkeeping.
    pub include_reports: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            types: MetricType::ALL.to_vec(),
            range: ExportRange::All,
            include_reports: false,
        }
    }
}

/// A rendered export, ready to be written or downloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: String,
    pub mime_type: &'static str,
    pub content: String,
}

/// Records whose type is selected and whose date falls in `range`,
/// in collection order.
pub fn filter_metrics<'a>(
    metrics: &'a [HealthMetricRecord],
    types: &[MetricType],
    range: ExportRange,
    today: NaiveDate,
) -> Vec<&'a HealthMetricRecord> {
    metrics
        .iter()
        .filter(|m| types.contains(&m.metric_type) && range.contains(m.date, today))
        .collect()
}

pub fn export(
    metrics: &[HealthMetricRecord],
    reports: &[UploadedReport],
    options: &ExportOptions,
    now: DateTime<Utc>,
) -> Result<ExportFile, ExportError> {
    let records = filter_metrics(metrics, &options.types, options.range, now.date_naive());
    if records.is_empty() {
        return Err(ExportError::NoData);
    }

    let stamp = now.timestamp_millis();
    let file = match options.format {
        ExportFormat::Csv => ExportFile {
            file_name: format!("health-data-{stamp}.csv"),
            mime_type: "text/csv",
            content: to_csv(&records),
        },
        ExportFormat::Json => {
            let reports = options.include_reports.then_some(reports);
            ExportFile {
                file_name: format!("health-data-{stamp}.json"),
                mime_type: "application/json",
                content: to_json(&records, reports, options.range, now)?,
            }
        }
        ExportFormat::Text => ExportFile {
            file_name: format!("health-report-{stamp}.txt"),
            mime_type: "text/plain",
            content: to_text_report(&records, now.date_naive()),
        },
    };

    tracing::info!(
        format = %options.format,
        range = options.range.label(),
        records = records.len(),
        "Health data exported"
    );
    Ok(file)
}

// ═══════════════════════════════════════════
// CSV
// ═══════════════════════════════════════════

fn quote(cell: &str) -> String {
    format!("\"{}\"", cell.replace('"', "\"\""))
}

fn number(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn csv_row(record: &HealthMetricRecord) -> [String; 10] {
    let (value, systolic, diastolic, total, hdl, ldl) = match record.value {
        MetricValue::Scalar { value } => (Some(value), None, None, None, None, None),
        MetricValue::BloodPressure {
            systolic,
            diastolic,
        } => (None, Some(systolic), Some(diastolic), None, None, None),
        MetricValue::LipidPanel { total, hdl, ldl } => (None, None, None, total, hdl, ldl),
    };

    [
        format_date(record.date),
        record.metric_type.to_string(),
        number(value),
        record.unit.clone(),
        number(systolic),
        number(diastolic),
        number(total),
        number(hdl),
        number(ldl),
        record.notes.clone().unwrap_or_default(),
    ]
}

/// Fixed header plus one row per record, every cell quoted.
/// Empty input gives an empty string.
pub fn to_csv(records: &[&HealthMetricRecord]) -> String {
    if records.is_empty() {
        return String::new();
    }

    let header = CSV_HEADER.iter().map(|h| quote(h)).collect::<Vec<_>>().join(",");
    let rows = records
        .iter()
        .map(|r| csv_row(r).iter().map(|c| quote(c)).collect::<Vec<_>>().join(","));

    std::iter::once(header).chain(rows).collect::<Vec<_>>().join("\n")
}

// ═══════════════════════════════════════════
// JSON
// ═══════════════════════════════════════════

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportEnvelope<'a> {
    export_date: DateTime<Utc>,
    total_records: usize,
    date_range: &'static str,
    health_metrics: &'a [&'a HealthMetricRecord],
    #[serde(skip_serializing_if = "Option::is_none")]
    reports: Option<Vec<ExportedReport<'a>>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportedReport<'a> {
    id: &'a str,
    file_name: &'a str,
    upload_date: DateTime<Utc>,
    file_size: u64,
    notes: &'a str,
}

/// Pretty-printed envelope. `reports` is written only when given and
/// non-empty.
pub fn to_json(
    records: &[&HealthMetricRecord],
    reports: Option<&[UploadedReport]>,
    range: ExportRange,
    now: DateTime<Utc>,
) -> Result<String, serde_json::Error> {
    let reports = reports.filter(|r| !r.is_empty()).map(|r| {
        r.iter()
            .map(|report| ExportedReport {
                id: &report.id,
                file_name: &report.file_name,
                upload_date: report.upload_date,
                file_size: report.file_size,
                notes: &report.notes,
            })
            .collect()
    });

    serde_json::to_string_pretty(&ExportEnvelope {
        export_date: now,
        total_records: records.len(),
        date_range: range.label(),
        health_metrics: records,
        reports,
    })
}

// ═══════════════════════════════════════════
// Plain text
// ═══════════════════════════════════════════

fn text_value(record: &HealthMetricRecord) -> String {
    match record.value {
        MetricValue::BloodPressure { .. } => format!("{} mmHg", format_value(record)),
        MetricValue::LipidPanel { total, hdl, ldl } => {
            let mut parts = Vec::new();
            if let Some(total) = total {
                parts.push(format!("Total: {total} {}", record.unit));
            }
            if let Some(hdl) = hdl {
                parts.push(format!("HDL: {hdl}"));
            }
            if let Some(ldl) = ldl {
                parts.push(format!("LDL: {ldl}"));
            }
            parts.join(", ")
        }
        MetricValue::Scalar { .. } => format_value(record),
    }
}

/// Readable report grouped by type, groups in order of first appearance.
pub fn to_text_report(records: &[&HealthMetricRecord], today: NaiveDate) -> String {
    let mut groups: Vec<(MetricType, Vec<&HealthMetricRecord>)> = Vec::new();
    for record in records {
        match groups.iter_mut().find(|(t, _)| *t == record.metric_type) {
            Some((_, members)) => members.push(record),
            None => groups.push((record.metric_type, vec![record])),
        }
    }

    let mut out = String::from("HEALTH TRACKER REPORT\n");
    out.push_str(&format!("Generated: {}\n", format_date(today)));
    out.push_str(&format!("Total Records: {}\n\n", records.len()));

    for (metric_type, members) in groups {
        let tag = metric_type.as_str();
        out.push_str(&format!("\n{}\n{}\n", tag.to_uppercase(), "=".repeat(tag.len())));
        for record in members {
            out.push_str(&format!("{}: {}", format_date(record.date), text_value(record)));
            if let Some(notes) = &record.notes {
                out.push_str(&format!(" ({notes})"));
            }
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::models::MetricSource;

    fn make_date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, month, day).unwrap()
    }

    fn make_record(metric_type: MetricType, value: MetricValue, date: NaiveDate) -> HealthMetricRecord {
        HealthMetricRecord {
            id: format!("{metric_type}-{date}"),
            metric_type,
            date,
            value,
            unit: crate::registry::canonical_unit(metric_type).to_string(),
            notes: None,
            source: MetricSource::Manual,
            created_at: Utc.with_ymd_and_hms(2026, 6, 1, 9, 0, 0).unwrap(),
        }
    }

    fn make_report() -> UploadedReport {
        UploadedReport {
            id: "r-1".into(),
            file_name: "lab.pdf".into(),
            file_size: 2048,
            file_type: "application/pdf".into(),
            upload_date: Utc.with_ymd_and_hms(2026, 6, 1, 9, 0, 0).unwrap(),
            notes: "Extracted 1 health metrics".into(),
            extracted_data_count: 1,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 30, 15, 0, 0).unwrap()
    }

    #[test]
    fn trailing_range_edges() {
        let today = make_date(6, 30);
        let range = ExportRange::Last7Days;
        assert!(!range.contains(make_date(6, 23), today));
        assert!(range.contains(make_date(6, 24), today));
        assert!(range.contains(make_date(6, 30), today));
        assert!(range.contains(make_date(7, 2), today));
        assert!(ExportRange::LastYear.contains(make_date(1, 1), today));
        assert!(!ExportRange::Last90Days.contains(make_date(4, 1), today));
    }

    #[test]
    fn custom_range_is_inclusive() {
        let today = make_date(6, 30);
        let range = ExportRange::Custom {
            start: make_date(6, 1),
            end: make_date(6, 10),
        };
        assert!(range.contains(make_date(6, 1), today));
        assert!(range.contains(make_date(6, 10), today));
        assert!(!range.contains(make_date(5, 31), today));
        assert!(!range.contains(make_date(6, 11), today));
    }

    #[test]
    fn filter_by_type_and_range() {
        let metrics = vec![
            make_record(MetricType::Weight, MetricValue::scalar(70.0), make_date(6, 29)),
            make_record(MetricType::HeartRate, MetricValue::scalar(72.0), make_date(6, 29)),
            make_record(MetricType::Weight, MetricValue::scalar(71.0), make_date(5, 1)),
        ];
        let found = filter_metrics(&metrics, &[MetricType::Weight], ExportRange::Last30Days, make_date(6, 30));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].value.as_scalar(), Some(70.0));
    }

    #[test]
    fn csv_header_and_quoting() {
        let mut glucose = make_record(MetricType::FastingGlucose, MetricValue::scalar(92.0), make_date(3, 9));
        glucose.notes = Some("after \"12h\" fast, AM".into());
        let bp = make_record(
            MetricType::BloodPressure,
            MetricValue::blood_pressure(125.0, 82.0),
            make_date(3, 10),
        );

        let csv = to_csv(&[&glucose, &bp]);
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(
            lines[0],
            r#""Date","Type","Value","Unit","Systolic","Diastolic","Total Cholesterol","HDL","LDL","Notes""#
        );
        assert_eq!(
            lines[1],
            r#""Mar 9, 2026","fastingGlucose","92","mg/dL","","","","","","after ""12h"" fast, AM""#
        );
        assert_eq!(lines[2], r#""Mar 10, 2026","bloodPressure","","mmHg","125","82","","","","""#);
    }

    #[test]
    fn csv_of_nothing_is_empty() {
        assert_eq!(to_csv(&[]), "");
    }

    #[test]
    fn json_envelope_fields() {
        let record = make_record(MetricType::Weight, MetricValue::scalar(70.5), make_date(6, 29));
        let json = to_json(&[&record], None, ExportRange::Last30Days, now()).unwrap();
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(v["totalRecords"], 1);
        assert_eq!(v["dateRange"], "30days");
        assert_eq!(v["healthMetrics"][0]["value"], 70.5);
        assert!(v["exportDate"].as_str().unwrap().starts_with("2026-06-30T15:00:00"));
        assert!(v.get("reports").is_none());
    }

    #[test]
    fn json_reports_only_when_present() {
        let record = make_record(MetricType::Weight, MetricValue::scalar(70.5), make_date(6, 29));

        let none = to_json(&[&record], Some(&[]), ExportRange::All, now()).unwrap();
        assert!(!none.contains("\"reports\""));

        let with = to_json(&[&record], Some(&[make_report()]), ExportRange::All, now()).unwrap();
        let v: serde_json::Value = serde_json::from_str(&with).unwrap();
        assert_eq!(v["reports"][0]["fileName"], "lab.pdf");
        assert_eq!(v["reports"][0]["fileSize"], 2048);
        assert!(v["reports"][0].get("fileType").is_none());
    }

    #[test]
    fn text_report_groups_by_type() {
        let a = make_record(MetricType::Weight, MetricValue::scalar(70.0), make_date(6, 1));
        let b = make_record(
            MetricType::BloodPressure,
            MetricValue::blood_pressure(120.0, 80.0),
            make_date(6, 2),
        );
        let mut c = make_record(MetricType::Weight, MetricValue::scalar(69.5), make_date(6, 3));
        c.notes = Some("morning".into());

        let text = to_text_report(&[&a, &b, &c], make_date(6, 30));
        let expected = "HEALTH TRACKER REPORT\n\
            Generated: Jun 30, 2026\n\
            Total Records: 3\n\n\
            \nWEIGHT\n======\n\
            Jun 1, 2026: 70 kg\n\
            Jun 3, 2026: 69.5 kg (morning)\n\
            \nBLOODPRESSURE\n=============\n\
            Jun 2, 2026: 120/80 mmHg\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn export_refuses_empty_selection() {
        let metrics = vec![make_record(MetricType::Weight, MetricValue::scalar(70.0), make_date(1, 1))];
        let options = ExportOptions {
            range: ExportRange::Last7Days,
            ..ExportOptions::default()
        };
        assert!(matches!(export(&metrics, &[], &options, now()), Err(ExportError::NoData)));
    }

    #[test]
    fn export_names_file_by_format() {
        let metrics = vec![make_record(MetricType::Weight, MetricValue::scalar(70.0), make_date(6, 29))];
        let stamp = now().timestamp_millis();

        let csv = export(&metrics, &[], &ExportOptions::default(), now()).unwrap();
        assert_eq!(csv.file_name, format!("health-data-{stamp}.csv"));
        assert_eq!(csv.mime_type, "text/csv");

        let options = ExportOptions {
            format: ExportFormat::Json,
            include_reports: true,
            ..ExportOptions::default()
        };
        let json = export(&metrics, &[make_report()], &options, now()).unwrap();
        assert_eq!(json.mime_type, "application/json");
        assert!(json.content.contains("\"reports\""));

        let options = ExportOptions {
            format: ExportFormat::Text,
            ..ExportOptions::default()
        };
        let text = export(&metrics, &[], &options, now()).unwrap();
        assert_eq!(text.file_name, format!("health-report-{stamp}.txt"));
        assert!(text.content.starts_with("HEALTH TRACKER REPORT\n"));
    }
}
