//! Upload processing orchestrator.
//!
//! Drives each uploaded file through admission → text acquisition →
//! extraction → validation and records an `UploadedReport` for it.
//! Files are handled one at a time, in order; a failure is confined to its
//! own file. Text acquisition is the only step with external latency, so it
//! runs on the blocking pool under a per-file timeout.
//!
//! A timeout only stops waiting: the blocking task cannot be cancelled, so a
//! stalled reader keeps its blocking-pool thread until it returns on its own.
//! Its eventual result is discarded.
//!
//! The text source is injected (trait-based DI) so the orchestrator stays
//! testable without a real PDF reader.

use std::sync::Arc;

use serde::Serialize;

use crate::config::PipelineConfig;
use crate::ids::{Clock, IdSource};
use crate::models::{ExtractionStatus, HealthMetricRecord, UploadedFile, UploadedReport};
use crate::pipeline::extraction::{ExtractionError, HealthDataExtractor};
use crate::pipeline::validation::validate_with_report;

// ---------------------------------------------------------------------------
// Text acquisition
// ---------------------------------------------------------------------------

/// Turns an uploaded file into plain text. PDF readers live outside this
/// crate and plug in here.
pub trait TextSource: Send + Sync {
    fn extract_text(&self, file: &UploadedFile) -> Result<String, ExtractionError>;
}

/// Reads the bytes as UTF-8 text (lossy). Suitable for `text/plain` uploads
/// and for text already produced by an external PDF reader.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextSource;

impl TextSource for PlainTextSource {
    fn extract_text(&self, file: &UploadedFile) -> Result<String, ExtractionError> {
        if file.bytes.is_empty() {
            return Err(ExtractionError::Acquisition(format!("{} is empty", file.name)));
        }
        Ok(String::from_utf8_lossy(&file.bytes).into_owned())
    }
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// What happened to one uploaded file.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileOutcome {
    pub file_name: String,
    pub status: ExtractionStatus,
    /// Absent only when the file was rejected before acquisition.
    pub report: Option<UploadedReport>,
    pub records: Vec<HealthMetricRecord>,
    /// Candidates the validator dropped.
    pub rejected_count: usize,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchOutcome {
    pub files: Vec<FileOutcome>,
}

impl BatchOutcome {
    pub fn records(&self) -> impl Iterator<Item = &HealthMetricRecord> {
        self.files.iter().flat_map(|f| f.records.iter())
    }

    pub fn reports(&self) -> impl Iterator<Item = &UploadedReport> {
        self.files.iter().filter_map(|f| f.report.as_ref())
    }

    pub fn total_records(&self) -> usize {
        self.files.iter().map(|f| f.records.len()).sum()
    }
}

/// Progress after each file: `completed` of `total` done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchProgress {
    pub completed: usize,
    pub total: usize,
}

impl BatchProgress {
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        self.completed as f64 / self.total as f64 * 100.0
    }
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

pub struct ReportProcessor {
    source: Arc<dyn TextSource>,
    extractor: HealthDataExtractor,
    ids: Arc<dyn IdSource>,
    clock: Arc<dyn Clock>,
    config: PipelineConfig,
}

impl ReportProcessor {
    pub fn new(
        source: Arc<dyn TextSource>,
        ids: Arc<dyn IdSource>,
        clock: Arc<dyn Clock>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            extractor: HealthDataExtractor::from_config(&config, clock.clone()),
            source,
            ids,
            clock,
            config,
        }
    }

    pub async fn process_files(&self, files: Vec<UploadedFile>) -> BatchOutcome {
        self.process_files_with_progress(files, |_| {}).await
    }

    /// Sequential batch. `on_progress` is called after every file.
    pub async fn process_files_with_progress(
        &self,
        files: Vec<UploadedFile>,
        mut on_progress: impl FnMut(BatchProgress),
    ) -> BatchOutcome {
        let total = files.len();
        let mut batch = BatchOutcome::default();

        for (index, file) in files.into_iter().enumerate() {
            batch.files.push(self.process_file(file).await);
            on_progress(BatchProgress {
                completed: index + 1,
                total,
            });
        }

        tracing::info!(
            files = total,
            records = batch.total_records(),
            "Upload batch processed"
        );
        batch
    }

    /// One file, start to finish. Never fails: errors are folded into the outcome.
    pub async fn process_file(&self, file: UploadedFile) -> FileOutcome {
        let file_name = file.name.clone();
        tracing::info!(file_name = %file_name, size = file.size(), "Processing upload");

        if let Err(e) = self.admit(&file) {
            tracing::warn!(file_name = %file_name, error = %e, "Upload rejected");
            return FileOutcome {
                file_name,
                status: ExtractionStatus::Rejected,
                report: None,
                records: Vec::new(),
                rejected_count: 0,
                error: Some(e.to_string()),
            };
        }

        let (file_size, file_type) = (file.size(), file.file_type.clone());
        let (records, rejected_count, error) = match self.acquire_text(file).await {
            Ok(text) => {
                let (records, rejected) = self.extract_and_validate(&text, &file_name);
                (records, rejected, None)
            }
            Err(e) => {
                tracing::warn!(file_name = %file_name, error = %e, "Text acquisition failed");
                (Vec::new(), 0, Some(e))
            }
        };

        let status = match (&error, records.is_empty()) {
            (Some(_), _) => ExtractionStatus::Error,
            (None, true) => ExtractionStatus::NoData,
            (None, false) => ExtractionStatus::Success,
        };
        let report = self.make_report(&file_name, file_size, file_type, records.len());

        tracing::info!(
            file_name = %file_name,
            status = %status,
            records = records.len(),
            "Upload processed"
        );

        FileOutcome {
            file_name,
            status,
            report: Some(report),
            records,
            rejected_count,
            error: error.map(|e| e.to_string()),
        }
    }

    /// Extraction and validation over text already in hand.
    pub fn process_text(&self, text: &str, file_name: &str) -> Vec<HealthMetricRecord> {
        self.extract_and_validate(text, file_name).0
    }

    fn admit(&self, file: &UploadedFile) -> Result<(), ExtractionError> {
        if !self.config.accepts_file_type(&file.file_type) {
            return Err(ExtractionError::UnsupportedFileType(file.file_type.clone()));
        }
        if file.size() > self.config.max_file_bytes {
            return Err(ExtractionError::FileTooLarge {
                size: file.size(),
                max: self.config.max_file_bytes,
            });
        }
        Ok(())
    }

    async fn acquire_text(&self, file: UploadedFile) -> Result<String, ExtractionError> {
        let source = Arc::clone(&self.source);
        let limit = self.config.acquisition_timeout;
        let task = tokio::task::spawn_blocking(move || source.extract_text(&file));

        // On timeout the JoinHandle is dropped; the reader thread runs on.
        match tokio::time::timeout(limit, task).await {
            Err(_) => Err(ExtractionError::Timeout {
                secs: limit.as_secs(),
            }),
            Ok(Err(join_error)) => Err(ExtractionError::TaskFailed(join_error.to_string())),
            Ok(Ok(result)) => result,
        }
    }

    fn extract_and_validate(&self, text: &str, file_name: &str) -> (Vec<HealthMetricRecord>, usize) {
        let candidates = self.extractor.extract(text, file_name);
        let report = validate_with_report(candidates, self.ids.as_ref(), self.clock.as_ref());
        (report.accepted, report.rejected.len())
    }

    fn make_report(
        &self,
        file_name: &str,
        file_size: u64,
        file_type: String,
        extracted: usize,
    ) -> UploadedReport {
        let notes = if extracted > 0 {
            format!("Extracted {extracted} health metrics")
        } else {
            "No health data extracted".to_string()
        };
        UploadedReport {
            id: self.ids.next_id(),
            file_name: file_name.to_string(),
            file_size,
            file_type,
            upload_date: self.clock.now(),
            notes,
            extracted_data_count: extracted,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::ids::{FixedClock, SequentialIds};
    use crate::models::MetricType;

    /// Returns canned text per file name; fails or stalls on request.
    struct MockTextSource {
        stall: Duration,
    }

    impl MockTextSource {
        fn new() -> Self {
            Self {
                stall: Duration::ZERO,
            }
        }
    }

    impl TextSource for MockTextSource {
        fn extract_text(&self, file: &UploadedFile) -> Result<String, ExtractionError> {
            if !self.stall.is_zero() {
                std::thread::sleep(self.stall);
            }
            match file.name.as_str() {
                "broken.pdf" => Err(ExtractionError::Acquisition("corrupt xref table".into())),
                "panic.pdf" => panic!("reader crashed"),
                _ => Ok(String::from_utf8_lossy(&file.bytes).into_owned()),
            }
        }
    }

    fn make_processor(source: MockTextSource, config: PipelineConfig) -> ReportProcessor {
        ReportProcessor::new(
            Arc::new(source),
            Arc::new(SequentialIds::new("id")),
            Arc::new(FixedClock::on(2026, 4, 2).unwrap()),
            config,
        )
    }

    fn make_pdf(name: &str, text: &str) -> UploadedFile {
        UploadedFile::new(name, "application/pdf", text.as_bytes().to_vec())
    }

    #[tokio::test]
    async fn successful_file_yields_records_and_report() {
        let processor = make_processor(MockTextSource::new(), PipelineConfig::default());
        let outcome = processor
            .process_file(make_pdf("lab.pdf", "TSH 2.1 mIU/L, Vitamin D 32 ng/mL"))
            .await;

        assert_eq!(outcome.status, ExtractionStatus::Success);
        assert_eq!(outcome.records.len(), 2);
        let report = outcome.report.unwrap();
        assert_eq!(report.notes, "Extracted 2 health metrics");
        assert_eq!(report.extracted_data_count, 2);
        assert_eq!(report.file_type, "application/pdf");
        // Records take ids first, then the report.
        assert_eq!(report.id, "id-3");
    }

    #[tokio::test]
    async fn file_without_metrics_is_no_data() {
        let processor = make_processor(MockTextSource::new(), PipelineConfig::default());
        let outcome = processor.process_file(make_pdf("letter.pdf", "Dear patient")).await;
        assert_eq!(outcome.status, ExtractionStatus::NoData);
        assert_eq!(outcome.report.unwrap().notes, "No health data extracted");
    }

    #[tokio::test]
    async fn acquisition_failure_is_isolated_to_its_file() {
        let processor = make_processor(MockTextSource::new(), PipelineConfig::default());
        let batch = processor
            .process_files(vec![
                make_pdf("broken.pdf", ""),
                make_pdf("good.pdf", "Fasting Glucose: 92 mg/dL"),
            ])
            .await;

        assert_eq!(batch.files[0].status, ExtractionStatus::Error);
        assert!(batch.files[0].error.as_deref().unwrap().contains("corrupt xref"));
        assert_eq!(batch.files[0].report.as_ref().unwrap().extracted_data_count, 0);

        assert_eq!(batch.files[1].status, ExtractionStatus::Success);
        assert_eq!(batch.total_records(), 1);
        assert_eq!(batch.reports().count(), 2);
    }

    #[tokio::test]
    async fn panicking_reader_becomes_task_failure() {
        let processor = make_processor(MockTextSource::new(), PipelineConfig::default());
        let outcome = processor.process_file(make_pdf("panic.pdf", "")).await;
        assert_eq!(outcome.status, ExtractionStatus::Error);
        assert!(outcome.error.unwrap().starts_with("Extraction task failed"));
    }

    #[tokio::test]
    async fn slow_reader_times_out() {
        let config = PipelineConfig {
            acquisition_timeout: Duration::from_millis(20),
            ..PipelineConfig::default()
        };
        let source = MockTextSource {
            stall: Duration::from_millis(300),
        };
        let processor = make_processor(source, config);
        let outcome = processor.process_file(make_pdf("slow.pdf", "BMI 22")).await;
        assert_eq!(outcome.status, ExtractionStatus::Error);
        assert!(outcome.error.unwrap().contains("timed out"));
    }

    #[tokio::test]
    async fn unsupported_and_oversized_files_are_rejected() {
        let config = PipelineConfig {
            max_file_bytes: 8,
            ..PipelineConfig::default()
        };
        let processor = make_processor(MockTextSource::new(), config);
        let batch = processor
            .process_files(vec![
                UploadedFile::new("scan.png", "image/png", vec![1, 2, 3]),
                make_pdf("big.pdf", "Fasting Glucose: 92 mg/dL"),
            ])
            .await;

        assert!(batch.files.iter().all(|f| f.status == ExtractionStatus::Rejected));
        assert!(batch.files.iter().all(|f| f.report.is_none()));
        assert!(batch.files[1].error.as_deref().unwrap().starts_with("File too large"));
    }

    #[tokio::test]
    async fn progress_reported_after_each_file() {
        let processor = make_processor(MockTextSource::new(), PipelineConfig::default());
        let mut seen = Vec::new();
        processor
            .process_files_with_progress(
                vec![make_pdf("a.pdf", "BMI 22"), make_pdf("b.pdf", "BMI 23")],
                |p| seen.push(p.percent()),
            )
            .await;
        assert_eq!(seen, vec![50.0, 100.0]);
    }

    #[test]
    fn process_text_runs_without_runtime() {
        let processor = make_processor(MockTextSource::new(), PipelineConfig::default());
        let records = processor.process_text("Blood Pressure: 125/82 mmHg", "bp.txt");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].metric_type, MetricType::BloodPressure);
        assert_eq!(records[0].unit, "mmHg");
    }

    #[test]
    fn plain_text_source_rejects_empty_files() {
        let empty = UploadedFile::new("empty.txt", "text/plain", Vec::new());
        assert!(PlainTextSource.extract_text(&empty).is_err());
        let file = UploadedFile::new("r.txt", "text/plain", b"HbA1c 5.6".to_vec());
        assert_eq!(PlainTextSource.extract_text(&file).unwrap(), "HbA1c 5.6");
    }
}
