//! In-memory record collection: health metrics and uploaded-report
//! bookkeeping, with a JSON snapshot for an external persistence layer.
//!
//! Reports and metrics are independent: removing a report leaves the
//! metrics it produced untouched.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ids::{Clock, IdSource};
use crate::intelligence::export::{self, ExportError, ExportFile, ExportOptions};
use crate::intelligence::trends;
use crate::models::{HealthMetricRecord, MetricCandidate, MetricType, UploadedReport};
use crate::pipeline::validation::{check_candidate, Rejection};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Health metric not found: {0}")]
    MetricNotFound(String),

    #[error("Report not found: {0}")]
    ReportNotFound(String),

    #[error("Rejected by validation: {0}")]
    Invalid(#[from] Rejection),

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),
}

/// Persisted layout: two ordered lists under fixed keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthDataSnapshot {
    #[serde(default)]
    pub health_metrics: Vec<HealthMetricRecord>,
    #[serde(default)]
    pub uploaded_reports: Vec<UploadedReport>,
}

pub struct HealthDataStore {
    metrics: Vec<HealthMetricRecord>,
    reports: Vec<UploadedReport>,
    ids: Arc<dyn IdSource>,
    clock: Arc<dyn Clock>,
}

impl HealthDataStore {
    pub fn new(ids: Arc<dyn IdSource>, clock: Arc<dyn Clock>) -> Self {
        Self::from_snapshot(HealthDataSnapshot::default(), ids, clock)
    }

    pub fn from_snapshot(
        snapshot: HealthDataSnapshot,
        ids: Arc<dyn IdSource>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            metrics: snapshot.health_metrics,
            reports: snapshot.uploaded_reports,
            ids,
            clock,
        }
    }

    pub fn from_json(json: &str, ids: Arc<dyn IdSource>, clock: Arc<dyn Clock>) -> Result<Self, StoreError> {
        let snapshot: HealthDataSnapshot = serde_json::from_str(json)?;
        tracing::debug!(
            metrics = snapshot.health_metrics.len(),
            reports = snapshot.uploaded_reports.len(),
            "Loaded health data snapshot"
        );
        Ok(Self::from_snapshot(snapshot, ids, clock))
    }

    pub fn snapshot(&self) -> HealthDataSnapshot {
        HealthDataSnapshot {
            health_metrics: self.metrics.clone(),
            uploaded_reports: self.reports.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string(&self.snapshot())?)
    }

    // ── Metrics ─────────────────────────────────────────────

    pub fn metrics(&self) -> &[HealthMetricRecord] {
        &self.metrics
    }

    pub fn get(&self, id: &str) -> Option<&HealthMetricRecord> {
        self.metrics.iter().find(|m| m.id == id)
    }

    /// Validate a candidate, give it identity and append it.
    pub fn add(&mut self, candidate: MetricCandidate) -> Result<&HealthMetricRecord, StoreError> {
        check_candidate(&candidate)?;
        let record = HealthMetricRecord::from_candidate(candidate, self.ids.next_id(), self.clock.now());
        self.metrics.push(record);
        Ok(&self.metrics[self.metrics.len() - 1])
    }

    /// Append records that already passed validation (e.g. a processed batch).
    pub fn extend(&mut self, records: impl IntoIterator<Item = HealthMetricRecord>) {
        self.metrics.extend(records);
    }

    /// Replace a record wholesale. `id` and `created_at` are kept.
    pub fn update(&mut self, id: &str, candidate: MetricCandidate) -> Result<&HealthMetricRecord, StoreError> {
        check_candidate(&candidate)?;
        let slot = self
            .metrics
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| StoreError::MetricNotFound(id.to_string()))?;
        *slot = HealthMetricRecord::from_candidate(candidate, slot.id.clone(), slot.created_at);
        Ok(&*slot)
    }

    pub fn remove(&mut self, id: &str) -> Result<HealthMetricRecord, StoreError> {
        let index = self
            .metrics
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| StoreError::MetricNotFound(id.to_string()))?;
        Ok(self.metrics.remove(index))
    }

    /// Records of one type, most recent date first.
    pub fn by_type(&self, metric_type: MetricType) -> Vec<&HealthMetricRecord> {
        let mut found: Vec<_> = self.metrics.iter().filter(|m| m.metric_type == metric_type).collect();
        found.sort_by(|a, b| b.date.cmp(&a.date));
        found
    }

    pub fn latest(&self, metric_type: MetricType) -> Option<&HealthMetricRecord> {
        crate::intelligence::insights::latest_of(&self.metrics, &[metric_type])
    }

    /// Records of one type from the last `days` days, oldest first.
    pub fn in_window(&self, metric_type: MetricType, days: u32) -> Vec<&HealthMetricRecord> {
        trends::in_window(&self.metrics, metric_type, days, self.clock.today())
    }

    pub fn export(&self, options: &ExportOptions) -> Result<ExportFile, ExportError> {
        export::export(&self.metrics, &self.reports, options, self.clock.now())
    }

    // ── Reports ─────────────────────────────────────────────

    pub fn reports(&self) -> &[UploadedReport] {
        &self.reports
    }

    pub fn add_report(&mut self, report: UploadedReport) {
        self.reports.push(report);
    }

    /// Removes the report only; its extracted metrics stay.
    pub fn remove_report(&mut self, id: &str) -> Result<UploadedReport, StoreError> {
        let index = self
            .reports
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| StoreError::ReportNotFound(id.to_string()))?;
        Ok(self.reports.remove(index))
    }
}
