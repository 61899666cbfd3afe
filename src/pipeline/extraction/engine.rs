//! Extraction engine: runs the pattern catalog over one document's text.

use std::sync::Arc;

use chrono::NaiveDate;

use super::date::resolve_report_date;
use super::normalize::normalize_text;
use super::patterns::{catalog, legacy_catalog, ExtractionPattern};
use crate::config::PipelineConfig;
use crate::ids::{Clock, SystemClock};
use crate::models::{MetricCandidate, MetricSource, MetricValue};
use crate::registry;

/// Applies every catalog entry to a document, at most one candidate per type.
pub struct HealthDataExtractor {
    clock: Arc<dyn Clock>,
    include_legacy_types: bool,
}

impl HealthDataExtractor {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            include_legacy_types: false,
        }
    }

    pub fn from_config(config: &PipelineConfig, clock: Arc<dyn Clock>) -> Self {
        Self::new(clock).with_legacy_types(config.include_legacy_types)
    }

    pub fn with_legacy_types(mut self, include: bool) -> Self {
        self.include_legacy_types = include;
        self
    }

    fn patterns(&self) -> impl Iterator<Item = &'static ExtractionPattern> {
        let legacy: &'static [ExtractionPattern] = if self.include_legacy_types {
            legacy_catalog()
        } else {
            &[]
        };
        catalog().iter().chain(legacy)
    }

    /// Candidates found in `text`, in catalog order. Finding nothing is not
    /// an error; the result is simply empty.
    pub fn extract(&self, text: &str, file_name: &str) -> Vec<MetricCandidate> {
        let normalized = normalize_text(text);
        if normalized.is_empty() {
            return Vec::new();
        }

        let date = resolve_report_date(text, self.clock.today());
        let notes = provenance_note(file_name);

        let candidates: Vec<MetricCandidate> = self
            .patterns()
            .filter_map(|pattern| {
                let value = pattern.apply(&normalized)?;
                Some(make_candidate(pattern, value, date, &notes))
            })
            .collect();

        tracing::debug!(
            file_name = %file_name,
            report_date = %date,
            found = candidates.len(),
            "Pattern extraction complete"
        );
        candidates
    }
}

fn make_candidate(
    pattern: &ExtractionPattern,
    value: MetricValue,
    date: NaiveDate,
    notes: &str,
) -> MetricCandidate {
    MetricCandidate {
        metric_type: pattern.metric_type,
        date,
        value,
        unit: registry::canonical_unit(pattern.metric_type).to_string(),
        notes: Some(notes.to_string()),
        source: MetricSource::PdfExtraction,
    }
}

fn provenance_note(file_name: &str) -> String {
    let name = file_name.trim();
    if name.is_empty() {
        "Extracted from report text".to_string()
    } else {
        format!("Extracted from {name}")
    }
}

/// Extract with the system clock and the default catalog.
pub fn extract_health_data(text: &str, file_name: &str) -> Vec<MetricCandidate> {
    HealthDataExtractor::new(Arc::new(SystemClock)).extract(text, file_name)
}
