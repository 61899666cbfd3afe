use std::time::Duration;

/// Application-level constants
pub const APP_NAME: &str = "HealthTrack";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Largest upload the pipeline will read (10 MiB).
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// MIME types admitted for text acquisition.
pub const ACCEPTED_FILE_TYPES: &[&str] = &["application/pdf", "text/plain"];

/// Upper bound on one file's text acquisition before it is abandoned.
pub const DEFAULT_ACQUISITION_TIMEOUT_SECS: u64 = 30;

const ENV_ACQUISITION_TIMEOUT: &str = "HEALTHTRACK_ACQUISITION_TIMEOUT_SECS";
const ENV_MAX_UPLOAD_BYTES: &str = "HEALTHTRACK_MAX_UPLOAD_BYTES";
const ENV_LEGACY_TYPES: &str = "HEALTHTRACK_LEGACY_TYPES";

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "healthtrack=info,warn"
}

/// Tunables for the upload → text → metrics pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Per-file time limit for the external text-acquisition step.
    pub acquisition_timeout: Duration,
    pub max_file_bytes: u64,
    pub accepted_file_types: Vec<String>,
    /// Also scan for the legacy `bloodSugar` and `cholesterol` panel types.
    pub include_legacy_types: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            acquisition_timeout: Duration::from_secs(DEFAULT_ACQUISITION_TIMEOUT_SECS),
            max_file_bytes: MAX_UPLOAD_BYTES,
            accepted_file_types: ACCEPTED_FILE_TYPES.iter().map(|s| s.to_string()).collect(),
            include_legacy_types: false,
        }
    }
}

impl PipelineConfig {
    /// Defaults overridden by `HEALTHTRACK_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_ACQUISITION_TIMEOUT) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.acquisition_timeout = Duration::from_secs(secs),
                _ => tracing::warn!(key = ENV_ACQUISITION_TIMEOUT, value = %raw, "Ignoring invalid setting"),
            }
        }

        if let Some(raw) = lookup(ENV_MAX_UPLOAD_BYTES) {
            match raw.trim().parse::<u64>() {
                Ok(bytes) if bytes > 0 => config.max_file_bytes = bytes,
                _ => tracing::warn!(key = ENV_MAX_UPLOAD_BYTES, value = %raw, "Ignoring invalid setting"),
            }
        }

        if let Some(raw) = lookup(ENV_LEGACY_TYPES) {
            match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => config.include_legacy_types = true,
                "0" | "false" | "no" | "off" => config.include_legacy_types = false,
                _ => tracing::warn!(key = ENV_LEGACY_TYPES, value = %raw, "Ignoring invalid setting"),
            }
        }

        config
    }

    pub fn accepts_file_type(&self, file_type: &str) -> bool {
        self.accepted_file_types
            .iter()
            .any(|t| t.eq_ignore_ascii_case(file_type))
    }
}
