use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Bookkeeping entry for an uploaded lab-report file.
///
/// Linked to the metrics it produced only by `extracted_data_count`;
/// deleting a report leaves those metrics in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedReport {
    pub id: String,
    pub file_name: String,
    pub file_size: u64,
    pub file_type: String,
    pub upload_date: DateTime<Utc>,
    pub notes: String,
    pub extracted_data_count: usize,
}

/// A file handed to the pipeline: name, declared MIME type, raw bytes.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub file_type: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, file_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            file_type: file_type.into(),
            bytes,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}
