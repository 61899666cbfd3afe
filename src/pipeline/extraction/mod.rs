pub mod normalize;
pub mod patterns;
pub mod date;
pub mod engine;

pub use normalize::*;
pub use patterns::*;
pub use date::*;
pub use engine::*;

use thiserror::Error;

/// Failures that abort one file's extraction. Never fatal to a batch;
/// "nothing found" and "implausible value" are not errors at all.
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("Text acquisition failed: {0}")]
    Acquisition(String),

    #[error("Text acquisition timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("File too large: {size} bytes (max {max})")]
    FileTooLarge { size: u64, max: u64 },

    #[error("Extraction task failed: {0}")]
    TaskFailed(String),
}
