pub mod enums;
pub mod metric;
pub mod report;

pub use enums::*;
pub use metric::*;
pub use report::*;

use thiserror::Error;

/// A string did not name any variant of a closed enum.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid {field} value: {value}")]
pub struct ParseEnumError {
    pub field: String,
    pub value: String,
}
