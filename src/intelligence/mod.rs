pub mod export;
pub mod insights;
pub mod reference;
pub mod status;
pub mod trends;
