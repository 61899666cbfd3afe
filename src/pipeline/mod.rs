pub mod extraction;
pub mod validation;
pub mod processor; // Multi-file upload → text → validated metrics
