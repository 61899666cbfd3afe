pub mod config;
pub mod ids; // Identifier + clock collaborators
pub mod models;
pub mod registry; // Metric type registry
pub mod intelligence; // Reference ranges, status, insights
pub mod pipeline; // Upload → text → validated metrics
pub mod store; // In-memory record collection

use tracing_subscriber::EnvFilter;

pub use models::{HealthMetricRecord, MetricCandidate, MetricType, MetricValue};
pub use pipeline::extraction::extract_health_data;
pub use pipeline::validation::validate_health_data;

/// Install a fmt subscriber filtered by `RUST_LOG`, falling back to
/// `config::default_log_filter()`. Safe to call more than once.
pub fn init_tracing() {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .try_init()
        .is_ok();

    if installed {
        tracing::info!("{} v{} logging initialized", config::APP_NAME, config::APP_VERSION);
    }
}
