pub mod analysis;
pub mod config;
pub mod extraction;
pub mod models;
pub mod standards;
pub mod text;
pub mod trends;

pub use analysis::{AnalysisResult, ReportAnalyzer};
pub use config::AnalyzerConfig;
pub use models::UserProfile;

use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber. `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();
}
