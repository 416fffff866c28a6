pub mod history;
pub mod insights;
pub mod pipeline;
pub mod summary;
pub mod types;

pub use history::compare_with_history;
pub use insights::{insights_for, NO_INSIGHTS};
pub use pipeline::ReportAnalyzer;
pub use summary::{compose_summary, DISPLAY_DATE_FORMAT};
pub use types::*;
