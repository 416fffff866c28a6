//! Reference ranges and value classification.
//!
//! A parameter name is resolved to a family through an ordered rule list, the
//! family's range is picked for the user profile, and the value is graded by how
//! far it breaches the range relative to the violated bound.

pub mod messages;
pub mod provider;
pub mod range;

pub use messages::GuidanceMessages;
pub use provider::{range_for, resolve_family, ParameterFamily, StandardsProvider, RESOLUTION_RULES};
pub use range::{SeverityThresholds, StandardRange};

use serde::Serialize;

use crate::models::{AssessmentStatus, Severity};

/// Outcome of classifying one value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub status: AssessmentStatus,
    pub severity: Severity,
    pub standard: Option<StandardRange>,
    pub message: String,
}

impl Assessment {
    /// Normal-range text for display, "N/A" when no standard exists.
    pub fn range_text(&self) -> String {
        self.standard
            .as_ref()
            .map(StandardRange::range_text)
            .unwrap_or_else(|| "N/A".to_string())
    }
}
