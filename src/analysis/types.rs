use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::extraction::MedicationMention;
use crate::models::{AssessmentStatus, LabResult, Organ, ReportType, Severity};

/// A non-normal finding, pointing at exactly one `LabResult`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Highlight {
    pub lab_id: Uuid,
    pub parameter_key: String,
    pub display_name: String,
    pub value: f64,
    pub unit: String,
    pub status: AssessmentStatus,
    pub severity: Severity,
    pub message: String,
}

/// Output of one analysis run. Built once, read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub source_id: Uuid,
    pub report_type: ReportType,
    pub summary: String,
    /// Non-normal findings in extraction order.
    pub highlights: Vec<Highlight>,
    pub total_parameters: usize,
    pub lab_results: Vec<LabResult>,
    pub observed_on: NaiveDate,
    pub primary_organ: Organ,
    pub medications: Vec<MedicationMention>,
    /// Parameter-specific advice, empty when none applies.
    pub insights: Vec<String>,
}

impl AnalysisResult {
    pub fn count_by_severity(&self, severity: Severity) -> usize {
        self.highlights.iter().filter(|h| h.severity == severity).count()
    }

    /// Highest severity among the highlights, `Normal` when there are none.
    pub fn worst_severity(&self) -> Severity {
        self.highlights
            .iter()
            .map(|h| h.severity)
            .max()
            .unwrap_or(Severity::Normal)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increased,
    Decreased,
}

impl TrendDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Increased => "increased",
            Self::Decreased => "decreased",
        }
    }
}

/// Significant change of a parameter against its latest prior observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendChange {
    pub parameter: String,
    pub previous_value: f64,
    pub current_value: f64,
    /// Signed relative change in percent.
    pub change_pct: f64,
    pub direction: TrendDirection,
    pub previous_date: NaiveDate,
    pub message: String,
}
