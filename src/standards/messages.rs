use crate::models::AssessmentStatus;

use super::range::StandardRange;

/// Guidance wording per status tier. Every message quotes the resolved range.
pub struct GuidanceMessages;

impl GuidanceMessages {
    pub fn for_status(
        status: AssessmentStatus,
        parameter: &str,
        range: Option<&StandardRange>,
    ) -> String {
        let Some(range) = range else {
            return Self::no_standard(parameter);
        };
        let normal_range = range.range_text();

        match status {
            AssessmentStatus::CriticallyLow => format!(
                "This is significantly below the normal range ({}). \
                 Please consult your doctor immediately.",
                normal_range
            ),
            AssessmentStatus::CriticallyHigh => format!(
                "This is significantly above the normal range ({}). \
                 Please consult your doctor immediately.",
                normal_range
            ),
            AssessmentStatus::Low => format!(
                "Below normal range ({}). Monitor and discuss with your doctor.",
                normal_range
            ),
            AssessmentStatus::High => format!(
                "Above normal range ({}). Monitor and discuss with your doctor.",
                normal_range
            ),
            AssessmentStatus::SlightlyBelowNormal => format!(
                "Just below the normal range ({}). Keep an eye on it.",
                normal_range
            ),
            AssessmentStatus::SlightlyAboveNormal => format!(
                "Just above the normal range ({}). Keep an eye on it.",
                normal_range
            ),
            AssessmentStatus::Normal => format!("Within normal range ({}).", normal_range),
            AssessmentStatus::NoStandard => Self::no_standard(parameter),
        }
    }

    pub fn no_standard(parameter: &str) -> String {
        format!("No reference range is available for {}.", parameter)
    }
}
