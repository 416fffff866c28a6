//! Parameter-specific follow-up advice for out-of-range results.

use crate::models::{AssessmentStatus, LabResult, Severity};

/// Shown when no advice applies to a report with results.
pub const NO_INSIGHTS: &str = "All monitored metrics appear within acceptable ranges.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Above,
    Below,
}

impl Side {
    fn of(status: AssessmentStatus) -> Option<Self> {
        match status {
            AssessmentStatus::SlightlyAboveNormal
            | AssessmentStatus::High
            | AssessmentStatus::CriticallyHigh => Some(Self::Above),
            AssessmentStatus::SlightlyBelowNormal
            | AssessmentStatus::Low
            | AssessmentStatus::CriticallyLow => Some(Self::Below),
            AssessmentStatus::Normal | AssessmentStatus::NoStandard => None,
        }
    }
}

struct InsightRule {
    key: &'static str,
    side: Side,
    min_severity: Severity,
    text: &'static str,
}

const fn insight(
    key: &'static str,
    side: Side,
    min_severity: Severity,
    text: &'static str,
) -> InsightRule {
    InsightRule {
        key,
        side,
        min_severity,
        text,
    }
}

/// Advice in output order. A rule fires when the result for `key` breaches
/// its range on `side` with at least `min_severity`.
const INSIGHT_RULES: &[InsightRule] = &[
    // Lipids and glucose
    insight(
        "cholesterol",
        Side::Above,
        Severity::Borderline,
        "Cholesterol levels are elevated. Consider dietary modifications and increased physical activity.",
    ),
    insight(
        "glucose",
        Side::Above,
        Severity::Borderline,
        "Blood glucose is above normal. Monitor sugar intake and consult your doctor.",
    ),
    insight(
        "hba1c",
        Side::Above,
        Severity::Borderline,
        "HbA1c indicates prediabetes or diabetes. Lifestyle changes and medical supervision recommended.",
    ),
    // Liver and kidney
    insight(
        "alt",
        Side::Above,
        Severity::Borderline,
        "Elevated liver enzymes detected. Avoid alcohol and consult your physician.",
    ),
    insight(
        "creatinine",
        Side::Above,
        Severity::Borderline,
        "Elevated creatinine suggests possible kidney stress. Stay hydrated and follow up with your doctor.",
    ),
    insight(
        "egfr",
        Side::Below,
        Severity::Borderline,
        "Reduced kidney function detected. Regular monitoring and nephrology consultation recommended.",
    ),
    // Vitamins
    insight(
        "vitamin_d",
        Side::Below,
        Severity::Abnormal,
        "Vitamin D deficiency detected. Consider supplementation and increased sun exposure.",
    ),
    insight(
        "vitamin_b12",
        Side::Below,
        Severity::Borderline,
        "Low Vitamin B12. Consider supplementation or dietary changes.",
    ),
    // Thyroid
    insight(
        "tsh",
        Side::Above,
        Severity::Borderline,
        "Elevated TSH may indicate hypothyroidism. Endocrinology consultation recommended.",
    ),
    insight(
        "tsh",
        Side::Below,
        Severity::Borderline,
        "Low TSH may indicate hyperthyroidism. Further thyroid testing advised.",
    ),
    // Blood count
    insight(
        "wbc",
        Side::Above,
        Severity::Borderline,
        "Elevated white blood cell count may indicate infection or inflammation.",
    ),
    insight(
        "wbc",
        Side::Below,
        Severity::Borderline,
        "Low white blood cell count. Monitor for immune system concerns.",
    ),
];

/// Advice for `lab_results`, in table order. Empty when nothing applies.
pub fn insights_for(lab_results: &[LabResult]) -> Vec<String> {
    INSIGHT_RULES
        .iter()
        .filter(|rule| {
            lab_results.iter().any(|lab| {
                lab.parameter_key() == rule.key
                    && Side::of(lab.status()) == Some(rule.side)
                    && lab.severity() >= rule.min_severity
            })
        })
        .map(|rule| rule.text.to_string())
        .collect()
}
