use serde::{Deserialize, Serialize};

use crate::models::{AssessmentStatus, Severity};

/// Relative breach thresholds (percent of the violated bound).
/// A breach is compared with strict `>` against each threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeverityThresholds {
    pub borderline_pct: f64,
    pub critical_pct: f64,
}

impl Default for SeverityThresholds {
    fn default() -> Self {
        Self {
            borderline_pct: 15.0,
            critical_pct: 30.0,
        }
    }
}

/// Reference interval for one parameter under one profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StandardRange {
    pub min: f64,
    pub max: f64,
    pub unit: &'static str,
    pub description: &'static str,
}

impl StandardRange {
    pub(crate) const fn new(
        min: f64,
        max: f64,
        unit: &'static str,
        description: &'static str,
    ) -> Self {
        Self {
            min,
            max,
            unit,
            description,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Range as quoted in guidance messages, e.g. "13.0-17.0 g/dL" or "0.0-0.04 ng/mL".
    pub fn range_text(&self) -> String {
        format!("{}-{} {}", format_bound(self.min), format_bound(self.max), self.unit)
    }

    /// Severity tier of a breach by `value` (`Normal` inside the range).
    pub fn breach_severity(&self, value: f64, thresholds: &SeverityThresholds) -> Severity {
        self.assess(value, thresholds).severity()
    }

    /// Classify `value` into a status tier.
    pub fn assess(&self, value: f64, thresholds: &SeverityThresholds) -> AssessmentStatus {
        if value < self.min {
            let deficit = relative_breach_pct(self.min - value, self.min);
            tier(
                deficit,
                thresholds,
                [
                    AssessmentStatus::CriticallyLow,
                    AssessmentStatus::Low,
                    AssessmentStatus::SlightlyBelowNormal,
                ],
            )
        } else if value > self.max {
            let excess = relative_breach_pct(value - self.max, self.max);
            tier(
                excess,
                thresholds,
                [
                    AssessmentStatus::CriticallyHigh,
                    AssessmentStatus::High,
                    AssessmentStatus::SlightlyAboveNormal,
                ],
            )
        } else {
            AssessmentStatus::Normal
        }
    }
}

/// One decimal, or the shortest exact form when one decimal would round the bound.
fn format_bound(bound: f64) -> String {
    let short = format!("{bound:.1}");
    if short.parse::<f64>().is_ok_and(|v| v == bound) {
        short
    } else {
        bound.to_string()
    }
}

/// Breach as a percentage of the bound. A breach of a non-positive bound is unbounded.
fn relative_breach_pct(delta: f64, bound: f64) -> f64 {
    if bound <= 0.0 {
        f64::INFINITY
    } else {
        delta / bound * 100.0
    }
}

/// `tiers` = [critical, abnormal, borderline].
fn tier(
    breach_pct: f64,
    thresholds: &SeverityThresholds,
    tiers: [AssessmentStatus; 3],
) -> AssessmentStatus {
    if breach_pct > thresholds.critical_pct {
        tiers[0]
    } else if breach_pct > thresholds.borderline_pct {
        tiers[1]
    } else {
        tiers[2]
    }
}
