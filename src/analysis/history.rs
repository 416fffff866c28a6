use crate::models::GraphPoint;
use crate::text::normalize_name;

use super::summary::DISPLAY_DATE_FORMAT;
use super::types::{AnalysisResult, TrendChange, TrendDirection};

/// Compare each current result with its latest prior observation of the same
/// parameter (case-insensitive). Changes with `|pct| > change_pct_threshold` are reported.
pub fn compare_with_history(
    current: &AnalysisResult,
    previous: &[GraphPoint],
    change_pct_threshold: f64,
) -> Vec<TrendChange> {
    let mut changes = Vec::new();

    for lab in &current.lab_results {
        let name = normalize_name(lab.test_name());
        let Some(prior) = latest_prior(previous, &name) else {
            continue;
        };
        if prior.value == 0.0 {
            tracing::debug!(parameter = lab.test_name(), "Prior value is zero, no relative change");
            continue;
        }

        let delta = lab.value() - prior.value;
        let change_pct = delta / prior.value * 100.0;
        if change_pct.abs() <= change_pct_threshold {
            continue;
        }

        let direction = if delta > 0.0 {
            TrendDirection::Increased
        } else {
            TrendDirection::Decreased
        };
        changes.push(TrendChange {
            parameter: lab.test_name().to_string(),
            previous_value: prior.value,
            current_value: lab.value(),
            change_pct,
            direction,
            previous_date: prior.recorded_on,
            message: format!(
                "{} has {} by {:.1}% since {}",
                lab.test_name(),
                direction.as_str(),
                change_pct.abs(),
                prior.recorded_on.format(DISPLAY_DATE_FORMAT)
            ),
        });
    }

    tracing::debug!(count = changes.len(), "History comparison complete");
    changes
}

/// Latest point by date; on equal dates the later input wins.
fn latest_prior<'a>(points: &'a [GraphPoint], normalized_name: &str) -> Option<&'a GraphPoint> {
    points
        .iter()
        .filter(|p| normalize_name(&p.parameter) == normalized_name)
        .fold(None, |best: Option<&GraphPoint>, p| match best {
            Some(b) if b.recorded_on > p.recorded_on => Some(b),
            _ => Some(p),
        })
}
