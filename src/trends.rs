//! Projection of lab results onto organ-tagged time series for the dashboard charts.

use std::collections::BTreeMap;

use crate::analysis::AnalysisResult;
use crate::models::{GraphPoint, Organ};

/// One point per lab result of `result`, tagged with the result's source document.
pub fn project_graph_points(result: &AnalysisResult) -> Vec<GraphPoint> {
    result
        .lab_results
        .iter()
        .map(|lab| GraphPoint::from_lab_result(lab, Some(result.source_id)))
        .collect()
}

/// Group points per organ, each series sorted by date (stable for equal dates).
pub fn group_by_organ(
    points: impl IntoIterator<Item = GraphPoint>,
) -> BTreeMap<Organ, Vec<GraphPoint>> {
    let mut groups: BTreeMap<Organ, Vec<GraphPoint>> = BTreeMap::new();
    for point in points {
        groups.entry(point.organ).or_default().push(point);
    }
    for series in groups.values_mut() {
        series.sort_by_key(|p| p.recorded_on);
    }
    groups
}
