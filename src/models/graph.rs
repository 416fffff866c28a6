use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::Organ;
use super::lab::LabResult;

/// One organ-tagged sample of a parameter's time series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphPoint {
    pub id: Uuid,
    pub organ: Organ,
    pub parameter: String,
    pub value: f64,
    pub unit: String,
    pub recorded_on: NaiveDate,
    pub report_id: Option<Uuid>,
}

impl GraphPoint {
    /// Project a lab result onto its organ series (1:1, via the category table).
    pub fn from_lab_result(lab: &LabResult, report_id: Option<Uuid>) -> Self {
        Self {
            id: Uuid::new_v4(),
            organ: Organ::for_category(lab.category()),
            parameter: lab.test_name().to_string(),
            value: lab.value(),
            unit: lab.unit().to_string(),
            recorded_on: lab.observed_on(),
            report_id,
        }
    }
}
