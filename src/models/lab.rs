use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use super::enums::{AssessmentStatus, LabCategory, Severity};
use super::ModelError;
use crate::standards::{Assessment, StandardsProvider};

/// One measured clinical value. Immutable once built; the status always comes
/// from an assessment of the same value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabResult {
    id: Uuid,
    test_name: String,
    parameter_key: String,
    value: f64,
    unit: String,
    normal_range: String,
    status: AssessmentStatus,
    severity: Severity,
    category: LabCategory,
    observed_on: NaiveDate,
}

/// The measured part of a `LabResult`. Status and range text come from the assessor.
#[derive(Debug, Clone)]
pub struct LabResultDraft<'a> {
    pub test_name: &'a str,
    pub parameter_key: &'a str,
    pub value: f64,
    pub unit: &'a str,
    /// Range text kept when the assessor has no standard for `test_name`.
    pub fallback_range: &'a str,
    pub category: LabCategory,
    pub observed_on: NaiveDate,
}

impl LabResult {
    /// Assess the draft's value and build the result from that assessment.
    ///
    /// The id is derived from the source document and parameter key, so
    /// re-analysing the same document yields the same ids.
    pub fn assessed(
        source_id: &Uuid,
        draft: LabResultDraft<'_>,
        standards: &StandardsProvider,
    ) -> Result<(Self, Assessment), ModelError> {
        if !draft.value.is_finite() {
            return Err(ModelError::NonFiniteValue {
                parameter: draft.parameter_key.to_string(),
            });
        }

        let assessment = standards.assess(draft.test_name, draft.value);
        let normal_range = match &assessment.standard {
            Some(standard) => standard.range_text(),
            None => draft.fallback_range.to_string(),
        };

        let lab = Self {
            id: Uuid::new_v5(source_id, draft.parameter_key.as_bytes()),
            test_name: draft.test_name.to_string(),
            parameter_key: draft.parameter_key.to_string(),
            value: draft.value,
            unit: draft.unit.to_string(),
            normal_range,
            status: assessment.status,
            severity: assessment.severity,
            category: draft.category,
            observed_on: draft.observed_on,
        };
        Ok((lab, assessment))
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn test_name(&self) -> &str {
        &self.test_name
    }

    pub fn parameter_key(&self) -> &str {
        &self.parameter_key
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn normal_range(&self) -> &str {
        &self.normal_range
    }

    pub fn status(&self) -> AssessmentStatus {
        self.status
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn category(&self) -> LabCategory {
        self.category
    }

    pub fn observed_on(&self) -> NaiveDate {
        self.observed_on
    }

    pub fn is_normal(&self) -> bool {
        self.severity == Severity::Normal
    }
}
