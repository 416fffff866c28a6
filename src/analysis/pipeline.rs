use std::borrow::Cow;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::config::AnalyzerConfig;
use crate::extraction::{
    correct_lab_terms, detect_primary_organ, detect_report_type, extract_medications,
    extract_parameters, ExtractedValue,
};
use crate::models::{GraphPoint, LabResult, LabResultDraft, Severity, UserProfile};
use crate::standards::StandardsProvider;

use super::history::compare_with_history;
use super::insights::insights_for;
use super::summary::compose_summary;
use super::types::{AnalysisResult, Highlight, TrendChange};

/// OCR text → assessed lab results, highlights and summary, for one user profile.
#[derive(Debug, Clone)]
pub struct ReportAnalyzer {
    standards: StandardsProvider,
    config: AnalyzerConfig,
}

impl ReportAnalyzer {
    pub fn new(profile: UserProfile, config: AnalyzerConfig) -> Self {
        Self {
            standards: StandardsProvider::new(profile, config.thresholds),
            config,
        }
    }

    pub fn standards(&self) -> &StandardsProvider {
        &self.standards
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Run the full pipeline. Never fails: text without recognizable values
    /// yields an empty result with a neutral summary.
    pub fn analyze(&self, text: &str, observed_on: NaiveDate) -> AnalysisResult {
        let source_id = Uuid::new_v5(&Uuid::NAMESPACE_OID, text.as_bytes());

        let text: Cow<'_, str> = if self.config.correct_ocr_terms {
            Cow::Owned(correct_lab_terms(text))
        } else {
            Cow::Borrowed(text)
        };

        let extracted = extract_parameters(&text);
        let mut lab_results = Vec::with_capacity(extracted.len());
        let mut highlights = Vec::new();

        for entry in extracted.iter() {
            match self.assess_entry(&source_id, entry, observed_on) {
                Ok((lab, highlight)) => {
                    if let Some(h) = highlight {
                        highlights.push(h);
                    }
                    lab_results.push(lab);
                }
                Err(e) => {
                    tracing::warn!(key = entry.key(), error = %e, "Dropped extracted value");
                }
            }
        }

        let report_type = detect_report_type(&text);
        let primary_organ = detect_primary_organ(&text);
        let medications = extract_medications(&text);
        let summary = compose_summary(report_type, lab_results.len(), &highlights);
        let insights = insights_for(&lab_results);

        let result = AnalysisResult {
            source_id,
            report_type,
            summary,
            total_parameters: lab_results.len(),
            highlights,
            lab_results,
            observed_on,
            primary_organ,
            medications,
            insights,
        };

        tracing::info!(
            source_id = %result.source_id,
            report_type = %result.report_type,
            parameters = result.total_parameters,
            critical = result.count_by_severity(Severity::Critical),
            abnormal = result.count_by_severity(Severity::Abnormal),
            borderline = result.count_by_severity(Severity::Borderline),
            "Report analysis complete"
        );
        result
    }

    /// History comparison with the configured change threshold.
    pub fn compare_with_history(
        &self,
        current: &AnalysisResult,
        previous: &[GraphPoint],
    ) -> Vec<TrendChange> {
        compare_with_history(current, previous, self.config.history_change_pct)
    }

    fn assess_entry(
        &self,
        source_id: &Uuid,
        entry: &ExtractedValue,
        observed_on: NaiveDate,
    ) -> Result<(LabResult, Option<Highlight>), crate::models::ModelError> {
        let pattern = entry.pattern;
        let (lab, assessment) = LabResult::assessed(
            source_id,
            LabResultDraft {
                test_name: pattern.display_name,
                parameter_key: pattern.key,
                value: entry.value,
                unit: pattern.unit,
                fallback_range: pattern.default_range,
                category: pattern.category,
                observed_on,
            },
            &self.standards,
        )?;

        let highlight = (assessment.severity != Severity::Normal).then(|| Highlight {
            lab_id: lab.id(),
            parameter_key: pattern.key.to_string(),
            display_name: pattern.display_name.to_string(),
            value: entry.value,
            unit: pattern.unit.to_string(),
            status: assessment.status,
            severity: assessment.severity,
            message: assessment.message,
        });

        Ok((lab, highlight))
    }
}

impl Default for ReportAnalyzer {
    fn default() -> Self {
        Self::new(UserProfile::default(), AnalyzerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::LAB_PATTERNS;
    use crate::models::{AssessmentStatus, Organ, ReportType, Sex};
    use crate::standards::resolve_family;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 4).unwrap()
    }

    fn male_analyzer() -> ReportAnalyzer {
        ReportAnalyzer::new(UserProfile::new(45, Sex::Male).unwrap(), AnalyzerConfig::default())
    }

    #[test]
    fn every_bank_entry_has_a_standard() {
        for pattern in LAB_PATTERNS.iter() {
            assert!(
                resolve_family(pattern.display_name).is_some(),
                "{} ({}) resolves to no reference range",
                pattern.key,
                pattern.display_name
            );
        }
    }

    #[test]
    fn critically_low_hemoglobin_is_highlighted() {
        let result = male_analyzer().analyze("Hemoglobin: 8.0 g/dL", date());

        assert_eq!(result.total_parameters, 1);
        assert_eq!(result.highlights.len(), 1);
        let h = &result.highlights[0];
        assert_eq!(h.status, AssessmentStatus::CriticallyLow);
        assert_eq!(h.severity, Severity::Critical);
        assert_eq!(h.lab_id, result.lab_results[0].id());
        assert!(result.summary.contains("1 critical finding(s) require immediate attention."));
        assert!(!result.summary.contains("acceptable ranges"));
    }

    #[test]
    fn text_without_values_is_empty_and_neutral() {
        let result = male_analyzer().analyze("Patient feels well today.", date());

        assert_eq!(result.total_parameters, 0);
        assert!(result.highlights.is_empty());
        assert!(result.lab_results.is_empty());
        assert_eq!(result.report_type, ReportType::MedicalReport);
        assert_eq!(result.primary_organ, Organ::General);
        assert!(!result.summary.contains("critical"));
    }

    #[test]
    fn lipid_panel_is_detected() {
        let result = male_analyzer().analyze("Lipid Panel\nCholesterol 210", date());

        assert_eq!(result.report_type, ReportType::LipidPanel);
        assert_eq!(result.total_parameters, 1);
        assert_eq!(result.highlights[0].status, AssessmentStatus::SlightlyAboveNormal);
        assert_eq!(result.highlights[0].severity, Severity::Borderline);
        assert!(result.summary.starts_with("This Lipid Panel contains 1 test parameter(s)."));
    }

    #[test]
    fn normal_values_are_not_highlighted() {
        let text = "Complete Blood Count\nHemoglobin 14.5\nWBC 7.0\nPlatelets 250";
        let result = male_analyzer().analyze(text, date());

        assert_eq!(result.report_type, ReportType::BloodTest);
        assert_eq!(result.total_parameters, 3);
        assert!(result.highlights.is_empty());
        assert!(result.lab_results.iter().all(LabResult::is_normal));
        assert!(result.summary.ends_with("All major parameters are within acceptable ranges."));
    }

    #[test]
    fn highlights_follow_extraction_order() {
        let text = "Creatinine 2.5\nHemoglobin 9.0\nHeart rate 130";
        let result = male_analyzer().analyze(text, date());
        let keys: Vec<_> = result.highlights.iter().map(|h| h.parameter_key.as_str()).collect();
        assert_eq!(keys, vec!["heart_rate", "hemoglobin", "creatinine"]);
    }

    #[test]
    fn ids_are_stable_across_runs() {
        let analyzer = male_analyzer();
        let a = analyzer.analyze("Hemoglobin: 8.0 g/dL\nWBC 12", date());
        let b = analyzer.analyze("Hemoglobin: 8.0 g/dL\nWBC 12", date());
        assert_eq!(a.source_id, b.source_id);
        let ids_a: Vec<_> = a.lab_results.iter().map(LabResult::id).collect();
        let ids_b: Vec<_> = b.lab_results.iter().map(LabResult::id).collect();
        assert_eq!(ids_a, ids_b);
        assert_ne!(ids_a[0], ids_a[1]);
    }

    #[test]
    fn ocr_misspellings_are_corrected_when_enabled() {
        let text = "Creatiniue: 1.0 mg/dL";
        let corrected = male_analyzer().analyze(text, date());
        assert_eq!(corrected.total_parameters, 1);
        assert_eq!(corrected.lab_results[0].parameter_key(), "creatinine");

        let config = AnalyzerConfig {
            correct_ocr_terms: false,
            ..AnalyzerConfig::default()
        };
        let raw = ReportAnalyzer::new(UserProfile::default(), config).analyze(text, date());
        assert_eq!(raw.total_parameters, 0);
    }

    #[test]
    fn lab_results_carry_range_text_and_category() {
        let result = male_analyzer().analyze("Hemoglobin: 8.0 g/dL", date());
        let lab = &result.lab_results[0];
        assert_eq!(lab.normal_range(), "13.0-17.0 g/dL");
        assert_eq!(lab.unit(), "g/dL");
        assert_eq!(lab.observed_on(), date());
    }

    #[test]
    fn medications_and_organ_are_reported() {
        let text = "Kidney function panel\nCreatinine 1.0\nRx: lisinopril 10 mg 1 time daily";
        let result = male_analyzer().analyze(text, date());
        assert_eq!(result.report_type, ReportType::KidneyFunctionTest);
        assert_eq!(result.primary_organ, Organ::Kidneys);
        assert_eq!(result.medications.len(), 1);
        assert_eq!(result.medications[0].name, "Lisinopril");
    }

    #[test]
    fn chat_message_lists_findings() {
        let result = male_analyzer().analyze("Hemoglobin: 8.0 g/dL\nWBC 7.0", date());
        let msg = result.chat_message(5);
        assert!(msg.contains("**Report Type:** Medical Report"));
        assert!(msg.contains("**Date:** Mar 4, 2026"));
        assert!(msg.contains("🔴 **Critical:**"));
        assert!(msg.contains("• Hemoglobin: 8.0 g/dL - This is significantly below"));
        assert!(!msg.contains("Normal Parameters"));
    }

    #[test]
    fn chat_message_collapses_long_normal_lists() {
        let text = "Hemoglobin 14.5\nWBC 7.0\nPlatelets 250\nSodium 140\n\
                    Potassium 4.2\nChloride 100\nCalcium 9.5";
        let result = male_analyzer().analyze(text, date());
        assert_eq!(result.total_parameters, 7);

        let msg = result.chat_message(5);
        assert!(msg.contains("✅ All parameters appear to be within normal ranges."));
        assert!(msg.contains("✅ **Normal Parameters:**"));
        assert!(msg.contains("• ... and 2 more normal results"));
    }

    /// (key, label, value) for every bank entry, laid out below as
    /// "<label> <value> <unit> <low>-<high>" the way lab reports print rows.
    const REPORT_ROWS: &[(&str, &str, &str)] = &[
        ("heart_rate", "Heart Rate", "72"),
        ("spo2", "Oxygen Saturation", "98"),
        ("respiratory_rate", "Respiratory Rate", "16"),
        ("blood_pressure_systolic", "Systolic", "118"),
        ("blood_pressure_diastolic", "Diastolic", "76"),
        ("temperature", "Body Temperature", "98.6"),
        ("hemoglobin", "Hemoglobin", "13.5"),
        ("hematocrit", "Haematocrit", "42"),
        ("rbc", "Red Blood Cells", "4.9"),
        ("wbc", "White Blood Cells", "7.2"),
        ("platelets", "Platelet Count", "250"),
        ("neutrophils", "Neutrophils", "55"),
        ("lymphocytes", "Lymphocytes", "30"),
        ("monocytes", "Monocytes", "5"),
        ("eosinophils", "Eosinophils", "2"),
        ("basophils", "Basophils", "0.5"),
        ("cholesterol", "Total Cholesterol", "190"),
        ("ldl", "LDL Cholesterol", "110"),
        ("hdl", "HDL Cholesterol", "52"),
        ("triglycerides", "Triglycerides", "140"),
        ("glucose", "Fasting Blood Glucose", "92"),
        ("hba1c", "Glycated Hemoglobin", "5.4"),
        ("fasting_insulin", "Fasting Insulin", "8.1"),
        ("alt", "Alanine Aminotransferase", "30"),
        ("ast", "Aspartate Aminotransferase", "28"),
        ("alp", "Alkaline Phosphatase", "90"),
        ("bilirubin", "Total Bilirubin", "0.8"),
        ("albumin", "Serum Albumin", "4.2"),
        ("creatinine", "Serum Creatinine", "1.1"),
        ("bun", "Blood Urea Nitrogen", "14"),
        ("egfr", "Estimated GFR", "95"),
        ("uric_acid", "Uric Acid", "5.5"),
        ("sodium", "Sodium", "140"),
        ("potassium", "Potassium", "4.1"),
        ("chloride", "Chloride", "101"),
        ("calcium", "Calcium", "9.4"),
        ("magnesium", "Magnesium", "2.0"),
        ("tsh", "Thyroid Stimulating Hormone", "2.1"),
        ("t3", "Total T3", "120"),
        ("t4", "Total T4", "8.2"),
        ("free_t3", "Free T3", "3.1"),
        ("free_t4", "Free T4", "1.2"),
        ("vitamin_d", "Vitamin D", "32"),
        ("vitamin_b12", "Vitamin B12", "450"),
        ("folate", "Folic Acid", "8.4"),
        ("iron", "Serum Iron", "95"),
        ("ferritin", "Ferritin", "120"),
        ("troponin", "Troponin I", "0.02"),
        ("ck_mb", "Creatine Kinase-MB", "3.2"),
        ("bnp", "B-type Natriuretic Peptide", "80"),
        ("crp", "C-Reactive Protein", "4.5"),
        ("esr", "Erythrocyte Sedimentation Rate", "12"),
    ];

    #[test]
    fn every_report_row_yields_exactly_its_parameter() {
        let analyzer = male_analyzer();
        for pattern in LAB_PATTERNS.iter() {
            assert!(
                REPORT_ROWS.iter().any(|(key, _, _)| *key == pattern.key),
                "no report row for {}",
                pattern.key
            );
        }

        for (key, label, value) in REPORT_ROWS {
            let pattern = crate::extraction::pattern_for(key).unwrap();
            let range = pattern.default_range.split_whitespace().next().unwrap();
            let line = format!("{label} {value} {} {range}", pattern.unit);

            let result = analyzer.analyze(&line, date());
            let keys: Vec<_> = result.lab_results.iter().map(LabResult::parameter_key).collect();
            assert_eq!(keys, vec![*key], "from {line:?}");
            assert_eq!(
                result.lab_results[0].value(),
                value.parse::<f64>().unwrap(),
                "from {line:?}"
            );
        }
    }

    #[test]
    fn unit_suffix_does_not_invent_heart_rate() {
        let result = male_analyzer().analyze("ESR 12 mm/hr 0 - 20", date());
        assert_eq!(result.total_parameters, 1);
        assert_eq!(result.lab_results[0].parameter_key(), "esr");
        assert!(result.highlights.is_empty());
        assert!(!result.summary.contains("critical"));
    }

    #[test]
    fn creatine_kinase_survives_ocr_correction() {
        let result = male_analyzer().analyze("Creatine Kinase-MB: 3.2 ng/mL", date());
        let keys: Vec<_> = result.lab_results.iter().map(LabResult::parameter_key).collect();
        assert_eq!(keys, vec!["ck_mb"]);
    }

    #[test]
    fn troponin_message_quotes_its_real_range() {
        let result = male_analyzer().analyze("Troponin I: 0.5 ng/mL", date());
        let lab = &result.lab_results[0];
        assert_eq!(lab.normal_range(), "0.0-0.04 ng/mL");
        assert_eq!(result.highlights[0].status, AssessmentStatus::CriticallyHigh);
        assert!(result.highlights[0]
            .message
            .starts_with("This is significantly above the normal range (0.0-0.04 ng/mL)."));
    }

    #[test]
    fn insights_are_reported_and_rendered() {
        let result = male_analyzer().analyze("Creatinine 1.8\nTSH 6.0", date());
        assert_eq!(result.insights.len(), 2);
        let msg = result.chat_message(5);
        assert!(msg.contains("💡 **Insights:**"));
        assert!(msg.contains("• Elevated creatinine suggests possible kidney stress."));
        assert!(msg.contains("• Elevated TSH may indicate hypothyroidism."));

        let calm = male_analyzer().analyze("Hemoglobin 14.5", date());
        assert!(calm.insights.is_empty());
        assert!(calm
            .chat_message(5)
            .contains("• All monitored metrics appear within acceptable ranges."));
    }

    #[test]
    fn analyzer_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ReportAnalyzer>();
    }
}
