use crate::models::{Organ, ReportType};
use crate::text::{alias, any_term, Term};

struct ReportTypeRule {
    report_type: ReportType,
    terms: &'static [Term],
}

/// First match wins. Named panels come before the generic blood test,
/// and analyte-only lipid hints come after it.
static REPORT_TYPE_RULES: &[ReportTypeRule] = &[
    ReportTypeRule {
        report_type: ReportType::LipidPanel,
        terms: &[alias("lipid panel"), alias("lipid profile")],
    },
    ReportTypeRule {
        report_type: ReportType::LiverFunctionTest,
        terms: &[alias("liver function"), alias("lft"), alias("hepatic panel")],
    },
    ReportTypeRule {
        report_type: ReportType::KidneyFunctionTest,
        terms: &[
            alias("kidney function"),
            alias("renal function"),
            alias("renal panel"),
            alias("kft"),
        ],
    },
    ReportTypeRule {
        report_type: ReportType::ThyroidPanel,
        terms: &[
            alias("thyroid panel"),
            alias("thyroid function"),
            alias("thyroid profile"),
            alias("tft"),
        ],
    },
    ReportTypeRule {
        report_type: ReportType::BloodTest,
        terms: &[
            alias("blood test"),
            alias("complete blood count"),
            alias("hemogram"),
            alias("cbc"),
        ],
    },
    ReportTypeRule {
        report_type: ReportType::LipidPanel,
        terms: &[alias("cholesterol"), alias("triglyceride")],
    },
    ReportTypeRule {
        report_type: ReportType::XRay,
        terms: &[alias("x-ray"), alias("xray"), alias("radiograph")],
    },
    ReportTypeRule {
        report_type: ReportType::Mri,
        terms: &[alias("mri"), alias("magnetic resonance")],
    },
    ReportTypeRule {
        report_type: ReportType::CtScan,
        terms: &[alias("ct scan"), alias("computed tomography")],
    },
    ReportTypeRule {
        report_type: ReportType::Prescription,
        terms: &[alias("prescription"), Term::Contains("rx:")],
    },
    ReportTypeRule {
        report_type: ReportType::DischargeSummary,
        terms: &[alias("discharge summary")],
    },
];

/// Classify the document from keywords. Falls back to `MedicalReport`.
pub fn detect_report_type(text: &str) -> ReportType {
    let lower = text.to_lowercase();
    REPORT_TYPE_RULES
        .iter()
        .find(|rule| any_term(rule.terms, &lower))
        .map(|rule| rule.report_type)
        .unwrap_or(ReportType::MedicalReport)
}

struct OrganRule {
    organ: Organ,
    terms: &'static [Term],
}

static ORGAN_RULES: &[OrganRule] = &[
    OrganRule {
        organ: Organ::Heart,
        terms: &[alias("heart"), alias("cardiac"), alias("ecg"), alias("ekg")],
    },
    OrganRule {
        organ: Organ::Kidneys,
        terms: &[alias("kidney"), alias("renal"), alias("creatinine"), alias("bun")],
    },
    OrganRule {
        organ: Organ::Liver,
        terms: &[alias("liver"), alias("hepatic"), alias("alt"), alias("ast")],
    },
    OrganRule {
        organ: Organ::Lungs,
        terms: &[alias("lung"), alias("pulmonary"), alias("respiratory")],
    },
    OrganRule {
        organ: Organ::Thyroid,
        terms: &[alias("thyroid"), alias("tsh")],
    },
    OrganRule {
        organ: Organ::Blood,
        terms: &[alias("blood"), alias("cbc"), alias("hemoglobin")],
    },
];

/// Document-level organ focus, checked in order:
/// Heart → Kidneys → Liver → Lungs → Thyroid → Blood → General.
pub fn detect_primary_organ(text: &str) -> Organ {
    let lower = text.to_lowercase();
    ORGAN_RULES
        .iter()
        .find(|rule| any_term(rule.terms, &lower))
        .map(|rule| rule.organ)
        .unwrap_or(Organ::General)
}
