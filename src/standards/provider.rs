use crate::models::{AssessmentStatus, Sex, UserProfile};
use crate::text::{alias, any_term, normalize_name, Term};

use super::messages::GuidanceMessages;
use super::range::{SeverityThresholds, StandardRange};
use super::Assessment;

/// Known parameter families with a reference range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterFamily {
    Hemoglobin,
    Hematocrit,
    Wbc,
    Rbc,
    Platelets,
    Neutrophils,
    Lymphocytes,
    Monocytes,
    Eosinophils,
    Basophils,
    LdlCholesterol,
    HdlCholesterol,
    TotalCholesterol,
    Triglycerides,
    HbA1c,
    FastingGlucose,
    FastingInsulin,
    Alt,
    Ast,
    Alp,
    Bilirubin,
    Albumin,
    Creatinine,
    Egfr,
    UricAcid,
    Bun,
    Sodium,
    Potassium,
    Chloride,
    Calcium,
    Magnesium,
    HeartRate,
    SystolicBp,
    DiastolicBp,
    Spo2,
    RespiratoryRate,
    Temperature,
    Tsh,
    FreeT3,
    FreeT4,
    T3,
    T4,
    VitaminD,
    VitaminB12,
    Folate,
    Ferritin,
    Iron,
    Troponin,
    CkMb,
    Bnp,
    Crp,
    Esr,
}

/// One entry of the ordered resolution list.
pub struct ResolutionRule {
    pub family: ParameterFamily,
    aliases: &'static [Term],
    excludes: &'static [Term],
}

impl ResolutionRule {
    fn matches(&self, normalized: &str) -> bool {
        any_term(self.aliases, normalized) && !any_term(self.excludes, normalized)
    }
}

const fn rule(
    family: ParameterFamily,
    aliases: &'static [Term],
    excludes: &'static [Term],
) -> ResolutionRule {
    ResolutionRule {
        family,
        aliases,
        excludes,
    }
}

use ParameterFamily as F;

/// Resolution order. The first matching rule wins, so order encodes priority:
/// blood count → lipids → glucose → liver → kidney → electrolytes → vitals →
/// thyroid → vitamins/iron → cardiac → inflammatory.
/// Inside a group, the more specific entry comes first (LDL/HDL before bare
/// cholesterol, free T3/T4 before bare T3/T4, ferritin before iron).
pub static RESOLUTION_RULES: &[ResolutionRule] = &[
    // Blood count
    rule(
        F::Hemoglobin,
        &[alias("hemoglobin"), alias("haemoglobin"), alias("hgb"), alias("hb")],
        &[alias("a1c"), alias("glycated"), alias("glycosylated")],
    ),
    rule(F::Hematocrit, &[alias("hematocrit"), alias("haematocrit"), alias("hct")], &[]),
    rule(F::Wbc, &[alias("wbc"), alias("white blood"), alias("leukocyte")], &[]),
    rule(F::Rbc, &[alias("rbc"), alias("red blood"), alias("erythrocyte")], &[]),
    rule(F::Platelets, &[alias("platelet"), alias("plt"), alias("thrombocyte")], &[]),
    rule(F::Neutrophils, &[alias("neutrophil")], &[]),
    rule(F::Lymphocytes, &[alias("lymphocyte")], &[]),
    rule(F::Monocytes, &[alias("monocyte")], &[]),
    rule(F::Eosinophils, &[alias("eosinophil")], &[]),
    rule(F::Basophils, &[alias("basophil")], &[]),
    // Lipids
    rule(F::LdlCholesterol, &[alias("ldl")], &[]),
    rule(F::HdlCholesterol, &[alias("hdl")], &[alias("non-hdl")]),
    rule(F::TotalCholesterol, &[alias("cholesterol")], &[]),
    rule(F::Triglycerides, &[alias("triglyceride")], &[]),
    // Glucose & diabetes
    rule(
        F::HbA1c,
        &[alias("hba1c"), alias("a1c"), alias("glycated"), alias("glycosylated")],
        &[],
    ),
    rule(F::FastingGlucose, &[alias("glucose"), alias("blood sugar")], &[]),
    rule(F::FastingInsulin, &[alias("insulin")], &[]),
    // Liver
    rule(F::Alt, &[alias("alt"), alias("sgpt"), alias("alanine")], &[]),
    rule(F::Ast, &[alias("ast"), alias("sgot"), alias("aspartate")], &[]),
    rule(F::Alp, &[alias("alp"), alias("alkaline phosphatase")], &[]),
    rule(F::Bilirubin, &[alias("bilirubin")], &[]),
    rule(F::Albumin, &[alias("albumin")], &[]),
    // Kidney
    rule(F::Creatinine, &[alias("creatinine")], &[]),
    rule(F::Egfr, &[alias("egfr"), alias("gfr")], &[]),
    rule(F::UricAcid, &[alias("uric acid"), alias("urate")], &[]),
    rule(F::Bun, &[alias("bun"), alias("urea")], &[]),
    // Electrolytes
    rule(F::Sodium, &[alias("sodium")], &[]),
    rule(F::Potassium, &[alias("potassium")], &[]),
    rule(F::Chloride, &[alias("chloride")], &[]),
    rule(F::Calcium, &[alias("calcium")], &[]),
    rule(F::Magnesium, &[alias("magnesium")], &[]),
    // Vitals
    rule(F::HeartRate, &[alias("heart rate"), alias("pulse")], &[]),
    rule(F::SystolicBp, &[alias("systolic")], &[]),
    rule(F::DiastolicBp, &[alias("diastolic")], &[]),
    rule(F::Spo2, &[alias("spo2"), alias("oxygen saturation"), alias("o2 sat")], &[]),
    rule(F::RespiratoryRate, &[alias("respiratory rate"), alias("respiration")], &[]),
    rule(F::Temperature, &[alias("temperature"), alias("temp")], &[]),
    // Thyroid
    rule(F::Tsh, &[alias("tsh")], &[]),
    rule(F::FreeT3, &[alias("free t3"), alias("ft3")], &[]),
    rule(F::FreeT4, &[alias("free t4"), alias("ft4")], &[]),
    rule(F::T3, &[alias("t3")], &[]),
    rule(F::T4, &[alias("t4")], &[]),
    // Vitamins & iron
    rule(F::VitaminD, &[alias("vitamin d"), alias("vit d")], &[]),
    rule(F::VitaminB12, &[alias("b12")], &[]),
    rule(F::Folate, &[alias("folate"), alias("folic acid")], &[]),
    rule(F::Ferritin, &[alias("ferritin")], &[]),
    rule(F::Iron, &[alias("iron")], &[]),
    // Cardiac
    rule(F::Troponin, &[alias("troponin")], &[]),
    rule(F::CkMb, &[alias("ck-mb"), alias("ckmb"), alias("ck mb")], &[]),
    rule(F::Bnp, &[alias("bnp"), alias("natriuretic")], &[]),
    // Inflammatory
    rule(F::Crp, &[alias("crp"), alias("c-reactive")], &[]),
    rule(F::Esr, &[alias("esr"), alias("sedimentation")], &[]),
];

/// Resolve a free-text parameter name to a family by walking `RESOLUTION_RULES` in order.
pub fn resolve_family(parameter: &str) -> Option<ParameterFamily> {
    let normalized = normalize_name(parameter);
    if normalized.is_empty() {
        return None;
    }
    RESOLUTION_RULES
        .iter()
        .find(|r| r.matches(&normalized))
        .map(|r| r.family)
}

/// Range for a family under the given profile.
pub fn range_for(family: ParameterFamily, profile: &UserProfile) -> StandardRange {
    let sex = profile.sex();
    let age = profile.age();
    let r = StandardRange::new;

    match family {
        F::Hemoglobin => match sex {
            Sex::Male => r(13.0, 17.0, "g/dL", "Normal Hemoglobin (Male)"),
            Sex::Female => r(12.0, 15.0, "g/dL", "Normal Hemoglobin (Female)"),
            Sex::Other => r(12.0, 16.0, "g/dL", "Normal Hemoglobin"),
        },
        F::Hematocrit => match sex {
            Sex::Male => r(41.0, 50.0, "%", "Normal Hematocrit (Male)"),
            Sex::Female => r(36.0, 44.0, "%", "Normal Hematocrit (Female)"),
            Sex::Other => r(36.0, 48.0, "%", "Normal Hematocrit"),
        },
        F::Wbc => r(4.0, 11.0, "×10³/µL", "Normal White Blood Cell Count"),
        F::Rbc => match sex {
            Sex::Male => r(4.7, 6.1, "million/µL", "Normal RBC (Male)"),
            Sex::Female => r(4.2, 5.4, "million/µL", "Normal RBC (Female)"),
            Sex::Other => r(4.2, 5.8, "million/µL", "Normal RBC"),
        },
        F::Platelets => r(150.0, 400.0, "×10³/µL", "Normal Platelet Count"),
        F::Neutrophils => r(40.0, 70.0, "%", "Normal Neutrophils"),
        F::Lymphocytes => r(20.0, 40.0, "%", "Normal Lymphocytes"),
        F::Monocytes => r(2.0, 8.0, "%", "Normal Monocytes"),
        F::Eosinophils => r(1.0, 4.0, "%", "Normal Eosinophils"),
        F::Basophils => r(0.5, 1.0, "%", "Normal Basophils"),
        F::TotalCholesterol => r(125.0, 200.0, "mg/dL", "Desirable Total Cholesterol"),
        F::LdlCholesterol => r(0.0, 100.0, "mg/dL", "Optimal LDL"),
        F::HdlCholesterol => r(40.0, 100.0, "mg/dL", "Healthy HDL"),
        F::Triglycerides => r(0.0, 150.0, "mg/dL", "Normal Triglycerides"),
        F::FastingGlucose => r(70.0, 100.0, "mg/dL", "Normal Fasting Glucose"),
        F::HbA1c => r(4.0, 5.6, "%", "Normal HbA1c"),
        F::FastingInsulin => r(2.0, 25.0, "µIU/mL", "Normal Fasting Insulin"),
        F::Alt => r(7.0, 56.0, "U/L", "Normal ALT"),
        F::Ast => r(10.0, 40.0, "U/L", "Normal AST"),
        F::Alp => r(44.0, 147.0, "U/L", "Normal Alkaline Phosphatase"),
        F::Bilirubin => r(0.1, 1.2, "mg/dL", "Normal Total Bilirubin"),
        F::Albumin => r(3.5, 5.0, "g/dL", "Normal Albumin"),
        F::Creatinine => match sex {
            Sex::Male => r(0.7, 1.3, "mg/dL", "Normal Creatinine (Male)"),
            Sex::Female => r(0.6, 1.1, "mg/dL", "Normal Creatinine (Female)"),
            Sex::Other => r(0.6, 1.2, "mg/dL", "Normal Creatinine"),
        },
        F::Egfr => {
            if age >= 60 {
                r(60.0, 89.0, "mL/min/1.73m²", "Normal eGFR (60+)")
            } else {
                r(90.0, 120.0, "mL/min/1.73m²", "Normal eGFR")
            }
        }
        F::UricAcid => match sex {
            Sex::Male => r(3.4, 7.0, "mg/dL", "Normal Uric Acid (Male)"),
            Sex::Female => r(2.4, 6.0, "mg/dL", "Normal Uric Acid (Female)"),
            Sex::Other => r(2.4, 7.0, "mg/dL", "Normal Uric Acid"),
        },
        F::Bun => r(7.0, 20.0, "mg/dL", "Normal BUN"),
        F::Sodium => r(135.0, 145.0, "mEq/L", "Normal Sodium"),
        F::Potassium => r(3.5, 5.0, "mEq/L", "Normal Potassium"),
        F::Chloride => r(96.0, 106.0, "mEq/L", "Normal Chloride"),
        F::Calcium => r(8.5, 10.5, "mg/dL", "Normal Calcium"),
        F::Magnesium => r(1.7, 2.2, "mg/dL", "Normal Magnesium"),
        F::HeartRate => {
            if age < 18 {
                r(70.0, 100.0, "BPM", "Normal Heart Rate (Youth)")
            } else if age >= 60 {
                r(60.0, 90.0, "BPM", "Normal Heart Rate (Senior)")
            } else {
                r(60.0, 100.0, "BPM", "Normal Resting Heart Rate")
            }
        }
        F::SystolicBp => r(90.0, 120.0, "mmHg", "Normal Systolic Blood Pressure"),
        F::DiastolicBp => r(60.0, 80.0, "mmHg", "Normal Diastolic Blood Pressure"),
        F::Spo2 => r(95.0, 100.0, "%", "Normal Oxygen Saturation"),
        F::RespiratoryRate => r(12.0, 20.0, "breaths/min", "Normal Respiratory Rate"),
        F::Temperature => r(97.0, 99.0, "°F", "Normal Body Temperature"),
        F::Tsh => r(0.4, 4.0, "mIU/L", "Normal TSH"),
        F::FreeT3 => r(2.3, 4.2, "pg/mL", "Normal Free T3"),
        F::FreeT4 => r(0.8, 1.8, "ng/dL", "Normal Free T4"),
        F::T3 => r(80.0, 200.0, "ng/dL", "Normal T3"),
        F::T4 => r(5.0, 12.0, "µg/dL", "Normal T4"),
        F::VitaminD => r(30.0, 100.0, "ng/mL", "Sufficient Vitamin D"),
        F::VitaminB12 => r(200.0, 900.0, "pg/mL", "Normal Vitamin B12"),
        F::Folate => r(2.7, 17.0, "ng/mL", "Normal Folate"),
        F::Ferritin => match sex {
            Sex::Male => r(24.0, 336.0, "ng/mL", "Normal Ferritin (Male)"),
            Sex::Female => r(11.0, 307.0, "ng/mL", "Normal Ferritin (Female)"),
            Sex::Other => r(11.0, 336.0, "ng/mL", "Normal Ferritin"),
        },
        F::Iron => r(60.0, 170.0, "µg/dL", "Normal Serum Iron"),
        F::Troponin => r(0.0, 0.04, "ng/mL", "Normal Troponin I"),
        F::CkMb => r(0.0, 5.0, "ng/mL", "Normal CK-MB"),
        F::Bnp => r(0.0, 100.0, "pg/mL", "Normal BNP"),
        F::Crp => r(0.0, 10.0, "mg/L", "Normal CRP"),
        F::Esr => match sex {
            Sex::Male => r(0.0, 15.0, "mm/hr", "Normal ESR (Male)"),
            Sex::Female => r(0.0, 20.0, "mm/hr", "Normal ESR (Female)"),
            Sex::Other => r(0.0, 20.0, "mm/hr", "Normal ESR"),
        },
    }
}

/// Resolves reference ranges for one user profile and classifies values against them.
#[derive(Debug, Clone)]
pub struct StandardsProvider {
    profile: UserProfile,
    thresholds: SeverityThresholds,
}

impl StandardsProvider {
    pub fn new(profile: UserProfile, thresholds: SeverityThresholds) -> Self {
        Self {
            profile,
            thresholds,
        }
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Range for a free-text parameter name, `None` when no family matches.
    pub fn standard_for(&self, parameter: &str) -> Option<StandardRange> {
        resolve_family(parameter).map(|family| range_for(family, &self.profile))
    }

    /// Classify `value` for `parameter`. Unknown parameters are neutral, never an error.
    pub fn assess(&self, parameter: &str, value: f64) -> Assessment {
        let Some(standard) = self.standard_for(parameter) else {
            tracing::debug!(parameter, "No reference range available");
            return Assessment {
                status: AssessmentStatus::NoStandard,
                severity: AssessmentStatus::NoStandard.severity(),
                standard: None,
                message: GuidanceMessages::no_standard(parameter),
            };
        };

        let status = standard.assess(value, &self.thresholds);
        Assessment {
            status,
            severity: status.severity(),
            message: GuidanceMessages::for_status(status, parameter, Some(&standard)),
            standard: Some(standard),
        }
    }
}

impl Default for StandardsProvider {
    fn default() -> Self {
        Self::new(UserProfile::default(), SeverityThresholds::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Severity;

    fn male(age: i64) -> StandardsProvider {
        StandardsProvider::new(
            UserProfile::new(age, Sex::Male).unwrap(),
            SeverityThresholds::default(),
        )
    }

    fn female(age: i64) -> StandardsProvider {
        StandardsProvider::new(
            UserProfile::new(age, Sex::Female).unwrap(),
            SeverityThresholds::default(),
        )
    }

    const ALL_FAMILIES: &[ParameterFamily] = &[
        F::Hemoglobin,
        F::Hematocrit,
        F::Wbc,
        F::Rbc,
        F::Platelets,
        F::Neutrophils,
        F::Lymphocytes,
        F::Monocytes,
        F::Eosinophils,
        F::Basophils,
        F::LdlCholesterol,
        F::HdlCholesterol,
        F::TotalCholesterol,
        F::Triglycerides,
        F::HbA1c,
        F::FastingGlucose,
        F::FastingInsulin,
        F::Alt,
        F::Ast,
        F::Alp,
        F::Bilirubin,
        F::Albumin,
        F::Creatinine,
        F::Egfr,
        F::UricAcid,
        F::Bun,
        F::Sodium,
        F::Potassium,
        F::Chloride,
        F::Calcium,
        F::Magnesium,
        F::HeartRate,
        F::SystolicBp,
        F::DiastolicBp,
        F::Spo2,
        F::RespiratoryRate,
        F::Temperature,
        F::Tsh,
        F::FreeT3,
        F::FreeT4,
        F::T3,
        F::T4,
        F::VitaminD,
        F::VitaminB12,
        F::Folate,
        F::Ferritin,
        F::Iron,
        F::Troponin,
        F::CkMb,
        F::Bnp,
        F::Crp,
        F::Esr,
    ];

    #[test]
    fn every_family_has_a_rule() {
        for family in ALL_FAMILIES {
            assert!(
                RESOLUTION_RULES.iter().any(|r| r.family == *family),
                "{family:?} has no resolution rule"
            );
        }
        assert_eq!(RESOLUTION_RULES.len(), ALL_FAMILIES.len());
    }

    #[test]
    fn ranges_satisfy_min_le_max_for_all_profiles() {
        for age in [5, 30, 45, 65] {
            for sex in [Sex::Male, Sex::Female, Sex::Other] {
                let profile = UserProfile::new(age, sex).unwrap();
                for family in ALL_FAMILIES {
                    let range = range_for(*family, &profile);
                    assert!(
                        range.min <= range.max,
                        "{family:?} for {sex} age {age}: {} > {}",
                        range.min,
                        range.max
                    );
                    assert!(!range.unit.is_empty());
                }
            }
        }
    }

    #[test]
    fn ldl_and_hdl_resolve_before_generic_cholesterol() {
        assert_eq!(resolve_family("LDL Cholesterol"), Some(F::LdlCholesterol));
        assert_eq!(resolve_family("hdl cholesterol"), Some(F::HdlCholesterol));
        assert_eq!(resolve_family("Total Cholesterol"), Some(F::TotalCholesterol));
        assert_eq!(resolve_family("  CHOLESTEROL "), Some(F::TotalCholesterol));
    }

    #[test]
    fn glycated_hemoglobin_is_not_hemoglobin() {
        assert_eq!(resolve_family("HbA1c"), Some(F::HbA1c));
        assert_eq!(resolve_family("Glycated Hemoglobin"), Some(F::HbA1c));
        assert_eq!(resolve_family("Hemoglobin"), Some(F::Hemoglobin));
        assert_eq!(resolve_family("Hb"), Some(F::Hemoglobin));
    }

    #[test]
    fn short_aliases_do_not_hit_inside_words() {
        // "fasting" contains "ast", "salt" contains "alt".
        assert_eq!(resolve_family("Fasting Glucose"), Some(F::FastingGlucose));
        assert_eq!(resolve_family("salt intake"), None);
        assert_eq!(resolve_family("AST (SGOT)"), Some(F::Ast));
        assert_eq!(resolve_family("ALT"), Some(F::Alt));
    }

    #[test]
    fn free_thyroid_hormones_resolve_before_totals() {
        assert_eq!(resolve_family("Free T4"), Some(F::FreeT4));
        assert_eq!(resolve_family("FT3"), Some(F::FreeT3));
        assert_eq!(resolve_family("T4"), Some(F::T4));
        assert_eq!(resolve_family("Total T3"), Some(F::T3));
    }

    #[test]
    fn vitals_resolve() {
        assert_eq!(resolve_family("Blood Pressure Systolic"), Some(F::SystolicBp));
        assert_eq!(resolve_family("Blood Pressure Diastolic"), Some(F::DiastolicBp));
        assert_eq!(resolve_family("Respiratory Rate"), Some(F::RespiratoryRate));
        assert_eq!(resolve_family("Heart Rate"), Some(F::HeartRate));
        assert_eq!(resolve_family("SpO2"), Some(F::Spo2));
    }

    #[test]
    fn ferritin_before_iron_and_uric_acid_before_bun() {
        assert_eq!(resolve_family("Ferritin"), Some(F::Ferritin));
        assert_eq!(resolve_family("Serum Iron"), Some(F::Iron));
        assert_eq!(resolve_family("Uric Acid"), Some(F::UricAcid));
        assert_eq!(resolve_family("Blood Urea Nitrogen"), Some(F::Bun));
    }

    #[test]
    fn unknown_parameter_has_no_standard() {
        assert_eq!(resolve_family("Lipase"), None);
        assert_eq!(resolve_family(""), None);

        let assessment = male(40).assess("Lipase", 50.0);
        assert_eq!(assessment.status, AssessmentStatus::NoStandard);
        assert_eq!(assessment.severity, Severity::Normal);
        assert!(assessment.standard.is_none());
    }

    #[test]
    fn hemoglobin_range_depends_on_sex() {
        assert_eq!(male(40).standard_for("Hemoglobin").unwrap().min, 13.0);
        assert_eq!(female(40).standard_for("Hemoglobin").unwrap().max, 15.0);
        assert_eq!(
            StandardsProvider::default().standard_for("Hemoglobin").unwrap().max,
            16.0
        );
    }

    #[test]
    fn creatinine_and_rbc_depend_on_sex() {
        assert_eq!(male(40).standard_for("Creatinine").unwrap().max, 1.3);
        assert_eq!(female(40).standard_for("Creatinine").unwrap().max, 1.1);
        assert_eq!(male(40).standard_for("RBC").unwrap().min, 4.7);
        assert_eq!(female(40).standard_for("RBC").unwrap().min, 4.2);
    }

    #[test]
    fn egfr_shifts_at_sixty() {
        assert_eq!(male(59).standard_for("eGFR").unwrap().min, 90.0);
        assert_eq!(male(60).standard_for("eGFR").unwrap().min, 60.0);
    }

    #[test]
    fn heart_rate_shifts_with_age() {
        assert_eq!(male(12).standard_for("Heart Rate").unwrap().min, 70.0);
        assert_eq!(male(18).standard_for("Heart Rate").unwrap().max, 100.0);
        assert_eq!(male(60).standard_for("Heart Rate").unwrap().max, 90.0);
    }

    #[test]
    fn critically_low_hemoglobin_for_male() {
        let assessment = male(40).assess("Hemoglobin", 8.0);
        assert_eq!(assessment.status, AssessmentStatus::CriticallyLow);
        assert_eq!(assessment.severity, Severity::Critical);
        assert!(assessment.message.contains("13.0-17.0 g/dL"));
    }

    #[test]
    fn assessment_is_deterministic() {
        let provider = female(33);
        assert_eq!(provider.assess("Ferritin", 5.0), provider.assess("Ferritin", 5.0));
    }
}
