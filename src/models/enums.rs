use serde::{Deserialize, Serialize};

use super::ModelError;

/// Macro to generate enum with as_str + Display + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ModelError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(Sex {
    Male => "male",
    Female => "female",
    Other => "other",
});

// Declaration order is the escalation order: Normal < Borderline < Abnormal < Critical.
str_enum!(Severity {
    Normal => "normal",
    Borderline => "borderline",
    Abnormal => "abnormal",
    Critical => "critical",
});

str_enum!(AssessmentStatus {
    Normal => "Normal",
    SlightlyBelowNormal => "Slightly Below Normal",
    Low => "Low",
    CriticallyLow => "Critically Low",
    SlightlyAboveNormal => "Slightly Above Normal",
    High => "High",
    CriticallyHigh => "Critically High",
    NoStandard => "No Standard Available",
});

str_enum!(LabCategory {
    Blood => "blood",
    Lipids => "lipids",
    Metabolic => "metabolic",
    Liver => "liver",
    Kidney => "kidney",
    Electrolytes => "electrolytes",
    Thyroid => "thyroid",
    Vitamins => "vitamins",
    Cardiac => "cardiac",
    Cardiovascular => "cardiovascular",
    Respiratory => "respiratory",
    Inflammatory => "inflammatory",
    General => "general",
});

str_enum!(Organ {
    Heart => "Heart",
    Lungs => "Lungs",
    Kidneys => "Kidneys",
    Liver => "Liver",
    Blood => "Blood",
    Pancreas => "Pancreas",
    Thyroid => "Thyroid",
    General => "General",
});

str_enum!(ReportType {
    BloodTest => "Blood Test",
    LipidPanel => "Lipid Panel",
    LiverFunctionTest => "Liver Function Test",
    KidneyFunctionTest => "Kidney Function Test",
    ThyroidPanel => "Thyroid Panel",
    XRay => "X-Ray",
    Mri => "MRI",
    CtScan => "CT Scan",
    Prescription => "Prescription",
    DischargeSummary => "Discharge Summary",
    MedicalReport => "Medical Report",
});

impl AssessmentStatus {
    /// Severity tier for this status. `NoStandard` is neutral.
    pub fn severity(&self) -> Severity {
        match self {
            Self::Normal | Self::NoStandard => Severity::Normal,
            Self::SlightlyBelowNormal | Self::SlightlyAboveNormal => Severity::Borderline,
            Self::Low | Self::High => Severity::Abnormal,
            Self::CriticallyLow | Self::CriticallyHigh => Severity::Critical,
        }
    }
}

impl Organ {
    /// Static category → organ table used for trend grouping.
    pub fn for_category(category: LabCategory) -> Self {
        match category {
            LabCategory::Blood => Self::Blood,
            LabCategory::Kidney => Self::Kidneys,
            LabCategory::Liver => Self::Liver,
            LabCategory::Lipids | LabCategory::Cardiac | LabCategory::Cardiovascular => {
                Self::Heart
            }
            LabCategory::Metabolic => Self::Pancreas,
            LabCategory::Thyroid => Self::Thyroid,
            LabCategory::Respiratory => Self::Lungs,
            LabCategory::Vitamins
            | LabCategory::Electrolytes
            | LabCategory::Inflammatory
            | LabCategory::General => Self::General,
        }
    }

    /// Lenient mapping for free-form category labels coming from stored records.
    pub fn from_category_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "blood" | "hematology" => Self::Blood,
            "kidney" | "kidneys" | "renal" => Self::Kidneys,
            "liver" | "hepatic" => Self::Liver,
            "lipid" | "lipids" | "cholesterol" | "cardiovascular" | "cardiac" | "heart" => {
                Self::Heart
            }
            "metabolic" | "diabetes" | "glucose" => Self::Pancreas,
            "thyroid" => Self::Thyroid,
            "lung" | "lungs" | "respiratory" => Self::Lungs,
            _ => Self::General,
        }
    }
}
