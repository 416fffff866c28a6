use serde::{Deserialize, Serialize};

use super::enums::Sex;
use super::ModelError;

/// Upper bound accepted for a profile age.
pub const MAX_AGE_YEARS: u32 = 150;

/// Age used when no profile is available (neutral, mid-range adult).
pub const FALLBACK_AGE_YEARS: u32 = 40;

/// Demographic context used to pick reference ranges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredProfile")]
pub struct UserProfile {
    age: u32,
    sex: Sex,
    height_cm: Option<f64>,
    weight_kg: Option<f64>,
}

impl UserProfile {
    /// Validating constructor. Negative or implausible ages are rejected here,
    /// never inside the assessor.
    pub fn new(age: i64, sex: Sex) -> Result<Self, ModelError> {
        if age < 0 || age > i64::from(MAX_AGE_YEARS) {
            return Err(ModelError::InvalidAge {
                age,
                max: MAX_AGE_YEARS,
            });
        }
        Ok(Self {
            age: age as u32,
            sex,
            height_cm: None,
            weight_kg: None,
        })
    }

    /// Attach height (cm) and weight (kg), enabling BMI.
    pub fn with_body_metrics(mut self, height_cm: f64, weight_kg: f64) -> Result<Self, ModelError> {
        self.height_cm = Some(positive_metric("height_cm", height_cm)?);
        self.weight_kg = Some(positive_metric("weight_kg", weight_kg)?);
        Ok(self)
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn sex(&self) -> Sex {
        self.sex
    }

    pub fn height_cm(&self) -> Option<f64> {
        self.height_cm
    }

    pub fn weight_kg(&self) -> Option<f64> {
        self.weight_kg
    }

    /// Body mass index (kg/m²) when both body metrics are known.
    pub fn bmi(&self) -> Option<f64> {
        let height_m = self.height_cm? / 100.0;
        let weight = self.weight_kg?;
        Some(weight / (height_m * height_m))
    }
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            age: FALLBACK_AGE_YEARS,
            sex: Sex::Other,
            height_cm: None,
            weight_kg: None,
        }
    }
}

/// Wire shape of a profile, validated into a `UserProfile` on deserialization.
#[derive(Deserialize)]
struct StoredProfile {
    age: i64,
    sex: Sex,
    #[serde(default)]
    height_cm: Option<f64>,
    #[serde(default)]
    weight_kg: Option<f64>,
}

impl TryFrom<StoredProfile> for UserProfile {
    type Error = ModelError;

    fn try_from(stored: StoredProfile) -> Result<Self, Self::Error> {
        let profile = Self::new(stored.age, stored.sex)?;
        Ok(Self {
            height_cm: stored
                .height_cm
                .map(|v| positive_metric("height_cm", v))
                .transpose()?,
            weight_kg: stored
                .weight_kg
                .map(|v| positive_metric("weight_kg", v))
                .transpose()?,
            ..profile
        })
    }
}

fn positive_metric(field: &'static str, value: f64) -> Result<f64, ModelError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ModelError::InvalidBodyMetric { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_profile() {
        let profile = UserProfile::new(35, Sex::Female).unwrap();
        assert_eq!(profile.age(), 35);
        assert_eq!(profile.sex(), Sex::Female);
        assert!(profile.bmi().is_none());
    }

    #[test]
    fn negative_age_rejected() {
        assert_eq!(
            UserProfile::new(-1, Sex::Male).unwrap_err(),
            ModelError::InvalidAge { age: -1, max: MAX_AGE_YEARS }
        );
    }

    #[test]
    fn implausible_age_rejected() {
        assert!(UserProfile::new(151, Sex::Other).is_err());
        assert!(UserProfile::new(150, Sex::Other).is_ok());
        assert!(UserProfile::new(0, Sex::Other).is_ok());
    }

    #[test]
    fn default_is_neutral_mid_range() {
        let profile = UserProfile::default();
        assert_eq!(profile.age(), FALLBACK_AGE_YEARS);
        assert_eq!(profile.sex(), Sex::Other);
    }

    #[test]
    fn bmi_from_body_metrics() {
        let profile = UserProfile::new(30, Sex::Male)
            .unwrap()
            .with_body_metrics(180.0, 81.0)
            .unwrap();
        let bmi = profile.bmi().unwrap();
        assert!((bmi - 25.0).abs() < 1e-9);
    }

    #[test]
    fn body_metrics_must_be_positive_and_finite() {
        let base = UserProfile::new(30, Sex::Male).unwrap();
        assert!(base.clone().with_body_metrics(0.0, 70.0).is_err());
        assert!(base.clone().with_body_metrics(170.0, f64::NAN).is_err());
        assert!(matches!(
            base.with_body_metrics(-5.0, 70.0),
            Err(ModelError::InvalidBodyMetric { field: "height_cm", .. })
        ));
    }

    #[test]
    fn deserialization_validates() {
        let profile: UserProfile =
            serde_json::from_str(r#"{"age": 52, "sex": "Female", "height_cm": 165.0}"#).unwrap();
        assert_eq!(profile.age(), 52);
        assert_eq!(profile.sex(), Sex::Female);
        assert_eq!(profile.height_cm(), Some(165.0));
        assert_eq!(profile.weight_kg(), None);

        let too_old = serde_json::from_str::<UserProfile>(r#"{"age": 200, "sex": "Male"}"#);
        assert!(too_old.is_err());
        let negative = serde_json::from_str::<UserProfile>(r#"{"age": -3, "sex": "Male"}"#);
        assert!(negative.is_err());
        let bad_weight =
            serde_json::from_str::<UserProfile>(r#"{"age": 30, "sex": "Male", "weight_kg": 0.0}"#);
        assert!(bad_weight.is_err());
    }

    #[test]
    fn serialized_profile_reads_back() {
        let profile = UserProfile::new(30, Sex::Male)
            .unwrap()
            .with_body_metrics(180.0, 81.0)
            .unwrap();
        let json = serde_json::to_string(&profile).unwrap();
        let back: UserProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, profile);
    }
}
