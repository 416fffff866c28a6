use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// A medication mentioned in the document text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicationMention {
    pub name: String,
    pub dosage: String,
    pub frequency: String,
}

/// Frequency reported for fallback mentions with no explicit schedule.
pub const DEFAULT_FREQUENCY: &str = "As prescribed";

/// `Rx: <name> <N mg> <N times daily>` style lines.
static PRESCRIPTION_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:rx:|medication:|drug:)\s*([a-z]+)\s+(\d+\s*mg)\s+(\d+\s*(?:times?|x)\s*(?:daily|per day|a day))",
    )
    .expect("Invalid prescription regex")
});

/// Common drugs recognised by name followed by a dose.
const COMMON_MEDICATIONS: &[&str] = &[
    "aspirin",
    "metformin",
    "lisinopril",
    "atorvastatin",
    "levothyroxine",
    "amlodipine",
];

static COMMON_MEDICATION_DOSES: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    COMMON_MEDICATIONS
        .iter()
        .map(|name| {
            let regex = Regex::new(&format!(r"(?i)\b{name}\s+(\d+\s*mg)"))
                .expect("Invalid medication dose regex");
            (*name, regex)
        })
        .collect()
});

/// Medication mentions, deduplicated by lowercase name. The first mention wins.
pub fn extract_medications(text: &str) -> Vec<MedicationMention> {
    let mut seen = HashSet::new();
    let mut mentions = Vec::new();

    for caps in PRESCRIPTION_LINE.captures_iter(text) {
        let (Some(name), Some(dosage), Some(frequency)) = (caps.get(1), caps.get(2), caps.get(3))
        else {
            continue;
        };
        if seen.insert(name.as_str().to_lowercase()) {
            mentions.push(MedicationMention {
                name: capitalize(name.as_str()),
                dosage: dosage.as_str().to_string(),
                frequency: frequency.as_str().to_string(),
            });
        }
    }

    for (name, regex) in COMMON_MEDICATION_DOSES.iter() {
        if seen.contains(*name) {
            continue;
        }
        if let Some(dosage) = regex.captures(text).and_then(|c| c.get(1)) {
            seen.insert(name.to_string());
            mentions.push(MedicationMention {
                name: capitalize(name),
                dosage: dosage.as_str().to_string(),
                frequency: DEFAULT_FREQUENCY.to_string(),
            });
        }
    }

    if !mentions.is_empty() {
        tracing::debug!(count = mentions.len(), "Extracted medication mentions");
    }
    mentions
}

fn capitalize(word: &str) -> String {
    let lower = word.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
