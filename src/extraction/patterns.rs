use std::sync::LazyLock;

use regex::Regex;

use crate::models::LabCategory;

/// One entry of the lab-parameter bank.
#[derive(Debug)]
pub struct ParameterPattern {
    pub key: &'static str,
    pub display_name: &'static str,
    pub unit: &'static str,
    pub category: LabCategory,
    /// Range text used when the assessor has no standard for the parameter.
    pub default_range: &'static str,
    regex: Regex,
    excluded_prefixes: &'static [&'static str],
}

impl ParameterPattern {
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// True if the word right before `start` is one of the excluded prefixes
    /// ("ldl" before "cholesterol", "free" before "t4").
    pub fn has_excluded_prefix(&self, text: &str, start: usize) -> bool {
        if self.excluded_prefixes.is_empty() {
            return false;
        }
        let before = text[..start].trim_end_matches(|c: char| !c.is_alphanumeric());
        let Some(word) = before.rsplit(|c: char| !c.is_alphanumeric()).next() else {
            return false;
        };
        let word = word.to_lowercase();
        self.excluded_prefixes.iter().any(|p| *p == word)
    }

    fn excluding(mut self, prefixes: &'static [&'static str]) -> Self {
        self.excluded_prefixes = prefixes;
        self
    }
}

/// Label, optional qualifier word, optional parenthetical (unit or synonym),
/// optional separator, then the value. Everything after the label stays on one line.
fn labelled(label: &str) -> String {
    format!(
        r"(?i)\b(?:{label})\b(?:[ \t]+(?:level|levels|count|value|result))?(?:[ \t]*\([^)\n]*\))?[ \t]*(?:[:=]|\bis\b|\bwas\b|\bof\b)?[ \t]*([<>~]?\d+(?:\.\d+)?)"
    )
}

fn lab(
    key: &'static str,
    label: &str,
    display_name: &'static str,
    unit: &'static str,
    category: LabCategory,
    default_range: &'static str,
) -> ParameterPattern {
    raw(key, &labelled(label), display_name, unit, category, default_range)
}

/// Entry with a hand-written regex. The first participating capture group is the value.
fn raw(
    key: &'static str,
    regex_str: &str,
    display_name: &'static str,
    unit: &'static str,
    category: LabCategory,
    default_range: &'static str,
) -> ParameterPattern {
    ParameterPattern {
        key,
        display_name,
        unit,
        category,
        default_range,
        regex: Regex::new(regex_str).expect("Invalid lab parameter regex"),
        excluded_prefixes: &[],
    }
}

const BP_LABEL: &str = r"(?i)\b(?:blood\s+pressure|bp)\b(?:[ \t]*\([^)\n]*\))?[ \t]*(?:[:=]|\bis\b|\bwas\b|\bof\b)?[ \t]*";

/// The bank, in extraction order. Keys are unique.
pub static LAB_PATTERNS: LazyLock<Vec<ParameterPattern>> = LazyLock::new(|| {
    use LabCategory as C;

    vec![
        // ── Vital signs ─────────────────────────────────────────
        lab(
            "heart_rate",
            r"heart\s+rate|pulse\s+rate|pulse|hr",
            "Heart Rate",
            "BPM",
            C::Cardiovascular,
            "60-100 BPM",
        ),
        lab(
            "spo2",
            r"spo2|sp\s*o2|sao2|oxygen\s+saturation|o2\s+sat(?:uration)?|pulse\s+ox(?:imetry)?",
            "SpO2",
            "%",
            C::Respiratory,
            "95-100 %",
        ),
        lab(
            "respiratory_rate",
            r"respiratory\s+rate|breathing\s+rate|respirations?|rr",
            "Respiratory Rate",
            "breaths/min",
            C::Respiratory,
            "12-20 breaths/min",
        ),
        raw(
            "blood_pressure_systolic",
            &format!(
                r"{BP_LABEL}(\d{{2,3}})[ \t]*/[ \t]*\d{{2,3}}|\bsystolic(?:\s+(?:bp|blood\s+pressure))?\b[ \t]*(?:[:=]|\bis\b|\bwas\b|\bof\b)?[ \t]*(\d{{2,3}})"
            ),
            "Blood Pressure Systolic",
            "mmHg",
            C::Cardiovascular,
            "90-120 mmHg",
        ),
        raw(
            "blood_pressure_diastolic",
            &format!(
                r"{BP_LABEL}\d{{2,3}}[ \t]*/[ \t]*(\d{{2,3}})|\bdiastolic(?:\s+(?:bp|blood\s+pressure))?\b[ \t]*(?:[:=]|\bis\b|\bwas\b|\bof\b)?[ \t]*(\d{{2,3}})"
            ),
            "Blood Pressure Diastolic",
            "mmHg",
            C::Cardiovascular,
            "60-80 mmHg",
        ),
        lab(
            "temperature",
            r"body\s+temperature|body\s+temp|temperature|temp",
            "Body Temperature",
            "°F",
            C::General,
            "97-99 °F",
        ),
        // ── Complete blood count ────────────────────────────────
        lab(
            "hemoglobin",
            r"hemoglobin|haemoglobin|hgb|hb",
            "Hemoglobin",
            "g/dL",
            C::Blood,
            "12-17 g/dL",
        )
        .excluding(&["glycated", "glycosylated"]),
        lab(
            "hematocrit",
            r"hematocrit|haematocrit|hct|pcv",
            "Hematocrit",
            "%",
            C::Blood,
            "36-50 %",
        ),
        lab(
            "rbc",
            r"rbc|red\s+blood\s+cells?|red\s+cell\s+count|erythrocytes?",
            "Red Blood Cells",
            "million/µL",
            C::Blood,
            "4.2-6.1 million/µL",
        ),
        lab(
            "wbc",
            r"wbc|white\s+blood\s+cells?|white\s+cell\s+count|leukocytes?|leucocytes?|tlc",
            "White Blood Cells",
            "×10³/µL",
            C::Blood,
            "4.0-11.0 ×10³/µL",
        ),
        lab(
            "platelets",
            r"platelets?|plt|thrombocytes?",
            "Platelet Count",
            "×10³/µL",
            C::Blood,
            "150-400 ×10³/µL",
        ),
        lab(
            "neutrophils",
            r"neutrophils?|neut|polymorphs",
            "Neutrophils",
            "%",
            C::Blood,
            "40-70 %",
        ),
        lab(
            "lymphocytes",
            r"lymphocytes?|lymph",
            "Lymphocytes",
            "%",
            C::Blood,
            "20-40 %",
        ),
        lab(
            "monocytes",
            r"monocytes?|mono",
            "Monocytes",
            "%",
            C::Blood,
            "2-8 %",
        ),
        lab(
            "eosinophils",
            r"eosinophils?|eosino|eos",
            "Eosinophils",
            "%",
            C::Blood,
            "1-4 %",
        ),
        lab(
            "basophils",
            r"basophils?|baso",
            "Basophils",
            "%",
            C::Blood,
            "0.5-1 %",
        ),
        // ── Lipids ──────────────────────────────────────────────
        lab(
            "cholesterol",
            r"(?:total\s+)?(?:serum\s+)?cholesterol",
            "Total Cholesterol",
            "mg/dL",
            C::Lipids,
            "125-200 mg/dL",
        )
        .excluding(&["ldl", "hdl", "vldl", "non"]),
        lab(
            "ldl",
            r"ldl(?:[ \t-]*(?:cholesterol|c))?|low[ \t-]+density\s+lipoprotein",
            "LDL Cholesterol",
            "mg/dL",
            C::Lipids,
            "0-100 mg/dL",
        ),
        lab(
            "hdl",
            r"hdl(?:[ \t-]*(?:cholesterol|c))?|high[ \t-]+density\s+lipoprotein",
            "HDL Cholesterol",
            "mg/dL",
            C::Lipids,
            "40-100 mg/dL",
        )
        .excluding(&["non"]),
        lab(
            "triglycerides",
            r"triglycerides?|tg",
            "Triglycerides",
            "mg/dL",
            C::Lipids,
            "0-150 mg/dL",
        ),
        // ── Glucose and diabetes ────────────────────────────────
        lab(
            "glucose",
            r"(?:fasting\s+)?(?:blood\s+|plasma\s+|serum\s+)?glucose|(?:fasting\s+)?blood\s+sugar|fbs|fbg",
            "Fasting Glucose",
            "mg/dL",
            C::Metabolic,
            "70-100 mg/dL",
        ),
        lab(
            "hba1c",
            r"hba1c|hb\s*a1c|a1c|(?:glycated|glycosylated)\s+ha?emoglobin|ha?emoglobin\s+a1c",
            "HbA1c",
            "%",
            C::Metabolic,
            "4.0-5.6 %",
        ),
        lab(
            "fasting_insulin",
            r"(?:fasting\s+)?(?:serum\s+)?insulin",
            "Fasting Insulin",
            "µIU/mL",
            C::Metabolic,
            "2-25 µIU/mL",
        ),
        // ── Liver ───────────────────────────────────────────────
        lab(
            "alt",
            r"alt|sgpt|alanine\s+amino\s*transferase|alanine\s+transaminase",
            "ALT (SGPT)",
            "U/L",
            C::Liver,
            "7-56 U/L",
        ),
        lab(
            "ast",
            r"ast|sgot|aspartate\s+amino\s*transferase|aspartate\s+transaminase",
            "AST (SGOT)",
            "U/L",
            C::Liver,
            "10-40 U/L",
        ),
        lab(
            "alp",
            r"alp|alkaline\s+phosphatase|alk\s+phos",
            "Alkaline Phosphatase",
            "U/L",
            C::Liver,
            "44-147 U/L",
        ),
        lab(
            "bilirubin",
            r"(?:total\s+|serum\s+)?bilirubin",
            "Total Bilirubin",
            "mg/dL",
            C::Liver,
            "0.1-1.2 mg/dL",
        )
        .excluding(&["direct", "indirect", "conjugated", "unconjugated"]),
        lab(
            "albumin",
            r"(?:serum\s+)?albumin",
            "Albumin",
            "g/dL",
            C::Liver,
            "3.5-5.0 g/dL",
        ),
        // ── Kidney ──────────────────────────────────────────────
        lab(
            "creatinine",
            r"(?:serum\s+)?creatinine|creat",
            "Creatinine",
            "mg/dL",
            C::Kidney,
            "0.6-1.3 mg/dL",
        ),
        lab(
            "bun",
            r"bun|blood\s+urea\s+nitrogen|urea\s+nitrogen",
            "Blood Urea Nitrogen",
            "mg/dL",
            C::Kidney,
            "7-20 mg/dL",
        ),
        lab(
            "egfr",
            r"egfr|gfr|estimated\s+gfr",
            "eGFR",
            "mL/min/1.73m²",
            C::Kidney,
            "90-120 mL/min/1.73m²",
        ),
        lab(
            "uric_acid",
            r"(?:serum\s+)?uric\s+acid|urate",
            "Uric Acid",
            "mg/dL",
            C::Kidney,
            "2.4-7.0 mg/dL",
        ),
        // ── Electrolytes ────────────────────────────────────────
        lab(
            "sodium",
            r"(?:serum\s+)?sodium|na",
            "Sodium",
            "mEq/L",
            C::Electrolytes,
            "135-145 mEq/L",
        ),
        lab(
            "potassium",
            r"(?:serum\s+)?potassium",
            "Potassium",
            "mEq/L",
            C::Electrolytes,
            "3.5-5.0 mEq/L",
        ),
        lab(
            "chloride",
            r"(?:serum\s+)?chloride",
            "Chloride",
            "mEq/L",
            C::Electrolytes,
            "96-106 mEq/L",
        ),
        lab(
            "calcium",
            r"(?:total\s+|serum\s+)?calcium",
            "Calcium",
            "mg/dL",
            C::Electrolytes,
            "8.5-10.5 mg/dL",
        )
        .excluding(&["ionized", "ionised"]),
        lab(
            "magnesium",
            r"(?:serum\s+)?magnesium",
            "Magnesium",
            "mg/dL",
            C::Electrolytes,
            "1.7-2.2 mg/dL",
        ),
        // ── Thyroid ─────────────────────────────────────────────
        lab(
            "tsh",
            r"tsh|thyroid\s+stimulating\s+hormone",
            "TSH",
            "mIU/L",
            C::Thyroid,
            "0.4-4.0 mIU/L",
        ),
        lab(
            "t3",
            r"(?:total\s+)?t3|triiodothyronine",
            "Total T3",
            "ng/dL",
            C::Thyroid,
            "80-200 ng/dL",
        )
        .excluding(&["free"]),
        lab(
            "t4",
            r"(?:total\s+)?t4|thyroxine",
            "Total T4",
            "µg/dL",
            C::Thyroid,
            "5-12 µg/dL",
        )
        .excluding(&["free"]),
        lab(
            "free_t3",
            r"free\s+t3|ft3|free\s+triiodothyronine",
            "Free T3",
            "pg/mL",
            C::Thyroid,
            "2.3-4.2 pg/mL",
        ),
        lab(
            "free_t4",
            r"free\s+t4|ft4|free\s+thyroxine",
            "Free T4",
            "ng/dL",
            C::Thyroid,
            "0.8-1.8 ng/dL",
        ),
        // ── Vitamins and iron ───────────────────────────────────
        lab(
            "vitamin_d",
            r"(?:25[ \t-]*(?:oh|hydroxy)[ \t-]*)?vitamin\s+d3?|vit\.?\s*d3?",
            "Vitamin D",
            "ng/mL",
            C::Vitamins,
            "30-100 ng/mL",
        ),
        lab(
            "vitamin_b12",
            r"vitamin\s+b12|vit\.?\s*b12|b12|cobalamin|cyanocobalamin",
            "Vitamin B12",
            "pg/mL",
            C::Vitamins,
            "200-900 pg/mL",
        ),
        lab(
            "folate",
            r"(?:serum\s+)?folate|folic\s+acid",
            "Folate",
            "ng/mL",
            C::Vitamins,
            "2.7-17 ng/mL",
        ),
        lab(
            "iron",
            r"(?:serum\s+)?iron",
            "Serum Iron",
            "µg/dL",
            C::Vitamins,
            "60-170 µg/dL",
        ),
        lab(
            "ferritin",
            r"(?:serum\s+)?ferritin",
            "Ferritin",
            "ng/mL",
            C::Vitamins,
            "11-336 ng/mL",
        ),
        // ── Cardiac markers ─────────────────────────────────────
        lab(
            "troponin",
            r"(?:hs[ \t-]*)?troponin(?:\s+[it])?|trop\s*[it]|ctn[it]",
            "Troponin I",
            "ng/mL",
            C::Cardiac,
            "0-0.04 ng/mL",
        ),
        lab(
            "ck_mb",
            r"ck[ \t-]*mb|creatine\s+kinase[ \t-]*mb",
            "CK-MB",
            "ng/mL",
            C::Cardiac,
            "0-5 ng/mL",
        ),
        lab(
            "bnp",
            r"bnp|b-type\s+natriuretic\s+peptide|brain\s+natriuretic\s+peptide",
            "BNP",
            "pg/mL",
            C::Cardiac,
            "0-100 pg/mL",
        ),
        // ── Inflammatory markers ────────────────────────────────
        lab(
            "crp",
            r"(?:hs[ \t-]*)?crp|c[ \t-]*reactive\s+protein",
            "C-Reactive Protein",
            "mg/L",
            C::Inflammatory,
            "0-10 mg/L",
        ),
        lab(
            "esr",
            r"esr|erythrocyte\s+sedimentation\s+rate|sed(?:imentation)?\s+rate",
            "ESR",
            "mm/hr",
            C::Inflammatory,
            "0-20 mm/hr",
        ),
    ]
});

/// Bank entry for `key`.
pub fn pattern_for(key: &str) -> Option<&'static ParameterPattern> {
    LAB_PATTERNS.iter().find(|p| p.key == key)
}
