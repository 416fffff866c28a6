//! Post-OCR analyte name correction.
//!
//! Fixes common OCR misspellings of lab parameter names before pattern matching.
//! A word is only corrected when it is at least 5 characters long, lies within
//! edit distance 2 of a dictionary term, and that term is the unique best match.

/// Analyte vocabulary. Sorted for binary search, lowercase.
const ANALYTE_TERMS: &[&str] = &[
    "alanine", "albumin", "alkaline", "aminotransferase", "aspartate", "basophils",
    "bicarbonate", "bilirubin", "calcium", "chloride", "cholesterol", "creatine",
    "creatinine", "diastolic", "eosinophils", "erythrocyte", "erythrocytes",
    "ferritin", "folate", "glucose", "haematocrit", "haemoglobin", "hematocrit",
    "hemoglobin", "insulin", "kinase", "leucocytes", "leukocytes", "lipoprotein",
    "lymphocytes", "magnesium", "monocytes", "neutrophils", "nitrogen",
    "phosphatase", "phosphate", "platelets", "potassium", "pressure", "protein",
    "respiratory", "saturation", "sedimentation", "sodium", "systolic",
    "temperature", "thyroxine", "transaminase", "triglycerides", "triiodothyronine",
    "troponin", "vitamin",
];

/// Correct OCR misspellings of analyte names in `text`, preserving the word's case.
pub fn correct_lab_terms(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut word_buf = String::new();
    let mut corrected = 0usize;

    for ch in text.chars() {
        if ch.is_alphanumeric() {
            word_buf.push(ch);
        } else {
            flush_word(&mut word_buf, &mut result, &mut corrected);
            result.push(ch);
        }
    }
    flush_word(&mut word_buf, &mut result, &mut corrected);

    if corrected > 0 {
        tracing::debug!(corrected, "Corrected OCR analyte terms");
    }
    result
}

fn flush_word(word_buf: &mut String, out: &mut String, corrected: &mut usize) {
    if word_buf.is_empty() {
        return;
    }
    match try_correct_word(word_buf) {
        Some(fixed) => {
            *corrected += 1;
            out.push_str(&fixed);
        }
        None => out.push_str(word_buf),
    }
    word_buf.clear();
}

/// Corrected word, or `None` when the word is left as is.
fn try_correct_word(word: &str) -> Option<String> {
    if word.chars().count() < 5 {
        return None;
    }

    let lower = word.to_lowercase();
    if ANALYTE_TERMS.binary_search(&lower.as_str()).is_ok() {
        return None;
    }

    let mut best_term: Option<&str> = None;
    let mut best_distance = 3u32;
    let mut ambiguous = false;

    for &term in ANALYTE_TERMS {
        let len_diff = (lower.chars().count() as i64 - term.len() as i64).unsigned_abs();
        if len_diff > 2 {
            continue;
        }

        let dist = edit_distance(&lower, term);
        if dist < best_distance {
            best_distance = dist;
            best_term = Some(term);
            ambiguous = false;
        } else if dist == best_distance && best_term.is_some() {
            ambiguous = true;
        }
    }

    match best_term {
        Some(term) if !ambiguous => Some(preserve_case(word, term)),
        _ => None,
    }
}

fn preserve_case(original: &str, correction: &str) -> String {
    if original.chars().all(|c| c.is_uppercase() || !c.is_alphabetic()) {
        return correction.to_uppercase();
    }

    let first_upper = original.chars().next().is_some_and(|c| c.is_uppercase());
    if first_upper {
        let mut chars = correction.chars();
        match chars.next() {
            Some(c) => {
                let mut s = c.to_uppercase().to_string();
                s.extend(chars);
                s
            }
            None => correction.to_string(),
        }
    } else {
        correction.to_string()
    }
}

/// Levenshtein distance over chars.
fn edit_distance(a: &str, b: &str) -> u32 {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let (m, n) = (a_chars.len(), b_chars.len());

    if m == 0 {
        return n as u32;
    }
    if n == 0 {
        return m as u32;
    }

    let mut prev: Vec<u32> = (0..=n as u32).collect();
    let mut curr = vec![0u32; n + 1];

    for (i, &a_ch) in a_chars.iter().enumerate() {
        curr[0] = (i + 1) as u32;
        for (j, &b_ch) in b_chars.iter().enumerate() {
            let cost = u32::from(a_ch != b_ch);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}
