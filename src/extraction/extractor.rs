use super::patterns::{ParameterPattern, LAB_PATTERNS};

/// One extracted value with the bank entry that produced it.
#[derive(Debug, Clone, Copy)]
pub struct ExtractedValue {
    pub pattern: &'static ParameterPattern,
    pub value: f64,
}

impl ExtractedValue {
    pub fn key(&self) -> &'static str {
        self.pattern.key
    }
}

/// Ordered key → value map. Keys are unique and follow bank order.
#[derive(Debug, Clone, Default)]
pub struct ExtractedValues {
    entries: Vec<ExtractedValue>,
}

impl ExtractedValues {
    pub fn get(&self, key: &str) -> Option<f64> {
        self.entries.iter().find(|e| e.key() == key).map(|e| e.value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(ExtractedValue::key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExtractedValue> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Apply every bank entry to `text` and keep the first parseable,
/// non-excluded candidate per key. Never fails; no match means no entry.
pub fn extract_parameters(text: &str) -> ExtractedValues {
    let mut values = ExtractedValues::default();

    for pattern in LAB_PATTERNS.iter() {
        if let Some(value) = first_value(pattern, text) {
            tracing::debug!(key = pattern.key, value, "Extracted lab parameter");
            values.entries.push(ExtractedValue { pattern, value });
        }
    }

    tracing::debug!(count = values.len(), "Parameter extraction complete");
    values
}

fn first_value(pattern: &ParameterPattern, text: &str) -> Option<f64> {
    for caps in pattern.regex().captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        if text[..whole.start()].ends_with('/') {
            tracing::debug!(
                key = pattern.key,
                matched = whole.as_str(),
                "Skipped label inside unit text"
            );
            continue;
        }
        if pattern.has_excluded_prefix(text, whole.start()) {
            tracing::debug!(
                key = pattern.key,
                matched = whole.as_str(),
                "Skipped candidate with excluded prefix"
            );
            continue;
        }
        let Some(group) = caps.iter().skip(1).flatten().next() else {
            continue;
        };
        match parse_numeric(group.as_str()) {
            Some(value) => return Some(value),
            None => {
                tracing::debug!(key = pattern.key, raw = group.as_str(), "Unparseable candidate");
            }
        }
    }
    None
}

/// Strip leading/trailing non-numeric characters ("<5", "~7.2") and parse.
fn parse_numeric(raw: &str) -> Option<f64> {
    let trimmed = raw.trim_matches(|c: char| !c.is_ascii_digit() && c != '.');
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}
