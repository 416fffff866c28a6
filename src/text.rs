//! Name normalization and keyword matching shared by the ordered rule lists
//! (standard resolution, report-type and organ sniffing).

/// Lowercase and trim a free-text name.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// A keyword a rule looks for in normalized text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Term {
    /// Substring containment.
    Contains(&'static str),
    /// Must appear as a whole alphanumeric token ("hb" must not hit "hba1c").
    Word(&'static str),
}

impl Term {
    /// `haystack` must already be normalized.
    pub fn matches(&self, haystack: &str) -> bool {
        match self {
            Term::Contains(needle) => haystack.contains(needle),
            Term::Word(word) => haystack
                .split(|c: char| !c.is_alphanumeric())
                .any(|token| token == *word),
        }
    }
}

/// Shorthand: aliases of three characters or fewer are matched as whole words.
pub const fn alias(term: &'static str) -> Term {
    if term.len() <= 3 {
        Term::Word(term)
    } else {
        Term::Contains(term)
    }
}

/// True if any of `terms` matches the normalized `haystack`.
pub fn any_term(terms: &[Term], haystack: &str) -> bool {
    terms.iter().any(|t| t.matches(haystack))
}
