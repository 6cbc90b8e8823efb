//! Severity - Issue severity and the keyword table that classifies it

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Issue severity, ordered from least to most serious
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Minor,
    Moderate,
    Severe,
}

impl Severity {
    /// Points deducted from a category score per issue
    pub fn penalty(&self) -> i32 {
        match self {
            Severity::Minor => 3,
            Severity::Moderate => 8,
            Severity::Severe => 15,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Minor => write!(f, "minor"),
            Severity::Moderate => write!(f, "moderate"),
            Severity::Severe => write!(f, "severe"),
        }
    }
}

const SEVERE_KEYWORDS: &[&str] = &[
    "lawsuit", "fraud", "scandal", "recall", "death", "injury", "criminal", "violation", "fine",
    "penalty", "banned", "shutdown",
];

const MODERATE_KEYWORDS: &[&str] = &[
    "complaint",
    "problem",
    "issue",
    "warning",
    "concern",
    "investigation",
    "audit",
    "dispute",
    "criticism",
    "controversy",
];

const MINOR_KEYWORDS: &[&str] = &[
    "delay",
    "late",
    "slow",
    "disappointed",
    "frustrating",
    "annoying",
];

/// Keyword sets used to classify free text into a [`Severity`].
///
/// Matching is a case-insensitive substring test; the most serious set wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeverityKeywords {
    pub severe: Vec<String>,
    pub moderate: Vec<String>,
    pub minor: Vec<String>,
}

impl Default for SeverityKeywords {
    fn default() -> Self {
        let owned = |words: &[&str]| words.iter().map(|w| w.to_string()).collect();
        Self {
            severe: owned(SEVERE_KEYWORDS),
            moderate: owned(MODERATE_KEYWORDS),
            minor: owned(MINOR_KEYWORDS),
        }
    }
}

impl SeverityKeywords {
    /// Severity of the first matching keyword set, or `None` when no keyword appears.
    pub fn classify(&self, text: &str) -> Option<Severity> {
        let lower = text.to_lowercase();
        let hit = |words: &[String]| words.iter().any(|w| lower.contains(w.as_str()));

        if hit(&self.severe) {
            Some(Severity::Severe)
        } else if hit(&self.moderate) {
            Some(Severity::Moderate)
        } else if hit(&self.minor) {
            Some(Severity::Minor)
        } else {
            None
        }
    }

    /// Severity of `text`; text without any keyword counts as minor.
    pub fn severity(&self, text: &str) -> Severity {
        self.classify(text).unwrap_or(Severity::Minor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severe_beats_moderate() {
        let keywords = SeverityKeywords::default();
        let text = "Customer complaint escalates into class action lawsuit";
        assert_eq!(keywords.classify(text), Some(Severity::Severe));
    }

    #[test]
    fn test_moderate_beats_minor() {
        let keywords = SeverityKeywords::default();
        let text = "Shipping delay prompts investigation";
        assert_eq!(keywords.classify(text), Some(Severity::Moderate));
    }

    #[test]
    fn test_case_insensitive() {
        let keywords = SeverityKeywords::default();
        assert_eq!(keywords.classify("FDA RECALL issued"), Some(Severity::Severe));
    }

    #[test]
    fn test_no_keyword_defaults_to_minor() {
        let keywords = SeverityKeywords::default();
        let text = "Company opens new headquarters";
        assert_eq!(keywords.classify(text), None);
        assert_eq!(keywords.severity(text), Severity::Minor);
    }

    #[test]
    fn test_substring_match() {
        // "fine" is matched inside longer words as well
        let keywords = SeverityKeywords::default();
        assert_eq!(keywords.severity("Refined product line"), Severity::Severe);
    }

    #[test]
    fn test_custom_table() {
        let keywords = SeverityKeywords {
            severe: vec!["explosion".to_string()],
            moderate: vec![],
            minor: vec!["typo".to_string()],
        };
        assert_eq!(keywords.classify("lawsuit filed"), None);
        assert_eq!(keywords.classify("Plant explosion"), Some(Severity::Severe));
        assert_eq!(keywords.classify("typo in catalog"), Some(Severity::Minor));
    }

    #[test]
    fn test_ordering_and_penalty() {
        assert!(Severity::Severe > Severity::Moderate);
        assert!(Severity::Moderate > Severity::Minor);
        assert_eq!(Severity::Severe.penalty(), 15);
        assert_eq!(Severity::Moderate.penalty(), 8);
        assert_eq!(Severity::Minor.penalty(), 3);
    }
}
