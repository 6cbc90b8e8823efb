//! When chat should consult web search

use std::str::FromStr;

const DEFAULT_TRIGGERS: &[&str] = &[
    "fda", "epa", "osha", "warning", "recall", "inspection", "lawsuit", "recent", "latest",
    "news", "current", "today", "2024", "2025", "2026", "plant", "factory", "location",
    "facility", "manufacture", "competitor", "acquisition", "merger", "bankruptcy",
    "financial", "certification", "iso", "audit", "violation", "fine", "penalty",
];

const PLEASANTRIES: &[&str] = &[
    "hi", "hello", "hey", "thanks", "thank you", "thx", "ok", "okay", "bye", "cool", "great",
];

/// Search trigger policy for chat messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchTrigger {
    /// Search when the message contains any of these words (case-insensitive substring)
    Keywords(Vec<String>),
    /// Search for everything except pleasantries and one-word messages
    Permissive,
    Never,
}

impl Default for SearchTrigger {
    fn default() -> Self {
        SearchTrigger::Keywords(DEFAULT_TRIGGERS.iter().map(|s| s.to_string()).collect())
    }
}

impl SearchTrigger {
    pub fn should_search(&self, message: &str) -> bool {
        let lower = message.trim().to_lowercase();
        match self {
            SearchTrigger::Keywords(words) => words.iter().any(|w| lower.contains(w.as_str())),
            SearchTrigger::Permissive => {
                let stripped = lower.trim_end_matches(['!', '.', '?', ' ']);
                lower.split_whitespace().count() >= 2 && !PLEASANTRIES.contains(&stripped)
            }
            SearchTrigger::Never => false,
        }
    }
}

impl std::fmt::Display for SearchTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchTrigger::Keywords(_) => write!(f, "keywords"),
            SearchTrigger::Permissive => write!(f, "permissive"),
            SearchTrigger::Never => write!(f, "never"),
        }
    }
}

impl FromStr for SearchTrigger {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "keywords" | "keyword" => Ok(SearchTrigger::default()),
            "permissive" | "always" => Ok(SearchTrigger::Permissive),
            "never" | "off" | "none" => Ok(SearchTrigger::Never),
            _ => Err(format!("Unknown search trigger: {}", s)),
        }
    }
}
