//! Provider - Search and LLM provider kinds

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Web search provider
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SearchProviderKind {
    /// Google News RSS feed (free)
    GoogleNews,
    /// DuckDuckGo Instant Answer API (free)
    DuckDuckGo,
    /// Brave Search API (keyed)
    Brave,
}

impl SearchProviderKind {
    /// Free sources first, keyed APIs last
    pub fn default_order() -> Vec<Self> {
        vec![Self::GoogleNews, Self::DuckDuckGo, Self::Brave]
    }

    /// Parse a comma separated ordering such as `"brave,google_news"`.
    /// Unknown and repeated names are dropped.
    pub fn parse_order(input: &str) -> Vec<Self> {
        parse_order(input)
    }
}

impl std::fmt::Display for SearchProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchProviderKind::GoogleNews => write!(f, "google_news"),
            SearchProviderKind::DuckDuckGo => write!(f, "duckduckgo"),
            SearchProviderKind::Brave => write!(f, "brave"),
        }
    }
}

impl std::str::FromStr for SearchProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "google_news" | "google-news" | "googlenews" | "rss" => {
                Ok(SearchProviderKind::GoogleNews)
            }
            "duckduckgo" | "ddg" => Ok(SearchProviderKind::DuckDuckGo),
            "brave" => Ok(SearchProviderKind::Brave),
            _ => Err(format!("Unknown search provider: {}", s)),
        }
    }
}

/// Text generation provider
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LlmProviderKind {
    Groq,
    OpenAI,
    Anthropic,
    Ollama,
}

impl LlmProviderKind {
    /// Fastest/cheapest cloud providers first, local model server last
    pub fn default_order() -> Vec<Self> {
        vec![Self::Groq, Self::OpenAI, Self::Anthropic, Self::Ollama]
    }

    /// Human readable name used in status messages
    pub fn label(&self) -> &'static str {
        match self {
            LlmProviderKind::Groq => "Groq",
            LlmProviderKind::OpenAI => "OpenAI",
            LlmProviderKind::Anthropic => "Anthropic",
            LlmProviderKind::Ollama => "Ollama",
        }
    }

    pub fn parse_order(input: &str) -> Vec<Self> {
        parse_order(input)
    }
}

impl std::fmt::Display for LlmProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LlmProviderKind::Groq => write!(f, "groq"),
            LlmProviderKind::OpenAI => write!(f, "openai"),
            LlmProviderKind::Anthropic => write!(f, "anthropic"),
            LlmProviderKind::Ollama => write!(f, "ollama"),
        }
    }
}

impl std::str::FromStr for LlmProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "groq" => Ok(LlmProviderKind::Groq),
            "openai" => Ok(LlmProviderKind::OpenAI),
            "anthropic" | "claude" => Ok(LlmProviderKind::Anthropic),
            "ollama" | "local" => Ok(LlmProviderKind::Ollama),
            _ => Err(format!("Unknown LLM provider: {}", s)),
        }
    }
}

fn parse_order<T>(input: &str) -> Vec<T>
where
    T: std::str::FromStr + PartialEq,
{
    let mut order = Vec::new();
    for token in input.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        match token.parse::<T>() {
            Ok(kind) if !order.contains(&kind) => order.push(kind),
            Ok(_) => {}
            Err(_) => tracing::warn!("Ignoring unknown provider name: {}", token),
        }
    }
    order
}
