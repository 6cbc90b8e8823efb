//! Application Configuration
//!
//! Built once at startup from Shuttle secrets, falling back to the process
//! environment. Services receive what they need from here; nothing reads the
//! environment at request time.

use anyhow::{bail, Context};
use std::time::Duration;

use supplyscope::{LlmProviderKind, SearchProviderKind, SearchTrigger};

pub const DEFAULT_OLLAMA_URLS: &[&str] = &["http://127.0.0.1:11434", "http://localhost:11434"];
pub const DEFAULT_OLLAMA_MODELS: &[&str] = &[
    "qwen3:30b-a3b",
    "qwen3-coder:30b",
    "deepseek-r1:8b-0528-qwen3-q8_0",
];

const DEFAULT_SEARCH_TIMEOUT_SECS: u64 = 8;
const DEFAULT_LLM_TIMEOUT_SECS: u64 = 60;
const DEFAULT_LOCAL_LLM_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub brave_api_key: Option<String>,
    pub groq_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
    /// Candidate Ollama base URLs, tried in order
    pub ollama_urls: Vec<String>,
    /// Model name preferences (substring match against installed models)
    pub ollama_preferred_models: Vec<String>,
    pub search_providers: Vec<SearchProviderKind>,
    pub llm_providers: Vec<LlmProviderKind>,
    pub portfolio_providers: Vec<LlmProviderKind>,
    pub chat_search_trigger: SearchTrigger,
    pub search_timeout: Duration,
    pub llm_timeout: Duration,
    pub local_llm_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            brave_api_key: None,
            groq_api_key: None,
            openai_api_key: None,
            anthropic_api_key: None,
            ollama_urls: DEFAULT_OLLAMA_URLS.iter().map(|s| s.to_string()).collect(),
            ollama_preferred_models: DEFAULT_OLLAMA_MODELS.iter().map(|s| s.to_string()).collect(),
            search_providers: SearchProviderKind::default_order(),
            llm_providers: LlmProviderKind::default_order(),
            portfolio_providers: vec![LlmProviderKind::Ollama],
            chat_search_trigger: SearchTrigger::default(),
            search_timeout: Duration::from_secs(DEFAULT_SEARCH_TIMEOUT_SECS),
            llm_timeout: Duration::from_secs(DEFAULT_LLM_TIMEOUT_SECS),
            local_llm_timeout: Duration::from_secs(DEFAULT_LOCAL_LLM_TIMEOUT_SECS),
        }
    }
}

impl AppConfig {
    /// Read from Shuttle secrets, then the process environment
    pub fn from_secrets(secrets: &shuttle_runtime::SecretStore) -> anyhow::Result<Self> {
        Self::from_lookup(|key| secrets.get(key).or_else(|| std::env::var(key).ok()))
    }

    /// Build from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let mut ollama_urls = match get("OLLAMA_URLS") {
            Some(list) => split_list(&list),
            None => defaults.ollama_urls,
        };
        if let Some(url) = get("OLLAMA_URL") {
            if !ollama_urls.contains(&url) {
                ollama_urls.push(url);
            }
        }

        let ollama_preferred_models = get("OLLAMA_PREFERRED_MODELS")
            .map(|list| split_list(&list))
            .unwrap_or(defaults.ollama_preferred_models);

        let search_providers = match get("SEARCH_PROVIDERS") {
            Some(list) => non_empty_order("SEARCH_PROVIDERS", SearchProviderKind::parse_order(&list))?,
            None => defaults.search_providers,
        };
        let llm_providers = match get("LLM_PROVIDERS") {
            Some(list) => non_empty_order("LLM_PROVIDERS", LlmProviderKind::parse_order(&list))?,
            None => defaults.llm_providers,
        };
        let portfolio_providers = match get("PORTFOLIO_PROVIDERS") {
            Some(list) => {
                non_empty_order("PORTFOLIO_PROVIDERS", LlmProviderKind::parse_order(&list))?
            }
            None => defaults.portfolio_providers,
        };

        let chat_search_trigger = match get("CHAT_SEARCH_TRIGGER") {
            Some(value) => value
                .parse::<SearchTrigger>()
                .map_err(anyhow::Error::msg)
                .context("Invalid CHAT_SEARCH_TRIGGER")?,
            None => defaults.chat_search_trigger,
        };

        Ok(Self {
            brave_api_key: get("BRAVE_API_KEY"),
            groq_api_key: get("GROQ_API_KEY"),
            openai_api_key: get("OPENAI_API_KEY"),
            anthropic_api_key: get("ANTHROPIC_API_KEY"),
            ollama_urls,
            ollama_preferred_models,
            search_providers,
            llm_providers,
            portfolio_providers,
            chat_search_trigger,
            search_timeout: seconds(get("SEARCH_TIMEOUT_SECS"), "SEARCH_TIMEOUT_SECS")?
                .unwrap_or(defaults.search_timeout),
            llm_timeout: seconds(get("LLM_TIMEOUT_SECS"), "LLM_TIMEOUT_SECS")?
                .unwrap_or(defaults.llm_timeout),
            local_llm_timeout: seconds(get("LOCAL_LLM_TIMEOUT_SECS"), "LOCAL_LLM_TIMEOUT_SECS")?
                .unwrap_or(defaults.local_llm_timeout),
        })
    }

    /// API key of a cloud provider (`None` for Ollama or when unset)
    pub fn api_key(&self, kind: LlmProviderKind) -> Option<&str> {
        match kind {
            LlmProviderKind::Groq => self.groq_api_key.as_deref(),
            LlmProviderKind::OpenAI => self.openai_api_key.as_deref(),
            LlmProviderKind::Anthropic => self.anthropic_api_key.as_deref(),
            LlmProviderKind::Ollama => None,
        }
    }

    /// Cloud providers with a key present, in status display order
    pub fn keyed_cloud_providers(&self) -> Vec<LlmProviderKind> {
        [
            LlmProviderKind::Groq,
            LlmProviderKind::OpenAI,
            LlmProviderKind::Anthropic,
        ]
        .into_iter()
        .filter(|kind| self.api_key(*kind).is_some())
        .collect()
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn non_empty_order<T>(key: &str, order: Vec<T>) -> anyhow::Result<Vec<T>> {
    if order.is_empty() {
        bail!("{} names no known provider", key);
    }
    Ok(order)
}

fn seconds(value: Option<String>, key: &str) -> anyhow::Result<Option<Duration>> {
    value
        .map(|v| {
            v.parse::<u64>()
                .map(Duration::from_secs)
                .with_context(|| format!("{} must be a whole number of seconds", key))
        })
        .transpose()
}
