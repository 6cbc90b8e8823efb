//! Chat Application Service (Use Case)
//!
//! Answers questions about a supplier, optionally grounding the answer in a
//! web search when the message asks for something current.

use supplyscope::{ChatMessage, CompletionOptions, DomainError, SearchResult, SearchTrigger};

use super::{CompletionChain, SearchChain};

/// Search results put into the prompt
const CHAT_SEARCH_LIMIT: usize = 5;
/// Past turns kept in the conversation window
const HISTORY_WINDOW: usize = 10;

/// One chat question with its context
#[derive(Debug, Clone, Default)]
pub struct ChatInput {
    pub message: String,
    pub supplier_context: Option<String>,
    pub history: Vec<ChatMessage>,
    pub supplier_name: Option<String>,
}

pub struct ChatService {
    completions: CompletionChain,
    search: SearchChain,
    trigger: SearchTrigger,
}

impl ChatService {
    pub fn new(completions: CompletionChain, search: SearchChain, trigger: SearchTrigger) -> Self {
        Self {
            completions,
            search,
            trigger,
        }
    }

    /// Generate the assistant's reply
    pub async fn reply(&self, input: &ChatInput) -> Result<String, DomainError> {
        if input.message.trim().is_empty() {
            return Err(DomainError::Validation("Message required".to_string()));
        }
        if self.completions.is_empty() {
            return Err(DomainError::NotConfigured(
                "no text generation provider configured".to_string(),
            ));
        }

        let web_results = self.search_if_needed(input).await;
        let messages = build_messages(input, &web_results);
        let options = CompletionOptions::new(1000, 0.7);

        let completion = self.completions.complete(&messages, &options).await?;
        Ok(completion.value)
    }

    async fn search_if_needed(&self, input: &ChatInput) -> Vec<SearchResult> {
        let supplier = match input.supplier_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => return Vec::new(),
        };
        if !self.trigger.should_search(&input.message) {
            return Vec::new();
        }

        tracing::info!("🔍 Chat web search for: {}", input.message);
        let query = format!("{} {}", supplier, input.message.trim());
        self.search.first_hit(&query, CHAT_SEARCH_LIMIT).await
    }
}

/// System preamble, the recent history, then the new question
pub(crate) fn build_messages(input: &ChatInput, web_results: &[SearchResult]) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(HISTORY_WINDOW + 2);
    messages.push(ChatMessage::system(system_prompt(input, web_results)));

    let skip = input.history.len().saturating_sub(HISTORY_WINDOW);
    messages.extend(input.history.iter().skip(skip).cloned());

    messages.push(ChatMessage::user(input.message.trim()));
    messages
}

fn system_prompt(input: &ChatInput, web_results: &[SearchResult]) -> String {
    let context = input
        .supplier_context
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or("No specific supplier context provided.");

    let search_section = if web_results.is_empty() {
        String::new()
    } else {
        let lines: Vec<String> = web_results
            .iter()
            .map(|r| format!("- {}: {} (Source: {})", r.title, r.snippet, r.url))
            .collect();
        format!(
            "\nRECENT WEB SEARCH RESULTS for \"{}\":\n{}\n\nUse these search results to provide current, accurate information. Always cite the source when using information from search results.\n",
            input.message.trim(),
            lines.join("\n")
        )
    };

    format!(
        "You are a supply chain intelligence assistant helping analyze suppliers.
You have access to the following supplier information:

{context}
{search_section}
Answer questions about this supplier based on:
1. The web search results above (if available) - prioritize this for current information
2. The provided supplier context
3. Your general knowledge about the company and industry

Be concise, factual, and helpful. When citing web search results, mention the source.
If you don't have specific information and no search results are available, say so clearly."
    )
}
