//! Text generation adapters

mod anthropic;
mod ollama;
mod openai_compat;

pub use anthropic::AnthropicProvider;
pub use ollama::OllamaProvider;
pub use openai_compat::OpenAiCompatibleProvider;
