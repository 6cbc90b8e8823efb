//! Portfolio Application Service (Use Case)
//!
//! Strategic analysis of the user's supplier portfolio, written by a local
//! model when one is reachable and by fixed rules otherwise.

use supplyscope::domain::services::fallback_analysis;
use supplyscope::{ChatMessage, CompletionOptions, PortfolioSupplier};

use super::CompletionChain;

pub const FALLBACK_SOURCE: &str = "fallback";

/// Analysis text and who wrote it
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioAnalysis {
    pub analysis: String,
    /// Provider name, or `"fallback"`
    pub source: String,
}

pub struct PortfolioService {
    completions: CompletionChain,
}

impl PortfolioService {
    pub fn new(completions: CompletionChain) -> Self {
        Self { completions }
    }

    pub async fn analyze(&self, suppliers: &[PortfolioSupplier]) -> PortfolioAnalysis {
        tracing::info!("📊 Analyzing portfolio of {} suppliers", suppliers.len());

        let messages = vec![ChatMessage::user(portfolio_prompt(suppliers))];
        let options = CompletionOptions::new(800, 0.7);

        match self.completions.complete(&messages, &options).await {
            Ok(completion) => PortfolioAnalysis {
                analysis: completion.value,
                source: completion.provider,
            },
            Err(e) => {
                tracing::warn!("⚠️  Using rule-based portfolio analysis: {}", e);
                PortfolioAnalysis {
                    analysis: fallback_analysis(suppliers),
                    source: FALLBACK_SOURCE.to_string(),
                }
            }
        }
    }
}

fn portfolio_prompt(suppliers: &[PortfolioSupplier]) -> String {
    let data = serde_json::to_string_pretty(suppliers).unwrap_or_else(|_| "[]".to_string());
    format!(
        "You are a supply chain risk analyst. Analyze this supplier portfolio and provide strategic insights.

SUPPLIER DATA:
{data}

Provide a concise analysis covering:
1. **Critical Risks**: Which suppliers need immediate attention and why
2. **Portfolio Vulnerabilities**: Concentration risks, geographic exposure
3. **Recommendations**: Specific actions to improve supply chain resilience
4. **Opportunities**: Suppliers showing positive trends to leverage

Be specific and actionable. Keep it under 400 words."
    )
}
