//! ESG Application Service (Use Case)
//!
//! Looks for published ESG ratings in the news and asks a model to extract
//! or estimate scores from them.

use chrono::Utc;
use futures::future::join_all;

use supplyscope::{ChatMessage, CompletionOptions, EsgRating, SearchResult};

use super::{CompletionChain, SearchChain};

/// ESG search results kept across all ESG queries
const ESG_RESULT_CAP: usize = 15;
/// Search results given to the model
const PROMPT_CONTEXT_LIMIT: usize = 20;

pub struct EsgService {
    search: SearchChain,
    completions: CompletionChain,
}

impl EsgService {
    pub fn new(search: SearchChain, completions: CompletionChain) -> Self {
        Self {
            search,
            completions,
        }
    }

    /// Rate a company; any failure yields the conservative baseline
    pub async fn assess(&self, company: &str, context: &[SearchResult]) -> EsgRating {
        if self.completions.is_empty() {
            return EsgRating::baseline();
        }

        let mut results = self.search_esg(company).await;
        results.extend(context.iter().cloned());
        results.truncate(PROMPT_CONTEXT_LIMIT);

        let messages = vec![ChatMessage::user(esg_prompt(company, &results))];
        let options = CompletionOptions::new(800, 0.3).json();
        let today = Utc::now().date_naive();

        match self
            .completions
            .complete_parsed(&messages, &options, |text| {
                EsgRating::from_completion(text, today)
            })
            .await
        {
            Ok(completion) => {
                tracing::info!(
                    "🌱 ESG rating for {} from {} ({:?})",
                    company,
                    completion.provider,
                    completion.value.source
                );
                completion.value
            }
            Err(e) => {
                tracing::warn!("⚠️  ESG rating unavailable for {}: {}", company, e);
                EsgRating::baseline()
            }
        }
    }

    async fn search_esg(&self, company: &str) -> Vec<SearchResult> {
        let queries = [
            format!("{} ESG score rating sustainalytics", company),
            format!("{} ESG rating MSCI", company),
            format!("{} sustainability score CDP", company),
            format!("{} ESG risk rating", company),
        ];
        let batches = join_all(
            queries
                .iter()
                .map(|q| self.search.collect_all(q, ESG_RESULT_CAP)),
        )
        .await;

        let mut results: Vec<SearchResult> = batches.into_iter().flatten().collect();
        results.truncate(ESG_RESULT_CAP);
        results
    }
}

fn esg_prompt(company: &str, results: &[SearchResult]) -> String {
    let context = if results.is_empty() {
        "No search results available.".to_string()
    } else {
        results
            .iter()
            .map(|r| format!("- {}: {}", r.title, r.snippet))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        r#"You are an ESG data analyst. Analyze the following search results about "{company}" and extract any REAL ESG scores or ratings mentioned.

Search results:
{context}

Your task:
1. Look for ACTUAL ESG scores from recognized providers (Sustainalytics, MSCI, S&P Global, CDP, Refinitiv)
2. Extract specific numbers if mentioned (e.g., "ESG Risk Score of 18.5" or "AA rating" or "B- score")
3. Note the risk level if mentioned (Negligible, Low, Medium, High, Severe)
4. If NO real scores are found, estimate based on available information about the company

Respond in this exact JSON format:
{{
  "foundRealScore": true/false,
  "source": "sustainalytics" | "msci" | "sp-global" | "cdp" | "ai-estimated",
  "environmental": <0-100 score>,
  "social": <0-100 score>,
  "governance": <0-100 score>,
  "overall": <0-100 score>,
  "riskLevel": "Negligible" | "Low" | "Medium" | "High" | "Severe" | null,
  "confidence": "high" | "medium" | "low",
  "reasoning": "Brief explanation of where score came from"
}}

IMPORTANT:
- For Sustainalytics, LOWER scores are BETTER (0-10 = Negligible, 10-20 = Low, 20-30 = Medium, 30-40 = High, 40+ = Severe)
- For MSCI, letter grades: AAA/AA = Leader (90+), A/BBB/BB = Average (50-80), B/CCC = Laggard (20-50)
- Convert all scores to 0-100 scale where HIGHER = BETTER
- If estimating, use conservative mid-range values and set confidence to "low""#
    )
}
