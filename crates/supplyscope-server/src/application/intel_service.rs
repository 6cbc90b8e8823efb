//! Intel Application Service (Use Case)
//!
//! Builds the supplier report: seven concurrent searches, a model-written
//! company analysis, keyword reputation scoring and an ESG rating.
//! Every stage has a fallback, so a report is always produced.

use futures::future::join_all;

use supplyscope::{
    ChatMessage, CompanyAnalysis, CompletionOptions, NewsItem, ReputationInputs,
    ReputationScorer, SearchResult, SupplierIntel,
};

use super::{CompletionChain, EsgService, SearchChain};

/// Results per intel query
const INTEL_SEARCH_LIMIT: usize = 10;
/// Search results given to the analysis prompt
const ANALYSIS_CONTEXT_LIMIT: usize = 8;

pub struct IntelService {
    search: SearchChain,
    completions: CompletionChain,
    esg: EsgService,
    scorer: ReputationScorer,
}

/// Results of the seven intel queries
struct IntelSearches {
    company: Vec<SearchResult>,
    news: Vec<SearchResult>,
    risk: Vec<SearchResult>,
    reputation: ReputationInputs,
}

impl IntelSearches {
    /// Profile, news and risk results, the context for analysis
    fn background(&self) -> Vec<SearchResult> {
        self.company
            .iter()
            .chain(&self.news)
            .chain(&self.risk)
            .cloned()
            .collect()
    }
}

impl IntelService {
    pub fn new(
        search: SearchChain,
        completions: CompletionChain,
        esg: EsgService,
        scorer: ReputationScorer,
    ) -> Self {
        Self {
            search,
            completions,
            esg,
            scorer,
        }
    }

    /// Gather the full report for one supplier
    pub async fn gather(&self, supplier: &str) -> SupplierIntel {
        tracing::info!("🏭 Gathering intel for {}", supplier);

        let searches = self.run_searches(supplier).await;
        let background = searches.background();

        let (analysis, esg_rating) = tokio::join!(
            self.analyze(supplier, &background),
            self.esg.assess(supplier, &background),
        );
        let reputation = self.scorer.score(&searches.reputation);
        let news = NewsItem::from_results(&searches.news);

        tracing::info!(
            "✅ Intel for {} ready (reputation {}/100, ESG {}/100)",
            supplier,
            reputation.overall,
            esg_rating.overall
        );
        SupplierIntel::assemble(supplier, analysis, news, reputation, esg_rating)
    }

    async fn run_searches(&self, supplier: &str) -> IntelSearches {
        let queries = intel_queries(supplier);
        let mut batches = join_all(
            queries
                .iter()
                .map(|q| self.search.first_hit(q, INTEL_SEARCH_LIMIT)),
        )
        .await
        .into_iter();

        let mut next = || batches.next().unwrap_or_default();
        IntelSearches {
            company: next(),
            news: next(),
            risk: next(),
            reputation: ReputationInputs {
                consumer: next(),
                social: next(),
                news: next(),
                regulatory: next(),
            },
        }
    }

    async fn analyze(&self, supplier: &str, background: &[SearchResult]) -> CompanyAnalysis {
        let messages = vec![ChatMessage::user(analysis_prompt(supplier, background))];
        let options = CompletionOptions::new(2000, 0.7).json();

        match self
            .completions
            .complete_parsed(&messages, &options, CompanyAnalysis::from_completion)
            .await
        {
            Ok(completion) => {
                tracing::info!(
                    "🧠 Analysis for {} from {} ({})",
                    supplier,
                    completion.provider,
                    completion.model
                );
                completion.value
            }
            Err(e) => {
                tracing::warn!("⚠️  Using static analysis for {}: {}", supplier, e);
                CompanyAnalysis::fallback(supplier)
            }
        }
    }
}

/// Profile, news, risk, then the four reputation categories
fn intel_queries(supplier: &str) -> [String; 7] {
    [
        format!("{} company profile overview", supplier),
        format!("{} news 2024 2025", supplier),
        format!("{} supply chain risk issues", supplier),
        format!("\"{}\" reviews complaints consumer feedback", supplier),
        format!("site:reddit.com \"{}\" problems issues experience", supplier),
        format!(
            "\"{}\" scandal controversy lawsuit problem -site:reddit.com",
            supplier
        ),
        format!(
            "\"{}\" FDA warning EPA violation regulatory fine citation recall",
            supplier
        ),
    ]
}

fn analysis_prompt(supplier: &str, background: &[SearchResult]) -> String {
    let context = if background.is_empty() {
        "No real-time search results available. Use your training knowledge about this company."
            .to_string()
    } else {
        background
            .iter()
            .take(ANALYSIS_CONTEXT_LIMIT)
            .map(|r| format!("- {}: {}", r.title, r.snippet))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        r#"You are a supply chain intelligence analyst. Analyze this supplier and provide a comprehensive intelligence report based on your knowledge.

Supplier: {supplier}

Recent search results about this company:
{context}

Provide your analysis in this exact JSON format (no markdown, just raw JSON):
{{
  "summary": "2-3 sentence executive summary of the company",
  "industry": "Primary industry sector",
  "headquarters": "City, Country",
  "employees": "Approximate employee count (e.g., '50,000+' or '1,000-5,000')",
  "revenue": "Annual revenue if known (e.g., '$50B' or 'Private')",
  "founded": "Year founded",
  "website": "Company website URL",
  "stockSymbol": "Stock ticker if public, null if private",
  "risks": [
    {{"category": "Category name", "level": "low|medium|high", "description": "Brief description"}}
  ],
  "opportunities": ["Opportunity 1", "Opportunity 2"],
  "esgScore": {{
    "environmental": 75,
    "social": 80,
    "governance": 85,
    "overall": 80
  }},
  "competitivePosition": "Brief description of market position",
  "supplyChainRole": "Their role in typical supply chains",
  "certifications": ["ISO 9001", "ISO 14001", "etc"],
  "recentDevelopments": ["Recent news/development 1", "Recent news/development 2"],
  "aiAnalysis": "3-4 sentence AI analysis of this supplier's strengths, weaknesses, and what a procurement team should know"
}}

Be specific and factual where possible. For unknown companies, make reasonable inferences based on the name and any available context. Always provide complete JSON."#
    )
}
