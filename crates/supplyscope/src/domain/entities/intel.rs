//! Supplier Intel Entities
//!
//! The aggregate report for one company and the partial AI analysis it is
//! assembled from.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::lenient;
use crate::domain::entities::{EsgRating, ReputationScore, SearchResult};
use crate::domain::services::completion_text;

const NEWS_LIMIT: usize = 6;

/// Companies the static fallback treats as large enterprises
const KNOWN_LARGE_COMPANIES: &[&str] = &["BASF", "Dow", "Honeywell", "Siemens", "3M"];

/// Risk level
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum RiskLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl From<String> for RiskLevel {
    /// Unknown labels are treated as medium
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "low" => RiskLevel::Low,
            "high" => RiskLevel::High,
            _ => RiskLevel::Medium,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "low"),
            RiskLevel::Medium => write!(f, "medium"),
            RiskLevel::High => write!(f, "high"),
        }
    }
}

/// A supplier risk factor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RiskFactor {
    #[serde(default, deserialize_with = "lenient::string_or_default")]
    pub category: String,
    #[serde(default)]
    pub level: RiskLevel,
    #[serde(default, deserialize_with = "lenient::string_or_default")]
    pub description: String,
}

impl RiskFactor {
    pub fn new(category: &str, level: RiskLevel, description: &str) -> Self {
        Self {
            category: category.to_string(),
            level,
            description: description.to_string(),
        }
    }
}

/// ESG scores on a 0..=100 scale
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EsgScore {
    #[serde(default, deserialize_with = "lenient::score_or_zero")]
    pub environmental: u8,
    #[serde(default, deserialize_with = "lenient::score_or_zero")]
    pub social: u8,
    #[serde(default, deserialize_with = "lenient::score_or_zero")]
    pub governance: u8,
    #[serde(default, deserialize_with = "lenient::score_or_zero")]
    pub overall: u8,
}

/// A news item shown on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NewsItem {
    pub title: String,
    pub url: String,
    pub source: String,
    pub date: String,
    pub snippet: String,
}

impl NewsItem {
    /// First countable results converted to news items
    pub fn from_results(results: &[SearchResult]) -> Vec<NewsItem> {
        results
            .iter()
            .filter(|r| r.is_countable())
            .take(NEWS_LIMIT)
            .map(|r| NewsItem {
                title: r.title.clone(),
                url: r.url.clone(),
                source: r.source_label(),
                date: r.date_label(),
                snippet: r.snippet.clone(),
            })
            .collect()
    }

    /// Shown when no news search returned anything
    pub fn placeholder() -> NewsItem {
        NewsItem {
            title: "No recent news found".to_string(),
            url: "#".to_string(),
            source: "N/A".to_string(),
            date: String::new(),
            snippet: "Try searching for this company directly".to_string(),
        }
    }
}

/// Company analysis as produced by a language model.
///
/// Every field is optional; [`SupplierIntel::assemble`] fills the gaps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyAnalysis {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub industry: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub headquarters: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub employees: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub revenue: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub founded: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub website: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub stock_symbol: Option<String>,
    #[serde(default, deserialize_with = "lenient::object_list")]
    pub risks: Vec<RiskFactor>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub opportunities: Vec<String>,
    #[serde(default, deserialize_with = "lenient::opt_object")]
    pub esg_score: Option<EsgScore>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub competitive_position: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub supply_chain_role: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub certifications: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub recent_developments: Vec<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub ai_analysis: Option<String>,
}

impl CompanyAnalysis {
    /// Parse model output (code fences, thinking traces and chatter tolerated).
    ///
    /// Returns `None` when no JSON object can be recovered.
    pub fn from_completion(text: &str) -> Option<Self> {
        let json = completion_text::extract_json_object(text)?;
        serde_json::from_str(json).ok()
    }

    /// Static analysis used when no language model produced one
    pub fn fallback(supplier_name: &str) -> Self {
        let lower = supplier_name.to_lowercase();
        let is_known = KNOWN_LARGE_COMPANIES
            .iter()
            .any(|name| lower.contains(&name.to_lowercase()));
        let domain: String = lower.split_whitespace().collect();

        Self {
            summary: Some(format!(
                "{} is a significant player in their industry sector. This analysis is based on publicly available information and should be verified with direct supplier engagement.",
                supplier_name
            )),
            industry: Some("Manufacturing / Industrial".to_string()),
            headquarters: Some("Information pending verification".to_string()),
            employees: Some(if is_known { "50,000+" } else { "1,000-10,000" }.to_string()),
            revenue: Some(if is_known { "$10B+" } else { "Private/Not disclosed" }.to_string()),
            founded: Some("See company profile".to_string()),
            website: Some(format!("https://www.{}.com", domain)),
            stock_symbol: None,
            risks: vec![
                RiskFactor::new(
                    "Supply Continuity",
                    RiskLevel::Medium,
                    "Standard market risks apply",
                ),
                RiskFactor::new(
                    "Geopolitical",
                    RiskLevel::Low,
                    "Diversified operations reduce exposure",
                ),
                RiskFactor::new("Financial", RiskLevel::Low, "Stable market position"),
            ],
            opportunities: vec![
                "Potential for strategic partnership".to_string(),
                "Innovation collaboration opportunities".to_string(),
                "Volume discount negotiations".to_string(),
            ],
            esg_score: Some(EsgScore {
                environmental: 72,
                social: 78,
                governance: 81,
                overall: 77,
            }),
            competitive_position: Some(
                "Established market participant with recognized capabilities".to_string(),
            ),
            supply_chain_role: Some(
                "Tier 1/2 supplier for industrial and manufacturing sectors".to_string(),
            ),
            certifications: vec!["ISO 9001".to_string(), "ISO 14001".to_string()],
            recent_developments: vec![
                "Continued investment in operational capabilities".to_string(),
                "Market expansion initiatives ongoing".to_string(),
            ],
            ai_analysis: Some(format!(
                "{} appears to be a viable supplier option. Recommend conducting direct due diligence including facility audits, financial verification, and reference checks. Consider starting with a pilot engagement to assess actual performance before committing to large-volume contracts.",
                supplier_name
            )),
        }
    }
}

/// Aggregate intelligence report for one supplier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SupplierIntel {
    pub company: String,
    pub summary: String,
    pub industry: String,
    pub headquarters: String,
    pub employees: String,
    pub revenue: String,
    pub founded: String,
    pub website: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_symbol: Option<String>,
    pub news: Vec<NewsItem>,
    pub risks: Vec<RiskFactor>,
    pub opportunities: Vec<String>,
    pub esg_score: EsgScore,
    pub competitive_position: String,
    pub supply_chain_role: String,
    pub certifications: Vec<String>,
    pub recent_developments: Vec<String>,
    pub ai_analysis: String,
    pub reputation: ReputationScore,
    pub esg_rating: EsgRating,
}

impl SupplierIntel {
    /// Merge analysis, news and scores, substituting defaults for missing fields
    pub fn assemble(
        company: &str,
        analysis: CompanyAnalysis,
        news: Vec<NewsItem>,
        reputation: ReputationScore,
        esg_rating: EsgRating,
    ) -> Self {
        let news = if news.is_empty() {
            vec![NewsItem::placeholder()]
        } else {
            news
        };

        Self {
            company: company.to_string(),
            summary: analysis
                .summary
                .unwrap_or_else(|| format!("Intelligence report for {}", company)),
            industry: analysis
                .industry
                .unwrap_or_else(|| "Industrial".to_string()),
            headquarters: analysis
                .headquarters
                .unwrap_or_else(|| "Not available".to_string()),
            employees: analysis
                .employees
                .unwrap_or_else(|| "Not available".to_string()),
            revenue: analysis
                .revenue
                .unwrap_or_else(|| "Not disclosed".to_string()),
            founded: analysis
                .founded
                .unwrap_or_else(|| "Not available".to_string()),
            website: analysis.website.unwrap_or_default(),
            stock_symbol: analysis.stock_symbol,
            news,
            risks: analysis.risks,
            opportunities: analysis.opportunities,
            esg_score: analysis.esg_score.unwrap_or_default(),
            competitive_position: analysis.competitive_position.unwrap_or_default(),
            supply_chain_role: analysis.supply_chain_role.unwrap_or_default(),
            certifications: analysis.certifications,
            recent_developments: analysis.recent_developments,
            ai_analysis: analysis.ai_analysis.unwrap_or_default(),
            reputation,
            esg_rating,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_reputation() -> ReputationScore {
        ReputationScore {
            overall: 80,
            consumer_sentiment: 75,
            social_media_sentiment: 75,
            media_sentiment: 80,
            regulatory_compliance: 85,
            issues: vec![],
            summary: String::new(),
        }
    }

    #[test]
    fn test_parse_fenced_analysis() {
        let text = "```json\n{\"summary\": \"Chemicals giant\", \"founded\": 1865, \"esgScore\": {\"environmental\": \"71\", \"social\": 80.4, \"governance\": 90, \"overall\": 80}}\n```";
        let analysis = CompanyAnalysis::from_completion(text).unwrap();
        assert_eq!(analysis.summary.as_deref(), Some("Chemicals giant"));
        assert_eq!(analysis.founded.as_deref(), Some("1865"));
        let esg = analysis.esg_score.unwrap();
        assert_eq!(esg.environmental, 71);
        assert_eq!(esg.social, 80);
    }

    #[test]
    fn test_parse_tolerates_bad_fields() {
        let text = r#"{"risks": [{"category": "Financial", "level": "extreme", "description": "x"}, 42],
                      "stockSymbol": null, "esgScore": "unknown", "opportunities": "Expansion"}"#;
        let analysis = CompanyAnalysis::from_completion(text).unwrap();
        assert_eq!(analysis.risks.len(), 1);
        assert_eq!(analysis.risks[0].level, RiskLevel::Medium);
        assert_eq!(analysis.stock_symbol, None);
        assert_eq!(analysis.esg_score, None);
        assert_eq!(analysis.opportunities, vec!["Expansion".to_string()]);
    }

    #[test]
    fn test_parse_rejects_non_json() {
        assert!(CompanyAnalysis::from_completion("I cannot help with that.").is_none());
    }

    #[test]
    fn test_fallback_known_company() {
        let analysis = CompanyAnalysis::fallback("BASF SE");
        assert_eq!(analysis.employees.as_deref(), Some("50,000+"));
        assert_eq!(analysis.website.as_deref(), Some("https://www.basfse.com"));

        let unknown = CompanyAnalysis::fallback("Acme Corp");
        assert_eq!(unknown.revenue.as_deref(), Some("Private/Not disclosed"));
    }

    #[test]
    fn test_assemble_applies_defaults() {
        let intel = SupplierIntel::assemble(
            "Acme",
            CompanyAnalysis::default(),
            vec![],
            empty_reputation(),
            EsgRating::baseline(),
        );
        assert_eq!(intel.summary, "Intelligence report for Acme");
        assert_eq!(intel.industry, "Industrial");
        assert_eq!(intel.revenue, "Not disclosed");
        assert_eq!(intel.esg_score, EsgScore::default());
        assert_eq!(intel.news, vec![NewsItem::placeholder()]);
    }

    #[test]
    fn test_news_from_results_skips_uncountable() {
        let results = vec![
            SearchResult::new("", "https://a.com", ""),
            SearchResult::new("Plant expansion", "https://www.news.com/a", "snippet")
                .with_published_age("2 days ago"),
        ];
        let news = NewsItem::from_results(&results);
        assert_eq!(news.len(), 1);
        assert_eq!(news[0].source, "news.com");
        assert_eq!(news[0].date, "2 days ago");
    }

    #[test]
    fn test_news_source_is_publisher() {
        let results = vec![SearchResult::new(
            "Acme recalls anvils",
            "https://news.google.com/rss/articles/abc",
            "",
        )
        .with_source("Reuters")];
        let news = NewsItem::from_results(&results);
        assert_eq!(news[0].source, "Reuters");
    }

    #[test]
    fn test_serialized_field_names() {
        let intel = SupplierIntel::assemble(
            "Acme",
            CompanyAnalysis::fallback("Acme"),
            vec![],
            empty_reputation(),
            EsgRating::baseline(),
        );
        let value = serde_json::to_value(&intel).unwrap();
        assert!(value.get("supplyChainRole").is_some());
        assert!(value.get("esgScore").is_some());
        assert!(value.get("stockSymbol").is_none());
        assert_eq!(value["reputation"]["consumerSentiment"], 75);
    }
}
