//! Reputation Scorer
//!
//! Deterministic keyword classification of categorized search results into
//! issues, per-category sentiment scores and a weighted overall score.

use crate::domain::entities::{ReputationInputs, ReputationIssue, ReputationScore, SearchResult};
use crate::domain::value_objects::{IssueCategory, Severity, SeverityKeywords};

/// Results examined per category
const RESULTS_PER_CATEGORY: usize = 5;
/// Issues kept in the report
const MAX_REPORTED_ISSUES: usize = 10;

/// Weights of the overall score; they sum to 1.0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    pub consumer: f64,
    pub social: f64,
    pub media: f64,
    pub regulatory: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            consumer: 0.25,
            social: 0.20,
            media: 0.30,
            regulatory: 0.25,
        }
    }
}

/// Starting score of a category: `(with_results, without_results)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Baseline(pub i32, pub i32);

impl Baseline {
    fn pick(&self, had_results: bool) -> i32 {
        if had_results {
            self.0
        } else {
            self.1
        }
    }
}

/// Per-category sub-scores
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryScores {
    pub consumer: u8,
    pub social: u8,
    pub media: u8,
    pub regulatory: u8,
}

#[derive(Debug, Clone)]
pub struct ReputationScorer {
    keywords: SeverityKeywords,
    weights: ScoreWeights,
    consumer_baseline: Baseline,
    social_baseline: Baseline,
    media_baseline: Baseline,
    regulatory_baseline: Baseline,
}

impl Default for ReputationScorer {
    fn default() -> Self {
        Self::new(SeverityKeywords::default())
    }
}

impl ReputationScorer {
    pub fn new(keywords: SeverityKeywords) -> Self {
        Self {
            keywords,
            weights: ScoreWeights::default(),
            consumer_baseline: Baseline(80, 75),
            social_baseline: Baseline(80, 75),
            media_baseline: Baseline(85, 80),
            regulatory_baseline: Baseline(90, 85),
        }
    }

    /// Score categorized search results
    pub fn score(&self, inputs: &ReputationInputs) -> ReputationScore {
        let consumer = self.detect(&inputs.consumer, IssueCategory::Consumer);
        let social = self.detect(&inputs.social, IssueCategory::Social);
        let news = self.detect(&inputs.news, IssueCategory::News);
        let regulatory = self.detect(&inputs.regulatory, IssueCategory::Regulatory);

        let scores = CategoryScores {
            consumer: category_score(
                &consumer,
                self.consumer_baseline.pick(!inputs.consumer.is_empty()),
            ),
            social: category_score(&social, self.social_baseline.pick(!inputs.social.is_empty())),
            media: category_score(&news, self.media_baseline.pick(!inputs.news.is_empty())),
            regulatory: category_score(
                &regulatory,
                self.regulatory_baseline.pick(!inputs.regulatory.is_empty()),
            ),
        };
        let overall = self.overall(&scores);

        let issues: Vec<ReputationIssue> = consumer
            .into_iter()
            .chain(social)
            .chain(news)
            .chain(regulatory)
            .collect();
        let summary = summarize(&issues, overall);

        ReputationScore {
            overall,
            consumer_sentiment: scores.consumer,
            social_media_sentiment: scores.social,
            media_sentiment: scores.media,
            regulatory_compliance: scores.regulatory,
            issues: issues.into_iter().take(MAX_REPORTED_ISSUES).collect(),
            summary,
        }
    }

    /// Weighted combination of the sub-scores, rounded and clamped to 0..=100
    pub fn overall(&self, scores: &CategoryScores) -> u8 {
        let w = &self.weights;
        let weighted = f64::from(scores.consumer) * w.consumer
            + f64::from(scores.social) * w.social
            + f64::from(scores.media) * w.media
            + f64::from(scores.regulatory) * w.regulatory;
        weighted.round().clamp(0.0, 100.0) as u8
    }

    fn detect(&self, results: &[SearchResult], category: IssueCategory) -> Vec<ReputationIssue> {
        results
            .iter()
            .take(RESULTS_PER_CATEGORY)
            .filter_map(|result| {
                let text = result.text();
                let severity = self.keywords.severity(&text);
                if !admits(category, severity, &text) {
                    return None;
                }
                let source = match category {
                    IssueCategory::Social => "Reddit".to_string(),
                    _ => result.source_label(),
                };
                Some(ReputationIssue::from_result(
                    result, category, severity, source,
                ))
            })
            .collect()
    }
}

/// Whether a classified result is reported as an issue of `category`
fn admits(category: IssueCategory, severity: Severity, text: &str) -> bool {
    match category {
        IssueCategory::Consumer => {
            let lower = text.to_lowercase();
            severity != Severity::Minor || lower.contains("complaint") || lower.contains("review")
        }
        IssueCategory::News => severity != Severity::Minor,
        IssueCategory::Social | IssueCategory::Regulatory => true,
    }
}

fn category_score(issues: &[ReputationIssue], baseline: i32) -> u8 {
    let penalty: i32 = issues.iter().map(|i| i.severity.penalty()).sum();
    (baseline - penalty).clamp(0, 100) as u8
}

fn summarize(issues: &[ReputationIssue], overall: u8) -> String {
    let severe = issues
        .iter()
        .filter(|i| i.severity == Severity::Severe)
        .count();
    let moderate = issues
        .iter()
        .filter(|i| i.severity == Severity::Moderate)
        .count();

    let mut summary = String::new();
    if severe > 0 {
        summary.push_str(&format!(
            "⚠️ CAUTION: Found {} severe issue(s) requiring immediate attention. ",
            severe
        ));
    }
    if moderate > 0 {
        summary.push_str(&format!("{} moderate concern(s) identified. ", moderate));
    }
    if severe == 0 && moderate == 0 {
        summary.push_str("No major reputation concerns found in the past 24 months. ");
    }
    summary.push_str(&format!("Overall reputation score: {}/100.", overall));
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(title: &str, snippet: &str) -> SearchResult {
        SearchResult::new(title, "https://www.example.com/story", snippet)
    }

    fn scores(value: u8) -> CategoryScores {
        CategoryScores {
            consumer: value,
            social: value,
            media: value,
            regulatory: value,
        }
    }

    #[test]
    fn test_overall_bounds() {
        let scorer = ReputationScorer::default();
        assert_eq!(scorer.overall(&scores(100)), 100);
        assert_eq!(scorer.overall(&scores(0)), 0);
    }

    #[test]
    fn test_overall_weighting() {
        let scorer = ReputationScorer::default();
        let mixed = CategoryScores {
            consumer: 80,
            social: 60,
            media: 90,
            regulatory: 70,
        };
        // 20 + 12 + 27 + 17.5 = 76.5
        assert_eq!(scorer.overall(&mixed), 77);
    }

    #[test]
    fn test_empty_inputs_use_lower_baselines() {
        let score = ReputationScorer::default().score(&ReputationInputs::default());
        assert_eq!(score.consumer_sentiment, 75);
        assert_eq!(score.social_media_sentiment, 75);
        assert_eq!(score.media_sentiment, 80);
        assert_eq!(score.regulatory_compliance, 85);
        assert!(score.issues.is_empty());
        assert!(score
            .summary
            .starts_with("No major reputation concerns found"));
        assert!(score.summary.ends_with("Overall reputation score: 79/100."));
    }

    #[test]
    fn test_severe_issue_in_regulatory() {
        let inputs = ReputationInputs {
            regulatory: vec![result(
                "FDA warning letter",
                "Agency cites complaint handling; product recall ordered",
            )],
            ..Default::default()
        };
        let score = ReputationScorer::default().score(&inputs);
        assert_eq!(score.issues.len(), 1);
        assert_eq!(score.issues[0].severity, Severity::Severe);
        assert_eq!(score.issues[0].category, IssueCategory::Regulatory);
        assert_eq!(score.issues[0].source, "example.com");
        // 90 baseline - 15
        assert_eq!(score.regulatory_compliance, 75);
        assert!(score.summary.starts_with("⚠️ CAUTION: Found 1 severe issue(s)"));
    }

    #[test]
    fn test_news_ignores_minor_items() {
        let inputs = ReputationInputs {
            news: vec![
                result("Company wins award", "Great quarter"),
                result("Shipment delay", "slow deliveries"),
                result("Regulators open investigation", ""),
            ],
            ..Default::default()
        };
        let score = ReputationScorer::default().score(&inputs);
        assert_eq!(score.issues.len(), 1);
        assert_eq!(score.issues[0].severity, Severity::Moderate);
        assert_eq!(score.media_sentiment, 85 - 8);
    }

    #[test]
    fn test_consumer_reviews_admitted_as_minor() {
        let inputs = ReputationInputs {
            consumer: vec![
                result("Acme reviews", "4.5 stars from buyers"),
                result("Acme catalog", "products list"),
            ],
            ..Default::default()
        };
        let score = ReputationScorer::default().score(&inputs);
        assert_eq!(score.issues.len(), 1);
        assert_eq!(score.issues[0].severity, Severity::Minor);
        assert_eq!(score.consumer_sentiment, 80 - 3);
    }

    #[test]
    fn test_social_always_reported_as_reddit() {
        let inputs = ReputationInputs {
            social: vec![result("Worked with Acme?", "Good experience overall")],
            ..Default::default()
        };
        let score = ReputationScorer::default().score(&inputs);
        assert_eq!(score.issues[0].source, "Reddit");
        assert_eq!(score.issues[0].category, IssueCategory::Social);
    }

    #[test]
    fn test_only_first_five_examined_and_clamped() {
        let lawsuits: Vec<SearchResult> = (0..8)
            .map(|i| result(&format!("Lawsuit {}", i), "fraud alleged"))
            .collect();
        let inputs = ReputationInputs {
            regulatory: lawsuits.clone(),
            social: lawsuits.clone(),
            consumer: lawsuits,
            ..Default::default()
        };
        let score = ReputationScorer::default().score(&inputs);
        // 90 - 5 * 15 = 15, 80 - 75 = 5
        assert_eq!(score.regulatory_compliance, 15);
        assert_eq!(score.consumer_sentiment, 5);
        assert_eq!(score.issues.len(), MAX_REPORTED_ISSUES);
    }

    #[test]
    fn test_score_never_negative() {
        let scorer = ReputationScorer::default();
        let issue = ReputationIssue::from_result(
            &result("x", ""),
            IssueCategory::News,
            Severity::Severe,
            "x".into(),
        );
        let many = vec![issue; 10];
        assert_eq!(category_score(&many, 85), 0);
        assert_eq!(scorer.overall(&scores(0)), 0);
    }
}
