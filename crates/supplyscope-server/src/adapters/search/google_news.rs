//! Google News RSS search
//!
//! Free, keyless. The feed is parsed with regular expressions; items carry
//! either CDATA or entity-escaped text.

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use std::sync::LazyLock;
use std::time::Duration;

use supplyscope::{DomainError, SearchProviderKind, SearchResult, WebSearchService};

const GOOGLE_NEWS_RSS_URL: &str = "https://news.google.com/rss/search";
const USER_AGENT: &str = "Mozilla/5.0 (compatible; SupplyScope/0.1)";

static ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<item>(.*?)</item>").expect("valid item regex"));
static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid html tag regex"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

fn element(name: &str) -> Regex {
    Regex::new(&format!(
        r"(?s)<{name}(?:\s[^>]*)?>(?:<!\[CDATA\[(.*?)\]\]>|(.*?))</{name}>"
    ))
    .expect("valid rss element regex")
}

static TITLE: LazyLock<Regex> = LazyLock::new(|| element("title"));
static LINK: LazyLock<Regex> = LazyLock::new(|| element("link"));
static DESCRIPTION: LazyLock<Regex> = LazyLock::new(|| element("description"));
static PUB_DATE: LazyLock<Regex> = LazyLock::new(|| element("pubDate"));
static SOURCE: LazyLock<Regex> = LazyLock::new(|| element("source"));

pub struct GoogleNewsSearch {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl GoogleNewsSearch {
    pub fn new(client: Client, timeout: Duration) -> Self {
        Self::with_base_url(client, GOOGLE_NEWS_RSS_URL, timeout)
    }

    pub fn with_base_url(client: Client, base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            timeout,
        }
    }
}

#[async_trait]
impl WebSearchService for GoogleNewsSearch {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>, DomainError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("q", query),
                ("hl", "en-US"),
                ("gl", "US"),
                ("ceid", "US:en"),
            ])
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| DomainError::external(self.provider_name(), e))?;

        if !response.status().is_success() {
            return Err(DomainError::external(
                self.provider_name(),
                format!("status {}", response.status()),
            ));
        }

        let xml = response
            .text()
            .await
            .map_err(|e| DomainError::parse(self.provider_name(), e))?;

        Ok(parse_feed(&xml, limit))
    }

    fn kind(&self) -> SearchProviderKind {
        SearchProviderKind::GoogleNews
    }
}

/// Parse RSS `<item>` blocks into search results
pub(crate) fn parse_feed(xml: &str, limit: usize) -> Vec<SearchResult> {
    ITEM.captures_iter(xml)
        .filter_map(|caps| caps.get(1))
        .map(|item| {
            let item = item.as_str();
            let field = |re: &Regex| capture_text(re, item).unwrap_or_default();
            SearchResult::new(
                clean_text(&field(&TITLE)),
                decode_entities(&field(&LINK)),
                clean_text(&field(&DESCRIPTION)),
            )
            .with_published_age(field(&PUB_DATE))
            .with_source(clean_text(&field(&SOURCE)))
        })
        .filter(SearchResult::is_countable)
        .take(limit)
        .collect()
}

fn capture_text(re: &Regex, item: &str) -> Option<String> {
    let caps = re.captures(item)?;
    caps.get(1)
        .or_else(|| caps.get(2))
        .map(|m| m.as_str().trim().to_string())
}

/// Decode entities, drop markup, collapse whitespace
fn clean_text(raw: &str) -> String {
    let decoded = decode_entities(raw);
    let stripped = HTML_TAG.replace_all(&decoded, " ");
    let decoded = decode_entities(&stripped);
    WHITESPACE.replace_all(decoded.trim(), " ").to_string()
}

fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::testing::{failing_server, hanging_server, SHORT_TIMEOUT};

    const FEED: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0"><channel><title>"Acme" - Google News</title>
<item>
  <title><![CDATA[Acme Corp recalls widgets - Reuters]]></title>
  <link>https://news.google.com/rss/articles/abc?oc=5&amp;hl=en</link>
  <pubDate>Mon, 02 Feb 2026 10:00:00 GMT</pubDate>
  <description>&lt;a href="https://reuters.com/x"&gt;Acme Corp recalls widgets&lt;/a&gt;&amp;nbsp;&amp;nbsp;&lt;font color="#6f6f6f"&gt;Reuters&lt;/font&gt;</description>
  <source url="https://www.reuters.com">Reuters</source>
</item>
<item>
  <title>Acme &amp; Partners expand plant</title>
  <link>https://news.google.com/rss/articles/def</link>
  <description></description>
</item>
<item>
  <title></title>
  <link>https://news.google.com/rss/articles/ghi</link>
</item>
</channel></rss>"##;

    #[test]
    fn test_parse_feed_items() {
        let results = parse_feed(FEED, 10);
        assert_eq!(results.len(), 2);

        let first = &results[0];
        assert_eq!(first.title, "Acme Corp recalls widgets - Reuters");
        assert_eq!(first.url, "https://news.google.com/rss/articles/abc?oc=5&hl=en");
        assert_eq!(first.snippet, "Acme Corp recalls widgets Reuters");
        assert_eq!(
            first.published_age.as_deref(),
            Some("Mon, 02 Feb 2026 10:00:00 GMT")
        );
        assert_eq!(first.source.as_deref(), Some("Reuters"));

        let second = &results[1];
        assert_eq!(second.title, "Acme & Partners expand plant");
        assert!(second.snippet.is_empty());
        assert!(second.published_age.is_none());
    }

    #[test]
    fn test_parse_feed_respects_limit() {
        assert_eq!(parse_feed(FEED, 1).len(), 1);
        assert!(parse_feed("<rss></rss>", 5).is_empty());
    }

    #[test]
    fn test_channel_title_not_an_item() {
        let results = parse_feed(FEED, 10);
        assert!(results.iter().all(|r| !r.title.contains("Google News")));
    }

    #[tokio::test]
    async fn test_hanging_server_times_out() {
        let url = hanging_server().await;
        let search = GoogleNewsSearch::with_base_url(Client::new(), url, SHORT_TIMEOUT);

        let started = std::time::Instant::now();
        let err = search.search("acme", 5).await.unwrap_err();
        assert!(started.elapsed() < Duration::from_secs(5));
        assert!(matches!(err, DomainError::ExternalService(_)));
    }

    #[tokio::test]
    async fn test_server_error_status() {
        let url = failing_server().await;
        let search = GoogleNewsSearch::with_base_url(Client::new(), url, SHORT_TIMEOUT);

        let err = search.search("acme", 5).await.unwrap_err();
        assert!(matches!(err, DomainError::ExternalService(ref m) if m.contains("500")));
    }
}
