//! Wiki/Forum Harvester
//!
//! Fetches community jump documents from Reddit (JSON listings) and Fandom
//! wikis (raw wikitext), strips the markup, and returns importable
//! documents. Requests are throttled to one per interval so a curated
//! harvest never hammers either site.

use std::sync::LazyLock;
use std::time::{Duration, Instant};

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::Mutex;

const USER_AGENT: &str = "jumpchain-nexus/0.1 (desktop harvester)";
const MIN_REQUEST_INTERVAL: Duration = Duration::from_secs(2);

static WIKI_TEMPLATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{[^{}]*\}\}").unwrap());
static WIKI_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[(?:[^\]|]*\|)?([^\]|]*)\]\]").unwrap());
static WIKI_EMPHASIS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"'{2,}").unwrap());
static WIKI_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<ref[^>/]*(?:/>|>.*?</ref>)").unwrap());
static HTML_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

/// One harvested document, ready for the import pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HarvestedDocument {
    pub title: String,
    pub body: String,
    pub source_url: String,
}

/// Throttled HTTP client for the curated harvest
pub struct Harvester {
    http: reqwest::Client,
    min_interval: Duration,
    last_fetch: Mutex<Option<Instant>>,
}

impl Harvester {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::builder()
                .user_agent(USER_AGENT)
                .build()
                .unwrap_or_default(),
            min_interval: MIN_REQUEST_INTERVAL,
            last_fetch: Mutex::new(None),
        }
    }

    /// Wait out the remainder of the request interval, then stamp now
    async fn throttle(&self) {
        let mut last = self.last_fetch.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                tokio::time::sleep(self.min_interval - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }

    /// Fetch one supported page and return its documents.
    ///
    /// Reddit URLs are fetched as `.json` listings; Fandom pages as raw
    /// wikitext. Anything else is rejected rather than scraped blind.
    pub async fn fetch(&self, url: &str) -> Result<Vec<HarvestedDocument>, String> {
        if url.contains("reddit.com") {
            self.fetch_reddit(url).await
        } else if url.contains("fandom.com") {
            self.fetch_fandom(url).await
        } else {
            Err(format!("Unsupported harvest source: {}", url))
        }
    }

    async fn fetch_reddit(&self, url: &str) -> Result<Vec<HarvestedDocument>, String> {
        self.throttle().await;

        let json_url = if url.ends_with(".json") {
            url.to_string()
        } else {
            format!("{}.json", url.trim_end_matches('/'))
        };

        let value: Value = self
            .http
            .get(&json_url)
            .send()
            .await
            .map_err(|e| format!("Reddit fetch failed: {}", e))?
            .json()
            .await
            .map_err(|e| format!("Reddit response was not JSON: {}", e))?;

        Ok(parse_reddit_listing(&value, url))
    }

    async fn fetch_fandom(&self, url: &str) -> Result<Vec<HarvestedDocument>, String> {
        self.throttle().await;

        let raw_url = if url.contains('?') {
            format!("{}&action=raw", url)
        } else {
            format!("{}?action=raw", url)
        };

        let wikitext = self
            .http
            .get(&raw_url)
            .send()
            .await
            .map_err(|e| format!("Fandom fetch failed: {}", e))?
            .text()
            .await
            .map_err(|e| format!("Fandom response was not text: {}", e))?;

        let title = url
            .rsplit('/')
            .next()
            .unwrap_or("Fandom page")
            .replace('_', " ");

        Ok(vec![HarvestedDocument {
            title,
            body: strip_wiki_markup(&wikitext),
            source_url: url.to_string(),
        }])
    }
}

impl Default for Harvester {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract self-posts from a Reddit listing response.
///
/// Reddit returns either one listing (subreddit page) or an array of
/// listings (post page plus comments); both shapes reduce to the children
/// with non-empty selftext.
pub fn parse_reddit_listing(value: &Value, source_url: &str) -> Vec<HarvestedDocument> {
    let listings: Vec<&Value> = match value {
        Value::Array(items) => items.iter().collect(),
        other => vec![other],
    };

    let mut documents = Vec::new();
    for listing in listings {
        let Some(children) = listing
            .get("data")
            .and_then(|d| d.get("children"))
            .and_then(|c| c.as_array())
        else {
            continue;
        };

        for child in children {
            let Some(data) = child.get("data") else {
                continue;
            };
            let selftext = data.get("selftext").and_then(|s| s.as_str()).unwrap_or("");
            if selftext.trim().is_empty() {
                continue;
            }

            let title = data
                .get("title")
                .and_then(|t| t.as_str())
                .unwrap_or("Untitled post")
                .to_string();
            let permalink = data
                .get("permalink")
                .and_then(|p| p.as_str())
                .map(|p| format!("https://www.reddit.com{}", p))
                .unwrap_or_else(|| source_url.to_string());

            documents.push(HarvestedDocument {
                title,
                body: selftext.to_string(),
                source_url: permalink,
            });
        }
    }
    documents
}

/// Strip MediaWiki markup down to plain text.
pub fn strip_wiki_markup(wikitext: &str) -> String {
    let mut text = wikitext.to_string();

    // Templates can nest one level deep; two passes cover the common case
    for _ in 0..2 {
        text = WIKI_TEMPLATE.replace_all(&text, "").into_owned();
    }
    text = WIKI_REF.replace_all(&text, "").into_owned();
    text = WIKI_LINK.replace_all(&text, "$1").into_owned();
    text = WIKI_EMPHASIS.replace_all(&text, "").into_owned();
    text = HTML_TAG.replace_all(&text, "").into_owned();

    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strip_wiki_markup() {
        let wikitext = "{{Infobox|name=Jump}}'''Pokemon''' is a [[setting|world]] with [[trainers]].<ref>source</ref>";
        assert_eq!(
            strip_wiki_markup(wikitext),
            "Pokemon is a world with trainers."
        );
    }

    #[test]
    fn test_strip_wiki_markup_nested_template() {
        let wikitext = "{{Outer|{{Inner}}}}Body text";
        assert_eq!(strip_wiki_markup(wikitext), "Body text");
    }

    #[test]
    fn test_parse_reddit_listing_skips_link_posts() {
        let listing = json!({
            "kind": "Listing",
            "data": {
                "children": [
                    {"data": {"title": "Jump doc", "selftext": "CP: 1000", "permalink": "/r/JumpChain/comments/abc/jump_doc/"}},
                    {"data": {"title": "Image post", "selftext": ""}}
                ]
            }
        });

        let docs = parse_reddit_listing(&listing, "https://www.reddit.com/r/JumpChain/");
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].title, "Jump doc");
        assert_eq!(
            docs[0].source_url,
            "https://www.reddit.com/r/JumpChain/comments/abc/jump_doc/"
        );
    }

    #[test]
    fn test_parse_reddit_post_page_array_shape() {
        let page = json!([
            {"data": {"children": [
                {"data": {"title": "The post", "selftext": "Body", "permalink": "/r/JumpChain/comments/xyz/"}}
            ]}},
            {"data": {"children": [
                {"data": {"body": "a comment"}}
            ]}}
        ]);

        let docs = parse_reddit_listing(&page, "https://old.reddit.com/r/JumpChain/comments/xyz/");
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].body, "Body");
    }

    #[test]
    fn test_parse_reddit_garbage_is_empty() {
        let docs = parse_reddit_listing(&json!({"error": 429}), "https://www.reddit.com/");
        assert!(docs.is_empty());
    }
}
