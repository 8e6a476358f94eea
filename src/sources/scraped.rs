//! HTML-scraped sources with a cascading selector fallback chain.
//!
//! These pages change structure without notice, so each source carries an
//! ordered list of selectors tried against the parsed document. The first
//! selector that yields at least one accepted heading wins; later selectors
//! are never consulted for extra items. A page that loads but matches no
//! selector degrades to a single placeholder item, so a reachable source
//! always contributes one row to the digest.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use reqwest::header::USER_AGENT;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::warn;
use url::Url;

use crate::model::{truncate_chars, NewsItem};
use crate::sources::NewsSource;

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);
const DESKTOP_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

/// Bodies shorter than this are error pages or JS-only shells, not content.
const MIN_BODY_CHARS: usize = 100;

const TITLE_MIN_CHARS: usize = 5;
const TITLE_MAX_CHARS: usize = 200;
const TITLE_CAP_CHARS: usize = 100;

pub struct ScrapedSource {
    label: &'static str,
    page_url: &'static str,
    selectors: &'static [&'static str],
    max_items: usize,
    placeholder_title: &'static str,
    placeholder_summary: &'static str,
    client: Client,
}

impl ScrapedSource {
    pub fn zread_trending() -> Self {
        Self {
            label: "Zread Trending",
            page_url: "https://zread.ai/trending",
            selectors: &["h3", "h4", "article h2"],
            max_items: 5,
            placeholder_title: "Zread Trending 今日热门（解析失败，请访问源站）",
            placeholder_summary: "来自 Zread 趋势",
            client: Client::new(),
        }
    }

    pub fn ai_hot_today() -> Self {
        Self {
            label: "AI Hot Today",
            page_url: "https://aihot.today/",
            selectors: &["h2", "h3", "article"],
            max_items: 3,
            placeholder_title: "AI Hot Today 今日热点（解析失败，请访问源站）",
            placeholder_summary: "来自 AI Hot Today",
            client: Client::new(),
        }
    }

    /// The synthetic row emitted when the page loads but no selector in the
    /// chain yields an accepted heading.
    pub fn placeholder_item(&self) -> NewsItem {
        NewsItem::new(
            self.label,
            self.placeholder_title,
            self.placeholder_summary,
            self.page_url,
        )
    }

    /// Extract headings from a fetched document. Selectors are tried in
    /// chain order; the first one producing at least one accepted item ends
    /// the search. Returns an empty vec when nothing in the chain matched.
    pub fn extract_items(&self, html: &str) -> Vec<NewsItem> {
        let document = Html::parse_document(html);
        let base = Url::parse(self.page_url).ok();

        for sel in self.selectors {
            let selector = match Selector::parse(sel) {
                Ok(s) => s,
                Err(_) => continue,
            };

            let mut accepted = Vec::new();
            for element in document.select(&selector) {
                if accepted.len() >= self.max_items {
                    break;
                }

                let text = element.text().collect::<Vec<_>>().join(" ");
                let text = text.trim();
                let candidate = if text.is_empty() {
                    element.value().attr("title").unwrap_or("").trim()
                } else {
                    text
                };

                let len = candidate.chars().count();
                if len <= TITLE_MIN_CHARS || len >= TITLE_MAX_CHARS {
                    continue;
                }

                let url = self
                    .item_link(&element, base.as_ref())
                    .unwrap_or_else(|| self.page_url.to_string());

                accepted.push(NewsItem::new(
                    self.label,
                    truncate_chars(candidate, TITLE_CAP_CHARS),
                    self.placeholder_summary,
                    url,
                ));
            }

            if !accepted.is_empty() {
                return accepted;
            }
        }

        Vec::new()
    }

    fn item_link(&self, element: &scraper::ElementRef<'_>, base: Option<&Url>) -> Option<String> {
        let href = if element.value().name() == "a" {
            element.value().attr("href")
        } else {
            let a = Selector::parse("a[href]").ok()?;
            element
                .select(&a)
                .next()
                .and_then(|e| e.value().attr("href"))
        }?;

        match base {
            Some(b) => b.join(href).ok().map(|u| u.to_string()),
            None => Some(href.to_string()),
        }
    }
}

/// Guard against silently succeeding on an error page or a JS-only shell.
pub fn acceptable_body(body: &str) -> bool {
    body.chars().count() >= MIN_BODY_CHARS
}

#[async_trait::async_trait]
impl NewsSource for ScrapedSource {
    async fn fetch(&self) -> Result<Vec<NewsItem>> {
        let body = self
            .client
            .get(self.page_url)
            .timeout(FETCH_TIMEOUT)
            .header(USER_AGENT, DESKTOP_UA)
            .send()
            .await
            .with_context(|| format!("{} request failed", self.label))?
            .error_for_status()
            .with_context(|| format!("{} returned error status", self.label))?
            .text()
            .await
            .with_context(|| format!("{} body read failed", self.label))?;

        if !acceptable_body(&body) {
            bail!("{} returned a suspiciously short body", self.label);
        }

        let items = self.extract_items(&body);
        if items.is_empty() {
            warn!(source = self.label, "no selector matched; degrading to placeholder");
            return Ok(vec![self.placeholder_item()]);
        }
        Ok(items)
    }

    fn name(&self) -> &'static str {
        self.label
    }
}
