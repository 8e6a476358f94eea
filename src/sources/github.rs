//! GitHub repository-search sources.
//!
//! Two configured query variants hit the same search endpoint: one tracking
//! AI-agent repositories, one tracking Chinese LLM projects. Parsing is split
//! from transport so tests can feed fixture JSON.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::Client;
use serde::Deserialize;

use crate::model::{truncate_chars, NewsItem};
use crate::sources::NewsSource;

const SEARCH_URL: &str = "https://api.github.com/search/repositories";
const FETCH_TIMEOUT: Duration = Duration::from_secs(15);
const SUMMARY_MAX_CHARS: usize = 100;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    items: Vec<RepoRecord>,
}

#[derive(Debug, Deserialize)]
struct RepoRecord {
    full_name: String,
    description: Option<String>,
    html_url: String,
    stargazers_count: u64,
}

pub struct GithubSearchSource {
    label: &'static str,
    query: &'static str,
    per_page: usize,
    token: Option<String>,
    client: Client,
}

impl GithubSearchSource {
    /// Recently updated Python agent repositories.
    pub fn agent_trending(token: Option<String>) -> Self {
        Self {
            label: "GitHub Trending",
            query: "topic:agent+language:python",
            per_page: 5,
            token,
            client: Client::new(),
        }
    }

    /// Repositories around the major Chinese model families.
    pub fn chinese_models(token: Option<String>) -> Self {
        Self {
            label: "中国大模型",
            query: "DeepSeek+OR+Qwen+OR+ChatGLM",
            per_page: 5,
            token,
            client: Client::new(),
        }
    }

    fn search_url(&self) -> String {
        // The query is pre-encoded ('+' separators); bypass reqwest's query
        // encoding so it reaches the API verbatim.
        format!(
            "{SEARCH_URL}?q={}&sort=updated&order=desc&per_page={}",
            self.query, self.per_page
        )
    }

    /// Map a search-response body to news items. Repositories missing a name
    /// or web URL are dropped; descriptions fall back to a placeholder and
    /// are capped at 100 characters.
    pub fn items_from_json(label: &str, body: &str) -> Result<Vec<NewsItem>> {
        let resp: SearchResponse =
            serde_json::from_str(body).context("parsing github search response")?;

        let mut out = Vec::with_capacity(resp.items.len());
        for repo in resp.items {
            if repo.full_name.is_empty() || repo.html_url.is_empty() {
                continue;
            }
            let summary = repo
                .description
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| "No description".to_string());
            let mut item = NewsItem::new(
                label,
                repo.full_name,
                truncate_chars(&summary, SUMMARY_MAX_CHARS),
                repo.html_url,
            );
            item.stars = Some(repo.stargazers_count);
            out.push(item);
        }
        Ok(out)
    }
}

#[async_trait::async_trait]
impl NewsSource for GithubSearchSource {
    async fn fetch(&self) -> Result<Vec<NewsItem>> {
        let mut req = self
            .client
            .get(self.search_url())
            .timeout(FETCH_TIMEOUT)
            .header(USER_AGENT, "Mozilla/5.0")
            .header(ACCEPT, "application/vnd.github.v3+json");
        if let Some(token) = &self.token {
            req = req.header(AUTHORIZATION, format!("token {token}"));
        }

        let body = req
            .send()
            .await
            .context("github search request failed")?
            .error_for_status()
            .context("github search returned error status")?
            .text()
            .await
            .context("github search body read failed")?;

        Self::items_from_json(self.label, &body)
    }

    fn name(&self) -> &'static str {
        self.label
    }
}
