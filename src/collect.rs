//! Digest assembly: run every configured source, tolerate individual
//! failures, and cap the combined result.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{info, warn};

use crate::model::{Digest, MAX_DIGEST_ITEMS};
use crate::sources::{github::GithubSearchSource, scraped::ScrapedSource, NewsSource};

/// The four sources in their fixed configuration order. Digest items always
/// appear in this order, never interleaved by completion time.
pub fn default_sources(github_token: Option<String>) -> Vec<Box<dyn NewsSource>> {
    vec![
        Box::new(GithubSearchSource::agent_trending(github_token.clone())),
        Box::new(GithubSearchSource::chinese_models(github_token)),
        Box::new(ScrapedSource::zread_trending()),
        Box::new(ScrapedSource::ai_hot_today()),
    ]
}

/// Run the sources one at a time in configuration order. A failing source
/// contributes zero items and never aborts the run; the summary reports the
/// pre-truncation total.
pub async fn assemble(sources: &[Box<dyn NewsSource>]) -> Digest {
    let mut all = Vec::new();
    for source in sources {
        match source.fetch().await {
            Ok(items) => {
                info!(source = source.name(), count = items.len(), "source fetched");
                all.extend(items);
            }
            Err(e) => {
                warn!(error = %e, source = source.name(), "source fetch failed; continuing");
            }
        }
    }

    let total = all.len();
    all.truncate(MAX_DIGEST_ITEMS);

    Digest {
        timestamp: Utc::now().to_rfc3339(),
        summary: format!("共收集到 {total} 条 AI 资讯"),
        items: all,
    }
}

/// Persist the digest artifact as pretty-printed JSON.
pub fn write_digest(digest: &Digest, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(digest).context("serializing digest")?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
