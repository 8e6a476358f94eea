//! Collector binary: one digest per invocation, written to `result.json`.
//!
//! Partial source failures are tolerated; a run that collects nothing at all
//! exits nonzero so the operator sees it.

use std::path::PathBuf;

use anyhow::{bail, Result};
use tracing::info;

use ai_news_relay::collect;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_target(false)
        .init();

    let out_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("result.json"));

    let github_token = std::env::var("GITHUB_TOKEN").ok();
    if github_token.is_none() {
        info!("GITHUB_TOKEN not set; searching unauthenticated at the lower rate limit");
    }

    let sources = collect::default_sources(github_token);
    let digest = collect::assemble(&sources).await;

    if digest.items.is_empty() {
        bail!("no items collected from any source");
    }

    collect::write_digest(&digest, &out_path)?;
    info!(path = %out_path.display(), summary = %digest.summary, "digest written");
    Ok(())
}
