pub mod github;
pub mod scraped;

use anyhow::Result;

use crate::model::NewsItem;

/// One upstream news source. A failed fetch is final for the run; the
/// assembler isolates it and the remaining sources still contribute.
#[async_trait::async_trait]
pub trait NewsSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<NewsItem>>;
    fn name(&self) -> &'static str;
}
