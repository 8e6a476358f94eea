// Assembler behavior with stub sources: configuration-order concatenation,
// per-source failure isolation, the 10-item cap, and the pre-truncation
// summary count.

use anyhow::{bail, Result};

use ai_news_relay::collect::assemble;
use ai_news_relay::model::MAX_DIGEST_ITEMS;
use ai_news_relay::sources::NewsSource;
use ai_news_relay::NewsItem;

struct StubSource {
    name: &'static str,
    items: Vec<NewsItem>,
    fail: bool,
}

impl StubSource {
    fn with_items(name: &'static str, titles: &[&str]) -> Box<dyn NewsSource> {
        let items = titles
            .iter()
            .map(|t| NewsItem::new(name, *t, "summary", "https://example.com"))
            .collect();
        Box::new(Self {
            name,
            items,
            fail: false,
        })
    }

    fn failing(name: &'static str) -> Box<dyn NewsSource> {
        Box::new(Self {
            name,
            items: Vec::new(),
            fail: true,
        })
    }
}

#[async_trait::async_trait]
impl NewsSource for StubSource {
    async fn fetch(&self) -> Result<Vec<NewsItem>> {
        if self.fail {
            bail!("{} is down", self.name);
        }
        Ok(self.items.clone())
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

#[tokio::test]
async fn items_keep_configuration_order_and_summary_counts_pre_truncation() {
    let sources = vec![
        StubSource::with_items("s1", &["s1-a", "s1-b"]),
        StubSource::with_items("s2", &["s2-a", "s2-b"]),
        StubSource::with_items("s3", &["s3-a"]),
        StubSource::with_items("s4", &["s4-a"]),
    ];

    let digest = assemble(&sources).await;
    let titles: Vec<&str> = digest.items.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, vec!["s1-a", "s1-b", "s2-a", "s2-b", "s3-a", "s4-a"]);
    assert!(digest.summary.contains('6'), "summary was: {}", digest.summary);
    chrono::DateTime::parse_from_rfc3339(&digest.timestamp).expect("ISO timestamp");
}

#[tokio::test]
async fn one_failing_source_never_hides_the_others() {
    let sources = vec![
        StubSource::with_items("s1", &["s1-a"]),
        StubSource::failing("s2"),
        StubSource::with_items("s3", &["s3-a"]),
    ];

    let digest = assemble(&sources).await;
    let titles: Vec<&str> = digest.items.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, vec!["s1-a", "s3-a"]);
    assert!(digest.summary.contains('2'));
}

#[tokio::test]
async fn digest_is_capped_but_summary_reports_the_full_count() {
    let many: Vec<String> = (0..8).map(|i| format!("s1-{i}")).collect();
    let many_refs: Vec<&str> = many.iter().map(String::as_str).collect();
    let sources = vec![
        StubSource::with_items("s1", &many_refs),
        StubSource::with_items("s2", &["s2-a", "s2-b", "s2-c", "s2-d"]),
    ];

    let digest = assemble(&sources).await;
    assert_eq!(digest.items.len(), MAX_DIGEST_ITEMS);
    assert!(digest.summary.contains("12"), "summary was: {}", digest.summary);
    // Truncation keeps the head of the concatenation, so s1 survives whole.
    assert_eq!(digest.items[7].title, "s1-7");
    assert_eq!(digest.items[8].title, "s2-a");
}

#[tokio::test]
async fn all_sources_failing_yields_an_empty_digest() {
    let sources = vec![StubSource::failing("s1"), StubSource::failing("s2")];
    let digest = assemble(&sources).await;
    assert!(digest.items.is_empty());
    assert!(digest.summary.contains('0'));
}

#[tokio::test]
async fn digest_serializes_to_the_artifact_shape() {
    let sources = vec![StubSource::with_items("s1", &["only-item-here"])];
    let digest = assemble(&sources).await;

    let json = serde_json::to_value(&digest).unwrap();
    assert!(json["timestamp"].is_string());
    assert!(json["summary"].is_string());
    assert_eq!(json["items"][0]["title"], "only-item-here");
    assert!(json["items"][0].get("stars").is_none());
}
