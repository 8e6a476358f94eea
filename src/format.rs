//! Chat-message rendering: markdown stripping and category-grouped item
//! lists, matching what the Feishu text message type can display.

use chrono::Local;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::{truncate_chars, NewsItem};
use crate::translate::translate;

static RE_BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());
static RE_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`(.*?)`").unwrap());
static RE_LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]+)\]\([^)]+\)").unwrap());

const DEFAULT_CATEGORY: &str = "其他";
const ITEM_SUMMARY_MAX_CHARS: usize = 80;

/// Remove `**bold**`, `` `code` `` and `[label](url)` syntax, keeping the
/// inner text. Fixed three-pass substitution, no configuration.
pub fn strip_markdown(text: &str) -> String {
    let out = RE_BOLD.replace_all(text, "$1");
    let out = RE_CODE.replace_all(&out, "$1");
    RE_LINK.replace_all(&out, "$1").into_owned()
}

/// Render an item list as one chat message: emoji header, timestamp line,
/// items grouped by category (first-seen order, default bucket "其他"), and
/// an optional trailing summary line. Item summaries run through the
/// translation table and are capped at 80 characters.
pub fn format_items(items: &[NewsItem], summary: Option<&str>, timestamp: Option<&str>) -> String {
    let mut groups: Vec<(&str, Vec<&NewsItem>)> = Vec::new();
    for item in items {
        let cat = item.category.as_deref().unwrap_or(DEFAULT_CATEGORY);
        match groups.iter_mut().find(|(name, _)| *name == cat) {
            Some((_, bucket)) => bucket.push(item),
            None => groups.push((cat, vec![item])),
        }
    }

    let ts = match timestamp {
        Some(t) => t.to_string(),
        None => Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
    };

    let mut message = String::from("🔥 AI 热点资讯\n");
    message.push_str(&format!("📅 {ts}\n\n"));

    for (cat, bucket) in &groups {
        message.push_str(cat);
        message.push('\n');
        for (idx, item) in bucket.iter().enumerate() {
            message.push_str(&format!("{}. {}\n", idx + 1, item.title));
            if !item.summary.is_empty() {
                let translated = translate(&item.summary);
                let shown = if translated.chars().count() > ITEM_SUMMARY_MAX_CHARS {
                    format!("{}...", truncate_chars(&translated, ITEM_SUMMARY_MAX_CHARS))
                } else {
                    translated
                };
                message.push_str(&format!("   {shown}\n"));
            }
            if !item.url.is_empty() {
                message.push_str(&format!("   🔗 {}\n", item.url));
            }
            message.push('\n');
        }
    }

    if let Some(s) = summary {
        message.push_str(&format!("📊 {s}"));
    }

    message
}

/// Final message assembly: markdown is stripped from body and title, and a
/// present title is prepended on its own paragraph.
pub fn compose(title: Option<&str>, text: &str) -> String {
    let body = strip_markdown(text);
    match title {
        Some(t) => format!("{}\n\n{}", strip_markdown(t), body),
        None => body,
    }
}
