//! Whole-word English → Chinese substitution for technical vocabulary.
//!
//! The dictionary is an ordered list of pairs; entries are applied in table
//! order, each as a global replace over the current string state. Later
//! entries may re-process text produced by earlier ones, so the mapping is
//! not confluent and repeated application is not guaranteed idempotent.

use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};

/// Compiled table: one case-insensitive whole-word regex per dictionary entry,
/// in the order the entries appear in `translation_dict.json`.
static TABLE: Lazy<Vec<(Regex, String)>> = Lazy::new(|| {
    let raw = include_str!("../translation_dict.json");
    let pairs: Vec<(String, String)> =
        serde_json::from_str(raw).expect("valid translation dictionary");
    pairs
        .into_iter()
        .map(|(en, zh)| {
            let pattern = format!(r"(?i)\b{}\b", regex::escape(&en));
            let re = Regex::new(&pattern).expect("valid dictionary pattern");
            (re, zh)
        })
        .collect()
});

/// Replace every whole-word occurrence of a dictionary key with its mapped
/// value. Empty input comes back unchanged; this never fails.
pub fn translate(text: &str) -> String {
    if text.is_empty() {
        return text.to_string();
    }
    let mut out = text.to_string();
    for (re, zh) in TABLE.iter() {
        out = re.replace_all(&out, NoExpand(zh)).into_owned();
    }
    out
}
