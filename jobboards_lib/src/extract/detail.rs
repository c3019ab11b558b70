//! Detail-page helpers: description text and keyword inference.

use scraper::Html;

use super::{first_match, FieldRule};
use crate::normalize::clean_multiline;

/// Checked in this order; the first one present anywhere in the page wins.
pub const EMPLOYMENT_KEYWORDS: &[&str] =
    &["full-time", "part-time", "contract", "temporary", "permanent"];

/// Checked in this order; the first one present anywhere in the page wins.
pub const EXPERIENCE_KEYWORDS: &[&str] = &["junior", "mid", "senior", "lead"];

/// Text of the first non-empty description container, paragraphs on separate lines.
pub fn description_text(document: &Html, rules: &[FieldRule]) -> Option<String> {
    first_match(document.root_element(), rules, clean_multiline)
}

/// First keyword (in list order, not page position) contained in `lowered`.
///
/// `lowered` must already be lower-case. Matching is plain substring
/// containment over the whole page, navigation and footer included.
pub fn first_keyword<'k>(lowered: &str, keywords: &[&'k str]) -> Option<&'k str> {
    keywords.iter().copied().find(|kw| lowered.contains(kw))
}
