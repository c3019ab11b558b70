//! Strategy profiles: per-board selector tables behind one trait.
//!
//! Both profiles share the extraction contract through the default methods
//! of [`JobProfile`]; they differ only in the data they hand back.

mod generic;
mod stepstone;

pub use generic::GenericProfile;
pub use stepstone::StepstoneProfile;

use jobboards_api::{JobRecord, SearchParams};
use scraper::Html;

use crate::extract::{self, Card, Field, FieldRule};
use crate::normalize::{clean_text, make_absolute_url, parse_date, title_case};

/// Tags whose nearest instance above an anchor bounds a card.
pub const DEFAULT_CONTAINER_TAGS: &[&str] = &["article", "li", "div"];

/// A job-board extraction strategy.
///
/// Implementors supply declarative tables; the provided methods evaluate
/// them. None of the provided methods can fail: misses yield empty strings.
pub trait JobProfile: Send + Sync {
    /// Short name used in log lines.
    fn name(&self) -> &'static str;

    /// Search path templates; `{qs}` is replaced by the encoded query string.
    fn search_paths(&self) -> &'static [&'static str];

    /// Query-string parameter names for the search paths.
    fn search_params(&self) -> SearchParams {
        SearchParams::default()
    }

    /// Anchor selectors for card discovery, highest priority first.
    fn card_anchors(&self) -> &'static [&'static str];

    /// Selector cascade for one card field.
    fn field_rules(&self, field: Field) -> &'static [FieldRule];

    /// Selector cascade for the description container of a detail page.
    fn description_rules(&self) -> &'static [FieldRule];

    fn container_tags(&self) -> &'static [&'static str] {
        DEFAULT_CONTAINER_TAGS
    }

    fn employment_keywords(&self) -> &'static [&'static str] {
        extract::EMPLOYMENT_KEYWORDS
    }

    fn experience_keywords(&self) -> &'static [&'static str] {
        extract::EXPERIENCE_KEYWORDS
    }

    fn discover_cards<'a>(&self, document: &'a Html) -> Vec<Card<'a>> {
        extract::discover_cards(document, self.card_anchors(), self.container_tags())
    }

    /// Runs the field's cascade against the card scope.
    ///
    /// A missing title falls back to the anchor text; other misses are `""`.
    /// The first non-empty date value wins and is then normalized to ISO
    /// form; if it does not parse the field is `""`.
    fn extract_field(&self, card: &Card<'_>, field: Field) -> String {
        let found = extract::first_match(card.scope(), self.field_rules(field), clean_text);
        match (found, field) {
            (Some(raw), Field::DatePosted) => parse_date(&raw),
            (Some(value), _) => value,
            (None, Field::Title) => card.anchor_text(),
            (None, _) => String::new(),
        }
    }

    /// Builds a record from one card. Detail-only fields stay empty.
    fn build_record(&self, card: &Card<'_>, base_url: &str) -> JobRecord {
        JobRecord {
            job_title: self.extract_field(card, Field::Title),
            company_name: self.extract_field(card, Field::Company),
            location: self.extract_field(card, Field::Location),
            job_url: make_absolute_url(base_url, card.href()),
            salary: self.extract_field(card, Field::Salary),
            date_posted: self.extract_field(card, Field::DatePosted),
            source: base_url.to_string(),
            ..Default::default()
        }
    }

    /// Fills description, employment type, and experience level from a
    /// fetched detail page. Without a document the record is left untouched.
    ///
    /// The keyword scans run over the whole lower-cased markup, so words in
    /// navigation or footers count too.
    fn enrich_detail(&self, record: &mut JobRecord, html: &str, document: Option<&Html>) {
        let Some(document) = document else {
            return;
        };
        if let Some(description) = extract::description_text(document, self.description_rules()) {
            record.job_description = description;
        }

        let lowered = html.to_lowercase();
        if let Some(kind) = extract::first_keyword(&lowered, self.employment_keywords()) {
            record.employment_type = title_case(kind);
        }
        if let Some(level) = extract::first_keyword(&lowered, self.experience_keywords()) {
            record.experience_level = title_case(level);
        }
    }
}

static STEPSTONE: StepstoneProfile = StepstoneProfile;
static GENERIC: GenericProfile = GenericProfile;

/// Picks the profile for a site.
///
/// Stepstone-network sites are recognized by name or by their country
/// suffixes (`.be`, `.nl`, `.at`, `.de`); everything else gets the generic
/// profile.
pub fn route_profile(site: &str) -> &'static dyn JobProfile {
    let site = site.trim().trim_end_matches('/').to_lowercase();
    let is_stepstone = site.contains("stepstone")
        || [".be", ".nl", ".at", ".de"]
            .iter()
            .any(|suffix| site.ends_with(suffix));
    if is_stepstone {
        &STEPSTONE
    } else {
        &GENERIC
    }
}
