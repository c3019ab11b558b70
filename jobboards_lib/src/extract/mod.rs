//! Selector-cascade extraction over parsed HTML.
//!
//! Field lookups are driven by ordered [`FieldRule`] tables: the first rule
//! yielding a non-empty value wins. Profiles own the tables; this module
//! owns the single routine that evaluates them.

mod detail;

pub use detail::{description_text, first_keyword, EMPLOYMENT_KEYWORDS, EXPERIENCE_KEYWORDS};

use std::collections::HashSet;

use scraper::{ElementRef, Html, Node, Selector};

use crate::normalize::clean_text;

/// Listing fields read from a search-result card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Company,
    Location,
    Salary,
    DatePosted,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Title,
        Field::Company,
        Field::Location,
        Field::Salary,
        Field::DatePosted,
    ];
}

/// Where a matched element's value is read from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Source {
    /// Concatenated descendant text.
    Text,
    /// Descendant text with a line break after every block-level element,
    /// for multi-paragraph content.
    Blocks,
    /// The named attribute.
    Attr(&'static str),
}

/// One entry of a selector cascade.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldRule {
    pub selector: &'static str,
    pub source: Source,
}

pub const fn text(selector: &'static str) -> FieldRule {
    FieldRule {
        selector,
        source: Source::Text,
    }
}

pub const fn blocks(selector: &'static str) -> FieldRule {
    FieldRule {
        selector,
        source: Source::Blocks,
    }
}

pub const fn attr(selector: &'static str, name: &'static str) -> FieldRule {
    FieldRule {
        selector,
        source: Source::Attr(name),
    }
}

/// A job-listing anchor together with the sub-tree its fields are read from.
#[derive(Clone, Copy, Debug)]
pub struct Card<'a> {
    anchor: ElementRef<'a>,
    scope: ElementRef<'a>,
}

impl<'a> Card<'a> {
    /// Builds a card whose scope is the anchor's nearest ancestor among
    /// `container_tags`, or the anchor itself.
    pub fn new(anchor: ElementRef<'a>, container_tags: &[&str]) -> Self {
        let scope = anchor
            .ancestors()
            .filter_map(ElementRef::wrap)
            .find(|el| container_tags.contains(&el.value().name()))
            .unwrap_or(anchor);
        Self { anchor, scope }
    }

    pub fn href(&self) -> &'a str {
        self.anchor.value().attr("href").unwrap_or("").trim()
    }

    /// The anchor's own text, whitespace-collapsed.
    pub fn anchor_text(&self) -> String {
        clean_text(&self.anchor.text().collect::<String>())
    }

    pub fn scope(&self) -> ElementRef<'a> {
        self.scope
    }
}

fn compile(selector: &str) -> Option<Selector> {
    match Selector::parse(selector) {
        Ok(sel) => Some(sel),
        Err(e) => {
            tracing::debug!("skipping selector {:?}: {}", selector, e);
            None
        }
    }
}

/// Pools anchors matched by `anchor_selectors` in priority order, dropping
/// anchors without an href and repeated hrefs (first occurrence kept).
pub fn discover_cards<'a>(
    document: &'a Html,
    anchor_selectors: &[&str],
    container_tags: &[&str],
) -> Vec<Card<'a>> {
    let mut seen = HashSet::new();
    let mut cards = Vec::new();
    for selector in anchor_selectors.iter().filter_map(|s| compile(s)) {
        for anchor in document.select(&selector) {
            let card = Card::new(anchor, container_tags);
            let href = card.href();
            if href.is_empty() || !seen.insert(href) {
                continue;
            }
            cards.push(card);
        }
    }
    cards
}

const BLOCK_TAGS: &[&str] = &[
    "p", "div", "li", "ul", "ol", "section", "article", "header", "footer", "h1", "h2", "h3",
    "h4", "h5", "h6", "tr", "table", "blockquote", "pre", "dd", "dt",
];

fn push_blocks(el: ElementRef<'_>, out: &mut String) {
    for child in el.children() {
        if let Some(child_el) = ElementRef::wrap(child) {
            let name = child_el.value().name();
            match name {
                "br" => out.push('\n'),
                "script" | "style" | "noscript" => {}
                _ => {
                    let is_block = BLOCK_TAGS.contains(&name);
                    if is_block {
                        out.push('\n');
                    }
                    push_blocks(child_el, out);
                    if is_block {
                        out.push('\n');
                    }
                }
            }
        } else if let Node::Text(text) = child.value() {
            out.extend(text.chars().map(|c| if c == '\n' || c == '\r' { ' ' } else { c }));
        }
    }
}

fn read(el: ElementRef<'_>, source: Source) -> String {
    match source {
        Source::Text => el.text().collect(),
        Source::Blocks => {
            let mut out = String::new();
            push_blocks(el, &mut out);
            out
        }
        Source::Attr(name) => el.value().attr(name).unwrap_or("").to_string(),
    }
}

/// Evaluates `rules` in order below `scope` and returns the first non-empty
/// value after `finish` has normalized it.
pub fn first_match<F>(scope: ElementRef<'_>, rules: &[FieldRule], finish: F) -> Option<String>
where
    F: Fn(&str) -> String,
{
    rules.iter().find_map(|rule| {
        let selector = compile(rule.selector)?;
        scope
            .select(&selector)
            .map(|el| finish(&read(el, rule.source)))
            .find(|value| !value.is_empty())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTAINERS: &[&str] = &["article", "li", "div"];

    fn doc(html: &str) -> Html {
        Html::parse_document(html)
    }

    #[test]
    fn cards_pool_rules_and_dedup_by_href() {
        let html = doc(r#"
            <ul>
              <li><a class="title" href="/job/2">Second</a></li>
              <li><a href="/job/1">First</a></li>
              <li><a class="title" href="/job/1">First again</a></li>
              <li><a href="">Empty</a></li>
              <li><a class="title">No href</a></li>
            </ul>"#);
        let cards = discover_cards(&html, &["a[href*='/job/']", "a.title"], CONTAINERS);
        let hrefs: Vec<&str> = cards.iter().map(|c| c.href()).collect();
        assert_eq!(hrefs, vec!["/job/2", "/job/1"]);
    }

    #[test]
    fn later_rules_contribute_new_anchors() {
        let html = doc(r#"
            <div><a href="/job/1">One</a></div>
            <div><a class="job-card__title" href="/listing/7">Seven</a></div>"#);
        let cards = discover_cards(&html, &["a[href*='/job/']", "a.job-card__title"], CONTAINERS);
        let hrefs: Vec<&str> = cards.iter().map(|c| c.href()).collect();
        assert_eq!(hrefs, vec!["/job/1", "/listing/7"]);
    }

    #[test]
    fn invalid_selector_is_skipped() {
        let html = doc(r#"<p><a href="/job/1">One</a></p>"#);
        let cards = discover_cards(&html, &["a[[", "a[href*='/job/']"], CONTAINERS);
        assert_eq!(cards.len(), 1);
    }

    #[test]
    fn scope_is_nearest_container() {
        let html = doc(r#"
            <section>
              <article class="job"><span><a href="/job/1">One</a></span></article>
            </section>"#);
        let cards = discover_cards(&html, &["a"], CONTAINERS);
        assert_eq!(cards[0].scope().value().name(), "article");
    }

    #[test]
    fn scope_falls_back_to_anchor() {
        let html = doc(r#"<section><a href="/job/1"><b>One</b></a></section>"#);
        let cards = discover_cards(&html, &["a"], CONTAINERS);
        assert_eq!(cards[0].scope().value().name(), "a");
        assert_eq!(cards[0].anchor_text(), "One");
    }

    #[test]
    fn first_match_respects_rule_order() {
        let html = doc(r#"
            <li>
              <h2>Heading</h2>
              <span class="job-title">  Precise   title </span>
              <a href="/job/1">Anchor</a>
            </li>"#);
        let cards = discover_cards(&html, &["a"], CONTAINERS);
        let rules = [text(".job-title"), text("h2")];
        let value = first_match(cards[0].scope(), &rules, clean_text);
        assert_eq!(value.as_deref(), Some("Precise title"));
    }

    #[test]
    fn first_match_skips_empty_values() {
        let html = doc(r#"
            <li>
              <span class="company">   </span>
              <span data-company="x">Acme Ltd</span>
              <a href="/job/1">Anchor</a>
            </li>"#);
        let cards = discover_cards(&html, &["a"], CONTAINERS);
        let rules = [text(".company"), text("[data-company]")];
        let value = first_match(cards[0].scope(), &rules, clean_text);
        assert_eq!(value.as_deref(), Some("Acme Ltd"));
    }

    #[test]
    fn first_match_reads_attributes() {
        let html =
            doc(r#"<li><time datetime="2024-03-03">3 Mar</time><a href="/job/1">x</a></li>"#);
        let cards = discover_cards(&html, &["a"], CONTAINERS);
        let rules = [attr("time[datetime]", "datetime")];
        let value = first_match(cards[0].scope(), &rules, |s| s.to_string());
        assert_eq!(value.as_deref(), Some("2024-03-03"));
    }

    #[test]
    fn first_match_none_when_nothing_matches() {
        let html = doc(r#"<li><a href="/job/1">x</a></li>"#);
        let cards = discover_cards(&html, &["a"], CONTAINERS);
        assert!(first_match(cards[0].scope(), &[text(".salary")], clean_text).is_none());
    }

    #[test]
    fn cards_do_not_leak_between_listings() {
        let html = doc(r#"
            <ul>
              <li><a href="/job/1">One</a><span class="salary">£30k</span></li>
              <li><a href="/job/2">Two</a></li>
            </ul>"#);
        let cards = discover_cards(&html, &["a"], CONTAINERS);
        let rules = [text(".salary")];
        assert_eq!(first_match(cards[0].scope(), &rules, clean_text).as_deref(), Some("£30k"));
        assert!(first_match(cards[1].scope(), &rules, clean_text).is_none());
    }
}
