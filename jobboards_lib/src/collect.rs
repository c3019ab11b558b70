//! Collection runs: search pages, card extraction and detail enrichment for
//! one domain at a time.

use std::time::Duration;

use jobboards_api::{FetchedPage, Fetcher, JobRecord, SearchQuery};
use url::Url;

use crate::aggregate::dedup_preserving_order;
use crate::profiles::JobProfile;
use crate::JobsError;

/// A domain to crawl and the base URL its search paths hang off.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Target {
    pub domain: String,
    pub base_url: String,
}

impl Target {
    /// Bare domains are crawled over https; a value that already carries a
    /// scheme is used as the base URL unchanged.
    pub fn new(domain: &str) -> Self {
        let domain = domain.trim().trim_end_matches('/').to_string();
        let base_url = if domain.starts_with("http://") || domain.starts_with("https://") {
            domain.clone()
        } else {
            format!("https://{}", domain)
        };
        Self { domain, base_url }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}

/// Everything a collection run needs besides the target itself.
pub struct CollectContext<'a> {
    pub fetcher: &'a Fetcher,
    /// Pause after each skipped search page and each detail fetch.
    pub throttle: Duration,
    pub fetch_details: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CollectStats {
    pub pages_fetched: usize,
    pub pages_skipped: usize,
    pub detail_failures: usize,
    pub pauses: usize,
}

/// Records gathered for one domain, in discovery order and not deduplicated.
#[derive(Clone, Debug, Default)]
pub struct Collection {
    pub records: Vec<JobRecord>,
    pub stats: CollectStats,
}

/// Every search URL for a run: each path template crossed with pages
/// `1..=max_pages`, repeats removed in first-seen order.
pub fn build_search_urls(
    profile: &dyn JobProfile,
    base_url: &str,
    query: &str,
    location: &str,
    max_pages: u32,
) -> Vec<String> {
    let params = profile.search_params();
    let base_url = base_url.trim_end_matches('/');
    let candidates = profile.search_paths().iter().flat_map(|path| {
        (1..=max_pages).map(move |page| {
            let qs = SearchQuery::new(query, location)
                .with_page(page)
                .to_query_string(&params);
            format!("{}{}", base_url, path.replace("{qs}", &qs))
        })
    });
    dedup_preserving_order(candidates)
}

/// Crawl one target with `profile`.
///
/// Requests are issued one at a time. Search pages that fail or come back
/// with a client error are skipped; detail pages that fail leave their record
/// unenriched. The only error returned is an unusable target.
pub async fn collect(
    profile: &dyn JobProfile,
    target: &Target,
    query: &str,
    location: &str,
    max_pages: u32,
    ctx: &CollectContext<'_>,
) -> Result<Collection, JobsError> {
    Url::parse(&target.base_url).map_err(|_| JobsError::InvalidTarget(target.domain.clone()))?;

    let urls = build_search_urls(profile, &target.base_url, query, location, max_pages);
    tracing::debug!(
        "{}: {} search urls with the {} profile",
        target.domain,
        urls.len(),
        profile.name()
    );

    let mut collection = Collection::default();
    for url in urls {
        let page = ctx.fetcher.fetch_page(&url).await;
        let mut found = match records_from_page(profile, page, &target.base_url) {
            Ok(found) => found,
            Err(status) => {
                tracing::warn!("skipping {} (status {})", url, status);
                collection.stats.pages_skipped += 1;
                pause(ctx, &mut collection.stats).await;
                continue;
            }
        };
        collection.stats.pages_fetched += 1;
        tracing::debug!("{}: {} cards", url, found.len());

        if ctx.fetch_details {
            for record in &mut found {
                if let Err(e) = enrich_from_detail(profile, ctx.fetcher, record).await {
                    tracing::warn!("{}", e);
                    collection.stats.detail_failures += 1;
                }
                pause(ctx, &mut collection.stats).await;
            }
        }
        collection.records.extend(found);
    }

    tracing::info!(
        "{}: {} jobs from {} pages ({} skipped)",
        target.domain,
        collection.records.len(),
        collection.stats.pages_fetched,
        collection.stats.pages_skipped
    );
    Ok(collection)
}

/// Consumes the page so the parsed document never outlives this call.
fn records_from_page(
    profile: &dyn JobProfile,
    page: FetchedPage,
    base_url: &str,
) -> Result<Vec<JobRecord>, u16> {
    let document = match page.document {
        Some(document) if page.status < 400 => document,
        _ => return Err(page.status),
    };
    let records = profile
        .discover_cards(&document)
        .iter()
        .map(|card| profile.build_record(card, base_url))
        .collect();
    Ok(records)
}

/// Fetch `record.job_url` and fill the detail-only fields.
pub async fn enrich_from_detail(
    profile: &dyn JobProfile,
    fetcher: &Fetcher,
    record: &mut JobRecord,
) -> Result<(), JobsError> {
    let page = fetcher.fetch_page(&record.job_url).await;
    if !page.is_usable() {
        return Err(JobsError::DetailUnavailable {
            url: record.job_url.clone(),
            status: page.status,
        });
    }
    profile.enrich_detail(record, &page.html, page.document.as_ref());
    Ok(())
}

async fn pause(ctx: &CollectContext<'_>, stats: &mut CollectStats) {
    stats.pauses += 1;
    if !ctx.throttle.is_zero() {
        tokio::time::sleep(ctx.throttle).await;
    }
}
