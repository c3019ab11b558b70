//! The crawl run: argument resolution, per-domain collection and dedup.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use jobboards_lib::aggregate::{batches, unique_by_job_url};
use jobboards_lib::{
    collect, route_profile, CollectContext, Fetcher, InputOverrides, JobRecord, RequestConfig,
    RetryPolicy, Settings, Target,
};

use crate::export::{parse_formats, ExportFormat};

/// Arguments for a crawl run. Unset values fall back to the input file, then
/// to the settings file.
#[derive(Args, Debug, Default)]
pub struct CrawlArgs {
    /// Search keyword(s), e.g. "python developer"
    #[arg(long)]
    pub query: Option<String>,

    /// Location filter, if the board supports one
    #[arg(long)]
    pub location: Option<String>,

    /// Comma-separated list of domains to crawl
    #[arg(long)]
    pub sites: Option<String>,

    /// Max result pages per search path
    #[arg(long)]
    pub max_pages: Option<u32>,

    /// Directory to write export files into
    #[arg(long, default_value = "output")]
    pub outdir: PathBuf,

    /// Comma-separated export formats: json, csv, xlsx
    #[arg(long, default_value = "json,csv")]
    pub formats: String,

    /// Path to settings.json
    #[arg(long, default_value = "config/settings.json")]
    pub config: PathBuf,

    /// Optional JSON file with query, location, sites and max_pages overrides
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Skip fetching job detail pages
    #[arg(long)]
    pub no_details: bool,
}

/// Fully resolved parameters for one run.
#[derive(Clone, Debug, PartialEq)]
pub struct RunParams {
    pub query: String,
    pub location: String,
    pub sites: Vec<String>,
    pub max_pages: u32,
    pub formats: Vec<ExportFormat>,
    pub outdir: PathBuf,
    pub request: RequestConfig,
    pub throttle: Duration,
    pub concurrency: usize,
    pub fetch_details: bool,
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

impl RunParams {
    /// CLI flags win over the input file, which wins over the settings.
    /// Empty strings and a zero page count count as unset.
    pub fn resolve(args: &CrawlArgs, input: &InputOverrides, settings: &Settings) -> Self {
        let query = non_empty(args.query.as_deref())
            .or_else(|| non_empty(input.query.as_deref()))
            .unwrap_or_else(|| settings.default_query.trim().to_string());
        let location = non_empty(args.location.as_deref())
            .or_else(|| non_empty(input.location.as_deref()))
            .unwrap_or_else(|| settings.default_location.trim().to_string());
        let max_pages = [args.max_pages, input.max_pages, Some(settings.max_pages)]
            .into_iter()
            .flatten()
            .find(|&n| n > 0)
            .unwrap_or(1);

        let sites = match args.sites.as_deref() {
            Some(list) if !list.trim().is_empty() => list
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
            _ => input
                .sites
                .clone()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| settings.sites.clone()),
        };

        Self {
            query,
            location,
            sites,
            max_pages,
            formats: parse_formats(&args.formats),
            outdir: args.outdir.clone(),
            request: settings.request.clone(),
            throttle: settings.throttle(),
            concurrency: settings.concurrency.max(1),
            fetch_details: settings.fetch_details && !args.no_details,
        }
    }
}

/// Totals for one run.
#[derive(Debug)]
pub struct CrawlOutcome {
    pub collected: usize,
    pub records: Vec<JobRecord>,
    pub failed_sites: Vec<String>,
}

/// Crawls every site in batches of `concurrency`, one request at a time.
///
/// A failing site is logged and skipped; the remaining sites still run.
/// Returned records are deduplicated by job URL.
pub async fn run(params: &RunParams) -> Result<CrawlOutcome> {
    let fetcher = Fetcher::new(params.request.clone(), RetryPolicy::from_env())?;
    let ctx = CollectContext {
        fetcher: &fetcher,
        throttle: params.throttle,
        fetch_details: params.fetch_details,
    };

    let mut all = Vec::new();
    let mut failed_sites = Vec::new();
    for (i, group) in batches(&params.sites, params.concurrency).enumerate() {
        tracing::debug!("batch {}: {}", i + 1, group.join(", "));
        for site in group {
            let profile = route_profile(site);
            let target = Target::new(site);
            match collect(
                profile,
                &target,
                &params.query,
                &params.location,
                params.max_pages,
                &ctx,
            )
            .await
            {
                Ok(collection) => {
                    eprintln!("[info] {}: collected {} jobs", site, collection.records.len());
                    all.extend(collection.records);
                }
                Err(e) => {
                    tracing::error!("{}: {}", site, e);
                    failed_sites.push(site.clone());
                }
            }
        }
    }

    let collected = all.len();
    Ok(CrawlOutcome {
        collected,
        records: unique_by_job_url(all),
        failed_sites,
    })
}
