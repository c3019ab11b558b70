mod crawl;
mod export;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use jobboards_lib::settings::{load_input, load_settings};
use jobboards_lib::InputOverrides;

use crate::crawl::{CrawlArgs, RunParams};

const EXIT_CONFIG: u8 = 1;
const EXIT_NO_SITES: u8 = 2;

#[derive(Parser)]
#[command(name = "jobboards")]
#[command(about = "Crawl Stepstone and related job boards and export the listings")]
struct Cli {
    #[command(flatten)]
    crawl: CrawlArgs,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("jobboards=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse().crawl;

    let settings = match load_settings(&args.config) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("[config] Failed to load settings: {}", e);
            return Ok(ExitCode::from(EXIT_CONFIG));
        }
    };
    let input = match &args.input {
        Some(path) => load_input(path)?,
        None => InputOverrides::default(),
    };

    let params = RunParams::resolve(&args, &input, &settings);
    if params.sites.is_empty() {
        eprintln!(
            "[warn] No sites provided. Set sites in the settings file or pass --sites domain1,domain2"
        );
        return Ok(ExitCode::from(EXIT_NO_SITES));
    }

    let outcome = crawl::run(&params).await?;
    eprintln!(
        "[info] total jobs: {} | unique: {}",
        outcome.collected,
        outcome.records.len()
    );
    if !outcome.failed_sites.is_empty() {
        eprintln!("[warn] failed sites: {}", outcome.failed_sites.join(", "));
    }

    export::export_all(&outcome.records, &params.outdir, &params.formats)?;
    eprintln!("[done] Export complete.");
    Ok(ExitCode::SUCCESS)
}
