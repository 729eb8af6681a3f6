//! `curation-checkr` — query ClearlyDefined for package curations and report them.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]) and install the tracing subscriber.
//! 2. Load config ([`config::load_config`]) and apply CLI overrides.
//! 3. Parse package coordinates from arguments and `--ids-file`.
//! 4. Look up curations in batches ([`curation::get_curations_for_all`]).
//! 5. Render the requested report.

mod cli;

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Url;
use tracing_subscriber::EnvFilter;

use cli::{parse_ids_file, Cli, ReportFormat};
use curation_checkr::clearlydefined::{ClearlyDefinedService, Server};
use curation_checkr::config::load_config;
use curation_checkr::curation::{get_curations_for_all, ClearlyDefinedPackageCurationProvider};
use curation_checkr::models::Identifier;
use curation_checkr::report;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    let working_dir = std::env::current_dir()?;
    let mut config = load_config(&working_dir, cli.config.as_deref())?;

    // CLI flags win over the config file
    if let Some(server) = &cli.server {
        config.service.server = Server::from(server);
        config.service.url = None;
    }
    if let Some(timeout) = cli.timeout {
        config.service.timeout_secs = timeout;
    }

    let ids = collect_ids(&cli)?;
    if ids.is_empty() {
        eprintln!("No package coordinates given. Pass Type:Namespace:Name:Version or --ids-file.");
        std::process::exit(1);
    }

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.service.timeout_secs))
        .build()?;
    let base_url = Url::parse(config.service.base_url())
        .with_context(|| format!("invalid service URL {}", config.service.base_url()))?;

    tracing::info!(server = %base_url, packages = ids.len(), "Looking up curations");

    let service = ClearlyDefinedService::new(client, base_url, config.service.user_agent.clone());
    let provider = ClearlyDefinedPackageCurationProvider::new(service);

    let pb = if !cli.quiet && matches!(cli.report, ReportFormat::Terminal) {
        let pb = ProgressBar::new(ids.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )?
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let curations =
        get_curations_for_all(&provider, &ids, config.lookup.batch_size, pb.as_ref()).await;

    if let Some(pb) = pb {
        pb.finish_with_message("Done");
    }

    match cli.report {
        ReportFormat::Terminal => report::terminal::render(&curations, ids.len(), cli.quiet),
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&curations)?),
    }

    Ok(())
}

/// Log to stderr. `RUST_LOG` takes precedence over `-v` / `-q`.
fn init_tracing(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Gather coordinates from positional arguments and `--ids-file`, in that order.
fn collect_ids(cli: &Cli) -> Result<Vec<Identifier>> {
    let mut raw = cli.ids.clone();

    if let Some(path) = &cli.ids_file {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read ids file {}", path.display()))?;
        raw.extend(parse_ids_file(&content));
    }

    raw.iter()
        .map(|coordinates| coordinates.parse::<Identifier>().map_err(anyhow::Error::from))
        .collect()
}
