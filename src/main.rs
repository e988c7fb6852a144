//! Sitemap-Indexer main entry point
//!
//! This is the command-line interface for the Sitemap-Indexer sync tool.

use anyhow::Context;
use clap::Parser;
use sitemap_indexer::config::{load_config_with_hash, Config};
use sitemap_indexer::google::{GoogleAuth, IndexingClient, InspectionClient};
use sitemap_indexer::http::build_http_client;
use sitemap_indexer::sitemap::HttpSitemapSource;
use sitemap_indexer::store::{open_store, UrlStore};
use sitemap_indexer::sync::{pending_urls, print_report, Coordinator, SyncSettings};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Sitemap-Indexer: keep Google's index in step with your sitemap
///
/// Reads every URL from an XML sitemap, checks its index status through the
/// Search Console URL Inspection API and requests indexing for the ones that
/// are missing. Handled URLs are remembered between runs.
#[derive(Parser, Debug)]
#[command(name = "sitemap-indexer")]
#[command(version)]
#[command(about = "Request Google indexing for sitemap URLs", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Fetch the sitemap and list unprocessed URLs without contacting Google
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Show the number of processed URLs and exit
    #[arg(long, conflicts_with = "dry_run")]
    stats: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config).map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        e
    })?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config).await
    } else if cli.stats {
        handle_stats(&config)
    } else {
        handle_sync(&config).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitemap_indexer=info,warn"),
            1 => EnvFilter::new("sitemap_indexer=debug,info"),
            2 => EnvFilter::new("sitemap_indexer=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows what the next run would look at
async fn handle_dry_run(config: &Config) -> anyhow::Result<()> {
    println!("=== Sitemap-Indexer Dry Run ===\n");

    println!("Sitemap: {}", config.sitemap.url);
    println!("Property: {}", config.search_console.property);
    println!("Language: {}", config.search_console.language_code);
    println!("Store: {}", config.store.path);
    println!("On indexing error: {:?}", config.indexing.on_error);
    println!();

    let client = build_http_client()?;
    let store = open_store(Path::new(&config.store.path));
    let sitemap = HttpSitemapSource::new(client);

    let pending = pending_urls(&store, &sitemap, &config.sitemap.url).await?;

    println!("Unprocessed URLs ({}):", pending.len());
    for url in &pending {
        println!("  - {}", url);
    }

    println!("\n✓ Configuration is valid");
    Ok(())
}

/// Handles the --stats mode: shows the size of the processed set
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    let store = open_store(Path::new(&config.store.path));
    let processed = store.load()?;

    println!("Store: {}", config.store.path);
    println!("Processed URLs: {}", processed.len());
    Ok(())
}

/// Handles the main sync operation
async fn handle_sync(config: &Config) -> anyhow::Result<()> {
    let client = build_http_client()?;

    let auth = GoogleAuth::authorize(
        client.clone(),
        Path::new(&config.credentials.service_account_path),
    )
    .await
    .context("Failed to authenticate with Google")?;

    let auth = Arc::new(auth);
    let checker = InspectionClient::new(
        client.clone(),
        Arc::clone(&auth),
        &config.api.inspection_endpoint,
        &config.search_console.language_code,
    );
    let requester = IndexingClient::new(client.clone(), auth, &config.api.indexing_endpoint);

    let coordinator = Coordinator::new(
        SyncSettings::from_config(config),
        open_store(Path::new(&config.store.path)),
        HttpSitemapSource::new(client),
        checker,
        requester,
    );

    match coordinator.run().await {
        Ok(report) => {
            print_report(&report);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Sync failed: {}", e);
            Err(e.into())
        }
    }
}
