//! # hot_feed
//!
//! Fetches every configured source, merges the results into today's snapshot,
//! prunes old snapshots and rewrites the date index.
//!
//! ## Usage
//!
//! ```sh
//! hot_feed -o docs/data
//! ```

use chrono::Utc;
use clap::Parser;
use futures::stream::{self, StreamExt};
use hot_feed::config::{default_sources, load_sources};
use hot_feed::fetch::{HttpFetcher, RetryFetch};
use hot_feed::models::DailySnapshot;
use hot_feed::outputs::{indexes, json};
use hot_feed::scrapers::scrape;
use hot_feed::utils::ensure_writable_dir;
use std::error::Error;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;

use cli::Cli;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("hot_feed starting up");

    let args = Cli::parse();
    debug!(output_dir = %args.output_dir.display(), config = ?args.config, "Parsed CLI arguments");

    // Early check: ensure output dir is writable
    if let Err(e) = ensure_writable_dir(&args.output_dir).await {
        error!(
            path = %args.output_dir.display(),
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    let sources = match &args.config {
        Some(path) => load_sources(path).await?,
        None => {
            info!("No source list given; using built-in sources");
            default_sources()
        }
    };

    let fetcher = RetryFetch::new(HttpFetcher::new()?, args.retries, Duration::from_secs(1));

    // ---- Scrape sources concurrently; results keep source order ----
    let date = json::run_date(Utc::now(), args.utc_offset);
    debug!(%date, utc_offset = ?args.utc_offset, "Snapshot date");
    let mut snapshot = DailySnapshot::new(date);
    let results: Vec<(String, Vec<_>)> = stream::iter(&sources)
        .map(|source| {
            let fetcher = &fetcher;
            async move { (source.name.clone(), scrape(fetcher, source).await) }
        })
        .buffered(usize::from(args.concurrency))
        .collect()
        .await;

    for (name, items) in results {
        if items.is_empty() {
            warn!(source = %name, "Source produced no items");
        }
        snapshot.sources.insert(name, items);
    }
    info!(
        sources = snapshot.sources.len(),
        items = snapshot.total_items(),
        "Completed scraping"
    );

    // ---- Output ----
    json::write_snapshot(&snapshot, &args.output_dir).await?;

    if let Err(e) = indexes::prune_old_snapshots(&args.output_dir, usize::from(args.keep)).await {
        error!(error = %e, "Failed to prune old snapshots");
    }
    if let Err(e) = indexes::write_date_index(&args.output_dir).await {
        error!(error = %e, "Failed to write date index");
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
