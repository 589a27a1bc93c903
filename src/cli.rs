//! Command-line interface definitions for hot_feed.
//!
//! All arguments can be provided via command-line flags; the output directory
//! can also come from the environment.

use chrono::FixedOffset;
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for one hot_feed run.
///
/// # Examples
///
/// ```sh
/// # Built-in sources, snapshots under ./docs/data
/// hot_feed
///
/// # Own source list, keep two weeks of snapshots
/// hot_feed -o ./site/data -c sources.yaml --keep 14
///
/// # Date snapshots in Tokyo time whatever the host's zone
/// hot_feed --utc-offset +09:00
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Output directory for daily snapshots and index.json
    #[arg(short, long, env = "HOT_FEED_OUTPUT_DIR", default_value = "docs/data")]
    pub output_dir: PathBuf,

    /// Optional path to a sources.yaml file (built-in sources when absent)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of daily snapshots to keep (at least today's)
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u16).range(1..))]
    pub keep: u16,

    /// Number of sources fetched at the same time
    #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(u16).range(1..))]
    pub concurrency: u16,

    /// Retries per request after the first attempt
    #[arg(long, default_value_t = 2)]
    pub retries: usize,

    /// UTC offset that decides the snapshot date, e.g. `+09:00` (host time zone when absent)
    #[arg(long, env = "HOT_FEED_UTC_OFFSET", allow_hyphen_values = true)]
    pub utc_offset: Option<FixedOffset>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from([
            "hot_feed",
            "--output-dir",
            "./data",
            "--config",
            "sources.yaml",
            "--keep",
            "3",
        ]);

        assert_eq!(cli.output_dir, PathBuf::from("./data"));
        assert_eq!(cli.config, Some(PathBuf::from("sources.yaml")));
        assert_eq!(cli.keep, 3);
        assert_eq!(cli.concurrency, 4);
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from(["hot_feed", "-o", "/tmp/hot", "-c", "/etc/hot.yaml"]);

        assert_eq!(cli.output_dir, PathBuf::from("/tmp/hot"));
        assert_eq!(cli.config, Some(PathBuf::from("/etc/hot.yaml")));
    }

    #[test]
    fn test_cli_rejects_zero_concurrency() {
        assert!(Cli::try_parse_from(["hot_feed", "--concurrency", "0"]).is_err());
    }

    #[test]
    fn test_cli_rejects_zero_keep() {
        assert!(Cli::try_parse_from(["hot_feed", "--keep", "0"]).is_err());
        assert_eq!(Cli::try_parse_from(["hot_feed", "--keep", "1"]).unwrap().keep, 1);
    }

    #[test]
    fn test_cli_utc_offset() {
        let cli = Cli::parse_from(["hot_feed", "--utc-offset", "+09:00"]);
        assert_eq!(cli.utc_offset, FixedOffset::east_opt(9 * 3600));

        let cli = Cli::parse_from(["hot_feed", "--utc-offset", "-05:00"]);
        assert_eq!(cli.utc_offset, FixedOffset::west_opt(5 * 3600));

        assert!(Cli::try_parse_from(["hot_feed", "--utc-offset", "tokyo"]).is_err());
    }
}
