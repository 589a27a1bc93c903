//! Daily snapshot output.
//!
//! One file per day, named after the run date. A second run on the same day
//! replaces the file.

use crate::models::DailySnapshot;
use chrono::{DateTime, FixedOffset, Local, Utc};
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument};

/// Date (`YYYY-MM-DD`) a run at `now` belongs to: in `offset` when given,
/// otherwise in the host's time zone.
pub fn run_date(now: DateTime<Utc>, offset: Option<FixedOffset>) -> String {
    let date = match offset {
        Some(offset) => now.with_timezone(&offset).date_naive(),
        None => now.with_timezone(&Local).date_naive(),
    };
    date.format("%Y-%m-%d").to_string()
}

/// File name of the snapshot for `date` (`YYYY-MM-DD`).
pub fn snapshot_file_name(date: &str) -> String {
    format!("hot-{date}.json")
}

/// Write a [`DailySnapshot`] as pretty-printed JSON into `output_dir`.
///
/// Returns the path written.
#[instrument(level = "info", skip_all, fields(output_dir = %output_dir.display(), date = %snapshot.date))]
pub async fn write_snapshot(
    snapshot: &DailySnapshot,
    output_dir: &Path,
) -> Result<PathBuf, Box<dyn Error>> {
    let json = serde_json::to_string_pretty(snapshot)?;
    let path = output_dir.join(snapshot_file_name(&snapshot.date));

    fs::write(&path, json).await?;
    info!(path = %path.display(), items = snapshot.total_items(), "Wrote daily snapshot");
    Ok(path)
}
