//! Snapshot retention and the date index.
//!
//! Both steps look only at files named `hot-YYYY-MM-DD.json`; anything else in
//! the output directory is left alone. Dates are taken from the file name, not
//! from file metadata, so copying or touching a snapshot does not change its
//! place in the history.

use crate::models::DateIndex;
use chrono::NaiveDate;
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, instrument, warn};

pub const INDEX_FILE: &str = "index.json";

/// Date encoded in a snapshot file name, or `None` for any other file.
pub fn snapshot_date(file_name: &str) -> Option<NaiveDate> {
    let date = file_name.strip_prefix("hot-")?.strip_suffix(".json")?;
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

/// Snapshots in `dir`, newest first.
pub async fn list_snapshots(dir: &Path) -> Result<Vec<(NaiveDate, PathBuf)>, Box<dyn Error>> {
    let mut snapshots = Vec::new();
    let mut entries = fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let name = entry.file_name();
        let Some(date) = name.to_str().and_then(snapshot_date) else {
            continue;
        };
        if entry.file_type().await?.is_file() {
            snapshots.push((date, entry.path()));
        }
    }
    snapshots.sort_by(|a, b| b.0.cmp(&a.0));
    Ok(snapshots)
}

/// Delete all but the newest `keep` snapshots. Returns the deleted paths.
#[instrument(level = "info", skip_all, fields(dir = %dir.display(), keep = keep))]
pub async fn prune_old_snapshots(dir: &Path, keep: usize) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    let mut removed = Vec::new();
    for (date, path) in list_snapshots(dir).await?.into_iter().skip(keep) {
        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!(%date, "Removed old snapshot");
                removed.push(path);
            }
            Err(e) => warn!(path = %path.display(), error = %e, "Could not remove old snapshot"),
        }
    }
    info!(removed = removed.len(), "Pruned snapshots");
    Ok(removed)
}

/// Rewrite `index.json` with the dates of the snapshots currently in `dir`.
#[instrument(level = "info", skip_all, fields(dir = %dir.display()))]
pub async fn write_date_index(dir: &Path) -> Result<DateIndex, Box<dyn Error>> {
    let index = DateIndex {
        dates: list_snapshots(dir)
            .await?
            .into_iter()
            .map(|(date, _)| date.format("%Y-%m-%d").to_string())
            .collect(),
    };
    let path = dir.join(INDEX_FILE);
    fs::write(&path, serde_json::to_string_pretty(&index)?).await?;
    info!(path = %path.display(), dates = index.dates.len(), "Wrote date index");
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), "{}").unwrap();
    }

    #[test]
    fn test_snapshot_date() {
        assert_eq!(
            snapshot_date("hot-2026-10-18.json"),
            NaiveDate::from_ymd_opt(2026, 10, 18)
        );
        assert_eq!(snapshot_date("hot-2026-13-01.json"), None);
        assert_eq!(snapshot_date("hot-latest.json"), None);
        assert_eq!(snapshot_date("index.json"), None);
        assert_eq!(snapshot_date("hot-2026-10-18.json.bak"), None);
    }

    #[tokio::test]
    async fn test_prune_keeps_newest_by_name() {
        let dir = tempfile::tempdir().unwrap();
        for day in 1..=12 {
            touch(dir.path(), &format!("hot-2026-09-{day:02}.json"));
        }
        touch(dir.path(), "index.json");
        touch(dir.path(), "notes.txt");

        let removed = prune_old_snapshots(dir.path(), 10).await.unwrap();
        assert_eq!(removed.len(), 2);
        assert!(!dir.path().join("hot-2026-09-01.json").exists());
        assert!(!dir.path().join("hot-2026-09-02.json").exists());
        assert!(dir.path().join("hot-2026-09-03.json").exists());
        assert!(dir.path().join("notes.txt").exists());
        assert!(dir.path().join("index.json").exists());
    }

    #[tokio::test]
    async fn test_prune_under_limit_removes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "hot-2026-10-18.json");
        assert!(prune_old_snapshots(dir.path(), 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_index_lists_dates_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "hot-2026-10-01.json");
        touch(dir.path(), "hot-2025-12-31.json");
        touch(dir.path(), "hot-2026-10-18.json");
        touch(dir.path(), "other.json");

        let index = write_date_index(dir.path()).await.unwrap();
        assert_eq!(index.dates, vec!["2026-10-18", "2026-10-01", "2025-12-31"]);

        let written: DateIndex =
            serde_json::from_str(&std::fs::read_to_string(dir.path().join(INDEX_FILE)).unwrap())
                .unwrap();
        assert_eq!(written, index);
    }

    #[tokio::test]
    async fn test_index_of_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        let index = write_date_index(dir.path()).await.unwrap();
        assert!(index.dates.is_empty());
    }
}
