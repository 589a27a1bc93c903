//! Small helpers shared by the binary and the adapters.
//!
//! - String truncation for log previews of response bodies
//! - File system validation for the output directory

use std::error::Error;
use std::fs as stdfs;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Truncate a string for logging purposes.
///
/// Long strings are cut after `max` characters (not bytes, so multibyte text is
/// never split) and get an ellipsis plus the number of bytes left out.
///
/// # Examples
///
/// ```
/// use hot_feed::utils::truncate_for_log;
///
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log("今日热榜", 2), "今日…(+6 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}…(+{} bytes)", &s[..cut], s.len() - cut),
    }
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if needed, then writes and removes a probe file.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or is not writable
/// (permission denied, read-only filesystem, ...).
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn ensure_writable_dir(path: &Path) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(path).await?;
    // Sync write through std fs keeps the error surface simple
    let probe_path = path.join("..__probe_write__");
    stdfs::File::create(&probe_path)?;
    let _ = stdfs::remove_file(&probe_path);
    info!("Output directory is writable");
    Ok(())
}
