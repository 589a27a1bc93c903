//! Files written at the end of a run.
//!
//! # Submodules
//!
//! - [`json`]: writes the day's [`DailySnapshot`](crate::models::DailySnapshot)
//! - [`indexes`]: prunes old snapshots and rewrites the date index
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! ├── hot-2026-10-18.json   # today's snapshot
//! ├── hot-2026-10-17.json
//! ├── ...                   # at most `--keep` snapshots
//! └── index.json            # {"dates": ["2026-10-18", "2026-10-17", ...]}
//! ```

pub mod indexes;
pub mod json;
