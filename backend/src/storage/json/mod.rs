//! JSON-file storage: one file per collection under the data directory.

pub mod activity_log_repository;
pub mod connection;
pub mod habit_repository;
pub mod kid_repository;

use anyhow::Result;
use serde::Serialize;
use std::fs;
use std::path::Path;

pub use activity_log_repository::ActivityLogRepository;
pub use habit_repository::HabitRepository;
pub use kid_repository::KidRepository;

/// Atomically write a collection as pretty-printed JSON.
///
/// Writes to a sibling temp file first and renames over the target so a
/// crash mid-write never leaves a truncated collection behind.
pub(crate) fn write_collection<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let json = serde_json::to_string_pretty(records)?;
    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, json)?;
    fs::rename(&temp_path, path)?;

    Ok(())
}
