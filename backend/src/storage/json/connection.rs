use anyhow::Result;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// Fixed collection names; each maps to `<name>.json` in the data directory.
pub const KIDS_COLLECTION: &str = "kids";
pub const HABITS_COLLECTION: &str = "habits";
pub const LOGS_COLLECTION: &str = "logs";

/// JsonConnection manages the data directory the three collections live in
#[derive(Clone)]
pub struct JsonConnection {
    base_directory: PathBuf,
}

impl JsonConnection {
    /// Create a new JSON connection with a base directory
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    /// Create a new JSON connection in the default data directory
    /// (~/Documents/Habit Tracker)
    pub fn new_default() -> Result<Self> {
        let home_dir = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .map_err(|_| anyhow::anyhow!("Could not determine home directory"))?;

        let data_dir = PathBuf::from(home_dir)
            .join("Documents")
            .join("Habit Tracker");

        info!("Using default data directory: {}", data_dir.display());
        Self::new(data_dir)
    }

    /// Get the base directory path
    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Get the file path for a named collection
    pub fn collection_path(&self, name: &str) -> PathBuf {
        self.base_directory.join(format!("{}.json", name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_creates_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("data").join("habit-tracker");
        assert!(!nested.exists());

        let connection = JsonConnection::new(&nested).unwrap();
        assert!(nested.exists());
        assert_eq!(connection.base_directory(), nested.as_path());
    }

    #[test]
    fn test_collection_paths_use_fixed_names() {
        let temp_dir = TempDir::new().unwrap();
        let connection = JsonConnection::new(temp_dir.path()).unwrap();

        assert_eq!(
            connection.collection_path(KIDS_COLLECTION),
            temp_dir.path().join("kids.json")
        );
        assert_eq!(
            connection.collection_path(HABITS_COLLECTION),
            temp_dir.path().join("habits.json")
        );
        assert_eq!(
            connection.collection_path(LOGS_COLLECTION),
            temp_dir.path().join("logs.json")
        );
    }
}
