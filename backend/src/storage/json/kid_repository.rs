use anyhow::Result;
use async_trait::async_trait;
use log::{debug, warn};
use shared::Kid;
use std::fs;

use super::connection::{JsonConnection, KIDS_COLLECTION};
use crate::storage::defaults::default_kids;
use crate::storage::traits::CollectionRepository;

/// JSON-file kid repository
#[derive(Clone)]
pub struct KidRepository {
    connection: JsonConnection,
}

impl KidRepository {
    /// Create a new JSON kid repository
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl CollectionRepository for KidRepository {
    type Record = Kid;

    async fn load(&self) -> Result<Vec<Kid>> {
        let path = self.connection.collection_path(KIDS_COLLECTION);

        if !path.exists() {
            debug!("No kids collection at {}, using defaults", path.display());
            return Ok(default_kids());
        }

        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Failed to read kids collection, using defaults: {}", e);
                return Ok(default_kids());
            }
        };

        match serde_json::from_str(&raw) {
            Ok(kids) => Ok(kids),
            Err(e) => {
                warn!("Malformed kids collection, using defaults: {}", e);
                Ok(default_kids())
            }
        }
    }

    async fn save(&self, kids: &[Kid]) -> Result<()> {
        let path = self.connection.collection_path(KIDS_COLLECTION);
        super::write_collection(&path, kids)?;
        debug!("Saved {} kids to {}", kids.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ThemeColor;
    use tempfile::TempDir;

    fn setup() -> (KidRepository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let connection = JsonConnection::new(temp_dir.path()).unwrap();
        (KidRepository::new(connection), temp_dir)
    }

    #[tokio::test]
    async fn test_load_missing_file_returns_defaults() {
        let (repository, _temp_dir) = setup();

        let kids = repository.load().await.unwrap();
        assert_eq!(kids, default_kids());
    }

    #[tokio::test]
    async fn test_load_corrupt_file_returns_defaults() {
        let (repository, temp_dir) = setup();
        fs::write(temp_dir.path().join("kids.json"), "{ not json !").unwrap();

        let kids = repository.load().await.unwrap();
        assert_eq!(kids, default_kids());
    }

    #[tokio::test]
    async fn test_save_then_load_round_trip() {
        let (repository, _temp_dir) = setup();

        let mut kids = default_kids();
        kids[0].current_score = 42;
        kids[1].name = "Bống".to_string();
        repository.save(&kids).await.unwrap();

        let loaded = repository.load().await.unwrap();
        assert_eq!(loaded, kids);
    }

    #[tokio::test]
    async fn test_load_reads_browser_era_camel_case() {
        let (repository, temp_dir) = setup();
        let json = r#"[{
            "id": "k1",
            "name": "Tí Nị",
            "avatar": "🦊",
            "themeColor": "pink",
            "currentScore": 7,
            "redeemedPoints": 100
        }]"#;
        fs::write(temp_dir.path().join("kids.json"), json).unwrap();

        let kids = repository.load().await.unwrap();
        assert_eq!(kids.len(), 1);
        assert_eq!(kids[0].theme_color, ThemeColor::Pink);
        assert_eq!(kids[0].current_score, 7);
        assert_eq!(kids[0].redeemed_points, 100);
    }
}
