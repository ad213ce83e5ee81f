use anyhow::Result;
use async_trait::async_trait;
use log::{debug, warn};
use shared::ActivityLog;
use std::fs;

use super::connection::{JsonConnection, LOGS_COLLECTION};
use crate::storage::traits::CollectionRepository;

/// JSON-file activity log repository. The default for this collection is
/// simply empty; a fresh install has no completions yet.
#[derive(Clone)]
pub struct ActivityLogRepository {
    connection: JsonConnection,
}

impl ActivityLogRepository {
    /// Create a new JSON activity log repository
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl CollectionRepository for ActivityLogRepository {
    type Record = ActivityLog;

    async fn load(&self) -> Result<Vec<ActivityLog>> {
        let path = self.connection.collection_path(LOGS_COLLECTION);

        if !path.exists() {
            debug!("No logs collection at {}, starting empty", path.display());
            return Ok(Vec::new());
        }

        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Failed to read logs collection, starting empty: {}", e);
                return Ok(Vec::new());
            }
        };

        match serde_json::from_str(&raw) {
            Ok(logs) => Ok(logs),
            Err(e) => {
                warn!("Malformed logs collection, starting empty: {}", e);
                Ok(Vec::new())
            }
        }
    }

    async fn save(&self, logs: &[ActivityLog]) -> Result<()> {
        let path = self.connection.collection_path(LOGS_COLLECTION);
        super::write_collection(&path, logs)?;
        debug!("Saved {} logs to {}", logs.len(), path.display());
        Ok(())
    }
}
