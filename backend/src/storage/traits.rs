use anyhow::Result;
use async_trait::async_trait;

/// Common interface for the three collection repositories.
///
/// Loading never surfaces corruption to the caller: implementations replace
/// unreadable data with their built-in defaults. Saving replaces the whole
/// collection and reports failures so they can be shown to the user.
#[async_trait]
pub trait CollectionRepository {
    type Record;

    /// Load the full collection, falling back to defaults on any read error
    async fn load(&self) -> Result<Vec<Self::Record>>;

    /// Atomically replace the stored collection
    async fn save(&self, records: &[Self::Record]) -> Result<()>;
}
