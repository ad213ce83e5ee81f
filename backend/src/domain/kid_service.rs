use anyhow::Result;
use log::info;

use crate::storage::json::KidRepository;
use crate::storage::traits::CollectionRepository;
use crate::storage::JsonConnection;
use shared::{Kid, KidListResponse, KidResponse, UpdateKidRequest};

/// Service for managing kids in the habit tracking system
#[derive(Clone)]
pub struct KidService {
    kids: KidRepository,
}

impl KidService {
    /// Create a new KidService
    pub fn new(connection: JsonConnection) -> Self {
        Self {
            kids: KidRepository::new(connection),
        }
    }

    /// List all kids
    pub async fn list_kids(&self) -> Result<KidListResponse> {
        let kids = self.kids.load().await?;
        Ok(KidListResponse { kids })
    }

    /// Get a kid by ID
    pub async fn get_kid(&self, kid_id: &str) -> Result<Option<Kid>> {
        let kids = self.kids.load().await?;
        Ok(kids.into_iter().find(|k| k.id == kid_id))
    }

    /// Update a kid's profile: name, avatar reference and theme color.
    /// Scores are owned by the habit and score engines and cannot be set
    /// through this path.
    pub async fn update_kid(&self, kid_id: &str, request: UpdateKidRequest) -> Result<KidResponse> {
        self.validate_update_request(&request)?;

        let mut kids = self.kids.load().await?;

        let kid = kids
            .iter_mut()
            .find(|k| k.id == kid_id)
            .ok_or_else(|| anyhow::anyhow!("Kid not found: {}", kid_id))?;

        if let Some(name) = request.name {
            kid.name = name.trim().to_string();
        }
        if let Some(avatar) = request.avatar {
            kid.avatar = avatar;
        }
        if let Some(theme_color) = request.theme_color {
            kid.theme_color = theme_color;
        }
        let updated = kid.clone();

        self.kids.save(&kids).await?;

        info!("Updated kid: {} ({})", updated.name, updated.id);

        Ok(KidResponse {
            kid: updated,
            success_message: "Kid updated successfully".to_string(),
        })
    }

    /// Validate update kid request
    fn validate_update_request(&self, request: &UpdateKidRequest) -> Result<()> {
        if let Some(ref name) = request.name {
            if name.trim().is_empty() {
                return Err(anyhow::anyhow!("Kid name cannot be empty"));
            }

            if name.len() > 100 {
                return Err(anyhow::anyhow!("Kid name cannot exceed 100 characters"));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::defaults::default_kids;
    use shared::ThemeColor;
    use tempfile::TempDir;

    async fn setup() -> (KidService, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let connection = JsonConnection::new(temp_dir.path()).unwrap();
        let service = KidService::new(connection.clone());

        KidRepository::new(connection)
            .save(&default_kids())
            .await
            .unwrap();

        (service, temp_dir)
    }

    #[tokio::test]
    async fn test_list_kids() {
        let (service, _temp_dir) = setup().await;

        let response = service.list_kids().await.unwrap();
        assert_eq!(response.kids.len(), 2);
        assert_eq!(response.kids[0].name, "Tí Nị");
        assert_eq!(response.kids[1].name, "Bơm");
    }

    #[tokio::test]
    async fn test_get_kid() {
        let (service, _temp_dir) = setup().await;

        let kid = service.get_kid("k2").await.unwrap();
        assert_eq!(kid.unwrap().name, "Bơm");

        assert!(service.get_kid("k999").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_kid_partial_fields() {
        let (service, _temp_dir) = setup().await;

        let response = service
            .update_kid(
                "k1",
                UpdateKidRequest {
                    name: Some("  Tí  ".to_string()),
                    avatar: None,
                    theme_color: Some(ThemeColor::Blue),
                },
            )
            .await
            .unwrap();

        assert_eq!(response.kid.name, "Tí");
        assert_eq!(response.kid.theme_color, ThemeColor::Blue);
        // Avatar untouched when not provided
        assert_eq!(response.kid.avatar, default_kids()[0].avatar);
    }

    #[tokio::test]
    async fn test_update_kid_keeps_scores() {
        let (service, _temp_dir) = setup().await;

        let mut kids = service.kids.load().await.unwrap();
        kids[0].current_score = 77;
        kids[0].redeemed_points = 200;
        service.kids.save(&kids).await.unwrap();

        let response = service
            .update_kid(
                "k1",
                UpdateKidRequest {
                    name: Some("Tí Nị Mới".to_string()),
                    avatar: None,
                    theme_color: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(response.kid.current_score, 77);
        assert_eq!(response.kid.redeemed_points, 200);
    }

    #[tokio::test]
    async fn test_update_kid_validation() {
        let (service, _temp_dir) = setup().await;

        let result = service
            .update_kid(
                "k1",
                UpdateKidRequest {
                    name: Some("   ".to_string()),
                    avatar: None,
                    theme_color: None,
                },
            )
            .await;
        assert!(result.is_err());

        let result = service
            .update_kid(
                "k1",
                UpdateKidRequest {
                    name: Some("x".repeat(101)),
                    avatar: None,
                    theme_color: None,
                },
            )
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_update_unknown_kid() {
        let (service, _temp_dir) = setup().await;

        let result = service
            .update_kid(
                "k999",
                UpdateKidRequest {
                    name: Some("Ai đó".to_string()),
                    avatar: None,
                    theme_color: None,
                },
            )
            .await;
        assert!(result.is_err());
    }
}
