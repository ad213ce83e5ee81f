use anyhow::Result;
use log::info;

use crate::storage::json::KidRepository;
use crate::storage::traits::CollectionRepository;
use crate::storage::JsonConnection;
use shared::{
    PenaltyRequest, PenaltyResponse, RedeemRewardRequest, RedeemRewardResponse, REDEMPTION_COST,
};

/// Service for the point economy: reward redemption and manual penalties
#[derive(Clone)]
pub struct ScoreService {
    kids: KidRepository,
}

impl ScoreService {
    /// Create a new ScoreService
    pub fn new(connection: JsonConnection) -> Self {
        Self {
            kids: KidRepository::new(connection),
        }
    }

    /// Redeem a reward for a kid.
    ///
    /// Deducts the cost (default [`REDEMPTION_COST`]) from the kid's score
    /// and credits the same amount to their lifetime redeemed total. The
    /// threshold gate lives in the presentation layer; the deduction is
    /// still clamped at zero in case a caller skips the gate.
    pub async fn redeem_reward(&self, request: RedeemRewardRequest) -> Result<RedeemRewardResponse> {
        let cost = request.cost.unwrap_or(REDEMPTION_COST);
        let mut kids = self.kids.load().await?;

        let kid = kids
            .iter_mut()
            .find(|k| k.id == request.kid_id)
            .ok_or_else(|| anyhow::anyhow!("Kid not found: {}", request.kid_id))?;

        kid.current_score = (kid.current_score - cost).max(0);
        kid.redeemed_points += cost;
        let updated = kid.clone();

        self.kids.save(&kids).await?;

        info!(
            "Kid {} redeemed a reward for {} points (score now {}, redeemed total {})",
            updated.id, cost, updated.current_score, updated.redeemed_points
        );

        Ok(RedeemRewardResponse {
            kid: updated,
            cost,
            success_message: "Reward redeemed".to_string(),
        })
    }

    /// Apply a manual penalty to a kid's score, floored at zero.
    ///
    /// The reason is informational only; it is logged here but not stored
    /// against the kid. The point value is taken as given: no minimum is
    /// enforced.
    pub async fn apply_penalty(&self, request: PenaltyRequest) -> Result<PenaltyResponse> {
        let mut kids = self.kids.load().await?;

        let kid = kids
            .iter_mut()
            .find(|k| k.id == request.kid_id)
            .ok_or_else(|| anyhow::anyhow!("Kid not found: {}", request.kid_id))?;

        kid.current_score = (kid.current_score - request.points).max(0);
        let updated = kid.clone();

        self.kids.save(&kids).await?;

        info!(
            "Penalty of {} points for kid {} ({}): score now {}",
            request.points, updated.id, request.reason, updated.current_score
        );

        Ok(PenaltyResponse {
            kid: updated,
            success_message: "Penalty applied".to_string(),
        })
    }
}
