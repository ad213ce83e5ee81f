//! # Habit Tracker Backend
//!
//! Core engine for a kids' daily habit tracker: habits grouped into
//! morning/afternoon/evening periods, completion logs, a point economy
//! with fixed-cost reward redemptions and manual penalties, a 7-day
//! completion stats view, and a fail-soft Gemini suggestion gateway.
//!
//! State lives in three JSON collection files under a single data
//! directory; every operation loads the collections it needs, applies
//! the change, and writes the affected collections back atomically.
//!
//! The [`AppState`] struct bundles the services a frontend needs;
//! [`initialize_backend`] wires them to a data directory.

pub mod domain;
pub mod gateway;
pub mod storage;

use std::path::Path;

use anyhow::Result;
use log::info;

use crate::domain::{HabitService, KidService, ScoreService, StatsService};
use crate::gateway::SuggestionGateway;
use crate::storage::JsonConnection;

/// Shared application state holding every service
#[derive(Clone)]
pub struct AppState {
    pub kid_service: KidService,
    pub habit_service: HabitService,
    pub score_service: ScoreService,
    pub stats_service: StatsService,
    pub suggestion_gateway: SuggestionGateway,
}

/// Initialize the backend against an explicit data directory
pub fn initialize_backend<P: AsRef<Path>>(data_directory: P) -> Result<AppState> {
    let connection = JsonConnection::new(data_directory)?;
    info!(
        "Backend initialized with data directory: {}",
        connection.base_directory().display()
    );

    Ok(AppState {
        kid_service: KidService::new(connection.clone()),
        habit_service: HabitService::new(connection.clone()),
        score_service: ScoreService::new(connection.clone()),
        stats_service: StatsService::new(connection),
        suggestion_gateway: SuggestionGateway::from_env(),
    })
}

/// Initialize the backend in the default per-user data directory
pub fn initialize_backend_default() -> Result<AppState> {
    let connection = JsonConnection::new_default()?;
    info!(
        "Backend initialized with data directory: {}",
        connection.base_directory().display()
    );

    Ok(AppState {
        kid_service: KidService::new(connection.clone()),
        habit_service: HabitService::new(connection.clone()),
        score_service: ScoreService::new(connection.clone()),
        stats_service: StatsService::new(connection),
        suggestion_gateway: SuggestionGateway::from_env(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{AddHabitRequest, HabitPeriod, RedeemRewardRequest, ToggleHabitRequest};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_full_day_flow() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let state = initialize_backend(temp_dir.path())?;

        // Seeded data: two kids, six habits
        let kids = state.kid_service.list_kids().await?.kids;
        assert_eq!(kids.len(), 2);
        let kid = kids[0].clone();
        assert_eq!(kid.current_score, 0);

        let today = domain::today_string();
        let visible = state.habit_service.list_habits_for_date(&today).await?;
        assert_eq!(visible.habits.len(), 6);

        // Check two habits, then uncheck one
        let morning = visible
            .habits
            .iter()
            .filter(|h| h.period == HabitPeriod::Morning)
            .collect::<Vec<_>>();
        for habit in &morning[..2] {
            let response = state
                .habit_service
                .toggle_habit(ToggleHabitRequest {
                    kid_id: kid.id.clone(),
                    habit_id: habit.id.clone(),
                    date: today.clone(),
                })
                .await?;
            assert!(response.checked);
        }
        let undo = state
            .habit_service
            .toggle_habit(ToggleHabitRequest {
                kid_id: kid.id.clone(),
                habit_id: morning[0].id.clone(),
                date: today.clone(),
            })
            .await?;
        assert!(!undo.checked);
        assert_eq!(undo.new_score, 1);

        // Add a habit for today and see it in the list
        let added = state
            .habit_service
            .add_habit(
                AddHabitRequest {
                    title: "Gấp chăn".to_string(),
                    icon: "🛏️".to_string(),
                    assignee: Some(kid.id.clone()),
                    period: HabitPeriod::Morning,
                },
                &today,
            )
            .await?;
        assert_eq!(added.habit.date.as_deref(), Some(today.as_str()));
        let visible = state.habit_service.list_habits_for_date(&today).await?;
        assert_eq!(visible.habits.len(), 7);

        // Stats reflect the surviving completion
        let stats = state.stats_service.weekly_stats(&today).await?;
        assert_eq!(stats.days.len(), 7);
        let today_stats = stats.days.last().unwrap();
        let count = today_stats
            .counts
            .iter()
            .find(|c| c.kid_id == kid.id)
            .unwrap();
        assert_eq!(count.completed, 1);

        // Redemption fails softly into an error for an unknown kid and
        // succeeds for a real one once they have enough points
        assert!(state
            .score_service
            .redeem_reward(RedeemRewardRequest {
                kid_id: "kid::0".to_string(),
                cost: None,
            })
            .await
            .is_err());

        // No credential configured in tests: canned suggestions come back
        let gateway = gateway::SuggestionGateway::new(None);
        let suggestions = gateway.suggest_activities(&[kid.name.clone()]).await;
        assert_eq!(suggestions.len(), 3);

        Ok(())
    }

    #[tokio::test]
    async fn test_state_persists_across_restarts() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let today = domain::today_string();

        let kid_id = {
            let state = initialize_backend(temp_dir.path())?;
            let kids = state.kid_service.list_kids().await?.kids;
            let kid_id = kids[0].id.clone();
            let habits = state.habit_service.list_habits_for_date(&today).await?;
            state
                .habit_service
                .toggle_habit(ToggleHabitRequest {
                    kid_id: kid_id.clone(),
                    habit_id: habits.habits[0].id.clone(),
                    date: today.clone(),
                })
                .await?;
            kid_id
        };

        // A fresh backend over the same directory sees the completion
        let state = initialize_backend(temp_dir.path())?;
        let kids = state.kid_service.list_kids().await?.kids;
        let kid = kids.iter().find(|k| k.id == kid_id).unwrap();
        assert_eq!(kid.current_score, 1);

        let completed = state.habit_service.completed_habits(&today, &kid_id).await?;
        assert_eq!(completed.len(), 1);

        Ok(())
    }
}
