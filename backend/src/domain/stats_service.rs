use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};

use crate::storage::json::{ActivityLogRepository, KidRepository};
use crate::storage::traits::CollectionRepository;
use crate::storage::JsonConnection;
use shared::{DailyCompletionStats, KidCompletionCount, WeeklyStatsResponse};

/// Service for the last-7-days completion view
#[derive(Clone)]
pub struct StatsService {
    kids: KidRepository,
    logs: ActivityLogRepository,
}

impl StatsService {
    /// Create a new StatsService
    pub fn new(connection: JsonConnection) -> Self {
        Self {
            kids: KidRepository::new(connection.clone()),
            logs: ActivityLogRepository::new(connection),
        }
    }

    /// Completion counts per kid for the 7 days ending on the given date,
    /// oldest day first. Pure derivation over the log collection; nothing
    /// is saved.
    pub async fn weekly_stats(&self, today: &str) -> Result<WeeklyStatsResponse> {
        let end = NaiveDate::parse_from_str(today, "%Y-%m-%d")
            .with_context(|| format!("Invalid stats date: {}", today))?;

        let kids = self.kids.load().await?;
        let logs = self.logs.load().await?;

        let days = (0..7)
            .rev()
            .map(|offset| {
                let day = end - Duration::days(offset);
                let date = day.format("%Y-%m-%d").to_string();

                let counts = kids
                    .iter()
                    .map(|kid| KidCompletionCount {
                        kid_id: kid.id.clone(),
                        kid_name: kid.name.clone(),
                        completed: logs
                            .iter()
                            .filter(|l| l.date == date && l.kid_id == kid.id)
                            .count() as i64,
                    })
                    .collect();

                DailyCompletionStats {
                    date,
                    label: day.format("%m/%d").to_string(),
                    counts,
                }
            })
            .collect();

        Ok(WeeklyStatsResponse { days })
    }
}
