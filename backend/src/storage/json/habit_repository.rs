use anyhow::Result;
use async_trait::async_trait;
use log::{debug, info, warn};
use serde::Deserialize;
use shared::{Habit, HabitPeriod};
use std::fs;

use super::connection::{JsonConnection, HABITS_COLLECTION};
use crate::storage::defaults::{default_habits, screen_time_habit};
use crate::storage::traits::CollectionRepository;

/// Title older data used for the built-in screen-time habit
const LEGACY_SCREEN_TIME_TITLE: &str = "Không xem iPad";

/// A habit as it may appear in stored data. Records written before the
/// period/order fields existed omit them, so both are optional here and
/// filled in by the load rules.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredHabit {
    id: String,
    title: String,
    icon: String,
    assigned_to: Vec<String>,
    #[serde(default)]
    period: Option<HabitPeriod>,
    #[serde(default)]
    order: Option<i64>,
    #[serde(default)]
    date: Option<String>,
}

impl From<Habit> for StoredHabit {
    fn from(habit: Habit) -> Self {
        Self {
            id: habit.id,
            title: habit.title,
            icon: habit.icon,
            assigned_to: habit.assigned_to,
            period: Some(habit.period),
            order: Some(habit.order),
            date: habit.date,
        }
    }
}

/// Rule 1: older data predates the built-in screen-time habit; append it
/// when neither its id nor its legacy title is present.
fn inject_screen_time_habit(stored: &mut Vec<StoredHabit>) {
    let present = stored
        .iter()
        .any(|h| h.id == "h6" || h.title == LEGACY_SCREEN_TIME_TITLE);

    if !present {
        info!("Injecting built-in screen-time habit into stored data");
        stored.push(screen_time_habit().into());
    }
}

/// Rules 2 and 3: default a missing period to morning and a missing order
/// to the record's index in the collection.
fn fill_missing_fields(stored: Vec<StoredHabit>) -> Vec<Habit> {
    stored
        .into_iter()
        .enumerate()
        .map(|(index, h)| Habit {
            id: h.id,
            title: h.title,
            icon: h.icon,
            assigned_to: h.assigned_to,
            period: h.period.unwrap_or(HabitPeriod::Morning),
            order: h.order.unwrap_or(index as i64),
            date: h.date,
        })
        .collect()
}

/// Apply the ordered backward-compatibility rules to stored data
fn upgrade_stored_habits(mut stored: Vec<StoredHabit>) -> Vec<Habit> {
    inject_screen_time_habit(&mut stored);
    fill_missing_fields(stored)
}

/// JSON-file habit repository with schema-evolution rules on load
#[derive(Clone)]
pub struct HabitRepository {
    connection: JsonConnection,
}

impl HabitRepository {
    /// Create a new JSON habit repository
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl CollectionRepository for HabitRepository {
    type Record = Habit;

    async fn load(&self) -> Result<Vec<Habit>> {
        let path = self.connection.collection_path(HABITS_COLLECTION);

        if !path.exists() {
            debug!("No habits collection at {}, using defaults", path.display());
            return Ok(default_habits());
        }

        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Failed to read habits collection, using defaults: {}", e);
                return Ok(default_habits());
            }
        };

        match serde_json::from_str::<Vec<StoredHabit>>(&raw) {
            Ok(stored) => Ok(upgrade_stored_habits(stored)),
            Err(e) => {
                warn!("Malformed habits collection, using defaults: {}", e);
                Ok(default_habits())
            }
        }
    }

    async fn save(&self, habits: &[Habit]) -> Result<()> {
        let path = self.connection.collection_path(HABITS_COLLECTION);
        super::write_collection(&path, habits)?;
        debug!("Saved {} habits to {}", habits.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (HabitRepository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let connection = JsonConnection::new(temp_dir.path()).unwrap();
        (HabitRepository::new(connection), temp_dir)
    }

    fn stored(id: &str, title: &str) -> StoredHabit {
        StoredHabit {
            id: id.to_string(),
            title: title.to_string(),
            icon: "🌟".to_string(),
            assigned_to: vec!["k1".to_string()],
            period: Some(HabitPeriod::Morning),
            order: Some(0),
            date: None,
        }
    }

    #[test]
    fn test_inject_rule_appends_missing_screen_time_habit() {
        let mut habits = vec![stored("h1", "Đánh răng buổi sáng")];
        inject_screen_time_habit(&mut habits);

        assert_eq!(habits.len(), 2);
        assert_eq!(habits[1].id, "h6");
    }

    #[test]
    fn test_inject_rule_skips_when_id_present() {
        let mut habits = vec![stored("h6", "renamed by the user")];
        inject_screen_time_habit(&mut habits);
        assert_eq!(habits.len(), 1);
    }

    #[test]
    fn test_inject_rule_skips_when_legacy_title_present() {
        let mut habits = vec![stored("custom", LEGACY_SCREEN_TIME_TITLE)];
        inject_screen_time_habit(&mut habits);
        assert_eq!(habits.len(), 1);
    }

    #[test]
    fn test_fill_rule_defaults_period_to_morning() {
        let mut record = stored("h1", "Tưới cây");
        record.period = None;

        let habits = fill_missing_fields(vec![record]);
        assert_eq!(habits[0].period, HabitPeriod::Morning);
    }

    #[test]
    fn test_fill_rule_defaults_order_to_collection_index() {
        let mut first = stored("h1", "Tưới cây");
        let mut second = stored("h2", "Dọn đồ chơi");
        first.order = None;
        second.order = None;

        let habits = fill_missing_fields(vec![first, second]);
        assert_eq!(habits[0].order, 0);
        assert_eq!(habits[1].order, 1);
    }

    #[test]
    fn test_fill_rule_keeps_explicit_values() {
        let mut record = stored("h1", "Tưới cây");
        record.period = Some(HabitPeriod::Evening);
        record.order = Some(7);

        let habits = fill_missing_fields(vec![record]);
        assert_eq!(habits[0].period, HabitPeriod::Evening);
        assert_eq!(habits[0].order, 7);
    }

    #[tokio::test]
    async fn test_load_missing_file_returns_defaults() {
        let (repository, _temp_dir) = setup();
        let habits = repository.load().await.unwrap();
        assert_eq!(habits, default_habits());
    }

    #[tokio::test]
    async fn test_load_corrupt_file_returns_defaults() {
        let (repository, temp_dir) = setup();
        fs::write(temp_dir.path().join("habits.json"), "[{ broken").unwrap();

        let habits = repository.load().await.unwrap();
        assert_eq!(habits, default_habits());
    }

    #[tokio::test]
    async fn test_load_upgrades_legacy_records() {
        let (repository, temp_dir) = setup();
        // Pre-period/order era record, stored by an old version
        let json = r#"[{
            "id": "old1",
            "title": "Gấp chăn",
            "icon": "🛏️",
            "assignedTo": ["k1", "k2"]
        }]"#;
        fs::write(temp_dir.path().join("habits.json"), json).unwrap();

        let habits = repository.load().await.unwrap();
        assert_eq!(habits.len(), 2);
        assert_eq!(habits[0].id, "old1");
        assert_eq!(habits[0].period, HabitPeriod::Morning);
        assert_eq!(habits[0].order, 0);
        // The built-in screen-time habit was injected behind it
        assert_eq!(habits[1].id, "h6");
    }

    #[tokio::test]
    async fn test_save_then_load_round_trip() {
        let (repository, _temp_dir) = setup();

        let mut habits = default_habits();
        habits[0].date = Some("2024-06-15".to_string());
        repository.save(&habits).await.unwrap();

        let loaded = repository.load().await.unwrap();
        assert_eq!(loaded, habits);
    }
}
