use anyhow::Result;
use chrono::Utc;
use log::{debug, info, warn};
use std::collections::HashSet;

use crate::storage::json::{ActivityLogRepository, HabitRepository, KidRepository};
use crate::storage::traits::CollectionRepository;
use crate::storage::JsonConnection;
use shared::{
    ActivityLog, AddHabitRequest, Habit, HabitListResponse, HabitResponse, MoveDirection,
    MoveHabitRequest, ToggleHabitRequest, ToggleHabitResponse,
};

/// Filter habits visible on a given target date: those without a date recur
/// every day, those with one show up only on that exact day.
pub fn habits_for_date(habits: &[Habit], date: &str) -> Vec<Habit> {
    habits
        .iter()
        .filter(|h| h.applies_on(date))
        .cloned()
        .collect()
}

/// Habit ids a kid has completed on a given date
pub fn completed_habit_ids(logs: &[ActivityLog], date: &str, kid_id: &str) -> HashSet<String> {
    logs.iter()
        .filter(|l| l.date == date && l.kid_id == kid_id)
        .map(|l| l.habit_id.clone())
        .collect()
}

/// Service for managing habits and completion logs
#[derive(Clone)]
pub struct HabitService {
    habits: HabitRepository,
    kids: KidRepository,
    logs: ActivityLogRepository,
}

impl HabitService {
    /// Create a new HabitService
    pub fn new(connection: JsonConnection) -> Self {
        Self {
            habits: HabitRepository::new(connection.clone()),
            kids: KidRepository::new(connection.clone()),
            logs: ActivityLogRepository::new(connection),
        }
    }

    /// List the habits visible on a given date
    pub async fn list_habits_for_date(&self, date: &str) -> Result<HabitListResponse> {
        let habits = self.habits.load().await?;
        let visible = habits_for_date(&habits, date);

        debug!("{} of {} habits visible on {}", visible.len(), habits.len(), date);
        Ok(HabitListResponse { habits: visible })
    }

    /// Habit ids a kid has completed on a given date
    pub async fn completed_habits(&self, date: &str, kid_id: &str) -> Result<HashSet<String>> {
        let logs = self.logs.load().await?;
        Ok(completed_habit_ids(&logs, date, kid_id))
    }

    /// Toggle a habit completion for a kid on a date.
    ///
    /// An existing (date, kid, habit) log is removed and the kid loses a
    /// point; otherwise a fresh log is appended and the kid gains one. The
    /// score is clamped at zero, and the log change and score change are one
    /// logical operation. An unknown kid id is a filter miss: the log is
    /// still toggled but nobody's score moves.
    pub async fn toggle_habit(&self, request: ToggleHabitRequest) -> Result<ToggleHabitResponse> {
        let mut logs = self.logs.load().await?;
        let mut kids = self.kids.load().await?;

        let existing = logs
            .iter()
            .position(|l| l.matches(&request.date, &request.kid_id, &request.habit_id));

        let (checked, score_delta) = match existing {
            Some(index) => {
                logs.remove(index);
                (false, -1)
            }
            None => {
                let now = Utc::now().timestamp_millis();
                logs.push(ActivityLog {
                    id: ActivityLog::generate_id(now as u64),
                    habit_id: request.habit_id.clone(),
                    kid_id: request.kid_id.clone(),
                    date: request.date.clone(),
                    timestamp: now,
                });
                (true, 1)
            }
        };

        let mut new_score = 0;
        let mut kid_found = false;
        for kid in kids.iter_mut() {
            if kid.id == request.kid_id {
                kid.current_score = (kid.current_score + score_delta).max(0);
                new_score = kid.current_score;
                kid_found = true;
            }
        }
        if !kid_found {
            warn!("Toggling habit for unknown kid: {}", request.kid_id);
        }

        self.logs.save(&logs).await?;
        self.kids.save(&kids).await?;

        info!(
            "Toggled habit {} for kid {} on {}: checked={}, score={}",
            request.habit_id, request.kid_id, request.date, checked, new_score
        );

        Ok(ToggleHabitResponse {
            checked,
            score_delta,
            new_score,
            success_message: if checked {
                "Habit completed".to_string()
            } else {
                "Habit completion removed".to_string()
            },
        })
    }

    /// Move a habit one position up or down within its display bucket.
    ///
    /// The bucket is the set of habits assigned to the kid, in the same
    /// period, visible on the given date, ordered ascending by order value.
    /// A move past either end is a no-op. Otherwise the habit exchanges
    /// order values with its neighbor; values are swapped, never
    /// renumbered, so gaps in the order sequence are expected over time.
    pub async fn move_habit(&self, request: MoveHabitRequest) -> Result<()> {
        let mut habits = self.habits.load().await?;

        let habit = match habits.iter().find(|h| h.id == request.habit_id) {
            Some(h) => h.clone(),
            None => {
                warn!("Move requested for unknown habit: {}", request.habit_id);
                return Ok(());
            }
        };

        let mut bucket: Vec<&Habit> = habits
            .iter()
            .filter(|h| {
                h.is_assigned_to(&request.kid_id)
                    && h.period == habit.period
                    && h.applies_on(&request.date)
            })
            .collect();
        bucket.sort_by_key(|h| h.order);

        let current_index = match bucket.iter().position(|h| h.id == habit.id) {
            Some(index) => index,
            None => {
                warn!(
                    "Habit {} is not in kid {}'s bucket on {}",
                    request.habit_id, request.kid_id, request.date
                );
                return Ok(());
            }
        };

        let target_index = match request.direction {
            MoveDirection::Up => current_index.checked_sub(1),
            MoveDirection::Down => Some(current_index + 1),
        };
        let target_index = match target_index {
            Some(index) if index < bucket.len() => index,
            _ => {
                debug!("Habit {} is already at the bucket edge", request.habit_id);
                return Ok(());
            }
        };

        let target_id = bucket[target_index].id.clone();
        let target_order = bucket[target_index].order;
        let habit_order = habit.order;

        for h in habits.iter_mut() {
            if h.id == habit.id {
                h.order = target_order;
            } else if h.id == target_id {
                h.order = habit_order;
            }
        }

        self.habits.save(&habits).await?;

        info!(
            "Moved habit {} {:?} for kid {} (order {} <-> {})",
            request.habit_id, request.direction, request.kid_id, habit_order, target_order
        );
        Ok(())
    }

    /// Add a new habit, bound to the given date.
    ///
    /// The habit appends to the end of its period: its order is one past
    /// the highest order value any habit of that period carries, across all
    /// kids and dates. Adds are always one-time entries for the given day.
    pub async fn add_habit(&self, request: AddHabitRequest, date: &str) -> Result<HabitResponse> {
        let title = request.title.trim();
        if title.is_empty() {
            return Err(anyhow::anyhow!("Habit title cannot be empty"));
        }

        let mut habits = self.habits.load().await?;

        let assigned_to = match &request.assignee {
            Some(kid_id) => vec![kid_id.clone()],
            None => {
                let kids = self.kids.load().await?;
                kids.into_iter().map(|k| k.id).collect()
            }
        };

        let max_order = habits
            .iter()
            .filter(|h| h.period == request.period)
            .fold(0, |max, h| max.max(h.order));

        let habit = Habit {
            id: Habit::generate_id(Utc::now().timestamp_millis() as u64),
            title: title.to_string(),
            icon: request.icon,
            assigned_to,
            period: request.period,
            order: max_order + 1,
            date: Some(date.to_string()),
        };

        habits.push(habit.clone());
        self.habits.save(&habits).await?;

        info!("Added habit '{}' ({:?}) on {}", habit.title, habit.period, date);

        Ok(HabitResponse {
            habit,
            success_message: "Habit added successfully".to_string(),
        })
    }

    /// Delete a habit. Historical logs referencing it are left in place;
    /// they are orphaned but harmless.
    pub async fn delete_habit(&self, habit_id: &str) -> Result<()> {
        let mut habits = self.habits.load().await?;

        let before = habits.len();
        habits.retain(|h| h.id != habit_id);
        if habits.len() == before {
            warn!("Delete requested for unknown habit: {}", habit_id);
            return Ok(());
        }

        self.habits.save(&habits).await?;
        info!("Deleted habit: {}", habit_id);
        Ok(())
    }

    /// Extend a habit's assignment to the first kid it does not yet cover.
    ///
    /// The existing habit is mutated rather than duplicated, so a copy is
    /// shared between siblings, not independent. When every known kid is
    /// already covered this is a no-op.
    pub async fn copy_habit_to_sibling(&self, habit_id: &str) -> Result<HabitResponse> {
        let kids = self.kids.load().await?;
        let mut habits = self.habits.load().await?;

        let habit = habits
            .iter_mut()
            .find(|h| h.id == habit_id)
            .ok_or_else(|| anyhow::anyhow!("Habit not found: {}", habit_id))?;

        let missing = kids.iter().find(|k| !habit.is_assigned_to(&k.id));
        let updated = match missing {
            Some(kid) => {
                habit.assigned_to.push(kid.id.clone());
                info!("Copied habit {} to sibling {}", habit_id, kid.id);
                let updated = habit.clone();
                self.habits.save(&habits).await?;
                updated
            }
            None => {
                debug!("Habit {} is already assigned to every kid", habit_id);
                habit.clone()
            }
        };

        Ok(HabitResponse {
            habit: updated,
            success_message: "Habit assignment updated".to_string(),
        })
    }
}
