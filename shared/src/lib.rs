use serde::{Deserialize, Serialize};
use std::fmt;

/// Points required to redeem a reward.
pub const REDEMPTION_COST: i64 = 100;

/// Penalty points applied when the caller does not pick a value.
pub const DEFAULT_PENALTY_POINTS: i64 = 5;

/// Quick-pick penalty values offered alongside free numeric entry.
pub const PENALTY_POINT_CHOICES: [i64; 3] = [5, 10, 20];

/// Theme color for a kid's card. A small fixed palette; unknown values in
/// stored data fail deserialization and the whole collection falls back to
/// defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeColor {
    Pink,
    #[default]
    Blue,
}

/// Represents a kid in the habit tracking system
///
/// Kid ID in format: "kid::epoch_millis"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kid {
    pub id: String,
    pub name: String,
    /// Image reference: a URL, an emoji, or an inline data URI
    pub avatar: String,
    pub theme_color: ThemeColor,
    /// Accumulated points, never negative
    pub current_score: i64,
    /// Total points spent on rewards, only ever increases
    pub redeemed_points: i64,
}

/// Time-of-day bucket a habit belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HabitPeriod {
    Morning,
    Afternoon,
    Evening,
}

impl HabitPeriod {
    /// Display name used in headings
    pub fn display_name(&self) -> &'static str {
        match self {
            HabitPeriod::Morning => "Buổi Sáng",
            HabitPeriod::Afternoon => "Buổi Trưa",
            HabitPeriod::Evening => "Buổi Tối",
        }
    }
}

/// A recurring or one-time trackable action assigned to one or more kids
///
/// Habit ID in format: "habit::epoch_millis"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: String,
    pub title: String,
    /// Emoji shown next to the title
    pub icon: String,
    /// Kid IDs this habit is assigned to, never empty
    pub assigned_to: Vec<String>,
    pub period: HabitPeriod,
    /// Display rank within a (kid, period, visibility-date) bucket
    pub order: i64,
    /// ISO 8601 date (YYYY-MM-DD). If present, the habit is visible only on
    /// that exact date; if absent, it recurs every day.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl Habit {
    /// Whether this habit is visible on the given target date
    pub fn applies_on(&self, date: &str) -> bool {
        match &self.date {
            Some(d) => d == date,
            None => true,
        }
    }

    /// Whether this habit is assigned to the given kid
    pub fn is_assigned_to(&self, kid_id: &str) -> bool {
        self.assigned_to.iter().any(|id| id == kid_id)
    }
}

/// A record that a specific habit was completed by a specific kid on a
/// specific date. At most one log exists per (date, kid, habit) tuple;
/// the toggle operation preserves this by construction.
///
/// Log ID in format: "log::epoch_millis"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLog {
    pub id: String,
    pub habit_id: String,
    pub kid_id: String,
    /// Calendar day the completion applies to (YYYY-MM-DD)
    pub date: String,
    /// Creation instant as epoch milliseconds
    pub timestamp: i64,
}

impl ActivityLog {
    /// Whether this log records the given (date, kid, habit) completion
    pub fn matches(&self, date: &str, kid_id: &str, habit_id: &str) -> bool {
        self.date == date && self.kid_id == kid_id && self.habit_id == habit_id
    }
}

/// Activity idea produced by the suggestion gateway (not persisted)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySuggestion {
    pub title: String,
    /// A single fitting emoji
    pub icon: String,
    pub reason: String,
}

/// Reward idea produced by the suggestion gateway (not persisted)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardSuggestion {
    pub title: String,
    pub description: String,
    pub points_cost: i64,
}

/// Request for adding a new habit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AddHabitRequest {
    pub title: String,
    pub icon: String,
    /// Kid ID to assign the habit to; None assigns it to every kid
    pub assignee: Option<String>,
    pub period: HabitPeriod,
}

/// Response after creating or mutating a habit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HabitResponse {
    pub habit: Habit,
    pub success_message: String,
}

/// Response containing a list of habits
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HabitListResponse {
    pub habits: Vec<Habit>,
}

/// Request to toggle a habit completion for a kid on a date
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ToggleHabitRequest {
    pub kid_id: String,
    pub habit_id: String,
    /// Calendar day the toggle applies to (YYYY-MM-DD)
    pub date: String,
}

/// Response after toggling a habit completion
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ToggleHabitResponse {
    /// True when the toggle recorded a completion, false when it removed one
    pub checked: bool,
    /// +1 for a check, -1 for an uncheck
    pub score_delta: i64,
    /// The kid's score after the clamped delta was applied
    pub new_score: i64,
    pub success_message: String,
}

/// Direction for moving a habit within its display bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    Up,
    Down,
}

/// Request to move a habit one position within its bucket
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MoveHabitRequest {
    pub kid_id: String,
    pub habit_id: String,
    pub direction: MoveDirection,
    /// Date whose visible bucket the move applies to (YYYY-MM-DD)
    pub date: String,
}

/// Request for updating an existing kid
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateKidRequest {
    pub name: Option<String>,
    pub avatar: Option<String>,
    pub theme_color: Option<ThemeColor>,
}

/// Response after creating or updating a kid
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KidResponse {
    pub kid: Kid,
    pub success_message: String,
}

/// Response containing a list of kids
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KidListResponse {
    pub kids: Vec<Kid>,
}

/// Request to redeem a reward for a kid
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RedeemRewardRequest {
    pub kid_id: String,
    /// Points to deduct; defaults to [`REDEMPTION_COST`] when absent
    pub cost: Option<i64>,
}

/// Response after redeeming a reward
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RedeemRewardResponse {
    pub kid: Kid,
    pub cost: i64,
    pub success_message: String,
}

/// Request to apply a manual score deduction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PenaltyRequest {
    pub kid_id: String,
    pub points: i64,
    /// Informational only; logged, not persisted against the kid
    pub reason: String,
}

/// Response after applying a penalty
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PenaltyResponse {
    pub kid: Kid,
    pub success_message: String,
}

/// Per-kid completion count for a single day of the weekly stats view
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KidCompletionCount {
    pub kid_id: String,
    pub kid_name: String,
    pub completed: i64,
}

/// Completion counts for one calendar day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyCompletionStats {
    /// ISO 8601 date (YYYY-MM-DD)
    pub date: String,
    /// Short axis label (MM/DD)
    pub label: String,
    pub counts: Vec<KidCompletionCount>,
}

/// Response containing the last-7-days completion stats, oldest day first
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyStatsResponse {
    pub days: Vec<DailyCompletionStats>,
}

impl Kid {
    /// Generate a kid ID based on timestamp
    pub fn generate_id(epoch_millis: u64) -> String {
        format!("kid::{}", epoch_millis)
    }

    /// Parse a kid ID to extract the timestamp
    pub fn parse_id(id: &str) -> Result<u64, KidIdError> {
        let parts: Vec<&str> = id.split("::").collect();
        if parts.len() != 2 || parts[0] != "kid" {
            return Err(KidIdError::InvalidFormat);
        }

        parts[1].parse::<u64>().map_err(|_| KidIdError::InvalidTimestamp)
    }

    /// Extract timestamp from kid ID
    pub fn extract_timestamp(&self) -> Result<u64, KidIdError> {
        Self::parse_id(&self.id)
    }

    /// Whether the kid has accumulated enough points to redeem a reward
    pub fn can_redeem(&self) -> bool {
        self.current_score >= REDEMPTION_COST
    }

    /// Progress toward the redemption threshold as a 0-100 percentage
    pub fn redemption_progress(&self) -> i64 {
        (self.current_score.clamp(0, REDEMPTION_COST) * 100) / REDEMPTION_COST
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum KidIdError {
    InvalidFormat,
    InvalidTimestamp,
}

impl fmt::Display for KidIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KidIdError::InvalidFormat => write!(f, "Invalid kid ID format"),
            KidIdError::InvalidTimestamp => write!(f, "Invalid timestamp in kid ID"),
        }
    }
}

impl std::error::Error for KidIdError {}

impl Habit {
    /// Generate a habit ID based on timestamp
    pub fn generate_id(epoch_millis: u64) -> String {
        format!("habit::{}", epoch_millis)
    }

    /// Parse a habit ID to extract the timestamp
    pub fn parse_id(id: &str) -> Result<u64, HabitIdError> {
        let parts: Vec<&str> = id.split("::").collect();
        if parts.len() != 2 || parts[0] != "habit" {
            return Err(HabitIdError::InvalidFormat);
        }

        parts[1].parse::<u64>().map_err(|_| HabitIdError::InvalidTimestamp)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum HabitIdError {
    InvalidFormat,
    InvalidTimestamp,
}

impl fmt::Display for HabitIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HabitIdError::InvalidFormat => write!(f, "Invalid habit ID format"),
            HabitIdError::InvalidTimestamp => write!(f, "Invalid timestamp in habit ID"),
        }
    }
}

impl std::error::Error for HabitIdError {}

impl ActivityLog {
    /// Generate a log ID based on timestamp
    pub fn generate_id(epoch_millis: u64) -> String {
        format!("log::{}", epoch_millis)
    }

    /// Parse a log ID to extract the timestamp
    pub fn parse_id(id: &str) -> Result<u64, ActivityLogIdError> {
        let parts: Vec<&str> = id.split("::").collect();
        if parts.len() != 2 || parts[0] != "log" {
            return Err(ActivityLogIdError::InvalidFormat);
        }

        parts[1]
            .parse::<u64>()
            .map_err(|_| ActivityLogIdError::InvalidTimestamp)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ActivityLogIdError {
    InvalidFormat,
    InvalidTimestamp,
}

impl fmt::Display for ActivityLogIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivityLogIdError::InvalidFormat => write!(f, "Invalid log ID format"),
            ActivityLogIdError::InvalidTimestamp => {
                write!(f, "Invalid timestamp in log ID")
            }
        }
    }
}

impl std::error::Error for ActivityLogIdError {}
