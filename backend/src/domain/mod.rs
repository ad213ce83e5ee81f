//! # Domain Module
//!
//! Contains all business logic for the habit tracker.
//!
//! This module encapsulates the core rules for daily habits, completion
//! logs and the point economy. It operates independently of any UI and of
//! the storage format.
//!
//! ## Module Organization
//!
//! - **habit_service**: habit visibility, completion toggling, reordering,
//!   creation, deletion and sibling copies
//! - **score_service**: reward redemption and manual penalties
//! - **kid_service**: kid listing and profile updates
//! - **stats_service**: the last-7-days completion view
//!
//! ## Core Concepts
//!
//! - **Habit**: a recurring or one-time action assigned to one or more kids
//!   within a time-of-day period (morning/afternoon/evening)
//! - **Log**: a record that a habit was completed by a kid on a date; the
//!   source of truth for completion state and the stats view
//! - **Score**: points a kid accumulates one per completion, spends in
//!   fixed-cost redemptions and loses to penalties, floored at zero
//!
//! ## Business Rules
//!
//! - A habit with a date is visible only on that date; one without recurs
//!   every day
//! - Toggling a completion adds or removes exactly one log and moves the
//!   kid's score by one point, never below zero
//! - Reordering swaps order values with a neighbor inside the (kid, period,
//!   date) bucket and never renumbers
//! - New habits append to the end of their period and are bound to the day
//!   they were created on
//! - Redemption deducts a fixed cost and credits it to the kid's lifetime
//!   redeemed total, which only ever increases

pub mod habit_service;
pub mod kid_service;
pub mod score_service;
pub mod stats_service;

pub use habit_service::*;
pub use kid_service::*;
pub use score_service::*;
pub use stats_service::*;

use chrono::Utc;

/// Today's calendar date as a YYYY-MM-DD string
pub fn today_string() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}
