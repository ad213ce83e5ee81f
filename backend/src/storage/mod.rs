//! # Storage Module
//!
//! Persistence layer for the habit tracker.
//!
//! State lives in three independently stored JSON collections (kids, habits
//! and activity logs) under a single data directory. Reads are defensive:
//! a missing or malformed collection silently falls back to built-in
//! defaults so the app always starts with usable state. Writes are atomic
//! (temp file then rename) and any write failure propagates to the caller
//! so it can be surfaced to the user.

pub mod defaults;
pub mod json;
pub mod traits;

pub use json::connection::JsonConnection;
