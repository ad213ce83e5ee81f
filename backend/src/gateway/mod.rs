//! # Gateway Module
//!
//! External-facing integrations. The only one is the generative-AI
//! suggestion gateway, which proposes activities and rewards. Every call
//! is fail-soft: without a credential the canned suggestions come back and
//! no network request is made at all; any transport or parse failure
//! degrades to an empty list. A gateway problem is never a user-visible
//! error.

pub mod gemini;

pub use gemini::SuggestionGateway;
