//! Shared domain types for Miyabi.
//!
//! This crate contains the types used across the bot: conversation and
//! completion shapes, the messaging-platform webhook payload, weather data,
//! and the error taxonomy. Zero infrastructure dependencies -- only serde
//! and thiserror.

pub mod conversation;
pub mod error;
pub mod event;
pub mod llm;
pub mod weather;
