//! Business logic and port trait definitions for Miyabi.
//!
//! This crate defines the "ports" (provider traits) that the infrastructure
//! layer implements. It depends only on `miyabi-types` -- never on
//! `miyabi-infra` or any HTTP/IO crate.

pub mod conversation;
pub mod dispatch;
pub mod llm;
pub mod messenger;
pub mod notify;
pub mod persona;
pub mod rules;
pub mod subscription;
