//! LINE Messaging API: outbound client and webhook signature verification.

pub mod client;
pub mod signature;

pub use client::LineClient;
