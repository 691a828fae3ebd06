//! Chat completion backends.

pub mod openai_compat;

pub use openai_compat::{OpenAiCompatConfig, OpenAiCompatibleProvider};
