//! LLM abstraction: text generation, refinement, and outline suggestion.
//!
//! Two providers exist: a deterministic mock (the default) and an
//! OpenAI-compatible chat-completion client. Provider selection happens
//! once at startup from the environment; every generation records which
//! provider produced it. Provider failures are surfaced to the caller --
//! there is no retry and no silent fallback.

mod config;
mod error;
mod openai;
mod outline;
mod service;

pub use config::LlmConfig;
pub use error::LlmError;
pub use service::{GenerateParams, Generation, LlmService, Provider};
