//! Entity models and DTOs, one module per table.

pub mod comment;
pub mod llm_log;
pub mod project;
pub mod revision;
pub mod section;
pub mod user;
