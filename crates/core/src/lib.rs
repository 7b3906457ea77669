//! Shared domain types for the DraftDeck platform.
//!
//! This crate is dependency-light on purpose: it holds the types and pure
//! logic shared by the database layer, the LLM service, the exporters, and
//! the HTTP API.

pub mod deck;
pub mod error;
pub mod types;
