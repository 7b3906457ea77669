//! HTTP handlers, one module per resource.

pub mod auth;
pub mod export;
pub mod project;
pub mod section;
pub mod suggest;
