//! Client-side mirror of the DraftDeck API.
//!
//! [`ApiClient`] is a thin typed wrapper over the REST surface;
//! [`ProjectStore`] keeps an in-memory mirror of the caller's projects and
//! applies mutations optimistically. Unlike a fire-and-forget store, every
//! failed call rolls the local state back to its pre-mutation snapshot, so
//! the mirror never silently diverges from the server.

mod client;
mod error;
mod ops;
mod store;

pub use client::{ApiClient, Comment, NewProject, Project, RefineOutcome, Section, User};
pub use error::ClientError;
pub use store::ProjectStore;
