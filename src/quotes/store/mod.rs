//! # Storage Layer
//!
//! The whole collection lives in a single JSON document:
//!
//! ```text
//! {
//!     "quotes": [
//!         { "text": "...", "author": "...", "category": "...", "ratings": [4, 5], "rating": 4.5 }
//!     ]
//! }
//! ```
//!
//! The [`DataStore`] trait hides where that document lives so the command layer can be
//! exercised against [`memory::InMemoryStore`] without touching a filesystem.
//!
//! ## Access Pattern
//!
//! Every operation loads the full collection, works on it in memory, and (for mutations)
//! writes the full collection back. Nothing is cached between operations; the store is the
//! only durable state.
//!
//! - A store that does not exist yet loads as an empty collection.
//! - A store that exists but cannot be read or parsed is an error.
//! - `save` replaces the previous contents entirely.
//!
//! Load-mutate-save is not transactional. Two writers interleaving their cycles will lose
//! the first writer's change; see [`crate::api::QuotesApi`] for the in-process guard.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: the JSON file, written atomically (temp file + rename) by default.
//! - [`memory::InMemoryStore`]: for tests; can simulate write failures.

use crate::error::Result;
use crate::model::Quote;
use std::path::PathBuf;

pub mod fs;
pub mod memory;

/// Abstract interface for collection storage.
///
/// Methods take `&self` so one store can be shared by concurrent callers.
pub trait DataStore {
    /// Load the full collection, in stored order.
    fn load(&self) -> Result<Vec<Quote>>;

    /// Replace the stored collection with `quotes`.
    fn save(&self, quotes: &[Quote]) -> Result<()>;

    /// Where the collection lives. For `InMemoryStore`, a virtual path.
    fn location(&self) -> PathBuf;
}
