//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single entry point
//! for every quotes operation, whichever UI sits on top (the CLI, the web boundary in
//! [`crate::web`], or something else).
//!
//! The facade:
//! - **Dispatches** to the appropriate command function
//! - **Supplies randomness** to the commands that need it
//! - **Serializes writes** when asked to (see below)
//! - **Returns structured types**, never strings meant for a terminal
//!
//! ## Write Serialization
//!
//! Every mutation is a load-mutate-save cycle over the whole collection. Two callers
//! interleaving those cycles lose the first caller's change. With `serialize_writes`
//! enabled, `add_quote` and `rate_quote` hold one mutex for the whole cycle, so callers
//! sharing a `QuotesApi` (for example behind an `Arc` in a web server) never lose
//! updates. Reads never take the lock. Writers in *other processes* are not covered.
//!
//! ## Generic Over DataStore
//!
//! - Production: `QuotesApi<FileStore>`
//! - Testing: `QuotesApi<InMemoryStore>`

use crate::commands;
use crate::error::Result;
use crate::store::DataStore;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

pub struct QuotesApi<S: DataStore> {
    store: S,
    data_dir: PathBuf,
    serialize_writes: bool,
    write_lock: Mutex<()>,
}

impl<S: DataStore> QuotesApi<S> {
    pub fn new(store: S, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            store,
            data_dir: data_dir.into(),
            serialize_writes: true,
            write_lock: Mutex::new(()),
        }
    }

    /// Turn the in-process write lock on or off.
    pub fn with_serialized_writes(mut self, enabled: bool) -> Self {
        self.serialize_writes = enabled;
        self
    }

    fn write_guard(&self) -> Option<MutexGuard<'_, ()>> {
        if !self.serialize_writes {
            return None;
        }
        // The guarded value is `()`, so a poisoned lock carries no broken state
        Some(
            self.write_lock
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner()),
        )
    }

    pub fn random_quote(&self, category: Option<&str>) -> Result<commands::random::HomeView> {
        commands::random::run(&self.store, category, &mut rand::thread_rng())
    }

    pub fn categories(&self) -> Result<Vec<String>> {
        commands::categories::run(&self.store)
    }

    pub fn add_quote(&self, text: &str, author: &str, category: &str) -> Result<CmdResult> {
        let _guard = self.write_guard();
        commands::add::run(&self.store, text, author, category)
    }

    pub fn list_quotes(&self, params: &ListParams) -> Result<commands::list::ListView> {
        commands::list::run(&self.store, params)
    }

    pub fn query_quotes(&self, params: &QueryParams) -> Result<commands::query::QueryResponse> {
        commands::query::run(&self.store, params, &mut rand::thread_rng())
    }

    pub fn rate_quote(&self, quote_id: i64, rating: i64) -> Result<RatingOutcome> {
        let _guard = self.write_guard();
        commands::rate::run(&self.store, quote_id, rating)
    }

    pub fn config(&self, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(&self.data_dir, action)
    }

    pub fn store_location(&self) -> PathBuf {
        self.store.location()
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

pub use crate::commands::config::ConfigAction;
pub use commands::list::{ListParams, ListView, Pagination, SortKey, SortOrder};
pub use commands::query::{QueryParams, QueryResponse};
pub use commands::random::{HomeView, PickSource};
pub use commands::rate::RatingOutcome;
pub use commands::{CmdMessage, CmdResult, MessageLevel, ALL_CATEGORIES};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QuotesError;
    use crate::store::memory::InMemoryStore;
    use std::sync::Arc;
    use std::thread;

    fn api() -> QuotesApi<InMemoryStore> {
        QuotesApi::new(InMemoryStore::new(), "/tmp/quotes-test")
    }

    #[test]
    fn add_then_list_dispatch() {
        let api = api();
        api.add_quote("Be yourself.", "Oscar Wilde", "life").unwrap();
        let view = api.list_quotes(&ListParams::default()).unwrap();
        assert_eq!(view.quotes.len(), 1);
        assert_eq!(api.categories().unwrap(), vec!["life"]);
    }

    #[test]
    fn random_on_empty_store_is_placeholder() {
        let view = api().random_quote(None).unwrap();
        assert_eq!(view.source, PickSource::Placeholder);
    }

    #[test]
    fn rate_dispatch_returns_average() {
        let api = api();
        api.add_quote("t", "a", "c").unwrap();
        assert_eq!(api.rate_quote(0, 5).unwrap().new_rating, 5.0);
        assert!(matches!(
            api.rate_quote(1, 5).unwrap_err(),
            QuotesError::NotFound(1)
        ));
    }

    #[test]
    fn query_dispatch_counts_matches() {
        let api = api();
        api.add_quote("a", "Oscar Wilde", "life").unwrap();
        api.add_quote("b", "Mark Twain", "life").unwrap();
        let response = api
            .query_quotes(&QueryParams {
                author: Some("twain".into()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(response.total_matching(), 1);
    }

    #[test]
    fn unserialized_writes_skip_the_lock() {
        let api = api().with_serialized_writes(false);
        // Would block forever if add or rate took the lock
        let _held = api.write_lock.lock().unwrap();

        api.add_quote("t", "a", "c").unwrap();
        api.add_quote("u", "b", "c").unwrap();
        assert_eq!(api.rate_quote(1, 4).unwrap().new_rating, 4.0);
        assert_eq!(api.rate_quote(1, 2).unwrap().new_rating, 3.0);

        let stored = api.store().load().unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[1].rating, Some(3.0));
    }

    #[test]
    fn serialized_writes_keep_every_concurrent_add() {
        let api = Arc::new(api());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let api = Arc::clone(&api);
                thread::spawn(move || {
                    for i in 0..10 {
                        api.add_quote(&format!("quote {}-{}", t, i), "author", "load")
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(api.store().load().unwrap().len(), 80);
    }

    #[test]
    fn serialized_writes_keep_every_concurrent_rating() {
        let api = Arc::new(api());
        api.add_quote("t", "a", "c").unwrap();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let api = Arc::clone(&api);
                thread::spawn(move || {
                    for _ in 0..5 {
                        api.rate_quote(0, 4).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        let stored = api.store().load().unwrap();
        assert_eq!(stored[0].ratings.as_ref().map(Vec::len), Some(20));
        assert_eq!(stored[0].rating, Some(4.0));
    }
}
