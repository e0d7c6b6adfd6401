use super::DataStore;
use crate::error::{QuotesError, Result};
use crate::model::Quote;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

/// In-memory storage for testing.
///
/// Uses a `RwLock` rather than a `RefCell` so the same store can back a
/// `QuotesApi` shared across threads.
#[derive(Default)]
pub struct InMemoryStore {
    quotes: RwLock<Option<Vec<Quote>>>,
    simulate_write_error: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `quotes`.
    pub fn with_quotes(quotes: Vec<Quote>) -> Self {
        Self {
            quotes: RwLock::new(Some(quotes)),
            simulate_write_error: AtomicBool::new(false),
        }
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.store(simulate, Ordering::SeqCst);
    }

    /// True once something has been saved (or the store was seeded).
    pub fn exists(&self) -> bool {
        self.quotes.read().map(|q| q.is_some()).unwrap_or(false)
    }
}

impl DataStore for InMemoryStore {
    fn load(&self) -> Result<Vec<Quote>> {
        let quotes = self
            .quotes
            .read()
            .map_err(|_| QuotesError::Store("in-memory store lock poisoned".to_string()))?;
        Ok(quotes.clone().unwrap_or_default())
    }

    fn save(&self, new_quotes: &[Quote]) -> Result<()> {
        if self.simulate_write_error.load(Ordering::SeqCst) {
            return Err(QuotesError::Store("Simulated write error".to_string()));
        }
        let mut quotes = self
            .quotes
            .write()
            .map_err(|_| QuotesError::Store("in-memory store lock poisoned".to_string()))?;
        *quotes = Some(new_quotes.to_vec());
        Ok(())
    }

    fn location(&self) -> PathBuf {
        PathBuf::from("memory://quotes_collection.json")
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use serde_json::Number;

    pub struct StoreFixture {
        pub store: InMemoryStore,
        quotes: Vec<Quote>,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
                quotes: Vec::new(),
            }
        }

        /// `count` quotes by distinct authors, all in `category`.
        pub fn with_quotes(mut self, count: usize, category: &str) -> Self {
            let start = self.quotes.len();
            for i in start..start + count {
                self.quotes.push(Quote::new(
                    format!("Test quote {}", i + 1),
                    format!("Author {}", i + 1),
                    category,
                ));
            }
            self.flush()
        }

        pub fn with_quote(mut self, text: &str, author: &str, category: &str) -> Self {
            self.quotes.push(Quote::new(text, author, category));
            self.flush()
        }

        pub fn with_rated_quote(mut self, text: &str, author: &str, ratings: &[u8]) -> Self {
            let mut quote = Quote::new(text, author, "rated");
            let sum: u32 = ratings.iter().map(|r| u32::from(*r)).sum();
            quote.rating = Some(sum as f64 / ratings.len() as f64);
            quote.ratings = Some(ratings.iter().map(|r| Number::from(*r)).collect());
            self.quotes.push(quote);
            self.flush()
        }

        pub fn with_uncategorized_quote(mut self, text: &str, author: &str) -> Self {
            let mut quote = Quote::new(text, author, "");
            quote.category = None;
            self.quotes.push(quote);
            self.flush()
        }

        fn flush(self) -> Self {
            self.store.save(&self.quotes).unwrap();
            self
        }
    }
}
