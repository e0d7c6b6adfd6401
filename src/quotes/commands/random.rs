use crate::commands::categories::categories;
use crate::commands::{CmdMessage, ALL_CATEGORIES};
use crate::error::Result;
use crate::model::Quote;
use crate::store::DataStore;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use tracing::warn;

/// Which pool a random quote was drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PickSource {
    /// Quotes whose category matched the request exactly.
    Category,
    /// The whole collection, because no category was requested.
    AllQuotes,
    /// The whole collection, because the requested category had no quotes.
    CategoryFallback,
    /// The collection was empty.
    Placeholder,
}

#[derive(Debug, Clone, Serialize)]
pub struct RandomPick {
    pub quote: Quote,
    pub source: PickSource,
}

/// Everything the home page shows.
#[derive(Debug, Clone, Serialize)]
pub struct HomeView {
    pub quote: Quote,
    pub source: PickSource,
    /// Categories of the full collection, not just the picked pool.
    pub categories: Vec<String>,
    pub selected_category: String,
}

impl HomeView {
    /// A warning when the requested category had no quotes.
    pub fn notice(&self) -> Option<CmdMessage> {
        (self.source == PickSource::CategoryFallback).then(|| {
            CmdMessage::warning(format!(
                "No quotes in '{}', picked from all quotes",
                self.selected_category
            ))
        })
    }
}

/// Pick a quote uniformly at random, optionally from one category.
///
/// The category match is case-sensitive. A category with no quotes silently
/// widens to the whole collection, and an empty collection yields
/// [`Quote::placeholder`].
pub fn pick_random<R: Rng + ?Sized>(quotes: &[Quote], category: &str, rng: &mut R) -> RandomPick {
    if quotes.is_empty() {
        return RandomPick {
            quote: Quote::placeholder(),
            source: PickSource::Placeholder,
        };
    }

    if category == ALL_CATEGORIES {
        return pick_any(quotes, PickSource::AllQuotes, rng);
    }

    let matching: Vec<&Quote> = quotes
        .iter()
        .filter(|q| q.category.as_deref() == Some(category))
        .collect();

    match matching.choose(rng) {
        Some(quote) => RandomPick {
            quote: (*quote).clone(),
            source: PickSource::Category,
        },
        None => {
            warn!(category, "no quotes in category, picking from all quotes");
            pick_any(quotes, PickSource::CategoryFallback, rng)
        }
    }
}

fn pick_any<R: Rng + ?Sized>(quotes: &[Quote], source: PickSource, rng: &mut R) -> RandomPick {
    match quotes.choose(rng) {
        Some(quote) => RandomPick {
            quote: quote.clone(),
            source,
        },
        None => RandomPick {
            quote: Quote::placeholder(),
            source: PickSource::Placeholder,
        },
    }
}

pub fn run<S: DataStore, R: Rng + ?Sized>(
    store: &S,
    category: Option<&str>,
    rng: &mut R,
) -> Result<HomeView> {
    let quotes = store.load()?;
    let selected = category.unwrap_or(ALL_CATEGORIES);
    let pick = pick_random(&quotes, selected, rng);

    Ok(HomeView {
        quote: pick.quote,
        source: pick.source,
        categories: categories(&quotes),
        selected_category: selected.to_string(),
    })
}
