use crate::error::{QuotesError, Result};
use crate::model::Quote;
use crate::store::DataStore;
use serde::Serialize;
use serde_json::Number;
use tracing::info;

pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 5;

pub const MSG_BAD_RATING: &str = "Rating must be an integer between 1 and 5";
pub const MSG_RATED: &str = "Rating saved successfully";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingOutcome {
    pub quote_id: usize,
    pub new_rating: f64,
    pub rating_count: usize,
}

/// Round half-way cases to even on the exact binary value.
fn round_to_tenth(value: f64) -> f64 {
    format!("{:.1}", value).parse().unwrap_or(value)
}

/// Append `rating` to the quote at position `quote_id` and refresh its average.
///
/// `quote_id` is a position in `quotes` as loaded right now. A caller that
/// listed the collection before someone else inserted a quote will rate
/// whatever now sits at that position.
pub fn rate(quotes: &mut [Quote], quote_id: i64, rating: i64) -> Result<RatingOutcome> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(QuotesError::Validation(MSG_BAD_RATING.to_string()));
    }
    let index = usize::try_from(quote_id)
        .ok()
        .filter(|i| *i < quotes.len())
        .ok_or(QuotesError::NotFound(quote_id))?;

    let quote = &mut quotes[index];
    let ratings = quote.ratings.get_or_insert_with(Vec::new);
    ratings.push(Number::from(rating));

    let sum: f64 = ratings.iter().filter_map(Number::as_f64).sum();
    let average = round_to_tenth(sum / ratings.len() as f64);
    let rating_count = ratings.len();
    quote.rating = Some(average);

    Ok(RatingOutcome {
        quote_id: index,
        new_rating: average,
        rating_count,
    })
}

pub fn run<S: DataStore>(store: &S, quote_id: i64, rating: i64) -> Result<RatingOutcome> {
    // Reject a bad rating before touching the store
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(QuotesError::Validation(MSG_BAD_RATING.to_string()));
    }
    let mut quotes = store.load()?;
    let outcome = rate(&mut quotes, quote_id, rating)?;
    store.save(&quotes)?;

    info!(
        quote_id = outcome.quote_id,
        rating,
        average = outcome.new_rating,
        "rated quote"
    );
    Ok(outcome)
}
