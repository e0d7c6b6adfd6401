use crate::error::Result;
use crate::model::Quote;
use crate::store::DataStore;
use std::collections::BTreeSet;

/// Distinct categories, sorted. Quotes without a category are skipped.
pub fn categories(quotes: &[Quote]) -> Vec<String> {
    quotes
        .iter()
        .filter_map(|q| q.category.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn run<S: DataStore>(store: &S) -> Result<Vec<String>> {
    let quotes = store.load()?;
    Ok(categories(&quotes))
}
