use crate::model::{IndexedQuote, Quote};

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// True if some quote already has this text and author, ignoring case and
/// surrounding whitespace.
pub fn is_duplicate(quotes: &[Quote], text: &str, author: &str) -> bool {
    let text = normalize(text);
    let author = normalize(author);
    quotes
        .iter()
        .any(|q| normalize(&q.text) == text && normalize(&q.author) == author)
}

/// Number quotes by their position in `quotes`.
pub fn index_quotes(quotes: Vec<Quote>) -> Vec<IndexedQuote> {
    quotes
        .into_iter()
        .enumerate()
        .map(|(id, quote)| IndexedQuote { id, quote })
        .collect()
}

/// Case-insensitive exact category match. Quotes without a category only
/// match the empty string.
pub fn category_matches(quote: &Quote, category: &str) -> bool {
    quote.category_str().to_lowercase() == category.to_lowercase()
}
