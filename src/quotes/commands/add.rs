use crate::commands::helpers::is_duplicate;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{QuotesError, Result};
use crate::markup::escape_html;
use crate::model::{IndexedQuote, Quote};
use crate::store::DataStore;
use tracing::info;

pub const MAX_TEXT_CHARS: usize = 500;
pub const MAX_AUTHOR_CHARS: usize = 100;

pub const MSG_REQUIRED: &str = "Quote, author, and category are all required!";
pub const MSG_TOO_LONG: &str = "Quote or author name is too long!";
pub const MSG_ADDED: &str = "Quote added successfully!";

/// Trimmed, length-checked fields for a new quote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuote {
    pub text: String,
    pub author: String,
    pub category: String,
}

impl NewQuote {
    pub fn validate(text: &str, author: &str, category: &str) -> Result<Self> {
        let text = text.trim();
        let author = author.trim();
        let category = category.trim();

        if text.is_empty() || author.is_empty() || category.is_empty() {
            return Err(QuotesError::Validation(MSG_REQUIRED.to_string()));
        }
        if text.chars().count() > MAX_TEXT_CHARS || author.chars().count() > MAX_AUTHOR_CHARS {
            return Err(QuotesError::Validation(MSG_TOO_LONG.to_string()));
        }

        Ok(Self {
            text: text.to_string(),
            author: author.to_string(),
            category: category.to_string(),
        })
    }

    /// The quote as stored: every field HTML-escaped, no ratings yet.
    pub fn into_quote(self) -> Quote {
        Quote::new(
            escape_html(&self.text),
            escape_html(&self.author),
            escape_html(&self.category),
        )
    }
}

/// Validate and append a quote to `quotes`, returning its position.
///
/// Stored text is escaped, so the duplicate check also compares the escaped
/// candidate; otherwise a quote containing `'` or `&` could be added twice.
pub fn add(quotes: &mut Vec<Quote>, text: &str, author: &str, category: &str) -> Result<usize> {
    let candidate = NewQuote::validate(text, author, category)?;

    if is_duplicate(quotes, &candidate.text, &candidate.author) {
        return Err(QuotesError::Duplicate);
    }
    let quote = candidate.into_quote();
    if is_duplicate(quotes, &quote.text, &quote.author) {
        return Err(QuotesError::Duplicate);
    }

    quotes.push(quote);
    Ok(quotes.len() - 1)
}

pub fn run<S: DataStore>(store: &S, text: &str, author: &str, category: &str) -> Result<CmdResult> {
    let mut quotes = store.load()?;
    let id = add(&mut quotes, text, author, category)?;
    store.save(&quotes)?;

    let added = quotes.swap_remove(id);
    info!(id, author = %added.author, "added quote");

    let mut result =
        CmdResult::default().with_affected_quotes(vec![IndexedQuote { id, quote: added }]);
    result.add_message(CmdMessage::success(MSG_ADDED));
    Ok(result)
}
