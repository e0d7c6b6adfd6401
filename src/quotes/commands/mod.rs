use crate::config::QuotesConfig;
use crate::model::IndexedQuote;

pub mod add;
pub mod categories;
pub mod config;
pub mod helpers;
pub mod list;
pub mod query;
pub mod random;
pub mod rate;

/// Category value meaning "no category filter".
pub const ALL_CATEGORIES: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// Outcome of a mutating or configuration command.
#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_quotes: Vec<IndexedQuote>,
    pub config: Option<QuotesConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_quotes(mut self, quotes: Vec<IndexedQuote>) -> Self {
        self.affected_quotes = quotes;
        self
    }

    pub fn with_config(mut self, config: QuotesConfig) -> Self {
        self.config = Some(config);
        self
    }
}
