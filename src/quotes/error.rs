use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuotesError {
    #[error("{0}")]
    Validation(String),

    #[error("This quote already exists!")]
    Duplicate,

    #[error("Invalid quote ID: {0}")]
    NotFound(i64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),
}

impl QuotesError {
    /// HTTP status a web boundary should answer with for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            QuotesError::Validation(_) | QuotesError::Duplicate => 400,
            QuotesError::NotFound(_) => 404,
            QuotesError::Io(_) | QuotesError::Serialization(_) | QuotesError::Store(_) => 500,
        }
    }

    /// Storage failures are not recoverable by the caller.
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            QuotesError::Io(_) | QuotesError::Serialization(_) | QuotesError::Store(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, QuotesError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_errors_to_status_codes() {
        assert_eq!(QuotesError::Validation("bad".into()).status_code(), 400);
        assert_eq!(QuotesError::Duplicate.status_code(), 400);
        assert_eq!(QuotesError::NotFound(7).status_code(), 404);
        assert_eq!(QuotesError::Store("boom".into()).status_code(), 500);
    }

    #[test]
    fn only_store_failures_are_storage_errors() {
        assert!(QuotesError::Store("boom".into()).is_storage());
        assert!(!QuotesError::Duplicate.is_storage());
        assert!(!QuotesError::NotFound(0).is_storage());
    }
}
