use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

pub const PLACEHOLDER_TEXT: &str = "No quotes available";
pub const PLACEHOLDER_AUTHOR: &str = "System";
pub const PLACEHOLDER_CATEGORY: &str = "None";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    pub author: String,
    /// A stored `"category": null` loads as `None` and is written back without the key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Every submitted rating, oldest first. Kept as JSON numbers so hand-edited values
    /// outside 1-5 still load and are written back unchanged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ratings: Option<Vec<Number>>,
    /// Mean of `ratings`, rounded to one decimal. Absent until the first rating.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    // Fields we don't know about are carried through load/save untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Quote {
    pub fn new(
        text: impl Into<String>,
        author: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            author: author.into(),
            category: Some(category.into()),
            ratings: None,
            rating: None,
            extra: Map::new(),
        }
    }

    /// Shown when the collection is empty.
    pub fn placeholder() -> Self {
        Self::new(PLACEHOLDER_TEXT, PLACEHOLDER_AUTHOR, PLACEHOLDER_CATEGORY)
    }

    pub fn category_str(&self) -> &str {
        self.category.as_deref().unwrap_or("")
    }

    /// Rating used for ordering; unrated quotes count as zero.
    pub fn sort_rating(&self) -> f64 {
        self.rating.unwrap_or(0.0)
    }
}

/// A quote paired with its position in one particular in-memory ordering.
///
/// The id is only meaningful for the snapshot it was computed from: any insert,
/// filter or re-sort renumbers the collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexedQuote {
    pub id: usize,
    #[serde(flatten)]
    pub quote: Quote,
}

/// On-disk layout of the collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuoteDocument {
    pub quotes: Vec<Quote>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_quote_has_no_rating_fields() {
        let q = Quote::new("Be yourself.", "Oscar Wilde", "life");
        let value = serde_json::to_value(&q).unwrap();
        assert_eq!(
            value,
            json!({"text": "Be yourself.", "author": "Oscar Wilde", "category": "life"})
        );
    }

    #[test]
    fn unknown_fields_survive_a_round_trip() {
        let raw = json!({
            "text": "t",
            "author": "a",
            "source": "book",
            "ratings": [4, 5],
            "rating": 4.5
        });
        let q: Quote = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(q.category, None);
        assert_eq!(q.extra.get("source"), Some(&json!("book")));
        assert_eq!(serde_json::to_value(&q).unwrap(), raw);
    }

    #[test]
    fn out_of_range_ratings_still_load() {
        let raw = json!({"text": "t", "author": "a", "ratings": [256, -1, 4.5]});
        let q: Quote = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(q.ratings.as_ref().map(Vec::len), Some(3));
        assert_eq!(serde_json::to_value(&q).unwrap(), raw);
    }

    #[test]
    fn null_category_is_written_without_the_key() {
        let q: Quote =
            serde_json::from_value(json!({"text": "t", "author": "a", "category": null})).unwrap();
        assert_eq!(q.category, None);
        assert_eq!(
            serde_json::to_value(&q).unwrap(),
            json!({"text": "t", "author": "a"})
        );
    }

    #[test]
    fn indexed_quote_serializes_flat() {
        let iq = IndexedQuote {
            id: 3,
            quote: Quote::new("t", "a", "c"),
        };
        let value = serde_json::to_value(&iq).unwrap();
        assert_eq!(value["id"], json!(3));
        assert_eq!(value["text"], json!("t"));
    }
}
