use crate::commands::helpers::category_matches;
use crate::error::Result;
use crate::model::Quote;
use crate::store::DataStore;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Serialize, Serializer};

pub const API_QUOTES_PATH: &str = "/api/quotes";
pub const STATUS_SUCCESS: &str = "success";
pub const MSG_NO_MATCH: &str = "No matching quotes found";

#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    /// Case-insensitive exact category match.
    pub category: Option<String>,
    /// Case-insensitive substring of the author.
    pub author: Option<String>,
    pub random: bool,
    pub limit: Option<usize>,
    /// Quotes to skip; zero or negative skips nothing.
    pub offset: i64,
}

impl QueryParams {
    fn category_filter(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty())
    }

    fn author_filter(&self) -> Option<&str> {
        self.author.as_deref().filter(|a| !a.is_empty())
    }

    fn skip(&self) -> usize {
        usize::try_from(self.offset).unwrap_or(0)
    }
}

/// Parameters for fetching the page after the current one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextLink {
    pub category: Option<String>,
    pub author: Option<String>,
    pub limit: usize,
    pub offset: usize,
}

impl NextLink {
    /// Relative URL of the next page, e.g. `/api/quotes?limit=3&offset=6`.
    pub fn to_url(&self) -> String {
        let mut params = Vec::new();
        if let Some(category) = &self.category {
            params.push(format!("category={}", urlencoding::encode(category)));
        }
        if let Some(author) = &self.author {
            params.push(format!("author={}", urlencoding::encode(author)));
        }
        if self.limit > 0 {
            params.push(format!("limit={}", self.limit));
        }
        params.push(format!("offset={}", self.offset));
        format!("{}?{}", API_QUOTES_PATH, params.join("&"))
    }
}

impl Serialize for NextLink {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_url())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct QueryLinks {
    pub next: NextLink,
}

#[derive(Debug, Clone, Serialize)]
pub struct QueryMetadata {
    pub category_filter: Option<String>,
    pub author_filter: Option<String>,
    pub offset: i64,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RandomMatch {
    pub quote: Option<Quote>,
    pub status: &'static str,
    pub total_matching: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QueryPage {
    pub quotes: Vec<Quote>,
    pub status: &'static str,
    pub total_matching: usize,
    pub returned_count: usize,
    pub metadata: QueryMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<QueryLinks>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum QueryResponse {
    Random(RandomMatch),
    Page(QueryPage),
}

impl QueryResponse {
    pub fn total_matching(&self) -> usize {
        match self {
            QueryResponse::Random(r) => r.total_matching,
            QueryResponse::Page(p) => p.total_matching,
        }
    }
}

/// Filter `quotes` for the read-only API.
///
/// Category is an exact match while author is a substring match, both
/// ignoring case. `total_matching` counts the filtered set before any
/// random pick or pagination.
pub fn query<R: Rng + ?Sized>(quotes: Vec<Quote>, params: &QueryParams, rng: &mut R) -> QueryResponse {
    let mut matching = quotes;
    if let Some(category) = params.category_filter() {
        matching.retain(|q| category_matches(q, category));
    }
    if let Some(author) = params.author_filter() {
        let needle = author.to_lowercase();
        matching.retain(|q| q.author.to_lowercase().contains(&needle));
    }
    let total_matching = matching.len();

    if params.random {
        return QueryResponse::Random(match matching.choose(rng) {
            Some(quote) => RandomMatch {
                quote: Some(quote.clone()),
                status: STATUS_SUCCESS,
                total_matching,
                message: None,
            },
            None => RandomMatch {
                quote: None,
                status: STATUS_SUCCESS,
                total_matching: 0,
                message: Some(MSG_NO_MATCH.to_string()),
            },
        });
    }

    let skip = params.skip();
    let page: Vec<Quote> = matching
        .into_iter()
        .skip(skip)
        .take(params.limit.unwrap_or(usize::MAX))
        .collect();

    // An offset past usize::MAX cannot have more matches after it
    let links = params.limit.and_then(|limit| {
        let next_offset = skip.checked_add(limit)?;
        (next_offset < total_matching).then(|| QueryLinks {
            next: NextLink {
                category: params.category_filter().map(str::to_string),
                author: params.author_filter().map(str::to_string),
                limit,
                offset: next_offset,
            },
        })
    });

    QueryResponse::Page(QueryPage {
        returned_count: page.len(),
        quotes: page,
        status: STATUS_SUCCESS,
        total_matching,
        metadata: QueryMetadata {
            category_filter: params.category.clone(),
            author_filter: params.author.clone(),
            offset: params.offset,
            limit: params.limit,
        },
        links,
    })
}

pub fn run<S: DataStore, R: Rng + ?Sized>(
    store: &S,
    params: &QueryParams,
    rng: &mut R,
) -> Result<QueryResponse> {
    let quotes = store.load()?;
    Ok(query(quotes, params, rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::json;

    fn ten() -> Vec<Quote> {
        (0..10)
            .map(|i| Quote::new(format!("q{}", i), format!("Author {}", i), "life"))
            .collect()
    }

    fn page(response: QueryResponse) -> QueryPage {
        match response {
            QueryResponse::Page(p) => p,
            other => panic!("expected a page, got {:?}", other),
        }
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn offset_and_limit_with_next_link() {
        let params = QueryParams {
            offset: 5,
            limit: Some(3),
            ..Default::default()
        };
        let result = page(query(ten(), &params, &mut rng()));
        let texts: Vec<_> = result.quotes.iter().map(|q| q.text.as_str()).collect();
        assert_eq!(texts, vec!["q5", "q6", "q7"]);
        assert_eq!(result.total_matching, 10);
        assert_eq!(result.returned_count, 3);

        let next = result.links.expect("next link").next;
        assert_eq!(next.offset, 8);
        assert_eq!(next.to_url(), "/api/quotes?limit=3&offset=8");
    }

    #[test]
    fn huge_limit_has_no_next_link() {
        let params = QueryParams {
            offset: 1,
            limit: Some(usize::MAX),
            ..Default::default()
        };
        let result = page(query(ten(), &params, &mut rng()));
        assert_eq!(result.returned_count, 9);
        assert!(result.links.is_none());
    }

    #[test]
    fn no_next_link_on_last_page() {
        let params = QueryParams {
            offset: 8,
            limit: Some(3),
            ..Default::default()
        };
        let result = page(query(ten(), &params, &mut rng()));
        assert_eq!(result.quotes.len(), 2);
        assert!(result.links.is_none());
    }

    #[test]
    fn no_limit_returns_everything_without_links() {
        let result = page(query(ten(), &QueryParams::default(), &mut rng()));
        assert_eq!(result.quotes.len(), 10);
        assert!(result.links.is_none());
    }

    #[test]
    fn negative_offset_is_ignored() {
        let params = QueryParams {
            offset: -3,
            limit: Some(2),
            ..Default::default()
        };
        let result = page(query(ten(), &params, &mut rng()));
        assert_eq!(result.quotes[0].text, "q0");
        assert_eq!(result.metadata.offset, -3);
        assert_eq!(result.links.unwrap().next.offset, 2);
    }

    #[test]
    fn author_is_substring_and_category_is_exact() {
        let quotes = vec![
            Quote::new("a", "Oscar Wilde", "Life"),
            Quote::new("b", "Wilde Oscar", "lifestyle"),
            Quote::new("c", "Mark Twain", "life"),
        ];
        let params = QueryParams {
            category: Some("life".into()),
            author: Some("WILDE".into()),
            ..Default::default()
        };
        let result = page(query(quotes, &params, &mut rng()));
        assert_eq!(result.total_matching, 1);
        assert_eq!(result.quotes[0].text, "a");
    }

    #[test]
    fn next_link_carries_filters() {
        let params = QueryParams {
            category: Some("life".into()),
            author: Some("author 1".into()),
            limit: Some(1),
            ..Default::default()
        };
        let mut quotes = ten();
        quotes.push(Quote::new("extra", "Author 10", "life"));
        let result = page(query(quotes, &params, &mut rng()));
        assert_eq!(result.total_matching, 2);
        assert_eq!(
            result.links.unwrap().next.to_url(),
            "/api/quotes?category=life&author=author%201&limit=1&offset=1"
        );
    }

    #[test]
    fn random_returns_one_match() {
        let params = QueryParams {
            author: Some("author 3".into()),
            random: true,
            ..Default::default()
        };
        match query(ten(), &params, &mut rng()) {
            QueryResponse::Random(r) => {
                assert_eq!(r.quote.unwrap().text, "q3");
                assert_eq!(r.total_matching, 1);
                assert!(r.message.is_none());
            }
            other => panic!("expected random result, got {:?}", other),
        }
    }

    #[test]
    fn random_without_matches_is_not_an_error() {
        let params = QueryParams {
            category: Some("science".into()),
            random: true,
            ..Default::default()
        };
        let response = query(ten(), &params, &mut rng());
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "quote": null,
                "status": "success",
                "total_matching": 0,
                "message": "No matching quotes found"
            })
        );
    }

    #[test]
    fn page_serializes_like_the_api() {
        let params = QueryParams {
            limit: Some(1),
            ..Default::default()
        };
        let value = serde_json::to_value(query(ten(), &params, &mut rng())).unwrap();
        assert_eq!(value["status"], json!("success"));
        assert_eq!(value["returned_count"], json!(1));
        assert_eq!(value["metadata"]["limit"], json!(1));
        assert_eq!(value["metadata"]["category_filter"], json!(null));
        assert_eq!(value["links"]["next"], json!("/api/quotes?limit=1&offset=1"));
    }
}
