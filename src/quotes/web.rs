//! # Web Boundary
//!
//! The request-level contract for a web front end, independent of any HTTP framework.
//! A server extracts query strings, form fields and JSON bodies, calls the matching
//! function here, and renders what comes back:
//!
//! | Route | Function | Returns |
//! |-------|----------|---------|
//! | `GET /` | [`home`] | [`HomeView`] for the index template |
//! | `POST /add` | [`add_quote`] | [`Redirect`] carrying a flash message |
//! | `GET /quotes` | [`list_quotes`] | [`ListView`] for the listing template |
//! | `GET /api/quotes` | [`api_quotes`] | [`JsonResponse`], always 200 |
//! | `POST /api/rate_quote` | [`rate_quote`] | [`JsonResponse`], 200 / 400 / 404 |
//!
//! Query parameters that fail to parse fall back to their defaults rather than erroring.
//! A negative `limit` on `/api/quotes` counts as no limit: every match from `offset` on
//! is returned and `metadata.limit` is `null`. Storage failures are returned as `Err`
//! for the server to turn into a 500.

use crate::api::{
    CmdMessage, HomeView, ListParams, ListView, QueryParams, QuotesApi, SortKey, SortOrder,
    ALL_CATEGORIES,
};
use crate::commands::rate::{MSG_BAD_RATING, MSG_RATED};
use crate::error::{QuotesError, Result};
use crate::store::DataStore;
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::HashMap;

pub type Params = HashMap<String, String>;

pub const HOME_PATH: &str = "/";
pub const ADD_PATH: &str = "/add";

pub const MSG_MISSING_PAYLOAD: &str = "Missing JSON payload";
pub const MSG_MISSING_ID: &str = "Missing quote ID";
pub const MSG_BAD_ID: &str = "Quote ID must be an integer";
pub const MSG_INVALID_ID: &str = "Invalid quote ID";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonResponse {
    pub status: u16,
    pub body: Value,
}

impl JsonResponse {
    fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }

    fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            body: json!({ "status": "error", "message": message }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Redirect {
    pub location: &'static str,
    pub flash: CmdMessage,
}

fn str_param<'a>(params: &'a Params, key: &str) -> Option<&'a str> {
    params.get(key).map(String::as_str)
}

fn int_param(params: &Params, key: &str) -> Option<i64> {
    params.get(key).and_then(|v| v.trim().parse().ok())
}

fn flag_param(params: &Params, key: &str) -> bool {
    params
        .get(key)
        .map(|v| v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// `GET /`: a random quote, optionally from `category`.
pub fn home<S: DataStore>(api: &QuotesApi<S>, params: &Params) -> Result<HomeView> {
    api.random_quote(Some(str_param(params, "category").unwrap_or(ALL_CATEGORIES)))
}

/// `POST /add`: validation and duplicate failures send the user back to the form.
pub fn add_quote<S: DataStore>(api: &QuotesApi<S>, form: &Params) -> Result<Redirect> {
    let field = |key: &str| str_param(form, key).unwrap_or("");

    match api.add_quote(field("text"), field("author"), field("category")) {
        Ok(result) => Ok(Redirect {
            location: HOME_PATH,
            flash: result
                .messages
                .into_iter()
                .next()
                .unwrap_or_else(|| CmdMessage::success("Quote added successfully!")),
        }),
        Err(e) if e.is_storage() => Err(e),
        Err(e) => Ok(Redirect {
            location: ADD_PATH,
            flash: CmdMessage::error(e.to_string()),
        }),
    }
}

/// `GET /quotes`: the paginated listing.
pub fn list_quotes<S: DataStore>(
    api: &QuotesApi<S>,
    params: &Params,
    default_per_page: usize,
) -> Result<ListView> {
    let list_params = ListParams {
        category: str_param(params, "category").map(str::to_string),
        sort_by: SortKey::parse(str_param(params, "sort").unwrap_or("id")),
        order: SortOrder::parse(str_param(params, "order").unwrap_or("asc")),
        page: int_param(params, "page").unwrap_or(1),
        per_page: int_param(params, "per_page").unwrap_or(default_per_page as i64),
    };
    api.list_quotes(&list_params)
}

/// `GET /api/quotes`: filtered quotes as JSON. Never fails on input.
pub fn api_quotes<S: DataStore>(api: &QuotesApi<S>, params: &Params) -> Result<JsonResponse> {
    let query = QueryParams {
        category: str_param(params, "category").map(str::to_string),
        author: str_param(params, "author").map(str::to_string),
        random: flag_param(params, "random"),
        // A negative limit is treated as no limit
        limit: int_param(params, "limit").and_then(|l| usize::try_from(l).ok()),
        offset: int_param(params, "offset").unwrap_or(0),
    };
    let response = api.query_quotes(&query)?;
    Ok(JsonResponse::ok(
        serde_json::to_value(response).map_err(QuotesError::Serialization)?,
    ))
}

/// `POST /api/rate_quote`: body `{"quote_id": <int>, "rating": <int 1-5>}`.
pub fn rate_quote<S: DataStore>(api: &QuotesApi<S>, body: Option<&Value>) -> Result<JsonResponse> {
    let data = match body.and_then(Value::as_object) {
        Some(map) if !map.is_empty() => map,
        _ => return Ok(JsonResponse::error(400, MSG_MISSING_PAYLOAD)),
    };

    let quote_id = match data.get("quote_id") {
        None | Some(Value::Null) => return Ok(JsonResponse::error(400, MSG_MISSING_ID)),
        Some(v) => match v.as_i64() {
            Some(id) => id,
            None => return Ok(JsonResponse::error(400, MSG_BAD_ID)),
        },
    };

    let rating = match data.get("rating").and_then(Value::as_i64) {
        Some(r) => r,
        None => return Ok(JsonResponse::error(400, MSG_BAD_RATING)),
    };

    match api.rate_quote(quote_id, rating) {
        Ok(outcome) => Ok(JsonResponse::ok(json!({
            "status": "success",
            "message": MSG_RATED,
            "new_rating": outcome.new_rating,
        }))),
        Err(QuotesError::Validation(msg)) => Ok(JsonResponse::error(400, &msg)),
        Err(QuotesError::NotFound(_)) => Ok(JsonResponse::error(404, MSG_INVALID_ID)),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{MessageLevel, PickSource};
    use crate::store::memory::InMemoryStore;

    fn api_with(count: usize) -> QuotesApi<InMemoryStore> {
        let api = QuotesApi::new(InMemoryStore::new(), "/tmp/quotes-web");
        for i in 0..count {
            api.add_quote(&format!("quote {}", i), &format!("Author {}", i), "life")
                .unwrap();
        }
        api
    }

    fn params(pairs: &[(&str, &str)]) -> Params {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn home_defaults_to_all_categories() {
        let api = api_with(2);
        let view = home(&api, &Params::new()).unwrap();
        assert_eq!(view.selected_category, "all");
        assert_eq!(view.source, PickSource::AllQuotes);
    }

    #[test]
    fn add_success_redirects_home() {
        let api = api_with(0);
        let form = params(&[("text", "Be yourself."), ("author", "Oscar Wilde"), ("category", "life")]);
        let redirect = add_quote(&api, &form).unwrap();
        assert_eq!(redirect.location, "/");
        assert_eq!(redirect.flash.level, MessageLevel::Success);
    }

    #[test]
    fn add_failures_redirect_back_with_flash() {
        let api = api_with(0);
        let form = params(&[("text", "Be yourself."), ("author", "Oscar Wilde"), ("category", "life")]);
        add_quote(&api, &form).unwrap();

        let redirect = add_quote(&api, &form).unwrap();
        assert_eq!(redirect.location, "/add");
        assert_eq!(redirect.flash.level, MessageLevel::Error);
        assert_eq!(redirect.flash.content, "This quote already exists!");

        let redirect = add_quote(&api, &params(&[("text", "only text")])).unwrap();
        assert_eq!(redirect.location, "/add");
        assert_eq!(
            redirect.flash.content,
            "Quote, author, and category are all required!"
        );
    }

    #[test]
    fn add_storage_failure_is_an_error() {
        let api = api_with(0);
        api.store().set_simulate_write_error(true);
        let form = params(&[("text", "t"), ("author", "a"), ("category", "c")]);
        assert!(add_quote(&api, &form).is_err());
    }

    #[test]
    fn list_ignores_unparseable_numbers() {
        let api = api_with(12);
        let view = list_quotes(&api, &params(&[("page", "two"), ("per_page", "5")]), 10).unwrap();
        assert_eq!(view.pagination.page, 1);
        assert_eq!(view.quotes.len(), 5);

        let view = list_quotes(&api, &params(&[("per_page", "lots")]), 10).unwrap();
        assert_eq!(view.pagination.per_page, 10);
    }

    #[test]
    fn list_reads_sort_params() {
        let api = api_with(3);
        let view = list_quotes(&api, &params(&[("sort", "author"), ("order", "desc")]), 10).unwrap();
        assert_eq!(view.quotes[0].quote.author, "Author 2");
        assert_eq!(view.sort_by, SortKey::Author);
        assert_eq!(view.sort_order, SortOrder::Desc);
    }

    #[test]
    fn api_quotes_is_always_ok() {
        let api = api_with(10);
        let response = api_quotes(
            &api,
            &params(&[("limit", "3"), ("offset", "5"), ("random", "nope")]),
        )
        .unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.body["returned_count"], json!(3));
        assert_eq!(response.body["links"]["next"], json!("/api/quotes?limit=3&offset=8"));

        let response = api_quotes(&api, &params(&[("random", "TRUE"), ("author", "nobody")])).unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.body["quote"], Value::Null);
        assert_eq!(response.body["message"], json!("No matching quotes found"));
    }

    #[test]
    fn negative_limit_returns_every_match() {
        let api = api_with(4);
        let response = api_quotes(&api, &params(&[("limit", "-2"), ("offset", "1")])).unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.body["returned_count"], json!(3));
        assert_eq!(response.body["metadata"]["limit"], Value::Null);
        assert!(response.body.get("links").is_none());
    }

    #[test]
    fn rate_rejects_bad_payloads() {
        let api = api_with(1);
        assert_eq!(rate_quote(&api, None).unwrap().status, 400);
        assert_eq!(rate_quote(&api, Some(&json!({}))).unwrap().status, 400);

        let response = rate_quote(&api, Some(&json!({"rating": 3}))).unwrap();
        assert_eq!(response.status, 400);
        assert_eq!(response.body["message"], json!("Missing quote ID"));

        let response = rate_quote(&api, Some(&json!({"quote_id": 0, "rating": "5"}))).unwrap();
        assert_eq!(response.status, 400);
        assert_eq!(response.body["message"], json!(MSG_BAD_RATING));

        let response = rate_quote(&api, Some(&json!({"quote_id": 0, "rating": 6}))).unwrap();
        assert_eq!(response.status, 400);
    }

    #[test]
    fn rate_unknown_id_is_404() {
        let api = api_with(1);
        let response = rate_quote(&api, Some(&json!({"quote_id": 999, "rating": 3}))).unwrap();
        assert_eq!(response.status, 404);
        assert_eq!(response.body["message"], json!("Invalid quote ID"));
    }

    #[test]
    fn rate_success_reports_new_average() {
        let api = api_with(1);
        rate_quote(&api, Some(&json!({"quote_id": 0, "rating": 4}))).unwrap();
        let response = rate_quote(&api, Some(&json!({"quote_id": 0, "rating": 2}))).unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.body["status"], json!("success"));
        assert_eq!(response.body["new_rating"], json!(3.0));
    }
}
