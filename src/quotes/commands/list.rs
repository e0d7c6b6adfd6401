use crate::commands::categories::categories;
use crate::commands::helpers::{category_matches, index_quotes};
use crate::commands::ALL_CATEGORIES;
use crate::config::DEFAULT_PER_PAGE;
use crate::error::Result;
use crate::model::{IndexedQuote, Quote};
use crate::store::DataStore;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

pub const MIN_PER_PAGE: i64 = 1;
pub const MAX_PER_PAGE: i64 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Id,
    Author,
    Rating,
}

impl SortKey {
    /// Unknown keys sort by id.
    pub fn parse(s: &str) -> Self {
        match s {
            "author" => SortKey::Author,
            "rating" => SortKey::Rating,
            _ => SortKey::Id,
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Id => write!(f, "id"),
            SortKey::Author => write!(f, "author"),
            SortKey::Rating => write!(f, "rating"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Anything but `desc` (any case) is ascending.
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("desc") {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Asc => write!(f, "asc"),
            SortOrder::Desc => write!(f, "desc"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ListParams {
    pub category: Option<String>,
    pub sort_by: SortKey,
    pub order: SortOrder,
    pub page: i64,
    pub per_page: i64,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            category: None,
            sort_by: SortKey::Id,
            order: SortOrder::Asc,
            page: 1,
            per_page: DEFAULT_PER_PAGE as i64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub total_pages: usize,
    pub has_prev: bool,
    pub has_next: bool,
    pub prev_page: Option<usize>,
    pub next_page: Option<usize>,
}

impl Pagination {
    /// Clamp `per_page` into range and `page` onto an existing page.
    pub fn new(total: usize, page: i64, per_page: i64) -> Self {
        let per_page = per_page.clamp(MIN_PER_PAGE, MAX_PER_PAGE) as usize;
        let total_pages = total.div_ceil(per_page);
        let page = if total_pages == 0 {
            1
        } else {
            page.clamp(1, total_pages as i64) as usize
        };
        let has_prev = page > 1;
        let has_next = page < total_pages;

        Self {
            page,
            per_page,
            total,
            total_pages,
            has_prev,
            has_next,
            prev_page: has_prev.then(|| page - 1),
            next_page: has_next.then(|| page + 1),
        }
    }

    fn bounds(&self) -> (usize, usize) {
        let start = ((self.page - 1) * self.per_page).min(self.total);
        let end = (start + self.per_page).min(self.total);
        (start, end)
    }
}

/// Everything the listing page shows.
#[derive(Debug, Clone, Serialize)]
pub struct ListView {
    pub quotes: Vec<IndexedQuote>,
    pub pagination: Pagination,
    /// Categories present in the filtered set.
    pub categories: Vec<String>,
    pub selected_category: String,
    pub sort_by: SortKey,
    pub sort_order: SortOrder,
}

fn compare(key: SortKey, a: &IndexedQuote, b: &IndexedQuote) -> Ordering {
    match key {
        SortKey::Id => a.id.cmp(&b.id),
        SortKey::Author => a
            .quote
            .author
            .to_lowercase()
            .cmp(&b.quote.author.to_lowercase()),
        SortKey::Rating => a.quote.sort_rating().total_cmp(&b.quote.sort_rating()),
    }
}

/// Filter, number, sort and paginate `quotes`.
///
/// Ids are positions in the filtered sequence, assigned before sorting. Both
/// directions are stable: equal keys keep their filtered order.
pub fn list_view(quotes: Vec<Quote>, params: &ListParams) -> ListView {
    let category = params
        .category
        .as_deref()
        .filter(|c| !c.is_empty() && *c != ALL_CATEGORIES);

    let filtered: Vec<Quote> = match category {
        Some(c) => quotes
            .into_iter()
            .filter(|q| category_matches(q, c))
            .collect(),
        None => quotes,
    };

    let categories = categories(&filtered);
    let mut indexed = index_quotes(filtered);

    match params.order {
        SortOrder::Asc => indexed.sort_by(|a, b| compare(params.sort_by, a, b)),
        SortOrder::Desc => indexed.sort_by(|a, b| compare(params.sort_by, b, a)),
    }

    let pagination = Pagination::new(indexed.len(), params.page, params.per_page);
    let (start, end) = pagination.bounds();
    let page_quotes: Vec<IndexedQuote> = indexed.drain(start..end).collect();

    ListView {
        quotes: page_quotes,
        pagination,
        categories,
        selected_category: params
            .category
            .clone()
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| ALL_CATEGORIES.to_string()),
        sort_by: params.sort_by,
        sort_order: params.order,
    }
}

pub fn run<S: DataStore>(store: &S, params: &ListParams) -> Result<ListView> {
    let quotes = store.load()?;
    Ok(list_view(quotes, params))
}
