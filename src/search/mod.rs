//! Catalog search: filtering, match scoring, ranking and pagination.
//!
//! One pure pipeline, shared by the command line preview and the MCP
//! `search_laptops` tool:
//!
//! raw query -> [`normalize`] -> [`filter`] -> [`score`] -> [`rank`] -> [`paginate`]
//!
//! Nothing here performs I/O or holds state. Callers hand in an immutable slice of
//! laptops and get back an owned [`ResultPage`].

// Module declarations
pub mod filter;
pub mod paginate;
pub mod preset;
pub mod query;
pub mod rank;
pub mod scoring;
pub mod similar;

pub use filter::filter;
pub use paginate::{page_bounds, paginate, total_pages};
pub use preset::Preset;
pub use query::{FilterCriteria, RawQuery, RawValue, normalize, parse_number};
pub use rank::{SortStrategy, rank};
pub use scoring::{ScoredItem, score};
pub use similar::similar_to;

use crate::error::SearchError;
use crate::types::Laptop;
use serde::Serialize;

/// Page size used when the caller does not pick one.
pub const DEFAULT_PAGE_SIZE: usize = 8;

/// A laptop as it appears in a result page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredLaptop {
    #[serde(flatten)]
    pub laptop: Laptop,
    pub match_score: i32,
    pub match_reasons: Vec<String>,
}

impl From<&ScoredItem<'_>> for ScoredLaptop {
    fn from(item: &ScoredItem<'_>) -> Self {
        Self {
            laptop: item.laptop.clone(),
            match_score: item.match_score,
            match_reasons: item.reasons.clone(),
        }
    }
}

/// One page of ranked results.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultPage {
    pub items: Vec<ScoredLaptop>,
    /// Laptops matching the filters across all pages
    pub total_count: usize,
    pub total_pages: usize,
    pub page: i64,
    pub page_size: usize,
    pub strategy: SortStrategy,
}

/// Run the full pipeline on a raw query.
pub fn search(
    laptops: &[Laptop],
    raw: &RawQuery,
    strategy: SortStrategy,
    page: i64,
    page_size: usize,
) -> ResultPage {
    search_criteria(laptops, &normalize(raw), strategy, page, page_size)
}

/// Run the pipeline on criteria that were already normalized.
pub fn search_criteria(
    laptops: &[Laptop],
    criteria: &FilterCriteria,
    strategy: SortStrategy,
    page: i64,
    page_size: usize,
) -> ResultPage {
    let mut ranked: Vec<ScoredItem<'_>> = filter(laptops, criteria)
        .into_iter()
        .map(|laptop| score(laptop, criteria))
        .collect();
    rank(&mut ranked, strategy);

    let total_count = ranked.len();
    let items = paginate(&ranked, page, page_size)
        .iter()
        .map(ScoredLaptop::from)
        .collect();

    tracing::debug!(
        "search: {} of {} laptops matched ({} active criteria), strategy {}, page {}",
        total_count,
        laptops.len(),
        criteria.active_count(),
        strategy,
        page
    );

    ResultPage {
        items,
        total_count,
        total_pages: total_pages(total_count, page_size),
        page,
        page_size,
        strategy,
    }
}

/// Run the pipeline with ordering and paging read from the raw query itself
/// (`sort`, `page` and `limit` keys), the way a query string carries them.
///
/// Only an unknown `sort` value is an error. A malformed `page` or `limit`
/// yields an empty page.
pub fn search_raw(laptops: &[Laptop], raw: &RawQuery) -> Result<ResultPage, SearchError> {
    let strategy = match raw.text(query::keys::SORT) {
        Some(sort) => sort.parse()?,
        None => SortStrategy::default(),
    };
    let page = raw
        .text(query::keys::PAGE)
        .map_or(1, |text| page_from(parse_number(&text)));
    let page_size = raw
        .text(query::keys::LIMIT)
        .map_or(DEFAULT_PAGE_SIZE, |text| page_size_from(parse_number(&text)));

    Ok(search(laptops, raw, strategy, page, page_size))
}

// Fractions truncate; NaN and infinities land on page 0, which is always empty.
fn page_from(value: f64) -> i64 {
    if value.is_finite() { value.trunc() as i64 } else { 0 }
}

fn page_size_from(value: f64) -> usize {
    if value.is_finite() && value >= 1.0 {
        value.trunc() as usize
    } else {
        0
    }
}
