//! Catalog search handler.

use super::OutputFormat;
use crate::format::format_result_page;
use crate::search::{Preset, RawQuery, ResultPage, SortStrategy, query::keys};
use crate::state::{CatalogState, SearchRequestKey};
use crate::types::Laptop;
use rapidfuzz::distance::jaro_winkler;
use rmcp::schemars;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Minimum Jaro-Winkler similarity for a brand suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;
const MAX_SUGGESTIONS: usize = 5;

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct SearchLaptopsRequest {
    /// Filters by key: purpose, ram, storageType, storageSize, screenSize, brand,
    /// minPrice, maxPrice, q. Each value is a string, a number or a list of them.
    #[serde(default)]
    pub filters: BTreeMap<String, serde_json::Value>,
    /// Ordering: relevance (default), price-ascending or price-descending
    pub sort: Option<String>,
    /// 1-based page number (default: 1)
    pub page: Option<i64>,
    /// Results per page (default: 8)
    pub page_size: Option<usize>,
    /// Quick-start preset; explicit filters and sort override it
    pub preset: Option<Preset>,
    /// Response format (default: text)
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(Serialize)]
struct SearchResponse<'a> {
    #[serde(flatten)]
    page: &'a ResultPage,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    suggestions: Vec<String>,
}

impl SearchLaptopsRequest {
    /// Resolve the preset, filters and paging into one cacheable request.
    pub fn to_key(&self, default_page_size: usize) -> Result<SearchRequestKey, String> {
        let strategy = match (&self.sort, self.preset) {
            (Some(sort), _) => sort.parse::<SortStrategy>().map_err(|e| e.to_string())?,
            (None, Some(preset)) => preset.strategy(),
            (None, None) => SortStrategy::default(),
        };

        let filters = RawQuery::from_json(&self.filters);
        let raw = match self.preset {
            Some(preset) => preset.query().merged_with(&filters),
            None => filters,
        };

        Ok(SearchRequestKey {
            raw,
            strategy,
            page: self.page.unwrap_or(1),
            page_size: self.page_size.unwrap_or(default_page_size),
        })
    }
}

/// Execute a catalog search.
pub async fn handle_search_laptops(
    state: &Arc<CatalogState>,
    request: SearchLaptopsRequest,
) -> Result<String, String> {
    let key = request.to_key(state.default_page_size())?;
    let page = state.search(&key).await;

    let suggestions = if page.total_count == 0 {
        let requested = key.raw.tokens(keys::BRAND);
        if requested.is_empty() {
            Vec::new()
        } else {
            brand_suggestions(&state.snapshot().await, &requested)
        }
    } else {
        Vec::new()
    };

    match request.format {
        OutputFormat::Text => Ok(format_result_page(&page, &suggestions)),
        OutputFormat::Json => serde_json::to_string_pretty(&SearchResponse {
            page: &page,
            suggestions,
        })
        .map_err(|e| format!("Failed to serialize results: {}", e)),
    }
}

/// Catalog brands that look like a misspelling of a requested brand, best first.
pub fn brand_suggestions(laptops: &[Laptop], requested: &[&str]) -> Vec<String> {
    let mut brands: Vec<&str> = laptops.iter().map(|l| l.brand.as_str()).collect();
    brands.sort_unstable();
    brands.dedup();

    let mut scored: Vec<(f64, &str)> = brands
        .into_iter()
        .filter(|brand| !requested.contains(brand))
        .filter_map(|brand| {
            let lowered = brand.to_lowercase();
            requested
                .iter()
                .map(|wanted| {
                    jaro_winkler::similarity(wanted.to_lowercase().chars(), lowered.chars())
                })
                .max_by(f64::total_cmp)
                .filter(|score| *score > SUGGESTION_THRESHOLD)
                .map(|score| (score, brand))
        })
        .collect();

    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(_, brand)| brand.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use serde_json::json;

    fn request(value: serde_json::Value) -> SearchLaptopsRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_explicit_sort_beats_preset() {
        let key = request(json!({"preset": "budget", "sort": "relevance"}))
            .to_key(8)
            .unwrap();
        check!(key.strategy == SortStrategy::Relevance);
        check!(key.raw.tokens(keys::MAX_PRICE) == vec!["50000"]);
    }

    #[test]
    fn test_explicit_filter_beats_preset() {
        let key = request(json!({"preset": "budget", "filters": {"maxPrice": 30000}}))
            .to_key(8)
            .unwrap();
        check!(key.strategy == SortStrategy::PriceAscending);
        check!(key.raw.tokens(keys::MAX_PRICE) == vec!["30000"]);
    }

    #[test]
    fn test_defaults() {
        let key = request(json!({})).to_key(12).unwrap();
        check!(key.page == 1);
        check!(key.page_size == 12);
        check!(key.strategy == SortStrategy::Relevance);
        check!(key.raw.is_empty());
    }

    #[test]
    fn test_unknown_sort_is_rejected() {
        let err = request(json!({"sort": "rating"})).to_key(8).unwrap_err();
        check!(err.contains("rating"));
    }

    #[test]
    fn test_brand_suggestions() {
        let laptops: Vec<Laptop> = serde_json::from_value(json!([
            {"id": "1", "brand": "Lenovo", "model": "X", "price": 1, "ramGb": 8,
             "storageType": "SSD", "storageGb": 256, "cpu": "i5", "purpose": ["Office"],
             "screenIn": 14, "description": ""},
            {"id": "2", "brand": "Dell", "model": "Y", "price": 1, "ramGb": 8,
             "storageType": "SSD", "storageGb": 256, "cpu": "i5", "purpose": ["Office"],
             "screenIn": 14, "description": ""}
        ]))
        .unwrap();

        check!(brand_suggestions(&laptops, &["Lenovoo"]) == vec!["Lenovo".to_string()]);
        check!(brand_suggestions(&laptops, &["Zebra"]).is_empty());
        check!(brand_suggestions(&laptops, &["Dell"]).is_empty());
    }
}
