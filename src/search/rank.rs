//! Result ordering strategies.

use super::scoring::ScoredItem;
use crate::error::SearchError;
use rmcp::schemars;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// DO NOT add doc comments to individual variants - this causes schemars to generate
/// `oneOf` schemas instead of simple `enum` arrays, breaking MCP client enum handling.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    schemars::JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum SortStrategy {
    #[default]
    #[serde(alias = "match")]
    Relevance,
    #[serde(alias = "price-low")]
    PriceAscending,
    #[serde(alias = "price-high")]
    PriceDescending,
}

impl SortStrategy {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Relevance => "relevance",
            Self::PriceAscending => "price-ascending",
            Self::PriceDescending => "price-descending",
        }
    }
}

impl fmt::Display for SortStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortStrategy {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "relevance" | "match" => Ok(Self::Relevance),
            "price-ascending" | "price-low" => Ok(Self::PriceAscending),
            "price-descending" | "price-high" => Ok(Self::PriceDescending),
            other => Err(SearchError::InvalidStrategy(other.to_string())),
        }
    }
}

/// Order scored laptops in place.
///
/// Relevance sorts by score descending, then price ascending. The price strategies
/// look at price alone. All orderings are stable: ties keep their input order.
pub fn rank(items: &mut [ScoredItem<'_>], strategy: SortStrategy) {
    match strategy {
        SortStrategy::Relevance => items.sort_by(|a, b| {
            b.match_score
                .cmp(&a.match_score)
                .then_with(|| a.laptop.price.total_cmp(&b.laptop.price))
        }),
        SortStrategy::PriceAscending => {
            items.sort_by(|a, b| a.laptop.price.total_cmp(&b.laptop.price));
        }
        SortStrategy::PriceDescending => {
            items.sort_by(|a, b| b.laptop.price.total_cmp(&a.laptop.price));
        }
    }
}
