//! Quick-start presets offered on the storefront landing page.

use super::query::{RawQuery, keys};
use super::rank::SortStrategy;
use rmcp::schemars;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// DO NOT add doc comments to individual variants - this causes schemars to generate
/// `oneOf` schemas instead of simple `enum` arrays, breaking MCP client enum handling.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, schemars::JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    Budget,
    Gaming,
    Student,
}

impl Preset {
    /// Filters the preset starts from.
    pub fn query(self) -> RawQuery {
        match self {
            Self::Budget => RawQuery::from_pairs([(keys::MAX_PRICE, "50000")]),
            Self::Gaming => RawQuery::from_pairs([
                (keys::PURPOSE, "Gaming"),
                (keys::RAM, "16"),
                (keys::RAM, "32"),
            ]),
            Self::Student => RawQuery::from_pairs([
                (keys::PURPOSE, "Student"),
                (keys::PURPOSE, "Office"),
                (keys::MAX_PRICE, "60000"),
            ]),
        }
    }

    /// Ordering the preset selects when the caller does not choose one.
    pub const fn strategy(self) -> SortStrategy {
        match self {
            Self::Budget | Self::Student => SortStrategy::PriceAscending,
            Self::Gaming => SortStrategy::Relevance,
        }
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "budget" => Ok(Self::Budget),
            "gaming" => Ok(Self::Gaming),
            "student" => Ok(Self::Student),
            other => Err(format!(
                "unknown preset '{other}' (expected budget, gaming or student)"
            )),
        }
    }
}
