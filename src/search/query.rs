//! Raw query input and its normalization into typed filter criteria.
//!
//! Raw input arrives loosely typed: every key may be missing, a single scalar, or a
//! repeated value. [`normalize`] is the only place that turns it into a
//! [`FilterCriteria`]; nothing downstream ever looks at the raw mapping.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw query keys understood by the normalizer and by `search_raw`.
pub mod keys {
    pub const PURPOSE: &str = "purpose";
    pub const RAM: &str = "ram";
    pub const STORAGE_TYPE: &str = "storageType";
    pub const STORAGE_SIZE: &str = "storageSize";
    pub const SCREEN_SIZE: &str = "screenSize";
    pub const BRAND: &str = "brand";
    pub const MIN_PRICE: &str = "minPrice";
    pub const MAX_PRICE: &str = "maxPrice";
    pub const TEXT: &str = "q";
    pub const SORT: &str = "sort";
    pub const PAGE: &str = "page";
    pub const LIMIT: &str = "limit";
}

/// A single raw query value: one scalar or a repeated parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    One(String),
    Many(Vec<String>),
}

impl RawValue {
    /// Tokens carried by this value. An empty scalar counts as absent.
    pub fn tokens(&self) -> Vec<&str> {
        match self {
            Self::One(value) if value.is_empty() => Vec::new(),
            Self::One(value) => vec![value.as_str()],
            Self::Many(values) => values.iter().map(String::as_str).collect(),
        }
    }

    fn push(&mut self, token: String) {
        match self {
            Self::One(first) => {
                let first = std::mem::take(first);
                *self = Self::Many(vec![first, token]);
            }
            Self::Many(values) => values.push(token),
        }
    }
}

/// Untyped query mapping as captured by the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawQuery(BTreeMap<String, RawValue>);

impl RawQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `key=value` pairs; repeated keys accumulate like a query string.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut query = Self::new();
        for (key, value) in pairs {
            query.append(key, value);
        }
        query
    }

    /// Build from a JSON object. Numbers and booleans become their text form,
    /// nulls are dropped, and nested objects keep their JSON text (which never
    /// parses as a number, so such a filter excludes everything on its axis).
    pub fn from_json<'a>(
        object: impl IntoIterator<Item = (&'a String, &'a serde_json::Value)>,
    ) -> Self {
        let mut query = Self::new();
        for (key, value) in object {
            match value {
                serde_json::Value::Null => {}
                serde_json::Value::Array(values) => {
                    let tokens = values
                        .iter()
                        .filter(|v| !v.is_null())
                        .map(json_token)
                        .collect();
                    query.set(key.clone(), RawValue::Many(tokens));
                }
                other => query.set(key.clone(), RawValue::One(json_token(other))),
            }
        }
        query
    }

    /// Append one token under `key`, turning a scalar into a repeated value.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.get_mut(&key) {
            Some(existing) => existing.push(value),
            None => {
                self.0.insert(key, RawValue::One(value));
            }
        }
    }

    /// Replace whatever is stored under `key`.
    pub fn set(&mut self, key: impl Into<String>, value: RawValue) {
        self.0.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&RawValue> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Overlay `other` on top of `self`: keys present in `other` win.
    pub fn merged_with(mut self, other: &Self) -> Self {
        for (key, value) in &other.0 {
            self.0.insert(key.clone(), value.clone());
        }
        self
    }

    /// All tokens under `key` (empty when absent).
    pub fn tokens(&self, key: &str) -> Vec<&str> {
        self.0.get(key).map(RawValue::tokens).unwrap_or_default()
    }

    /// The value under `key` as one string, or `None` when absent or empty.
    /// Repeated values are joined with `,`.
    pub fn text(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            RawValue::One(value) if value.is_empty() => None,
            RawValue::One(value) => Some(value.clone()),
            RawValue::Many(values) => Some(values.join(",")),
        }
    }

    fn strings(&self, key: &str) -> Vec<String> {
        self.tokens(key).into_iter().map(str::to_string).collect()
    }

    fn numbers(&self, key: &str) -> Vec<f64> {
        self.tokens(key).into_iter().map(parse_number).collect()
    }

    fn number_or(&self, key: &str, default: f64) -> f64 {
        self.text(key).map_or(default, |text| parse_number(&text))
    }
}

fn json_token(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Lenient numeric parse.
///
/// Blank input is 0. Anything that is not a decimal number (optionally with an
/// exponent, or the literal `Infinity`) becomes NaN, which fails every equality and
/// ordering comparison downstream.
pub fn parse_number(token: &str) -> f64 {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    // Rust also accepts "inf" and "nan" spellings; keep only plain decimals.
    if trimmed
        .chars()
        .any(|c| c.is_ascii_alphabetic() && !matches!(c, 'e' | 'E'))
    {
        return f64::NAN;
    }

    trimmed.parse().unwrap_or(f64::NAN)
}

/// Typed buyer preferences. Empty sets leave their axis unconstrained.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    pub purposes: Vec<String>,
    pub memory_sizes_gb: Vec<f64>,
    pub storage_types: Vec<String>,
    pub storage_sizes_gb: Vec<f64>,
    pub screen_sizes_inches: Vec<f64>,
    pub brands: Vec<String>,
    pub price_min: f64,
    pub price_max: f64,
    /// Case-insensitive substring matched against brand, model, processor and purposes
    pub search_text: Option<String>,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            purposes: Vec::new(),
            memory_sizes_gb: Vec::new(),
            storage_types: Vec::new(),
            storage_sizes_gb: Vec::new(),
            screen_sizes_inches: Vec::new(),
            brands: Vec::new(),
            price_min: 0.0,
            price_max: f64::MAX,
            search_text: None,
        }
    }
}

impl FilterCriteria {
    /// Number of active constraints, counting a narrowed price range once.
    pub fn active_count(&self) -> usize {
        let narrowed_price = usize::from(self.price_min != 0.0 || self.price_max != f64::MAX);
        self.purposes.len()
            + self.memory_sizes_gb.len()
            + self.storage_types.len()
            + self.storage_sizes_gb.len()
            + self.screen_sizes_inches.len()
            + self.brands.len()
            + usize::from(self.search_text.is_some())
            + narrowed_price
    }
}

/// Convert a raw query into filter criteria. Never fails.
pub fn normalize(raw: &RawQuery) -> FilterCriteria {
    FilterCriteria {
        purposes: raw.strings(keys::PURPOSE),
        memory_sizes_gb: raw.numbers(keys::RAM),
        storage_types: raw.strings(keys::STORAGE_TYPE),
        storage_sizes_gb: raw.numbers(keys::STORAGE_SIZE),
        screen_sizes_inches: raw.numbers(keys::SCREEN_SIZE),
        brands: raw.strings(keys::BRAND),
        price_min: raw.number_or(keys::MIN_PRICE, 0.0),
        price_max: raw.number_or(keys::MAX_PRICE, f64::MAX),
        search_text: raw.text(keys::TEXT),
    }
}
