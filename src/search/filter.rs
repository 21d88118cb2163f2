//! Predicate filter: keeps the laptops that satisfy every active criterion.
//!
//! Criteria combine with AND; the values inside one multi-valued criterion combine
//! with OR. Membership tests are exact, including screen size (the scorer's
//! "at least" comparisons do not apply here).

use super::query::FilterCriteria;
use crate::types::Laptop;

/// Keep the laptops matching `criteria`, preserving input order.
pub fn filter<'a>(laptops: &'a [Laptop], criteria: &FilterCriteria) -> Vec<&'a Laptop> {
    laptops
        .iter()
        .filter(|laptop| matches(laptop, criteria))
        .collect()
}

/// Check a single laptop against every criterion.
pub fn matches(laptop: &Laptop, criteria: &FilterCriteria) -> bool {
    if let Some(text) = &criteria.search_text
        && !matches_text(laptop, text)
    {
        return false;
    }

    if !criteria.purposes.is_empty()
        && !laptop
            .purposes
            .iter()
            .any(|p| contains_str(&criteria.purposes, p.as_str()))
    {
        return false;
    }

    if !criteria.memory_sizes_gb.is_empty()
        && !contains_number(&criteria.memory_sizes_gb, f64::from(laptop.memory_gb))
    {
        return false;
    }

    if !criteria.storage_types.is_empty()
        && !contains_str(&criteria.storage_types, laptop.storage_type.as_str())
    {
        return false;
    }

    if !criteria.storage_sizes_gb.is_empty()
        && !contains_number(&criteria.storage_sizes_gb, f64::from(laptop.storage_gb))
    {
        return false;
    }

    if !criteria.screen_sizes_inches.is_empty()
        && !contains_number(&criteria.screen_sizes_inches, laptop.screen_inches)
    {
        return false;
    }

    if !criteria.brands.is_empty() && !contains_str(&criteria.brands, &laptop.brand) {
        return false;
    }

    within_price(laptop.price, criteria)
}

/// Inclusive price range check. A NaN bound excludes everything.
pub(crate) fn within_price(price: f64, criteria: &FilterCriteria) -> bool {
    price >= criteria.price_min && price <= criteria.price_max
}

fn matches_text(laptop: &Laptop, text: &str) -> bool {
    let needle = text.to_lowercase();
    laptop.brand.to_lowercase().contains(&needle)
        || laptop.model.to_lowercase().contains(&needle)
        || laptop.processor.to_lowercase().contains(&needle)
        || laptop
            .purposes
            .iter()
            .any(|p| p.as_str().to_lowercase().contains(&needle))
}

pub(crate) fn contains_str(set: &[String], value: &str) -> bool {
    set.iter().any(|candidate| candidate == value)
}

// NaN never equals anything, so a malformed requested value matches no laptop.
pub(crate) fn contains_number(set: &[f64], value: f64) -> bool {
    set.iter().any(|candidate| *candidate == value)
}
