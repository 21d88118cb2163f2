//! Match scoring: how well a laptop fits the buyer's stated preferences.
//!
//! Scores are small integers summed from fixed weights, in this order:
//! - +3 per shared purpose tag ("Matches ...")
//! - +2 when memory reaches the largest requested size ("Sufficient RAM")
//! - +2 for a requested storage type
//! - +1 when storage reaches the largest requested size
//! - +1 for a preferred brand ("Preferred brand")
//! - -1 when over budget; "Within budget" when inside the price range
//!
//! Scoring does not depend on filtering and can be applied to any laptop, though
//! the result is only meaningful for laptops that passed the filter.

use super::filter::{contains_str, within_price};
use super::query::FilterCriteria;
use crate::types::Laptop;

const PURPOSE_WEIGHT: i32 = 3;
const MEMORY_BONUS: i32 = 2;
const STORAGE_TYPE_BONUS: i32 = 2;
const STORAGE_SIZE_BONUS: i32 = 1;
const BRAND_BONUS: i32 = 1;
const OVER_BUDGET_PENALTY: i32 = 1;

/// A laptop with its relevance signals attached.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredItem<'a> {
    pub laptop: &'a Laptop,
    pub match_score: i32,
    pub reasons: Vec<String>,
}

/// Score one laptop against `criteria`.
pub fn score<'a>(laptop: &'a Laptop, criteria: &FilterCriteria) -> ScoredItem<'a> {
    let mut match_score = 0;
    let mut reasons = Vec::new();

    if !criteria.purposes.is_empty() {
        let matched: Vec<&str> = laptop
            .purposes
            .iter()
            .map(|p| p.as_str())
            .filter(|p| contains_str(&criteria.purposes, p))
            .collect();
        if !matched.is_empty() {
            match_score += PURPOSE_WEIGHT * matched.len() as i32;
            reasons.push(format!("Matches {}", matched.join(", ")));
        }
    }

    if let Some(required) = strict_max(&criteria.memory_sizes_gb)
        && f64::from(laptop.memory_gb) >= required
    {
        match_score += MEMORY_BONUS;
        reasons.push("Sufficient RAM".to_string());
    }

    if !criteria.storage_types.is_empty()
        && contains_str(&criteria.storage_types, laptop.storage_type.as_str())
    {
        match_score += STORAGE_TYPE_BONUS;
    }

    if let Some(required) = strict_max(&criteria.storage_sizes_gb)
        && f64::from(laptop.storage_gb) >= required
    {
        match_score += STORAGE_SIZE_BONUS;
    }

    if !criteria.brands.is_empty() && contains_str(&criteria.brands, &laptop.brand) {
        match_score += BRAND_BONUS;
        reasons.push("Preferred brand".to_string());
    }

    // Two independent checks: a price below price_min hits neither branch.
    if laptop.price > criteria.price_max {
        match_score -= OVER_BUDGET_PENALTY;
    }
    if within_price(laptop.price, criteria) {
        reasons.push("Within budget".to_string());
    }

    ScoredItem {
        laptop,
        match_score,
        reasons,
    }
}

/// Largest requested value, or `None` when nothing was requested.
///
/// Unlike `f64::max`, a NaN anywhere poisons the result, so a malformed
/// requested size never earns the "sufficient" bonus.
fn strict_max(values: &[f64]) -> Option<f64> {
    let (first, rest) = values.split_first()?;
    Some(rest.iter().fold(*first, |acc, &v| {
        if acc.is_nan() || v.is_nan() {
            f64::NAN
        } else {
            acc.max(v)
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::query::{RawQuery, normalize};
    use crate::types::{Purpose, RecordId, StorageType};
    use assert2::check;
    use rstest::rstest;

    fn gaming_laptop() -> Laptop {
        Laptop {
            id: RecordId::from("rog"),
            brand: "Asus".to_string(),
            model: "ROG Strix G16".to_string(),
            price: 90_000.0,
            memory_gb: 16,
            storage_type: StorageType::Ssd,
            storage_gb: 1024,
            processor: "Intel Core i7-13650HX".to_string(),
            purposes: vec![Purpose::Gaming, Purpose::ContentCreation],
            screen_inches: 16.0,
            graphics: Some("RTX 4060".to_string()),
            images: vec![],
            description: String::new(),
            availability: "In Stock".to_string(),
        }
    }

    fn criteria(pairs: &[(&str, &str)]) -> FilterCriteria {
        normalize(&RawQuery::from_pairs(pairs.iter().copied()))
    }

    #[test]
    fn test_no_criteria_only_budget_reason() {
        let laptop = gaming_laptop();
        let scored = score(&laptop, &FilterCriteria::default());
        check!(scored.match_score == 0);
        check!(scored.reasons == vec!["Within budget".to_string()]);
    }

    #[test]
    fn test_purpose_and_memory() {
        let laptop = gaming_laptop();
        let scored = score(&laptop, &criteria(&[("purpose", "Gaming"), ("ram", "16")]));
        check!(scored.match_score == 5);
        check!(
            scored.reasons
                == vec![
                    "Matches Gaming".to_string(),
                    "Sufficient RAM".to_string(),
                    "Within budget".to_string(),
                ]
        );
    }

    #[test]
    fn test_matched_tags_follow_item_order() {
        let laptop = gaming_laptop();
        let scored = score(
            &laptop,
            &criteria(&[("purpose", "Content Creation"), ("purpose", "Gaming")]),
        );
        check!(scored.match_score == 6);
        check!(scored.reasons[0] == "Matches Gaming, Content Creation");
    }

    #[rstest]
    #[case(&[("storageType", "SSD")], 2)]
    #[case(&[("storageType", "HDD")], 0)]
    #[case(&[("storageSize", "512"), ("storageSize", "1024")], 1)]
    #[case(&[("storageSize", "2048")], 0)]
    #[case(&[("brand", "Asus")], 1)]
    #[case(&[("brand", "Dell")], 0)]
    #[case(&[("maxPrice", "50000")], -1)]
    #[case(&[("ram", "8"), ("ram", "32")], 0)]
    fn test_single_axis_weights(#[case] pairs: &[(&str, &str)], #[case] expected: i32) {
        let laptop = gaming_laptop();
        check!(score(&laptop, &criteria(pairs)).match_score == expected);
    }

    #[test]
    fn test_over_budget_penalty_has_no_reason() {
        let laptop = gaming_laptop();
        let scored = score(&laptop, &criteria(&[("maxPrice", "50000")]));
        check!(scored.match_score == -1);
        check!(scored.reasons.is_empty());
    }

    #[test]
    fn test_below_min_price_hits_neither_branch() {
        let laptop = gaming_laptop();
        let scored = score(&laptop, &criteria(&[("minPrice", "100000")]));
        check!(scored.match_score == 0);
        check!(scored.reasons.is_empty());
    }

    #[test]
    fn test_malformed_memory_never_sufficient() {
        let laptop = gaming_laptop();
        let scored = score(&laptop, &criteria(&[("ram", "8"), ("ram", "many")]));
        check!(scored.match_score == 0);
    }

    #[test]
    fn test_memory_bonus_is_monotonic() {
        let request = criteria(&[("ram", "16"), ("ram", "32")]);
        let mut laptop = gaming_laptop();
        let mut earned = false;
        for memory_gb in [4, 8, 16, 32, 64, 128] {
            laptop.memory_gb = memory_gb;
            let has_bonus = score(&laptop, &request)
                .reasons
                .iter()
                .any(|r| r == "Sufficient RAM");
            check!(!(earned && !has_bonus), "bonus lost at {} GB", memory_gb);
            earned |= has_bonus;
        }
        check!(earned);
    }

    #[test]
    fn test_strict_max() {
        check!(strict_max(&[]).is_none());
        check!(strict_max(&[8.0, 32.0, 16.0]) == Some(32.0));
        check!(strict_max(&[8.0, f64::NAN]).is_some_and(f64::is_nan));
    }
}
