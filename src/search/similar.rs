//! "Similar laptops" shown next to a laptop's detail view.

use crate::types::Laptop;

/// Laptops priced within this distance of the target count as similar.
pub const PRICE_WINDOW: f64 = 20_000.0;

/// Maximum number of similar laptops returned.
pub const SIMILAR_LIMIT: usize = 4;

/// Laptops sharing a purpose or the brand with `target`, or priced close to it,
/// in catalog order. The target itself is never included.
pub fn similar_to<'a>(laptops: &'a [Laptop], target: &Laptop, limit: usize) -> Vec<&'a Laptop> {
    laptops
        .iter()
        .filter(|candidate| candidate.id != target.id)
        .filter(|candidate| {
            candidate.purposes.iter().any(|p| target.purposes.contains(p))
                || candidate.brand == target.brand
                || (candidate.price - target.price).abs() < PRICE_WINDOW
        })
        .take(limit)
        .collect()
}
