//! Fixed-size, 1-based pagination.

use std::ops::Range;

/// Index range of `page` within `total` ranked items.
///
/// Pages below 1, pages past the end and a zero page size all yield an empty range.
pub fn page_bounds(total: usize, page: i64, page_size: usize) -> Range<usize> {
    if page < 1 || page_size == 0 {
        return 0..0;
    }

    let start = usize::try_from(page - 1)
        .ok()
        .and_then(|p| p.checked_mul(page_size))
        .unwrap_or(usize::MAX)
        .min(total);
    let end = start.saturating_add(page_size).min(total);
    start..end
}

/// Number of pages needed for `total` items: ceil(total / page_size), 0 when empty.
pub fn total_pages(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

/// Borrow the items of one page.
pub fn paginate<T>(items: &[T], page: i64, page_size: usize) -> &[T] {
    &items[page_bounds(items.len(), page, page_size)]
}
