mod common;

use assert2::check;
use common::{laptop, sample_laptops};
use laptop_catalog_mcp::search::{
    RawQuery, ResultPage, SortStrategy, normalize, score, search, search_raw,
};
use laptop_catalog_mcp::types::{Laptop, Purpose};
use rstest::rstest;

fn ids(page: &ResultPage) -> Vec<&str> {
    page.items.iter().map(|item| item.laptop.id.as_str()).collect()
}

// --- Scenarios ---

/// Test: Gaming + 16 GB keeps only the Asus and scores it 5.
#[rstest]
fn gaming_with_sixteen_gigabytes_selects_asus() {
    let laptops = vec![
        laptop("dell", "Dell", 40_000.0, 8, &[Purpose::Office]),
        laptop("asus", "Asus", 90_000.0, 16, &[Purpose::Gaming]),
    ];
    let raw = RawQuery::from_pairs([("purpose", "Gaming"), ("ram", "16")]);

    let page = search(&laptops, &raw, SortStrategy::Relevance, 1, 8);

    check!(ids(&page) == vec!["asus"]);
    check!(page.total_count == 1);
    check!(page.total_pages == 1);
    check!(page.items[0].match_score == 5);
    check!(page.items[0].match_reasons[..2] == ["Matches Gaming", "Sufficient RAM"]);
}

/// Test: Equal prices keep input order under price-ascending.
#[rstest]
fn equal_prices_keep_input_order() {
    let laptops = vec![
        laptop("first", "HP", 10_000.0, 8, &[Purpose::Office]),
        laptop("second", "Dell", 10_000.0, 8, &[Purpose::Office]),
    ];
    let page = search(&laptops, &RawQuery::new(), SortStrategy::PriceAscending, 1, 8);
    check!(ids(&page) == vec!["first", "second"]);
}

/// Test: Page 3 of five results at eight per page is empty.
#[rstest]
fn page_past_the_end_is_empty(sample_laptops: Vec<Laptop>) {
    let laptops = &sample_laptops[..5];
    let page = search(laptops, &RawQuery::new(), SortStrategy::Relevance, 3, 8);
    check!(page.items.is_empty());
    check!(page.total_count == 5);
    check!(page.total_pages == 1);
}

/// Test: An inverted price range matches nothing.
#[rstest]
fn inverted_price_range_is_empty(sample_laptops: Vec<Laptop>) {
    let raw = RawQuery::from_pairs([("minPrice", "60000"), ("maxPrice", "50000")]);
    let page = search(&sample_laptops, &raw, SortStrategy::Relevance, 1, 8);
    check!(page.total_count == 0);
    check!(page.total_pages == 0);
}

// --- Properties ---

/// Test: Empty criteria keep every laptop in catalog order.
#[rstest]
fn empty_criteria_keep_everything(sample_laptops: Vec<Laptop>) {
    let page = search(&sample_laptops, &RawQuery::new(), SortStrategy::Relevance, 1, 100);
    let expected: Vec<&str> = sample_laptops.iter().map(|l| l.id.as_str()).collect();
    check!(ids(&page) == expected);
}

/// Test: An empty list on any axis excludes nothing.
#[rstest]
#[case("purpose")]
#[case("ram")]
#[case("storageType")]
#[case("storageSize")]
#[case("screenSize")]
#[case("brand")]
fn empty_axis_never_excludes(sample_laptops: Vec<Laptop>, #[case] key: &str) {
    let mut raw = RawQuery::new();
    raw.set(key, laptop_catalog_mcp::search::RawValue::Many(vec![]));
    let page = search(&sample_laptops, &raw, SortStrategy::Relevance, 1, 100);
    check!(page.total_count == sample_laptops.len());
}

/// Test: More memory can only turn the memory bonus on.
#[rstest]
fn memory_bonus_is_monotonic() {
    let criteria = normalize(&RawQuery::from_pairs([("ram", "8"), ("ram", "16")]));
    let mut previous = None;
    for memory_gb in [4, 8, 12, 16, 32, 64] {
        let item = laptop("x", "HP", 50_000.0, memory_gb, &[Purpose::Office]);
        let scored = score(&item, &criteria).match_score;
        if let Some(previous) = previous {
            check!(scored >= previous);
        }
        previous = Some(scored);
    }
}

/// Test: Relevance ties on score and price keep input order in every permutation.
#[rstest]
fn relevance_ranking_is_stable() {
    let base = [
        laptop("a", "HP", 50_000.0, 16, &[Purpose::Gaming]),
        laptop("b", "HP", 50_000.0, 16, &[Purpose::Gaming]),
        laptop("c", "HP", 50_000.0, 16, &[Purpose::Gaming]),
    ];
    let raw = RawQuery::from_pairs([("purpose", "Gaming")]);
    let orders = [[0, 1, 2], [0, 2, 1], [1, 0, 2], [1, 2, 0], [2, 0, 1], [2, 1, 0]];

    for order in orders {
        let laptops: Vec<Laptop> = order.iter().map(|&i| base[i].clone()).collect();
        let page = search(&laptops, &raw, SortStrategy::Relevance, 1, 8);
        let expected: Vec<&str> = laptops.iter().map(|l| l.id.as_str()).collect();
        check!(ids(&page) == expected);
    }
}

/// Test: Relevance puts higher scores first, cheaper first within a score.
#[rstest]
fn relevance_orders_by_score_then_price(sample_laptops: Vec<Laptop>) {
    let raw = RawQuery::from_pairs([("purpose", "Gaming"), ("purpose", "Student")]);
    let page = search(&sample_laptops, &raw, SortStrategy::Relevance, 1, 8);
    // HP matches both purposes (6); the rest match one (3) and sort by price.
    check!(ids(&page) == vec!["hp-victus", "acer-aspire", "lenovo-ideapad", "asus-rog", "apple-air"]);
}

/// Test: Identical calls give identical pages.
#[rstest]
fn search_is_idempotent(sample_laptops: Vec<Laptop>) {
    let raw = RawQuery::from_pairs([("purpose", "Student"), ("maxPrice", "70000")]);
    let first = search(&sample_laptops, &raw, SortStrategy::PriceDescending, 1, 2);
    let second = search(&sample_laptops, &raw, SortStrategy::PriceDescending, 1, 2);
    check!(first == second);
    check!(serde_json::to_string(&first).unwrap() == serde_json::to_string(&second).unwrap());
}

/// Test: Concatenated pages reproduce the full ranking exactly once.
#[rstest]
#[case(1)]
#[case(2)]
#[case(4)]
#[case(6)]
fn pages_cover_the_ranking(sample_laptops: Vec<Laptop>, #[case] size: usize) {
    let raw = RawQuery::new();
    let full = search(&sample_laptops, &raw, SortStrategy::PriceAscending, 1, 100);

    let first = search(&sample_laptops, &raw, SortStrategy::PriceAscending, 1, size);
    let mut collected = Vec::new();
    for page in 1..=first.total_pages as i64 {
        let result = search(&sample_laptops, &raw, SortStrategy::PriceAscending, page, size);
        collected.extend(result.items);
    }
    check!(collected == full.items);
}

// --- Raw query edge cases ---

/// Test: A malformed price bound excludes everything.
#[rstest]
#[case("minPrice", "cheap")]
#[case("maxPrice", "lots")]
fn malformed_price_fails_closed(sample_laptops: Vec<Laptop>, #[case] key: &str, #[case] value: &str) {
    let raw = RawQuery::from_pairs([(key, value)]);
    let page = search(&sample_laptops, &raw, SortStrategy::Relevance, 1, 8);
    check!(page.total_count == 0);
}

/// Test: Over-budget items lose a point; in-range items get a reason.
#[rstest]
fn budget_penalty_and_reason() {
    let criteria = normalize(&RawQuery::from_pairs([("maxPrice", "50000")]));
    let cheap = laptop("cheap", "HP", 30_000.0, 8, &[Purpose::Office]);
    let pricey = laptop("pricey", "HP", 80_000.0, 8, &[Purpose::Office]);

    let cheap = score(&cheap, &criteria);
    let pricey = score(&pricey, &criteria);
    check!(cheap.match_score == 0);
    check!(cheap.reasons == vec!["Within budget".to_string()]);
    check!(pricey.match_score == -1);
    check!(pricey.reasons.is_empty());
}

/// Test: Sort, page and limit ride along in the raw query.
#[rstest]
fn search_raw_reads_paging_keys(sample_laptops: Vec<Laptop>) {
    let raw = RawQuery::from_pairs([("sort", "price-high"), ("page", "2"), ("limit", "2")]);
    let page = search_raw(&sample_laptops, &raw).unwrap();
    check!(page.strategy == SortStrategy::PriceDescending);
    check!(ids(&page) == vec!["hp-victus", "dell-inspiron"]);
    check!(page.total_pages == 3);
}
