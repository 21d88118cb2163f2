//! Plain-text rendering of catalog data for tool responses and the CLI.

use crate::search::{ResultPage, ScoredLaptop};
use crate::state::CatalogStats;
use crate::types::{
    BRAND_OPTIONS, Inquiry, Laptop, PURPOSE_OPTIONS, RAM_OPTIONS, SCREEN_SIZE_OPTIONS,
    STORAGE_SIZE_OPTIONS, STORAGE_TYPE_OPTIONS,
};
use std::fmt::Write as _;

/// Format a rupee amount with Indian digit grouping: `₹1,23,456`.
///
/// Fractions are rounded to paise and trailing zeros dropped.
pub fn format_price(price: f64) -> String {
    if !price.is_finite() {
        return format!("₹{price}");
    }

    let paise = (price.abs() * 100.0).round() as u64;
    let (whole, fraction) = (paise / 100, paise % 100);

    let mut output = String::new();
    if price < 0.0 && paise != 0 {
        output.push('-');
    }
    output.push('₹');
    output.push_str(&group_indian(&whole.to_string()));
    if fraction != 0 {
        let fraction = format!("{fraction:02}");
        output.push('.');
        output.push_str(fraction.trim_end_matches('0'));
    }
    output
}

// Last three digits, then groups of two.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);

    let mut groups = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

fn format_specs(laptop: &Laptop) -> String {
    let purposes: Vec<&str> = laptop.purposes.iter().map(|p| p.as_str()).collect();
    let mut specs = format!(
        "{}GB RAM · {}GB {} · {} · {}\"",
        laptop.memory_gb,
        laptop.storage_gb,
        laptop.storage_type,
        laptop.processor,
        laptop.screen_inches
    );
    if let Some(gpu) = &laptop.graphics {
        let _ = write!(specs, " · {gpu}");
    }
    let _ = write!(specs, " · {}", purposes.join(", "));
    specs
}

fn format_scored(output: &mut String, position: usize, item: &ScoredLaptop) {
    let laptop = &item.laptop;
    let _ = writeln!(
        output,
        "{}. {} - {} [id: {}]",
        position,
        laptop.title(),
        format_price(laptop.price),
        laptop.id
    );
    let _ = writeln!(output, "   {}", format_specs(laptop));
    if item.match_reasons.is_empty() {
        let _ = writeln!(output, "   Match score: {}", item.match_score);
    } else {
        let _ = writeln!(
            output,
            "   Match score: {} ({})",
            item.match_score,
            item.match_reasons.join(", ")
        );
    }
}

/// Render a result page, with brand suggestions when nothing matched.
pub fn format_result_page(page: &ResultPage, suggestions: &[String]) -> String {
    if page.total_count == 0 {
        let mut output = "No laptops match these filters.\n".to_string();
        if !suggestions.is_empty() {
            output.push_str("\nDid you mean one of these brands?\n");
            for brand in suggestions {
                let _ = writeln!(output, "• {brand}");
            }
        }
        return output;
    }

    if page.items.is_empty() {
        return format!(
            "Page {} is empty: {} laptops match across {} page(s) of {}.\n",
            page.page, page.total_count, page.total_pages, page.page_size
        );
    }

    let first = (page.page.max(1) as usize - 1) * page.page_size;
    let mut output = format!(
        "Found {} laptop(s), page {} of {}, sorted by {}:\n\n",
        page.total_count, page.page, page.total_pages, page.strategy
    );
    for (offset, item) in page.items.iter().enumerate() {
        format_scored(&mut output, first + offset + 1, item);
        output.push('\n');
    }
    output
}

/// Render the detail view of one laptop and its similar laptops.
pub fn format_laptop_detail(laptop: &Laptop, similar: &[&Laptop]) -> String {
    let mut output = format!("{} [id: {}]\n", laptop.title(), laptop.id);
    let _ = writeln!(output, "Price: {}", format_price(laptop.price));
    let _ = writeln!(output, "Availability: {}", laptop.availability);
    let _ = writeln!(output, "Processor: {}", laptop.processor);
    let _ = writeln!(output, "Memory: {}GB", laptop.memory_gb);
    let _ = writeln!(
        output,
        "Storage: {}GB {}",
        laptop.storage_gb, laptop.storage_type
    );
    let _ = writeln!(output, "Screen: {}\"", laptop.screen_inches);
    if let Some(gpu) = &laptop.graphics {
        let _ = writeln!(output, "Graphics: {gpu}");
    }
    let purposes: Vec<&str> = laptop.purposes.iter().map(|p| p.as_str()).collect();
    let _ = writeln!(output, "Purpose: {}", purposes.join(", "));
    if !laptop.description.is_empty() {
        let _ = writeln!(output, "\n{}", laptop.description);
    }
    if !laptop.images.is_empty() {
        let _ = writeln!(output, "\nImages:");
        for image in &laptop.images {
            let _ = writeln!(output, "• {image}");
        }
    }

    if !similar.is_empty() {
        output.push_str("\nSimilar laptops:\n");
        for other in similar {
            let _ = writeln!(
                output,
                "• {} - {} [id: {}]",
                other.title(),
                format_price(other.price),
                other.id
            );
        }
    }
    output
}

/// The fixed option lists the filter panel shows.
pub fn format_filter_options() -> String {
    let purposes: Vec<&str> = PURPOSE_OPTIONS.iter().map(|p| p.as_str()).collect();
    let storage_types: Vec<&str> = STORAGE_TYPE_OPTIONS.iter().map(|s| s.as_str()).collect();

    let mut output = String::from("Filter options:\n\n");
    let _ = writeln!(output, "purpose: {}", purposes.join(", "));
    let _ = writeln!(
        output,
        "ram (GB): {}",
        RAM_OPTIONS.map(|v| v.to_string()).join(", ")
    );
    let _ = writeln!(output, "storageType: {}", storage_types.join(", "));
    let _ = writeln!(
        output,
        "storageSize (GB): {}",
        STORAGE_SIZE_OPTIONS.map(|v| v.to_string()).join(", ")
    );
    let _ = writeln!(
        output,
        "screenSize (in): {}",
        SCREEN_SIZE_OPTIONS.map(|v| v.to_string()).join(", ")
    );
    let _ = writeln!(output, "brand: {}", BRAND_OPTIONS.join(", "));
    output.push_str("minPrice / maxPrice: any amount in rupees\n");
    output.push_str("q: free text matched against brand, model, processor and purpose\n");
    output
}

/// Render inquiries in the order given.
pub fn format_inquiries(inquiries: &[Inquiry]) -> String {
    if inquiries.is_empty() {
        return "No inquiries yet.\n".to_string();
    }

    let mut output = format!("{} inquiry(ies), newest first:\n\n", inquiries.len());
    for (idx, inquiry) in inquiries.iter().enumerate() {
        let _ = writeln!(
            output,
            "{}. {} <{}>, {} - {} [id: {}]",
            idx + 1,
            inquiry.name,
            inquiry.email,
            inquiry.phone,
            inquiry.created_at.format("%Y-%m-%d %H:%M UTC"),
            inquiry.id
        );
        let ids: Vec<&str> = inquiry.laptop_ids.iter().map(|id| id.as_str()).collect();
        let _ = writeln!(output, "   Laptops: {}", ids.join(", "));
        if let Some(message) = &inquiry.message {
            let _ = writeln!(output, "   Message: {message}");
        }
        output.push('\n');
    }
    output
}

pub fn format_stats(stats: &CatalogStats) -> String {
    format!(
        "Laptops: {}\nInquiries: {}\nInquiries in the last 24 hours: {}\n",
        stats.laptops, stats.inquiries, stats.inquiries_last_24h
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, "₹0")]
    #[case(999.0, "₹999")]
    #[case(1000.0, "₹1,000")]
    #[case(50000.0, "₹50,000")]
    #[case(123456.0, "₹1,23,456")]
    #[case(12345678.0, "₹1,23,45,678")]
    #[case(49999.5, "₹49,999.5")]
    #[case(10.25, "₹10.25")]
    fn test_format_price(#[case] price: f64, #[case] expected: &str) {
        check!(format_price(price) == expected);
    }

    #[test]
    fn test_filter_options_lists_every_axis() {
        let output = format_filter_options();
        check!(output.contains("Content Creation"));
        check!(output.contains("SSD+HDD"));
        check!(output.contains("15.6"));
        check!(output.contains("Razer"));
    }
}
