//! Laptop detail and filter option handlers.

use super::OutputFormat;
use crate::format::{format_filter_options, format_laptop_detail};
use crate::search::similar::{SIMILAR_LIMIT, similar_to};
use crate::state::CatalogState;
use crate::types::Laptop;
use rmcp::schemars;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetLaptopRequest {
    /// Laptop id as shown in search results
    pub id: String,
    /// Response format (default: text)
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LaptopDetail<'a> {
    #[serde(flatten)]
    laptop: &'a Laptop,
    similar: Vec<&'a Laptop>,
}

/// Show one laptop with up to four similar laptops.
pub async fn handle_get_laptop(
    state: &Arc<CatalogState>,
    request: GetLaptopRequest,
) -> Result<String, String> {
    let laptops = state.snapshot().await;
    let Some(laptop) = laptops.iter().find(|l| l.id.as_str() == request.id) else {
        return Err(format!(
            "Laptop '{}' not found. Use search_laptops to list laptop ids.",
            request.id
        ));
    };
    let similar = similar_to(&laptops, laptop, SIMILAR_LIMIT);

    match request.format {
        OutputFormat::Text => Ok(format_laptop_detail(laptop, &similar)),
        OutputFormat::Json => serde_json::to_string_pretty(&LaptopDetail { laptop, similar })
            .map_err(|e| format!("Failed to serialize laptop: {}", e)),
    }
}

pub fn handle_filter_options() -> String {
    format_filter_options()
}
