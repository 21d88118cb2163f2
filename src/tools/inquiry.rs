//! Buyer inquiry handler.

use crate::state::CatalogState;
use crate::types::NewInquiry;
use std::sync::Arc;

/// Record an inquiry; unknown laptop ids are rejected.
pub async fn handle_submit_inquiry(
    state: &Arc<CatalogState>,
    request: NewInquiry,
) -> Result<String, String> {
    let inquiry = state
        .submit_inquiry(request)
        .await
        .map_err(|e| e.to_string())?;

    Ok(format!(
        "Inquiry {} received for {} laptop(s). We will contact {} at {} or {}.",
        inquiry.id,
        inquiry.laptop_ids.len(),
        inquiry.name,
        inquiry.phone,
        inquiry.email
    ))
}
