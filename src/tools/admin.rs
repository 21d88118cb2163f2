//! Back-office handlers. Every call except login presents an admin token.

use crate::auth::AdminToken;
use crate::format::{format_inquiries, format_stats};
use crate::state::CatalogState;
use crate::types::{LaptopPatch, NewLaptop};
use rmcp::schemars;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AdminLoginRequest {
    /// Admin password
    pub password: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AdminRequest {
    /// Token returned by admin_login
    pub token: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CreateLaptopRequest {
    /// Token returned by admin_login
    pub token: String,
    pub laptop: NewLaptop,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdateLaptopRequest {
    /// Token returned by admin_login
    pub token: String,
    /// Id of the laptop to change
    pub id: String,
    /// Fields to change; omitted fields keep their value
    pub changes: LaptopPatch,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DeleteLaptopRequest {
    /// Token returned by admin_login
    pub token: String,
    /// Id of the laptop to remove
    pub id: String,
}

fn authorize(state: &CatalogState, token: &str) -> Result<AdminToken, String> {
    state
        .authorize(token)
        .map_err(|e| format!("{}: log in with admin_login first", e))
}

pub fn handle_admin_login(
    state: &Arc<CatalogState>,
    request: AdminLoginRequest,
) -> Result<String, String> {
    let token = state
        .admin_login(&request.password)
        .map_err(|e| e.to_string())?;
    Ok(format!(
        "Logged in. Pass this token to admin tools: {}",
        token.as_str()
    ))
}

pub async fn handle_list_inquiries(
    state: &Arc<CatalogState>,
    request: AdminRequest,
) -> Result<String, String> {
    let admin = authorize(state, &request.token)?;
    Ok(format_inquiries(&state.inquiries(&admin).await))
}

pub async fn handle_create_laptop(
    state: &Arc<CatalogState>,
    request: CreateLaptopRequest,
) -> Result<String, String> {
    let admin = authorize(state, &request.token)?;
    let laptop = state
        .create_laptop(&admin, request.laptop)
        .await
        .map_err(|e| e.to_string())?;
    Ok(format!("Created {} [id: {}]", laptop.title(), laptop.id))
}

pub async fn handle_update_laptop(
    state: &Arc<CatalogState>,
    request: UpdateLaptopRequest,
) -> Result<String, String> {
    let admin = authorize(state, &request.token)?;
    let laptop = state
        .update_laptop(&admin, &request.id, request.changes)
        .await
        .map_err(|e| e.to_string())?;
    Ok(format!("Updated {} [id: {}]", laptop.title(), laptop.id))
}

pub async fn handle_delete_laptop(
    state: &Arc<CatalogState>,
    request: DeleteLaptopRequest,
) -> Result<String, String> {
    let admin = authorize(state, &request.token)?;
    state
        .delete_laptop(&admin, &request.id)
        .await
        .map_err(|e| e.to_string())?;
    Ok(format!("Deleted laptop {}", request.id))
}

pub async fn handle_catalog_stats(
    state: &Arc<CatalogState>,
    request: AdminRequest,
) -> Result<String, String> {
    let admin = authorize(state, &request.token)?;
    Ok(format_stats(&state.stats(&admin).await))
}
