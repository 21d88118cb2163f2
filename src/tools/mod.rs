use rmcp::schemars;
use serde::Deserialize;

pub mod admin;
pub mod inquiry;
pub mod laptop;
pub mod search;

pub use admin::*;
pub use inquiry::*;
pub use laptop::*;
pub use search::*;

/// DO NOT add doc comments to individual variants - this causes schemars to generate
/// `oneOf` schemas instead of simple `enum` arrays, breaking MCP client enum handling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
