//! Runtime configuration.
//!
//! Every setting can come from a command line flag or an environment variable,
//! with flags taking precedence.

use clap::{Args, ValueEnum};
use std::borrow::Cow;
use std::path::PathBuf;

/// Default configuration values
pub mod defaults {
    pub const ADMIN_PASSWORD: &str = "admin123";
    pub const PAGE_SIZE: &str = "8";
    pub const CACHE_SIZE: &str = "64";
    pub const LOG_FORMAT: &str = "text";
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Catalog server configuration.
#[derive(Debug, Clone, Args)]
pub struct CatalogConfig {
    /// Catalog snapshot file (.json or .toml); in-memory only when omitted
    #[arg(long, env = "LAPTOP_CATALOG_FILE", global = true)]
    pub catalog: Option<String>,

    /// Password exchanged for an admin token
    #[arg(
        long,
        env = "LAPTOP_CATALOG_ADMIN_PASSWORD",
        hide_env_values = true,
        default_value = defaults::ADMIN_PASSWORD,
        global = true
    )]
    pub admin_password: String,

    /// Results per page when a request does not say
    #[arg(long, env = "LAPTOP_CATALOG_PAGE_SIZE", default_value = defaults::PAGE_SIZE, global = true)]
    pub page_size: usize,

    /// Number of result pages kept in the search cache (0 disables it)
    #[arg(long, env = "LAPTOP_CATALOG_CACHE_SIZE", default_value = defaults::CACHE_SIZE, global = true)]
    pub cache_size: usize,

    /// Log output format
    #[arg(long, env = "LAPTOP_CATALOG_LOG_FORMAT", value_enum, default_value = defaults::LOG_FORMAT, global = true)]
    pub log_format: LogFormat,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            catalog: None,
            admin_password: defaults::ADMIN_PASSWORD.to_string(),
            page_size: crate::search::DEFAULT_PAGE_SIZE,
            cache_size: 64,
            log_format: LogFormat::Text,
        }
    }
}

impl CatalogConfig {
    /// Catalog path with `~` expanded.
    pub fn catalog_path(&self) -> Option<PathBuf> {
        self.catalog
            .as_deref()
            .map(|path| PathBuf::from(expand_tilde(path).as_ref()))
    }
}

/// Expands tilde (`~`) in a path to the user's home directory.
///
/// - `~/foo` becomes `/home/user/foo`
/// - `~` becomes `/home/user`
/// - Other paths are returned unchanged
///
/// Returns `Cow::Borrowed` if no expansion needed, `Cow::Owned` if expanded.
pub fn expand_tilde(path: &str) -> Cow<'_, str> {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return Cow::Owned(home.join(stripped).display().to_string());
        }
    } else if path == "~"
        && let Some(home) = dirs::home_dir()
    {
        return Cow::Owned(home.display().to_string());
    }
    Cow::Borrowed(path)
}
