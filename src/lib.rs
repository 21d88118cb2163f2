//! Laptop catalog search engine and MCP server.
//!
//! The engine in [`search`] is pure: filters, match scoring, ranking and pagination
//! over an immutable slice of laptops. [`state`] wraps a [`catalog`] store with a
//! result cache and admin auth, and [`server`] exposes it all as MCP tools.

pub mod auth;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod schema;
pub mod search;
pub mod server;
pub mod state;
pub mod tools;
pub mod types;

pub use error::{AuthError, CatalogError, Result, SearchError};
pub use search::{RawQuery, ResultPage, SortStrategy, search, search_raw};
pub use server::CatalogServer;
pub use state::CatalogState;
pub use types::{Inquiry, Laptop};
