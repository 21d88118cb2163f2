//! Catalog storage: the store trait, the in-memory store and snapshot files.

pub mod file;
pub mod store;

pub use file::{CatalogSnapshot, load_snapshot, save_snapshot};
pub use store::{CatalogStore, MemoryStore};
