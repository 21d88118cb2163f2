//! Snapshot files: the on-disk form of a catalog.
//!
//! The snapshot format is picked by extension: `.toml` files use TOML, anything else
//! is JSON.

use super::store::MemoryStore;
use crate::error::CatalogError;
use crate::types::{Inquiry, Laptop};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// On-disk catalog contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    #[serde(default)]
    pub laptops: Vec<Laptop>,
    #[serde(default)]
    pub inquiries: Vec<Inquiry>,
}

impl From<&MemoryStore> for CatalogSnapshot {
    fn from(store: &MemoryStore) -> Self {
        Self {
            laptops: store.laptop_records().to_vec(),
            inquiries: store.inquiry_records().to_vec(),
        }
    }
}

impl From<CatalogSnapshot> for MemoryStore {
    fn from(snapshot: CatalogSnapshot) -> Self {
        MemoryStore::new(snapshot.laptops, snapshot.inquiries)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SnapshotFormat {
    Json,
    Toml,
}

impl SnapshotFormat {
    fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::Toml,
            _ => Self::Json,
        }
    }
}

/// Parse snapshot text and check every laptop.
fn parse_snapshot(path: &Path, content: &str) -> Result<CatalogSnapshot, CatalogError> {
    let parse_error = |message: String| CatalogError::Parse {
        path: path.to_path_buf(),
        message,
    };

    let snapshot: CatalogSnapshot = match SnapshotFormat::for_path(path) {
        SnapshotFormat::Json => {
            serde_json::from_str(content).map_err(|e| parse_error(e.to_string()))?
        }
        SnapshotFormat::Toml => toml::from_str(content).map_err(|e| parse_error(e.to_string()))?,
    };

    for laptop in &snapshot.laptops {
        laptop
            .validate()
            .map_err(|e| parse_error(format!("laptop '{}': {}", laptop.id, e)))?;
    }
    Ok(snapshot)
}

/// Render a snapshot in the format its path calls for.
fn render_snapshot(path: &Path, snapshot: &CatalogSnapshot) -> Result<String, CatalogError> {
    match SnapshotFormat::for_path(path) {
        SnapshotFormat::Json => serde_json::to_string_pretty(snapshot).map_err(|e| e.to_string()),
        SnapshotFormat::Toml => toml::to_string_pretty(snapshot).map_err(|e| e.to_string()),
    }
    .map_err(|message| CatalogError::Parse {
        path: path.to_path_buf(),
        message,
    })
}

/// Read a snapshot. A missing file is an empty catalog.
pub async fn load_snapshot(path: &Path) -> Result<CatalogSnapshot, CatalogError> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!("No catalog at {}, starting empty", path.display());
            return Ok(CatalogSnapshot::default());
        }
        Err(source) => {
            return Err(CatalogError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let snapshot = parse_snapshot(path, &content)?;
    tracing::info!(
        "Loaded {} laptops and {} inquiries from {}",
        snapshot.laptops.len(),
        snapshot.inquiries.len(),
        path.display()
    );
    Ok(snapshot)
}

/// Write a snapshot, replacing the file atomically via a sibling temp file.
pub async fn save_snapshot(path: &Path, snapshot: &CatalogSnapshot) -> Result<(), CatalogError> {
    let content = render_snapshot(path, snapshot)?;

    let write_error = |source: std::io::Error| CatalogError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(write_error)?;
    }

    let tmp = path.with_extension("tmp");
    tokio::fs::write(&tmp, content).await.map_err(write_error)?;
    tokio::fs::rename(&tmp, path).await.map_err(write_error)?;

    tracing::debug!("Saved catalog snapshot to {}", path.display());
    Ok(())
}
