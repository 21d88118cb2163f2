//! Shared test fixtures and utilities for integration tests.
//!
//! # Test Isolation Strategy
//!
//! Each test that touches state gets its own catalog file in a fresh temporary
//! directory and its own `CatalogState` with an empty result cache.
//!
//! # Available Fixtures
//!
//! - `sample_laptops`: a small in-memory catalog covering every filter axis
//! - `isolated_catalog`: a `CatalogState` backed by a temp snapshot file holding
//!   `sample_laptops`

use laptop_catalog_mcp::auth::AdminAuth;
use laptop_catalog_mcp::catalog::{CatalogSnapshot, MemoryStore};
use laptop_catalog_mcp::state::CatalogState;
use laptop_catalog_mcp::types::{Laptop, Purpose, RecordId, StorageType};
use rstest::fixture;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

pub const ADMIN_PASSWORD: &str = "test-password";

/// Build a laptop with the fields the engine looks at.
#[allow(dead_code)] // Used across different integration test crates
pub fn laptop(
    id: &str,
    brand: &str,
    price: f64,
    memory_gb: u32,
    purposes: &[Purpose],
) -> Laptop {
    Laptop {
        id: RecordId::from(id),
        brand: brand.to_string(),
        model: format!("Model {}", id.to_uppercase()),
        price,
        memory_gb,
        storage_type: StorageType::Ssd,
        storage_gb: 512,
        processor: "Core i5".to_string(),
        purposes: purposes.to_vec(),
        screen_inches: 15.6,
        graphics: None,
        images: vec![],
        description: String::new(),
        availability: "In Stock".to_string(),
    }
}

/// A temporary directory for test isolation, removed on drop.
#[allow(dead_code)] // Methods used across different integration test crates
pub struct TempCatalogDir {
    _temp: TempDir,
    root: PathBuf,
}

#[allow(dead_code)] // Methods used across different integration test crates
impl TempCatalogDir {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let root = temp.path().to_path_buf();
        Self { _temp: temp, root }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Path of a file inside this directory (not created).
    pub fn file(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Creates a file with the given content.
    ///
    /// # Panics
    /// Panics if file creation fails.
    pub fn create_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root.join(name);
        std::fs::write(&path, content)
            .unwrap_or_else(|e| panic!("Failed to write file '{}': {}", name, e));
        path
    }
}

impl Default for TempCatalogDir {
    fn default() -> Self {
        Self::new()
    }
}

/// A catalog state backed by a snapshot file in a temp directory.
#[allow(dead_code)] // Fields used across different integration test crates
pub struct IsolatedCatalog {
    pub dir: TempCatalogDir,
    pub catalog_path: PathBuf,
    pub state: Arc<CatalogState>,
}

#[allow(dead_code)] // Methods used across different integration test crates
impl IsolatedCatalog {
    pub fn with_laptops(laptops: Vec<Laptop>) -> Self {
        let dir = TempCatalogDir::new();
        let catalog_path = dir.file("catalog.json");
        let snapshot = CatalogSnapshot {
            laptops,
            inquiries: vec![],
        };
        let content = serde_json::to_string_pretty(&snapshot).expect("Failed to render catalog");
        dir.create_file("catalog.json", &content);

        let state = CatalogState::new(
            MemoryStore::from(snapshot),
            AdminAuth::new(ADMIN_PASSWORD),
            16,
            8,
        )
        .with_snapshot_path(&catalog_path);
        Self {
            dir,
            catalog_path,
            state: Arc::new(state),
        }
    }

    /// Log in and return the token text the admin tools expect.
    pub fn admin_token(&self) -> String {
        self.state
            .admin_login(ADMIN_PASSWORD)
            .expect("admin login")
            .as_str()
            .to_string()
    }
}

/// Laptops covering every filter axis.
#[fixture]
pub fn sample_laptops() -> Vec<Laptop> {
    let mut hybrid = laptop("lenovo-ideapad", "Lenovo", 35_000.0, 8, &[Purpose::Student]);
    hybrid.storage_type = StorageType::Hybrid;
    hybrid.storage_gb = 1024;
    hybrid.screen_inches = 14.0;

    let mut macbook = laptop(
        "apple-air",
        "Apple",
        114_900.0,
        16,
        &[Purpose::Student, Purpose::ContentCreation, Purpose::Office],
    );
    macbook.screen_inches = 13.0;
    macbook.storage_gb = 256;

    let mut rog = laptop("asus-rog", "Asus", 90_000.0, 16, &[Purpose::Gaming]);
    rog.graphics = Some("RTX 4060".to_string());
    rog.storage_gb = 1024;

    vec![
        laptop("dell-inspiron", "Dell", 40_000.0, 8, &[Purpose::Office]),
        rog,
        hybrid,
        macbook,
        laptop("hp-victus", "HP", 65_000.0, 16, &[Purpose::Gaming, Purpose::Student]),
        laptop("acer-aspire", "Acer", 28_000.0, 4, &[Purpose::Office, Purpose::Student]),
    ]
}

#[fixture]
pub fn isolated_catalog(sample_laptops: Vec<Laptop>) -> IsolatedCatalog {
    IsolatedCatalog::with_laptops(sample_laptops)
}
