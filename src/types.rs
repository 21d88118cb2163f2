//! Catalog records: laptops, inquiries and the option lists the filter panel offers.
//!
//! Field names on the wire follow the storefront's JSON (`ramGb`, `cpu`, `purpose`, ...)
//! so existing catalog exports load unchanged.

use crate::error::CatalogError;
use chrono::{DateTime, Utc};
use rmcp::schemars;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Purposes a buyer can shop for.
pub const PURPOSE_OPTIONS: [Purpose; 5] = [
    Purpose::Office,
    Purpose::Student,
    Purpose::Gaming,
    Purpose::ContentCreation,
    Purpose::Business,
];
/// Memory sizes offered by the filter panel, in GB.
pub const RAM_OPTIONS: [u32; 5] = [4, 8, 16, 32, 64];
/// Storage technologies offered by the filter panel.
pub const STORAGE_TYPE_OPTIONS: [StorageType; 3] =
    [StorageType::Ssd, StorageType::Hdd, StorageType::Hybrid];
/// Storage sizes offered by the filter panel, in GB.
pub const STORAGE_SIZE_OPTIONS: [u32; 5] = [128, 256, 512, 1024, 2048];
/// Screen sizes offered by the filter panel, in inches.
pub const SCREEN_SIZE_OPTIONS: [f64; 5] = [13.0, 14.0, 15.0, 15.6, 17.0];
/// Brands offered by the filter panel.
pub const BRAND_OPTIONS: [&str; 8] = [
    "Dell", "HP", "Lenovo", "Asus", "Acer", "Apple", "MSI", "Razer",
];

static ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Opaque record identifier (16 lowercase hex characters for generated ids).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

pub type LaptopId = RecordId;
pub type InquiryId = RecordId;

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh id from a process-wide counter and the wall clock.
    pub fn generate() -> Self {
        let sequence = ID_COUNTER.fetch_add(1, Ordering::Relaxed);
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();

        let mut seed = [0u8; 24];
        seed[..8].copy_from_slice(&sequence.to_le_bytes());
        seed[8..].copy_from_slice(&nanos.to_le_bytes());
        Self(format!("{:016x}", xxhash_rust::xxh3::xxh3_64(&seed)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Usage purpose tag.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, schemars::JsonSchema,
)]
pub enum Purpose {
    Office,
    Student,
    Gaming,
    #[serde(rename = "Content Creation")]
    ContentCreation,
    Business,
}

impl Purpose {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Office => "Office",
            Self::Student => "Student",
            Self::Gaming => "Gaming",
            Self::ContentCreation => "Content Creation",
            Self::Business => "Business",
        }
    }
}

impl fmt::Display for Purpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Storage technology.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, schemars::JsonSchema,
)]
pub enum StorageType {
    #[serde(rename = "SSD")]
    Ssd,
    #[serde(rename = "HDD")]
    Hdd,
    #[serde(rename = "SSD+HDD")]
    Hybrid,
}

impl StorageType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ssd => "SSD",
            Self::Hdd => "HDD",
            Self::Hybrid => "SSD+HDD",
        }
    }
}

impl fmt::Display for StorageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_availability() -> String {
    "In Stock".to_string()
}

/// A catalog laptop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Laptop {
    pub id: LaptopId,
    pub brand: String,
    pub model: String,
    /// Price in rupees
    pub price: f64,
    #[serde(rename = "ramGb")]
    pub memory_gb: u32,
    pub storage_type: StorageType,
    #[serde(rename = "storageGb")]
    pub storage_gb: u32,
    #[serde(rename = "cpu")]
    pub processor: String,
    #[serde(rename = "purpose")]
    pub purposes: Vec<Purpose>,
    #[serde(rename = "screenIn")]
    pub screen_inches: f64,
    #[serde(rename = "gpu", default, skip_serializing_if = "Option::is_none")]
    pub graphics: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    pub description: String,
    #[serde(default = "default_availability")]
    pub availability: String,
}

impl Laptop {
    pub fn from_new(id: LaptopId, new: NewLaptop) -> Self {
        Self {
            id,
            brand: new.brand,
            model: new.model,
            price: new.price,
            memory_gb: new.memory_gb,
            storage_type: new.storage_type,
            storage_gb: new.storage_gb,
            processor: new.processor,
            purposes: new.purposes,
            screen_inches: new.screen_inches,
            graphics: new.graphics,
            images: new.images,
            description: new.description,
            availability: new.availability,
        }
    }

    /// Display name used in listings ("Dell XPS 13").
    pub fn title(&self) -> String {
        format!("{} {}", self.brand, self.model)
    }

    /// Check the catalog invariants every stored laptop must satisfy.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let invalid = |reason: &str| Err(CatalogError::InvalidLaptop(reason.to_string()));

        if self.brand.trim().is_empty() {
            return invalid("brand must not be empty");
        }
        if self.model.trim().is_empty() {
            return invalid("model must not be empty");
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return invalid("price must be a non-negative number");
        }
        if self.memory_gb == 0 {
            return invalid("ramGb must be positive");
        }
        if self.storage_gb == 0 {
            return invalid("storageGb must be positive");
        }
        if !self.screen_inches.is_finite() || self.screen_inches <= 0.0 {
            return invalid("screenIn must be positive");
        }
        if self.purposes.is_empty() {
            return invalid("purpose must list at least one tag");
        }
        Ok(())
    }

    /// Apply the fields present in `patch`, leaving the rest untouched.
    pub fn apply(&mut self, patch: LaptopPatch) {
        let LaptopPatch {
            brand,
            model,
            price,
            memory_gb,
            storage_type,
            storage_gb,
            processor,
            purposes,
            screen_inches,
            graphics,
            images,
            description,
            availability,
        } = patch;

        if let Some(brand) = brand {
            self.brand = brand;
        }
        if let Some(model) = model {
            self.model = model;
        }
        if let Some(price) = price {
            self.price = price;
        }
        if let Some(memory_gb) = memory_gb {
            self.memory_gb = memory_gb;
        }
        if let Some(storage_type) = storage_type {
            self.storage_type = storage_type;
        }
        if let Some(storage_gb) = storage_gb {
            self.storage_gb = storage_gb;
        }
        if let Some(processor) = processor {
            self.processor = processor;
        }
        if let Some(purposes) = purposes {
            self.purposes = purposes;
        }
        if let Some(screen_inches) = screen_inches {
            self.screen_inches = screen_inches;
        }
        if let Some(graphics) = graphics {
            self.graphics = Some(graphics);
        }
        if let Some(images) = images {
            self.images = images;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(availability) = availability {
            self.availability = availability;
        }
    }
}

/// Laptop fields supplied when adding to the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewLaptop {
    pub brand: String,
    pub model: String,
    /// Price in rupees
    pub price: f64,
    /// Memory size in GB
    #[serde(rename = "ramGb")]
    pub memory_gb: u32,
    /// SSD, HDD or SSD+HDD
    pub storage_type: StorageType,
    /// Storage size in GB
    #[serde(rename = "storageGb")]
    pub storage_gb: u32,
    /// Processor description
    #[serde(rename = "cpu")]
    pub processor: String,
    /// Usage purposes (at least one)
    #[serde(rename = "purpose")]
    pub purposes: Vec<Purpose>,
    /// Screen diagonal in inches
    #[serde(rename = "screenIn")]
    pub screen_inches: f64,
    /// Graphics description
    #[serde(rename = "gpu", default)]
    pub graphics: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    pub description: String,
    #[serde(default = "default_availability")]
    pub availability: String,
}

/// Partial laptop update; absent fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LaptopPatch {
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(rename = "ramGb", default)]
    pub memory_gb: Option<u32>,
    #[serde(default)]
    pub storage_type: Option<StorageType>,
    #[serde(rename = "storageGb", default)]
    pub storage_gb: Option<u32>,
    #[serde(rename = "cpu", default)]
    pub processor: Option<String>,
    #[serde(rename = "purpose", default)]
    pub purposes: Option<Vec<Purpose>>,
    #[serde(rename = "screenIn", default)]
    pub screen_inches: Option<f64>,
    #[serde(rename = "gpu", default)]
    pub graphics: Option<String>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub availability: Option<String>,
}

/// A buyer's request to be contacted about one or more laptops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inquiry {
    pub id: InquiryId,
    pub name: String,
    pub phone: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(rename = "productIds")]
    pub laptop_ids: Vec<LaptopId>,
    pub created_at: DateTime<Utc>,
}

/// Inquiry fields supplied by the buyer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewInquiry {
    /// Contact name
    pub name: String,
    /// Contact phone number
    pub phone: String,
    /// Contact email address
    pub email: String,
    /// Optional free-form message
    #[serde(default)]
    pub message: Option<String>,
    /// Ids of the laptops the buyer is interested in
    #[serde(rename = "productIds")]
    pub laptop_ids: Vec<String>,
}

impl NewInquiry {
    pub fn validate(&self) -> Result<(), CatalogError> {
        let missing = [
            ("name", &self.name),
            ("phone", &self.phone),
            ("email", &self.email),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty());

        if let Some((field, _)) = missing {
            return Err(CatalogError::InvalidInquiry(format!(
                "{field} must not be empty"
            )));
        }
        if self.laptop_ids.is_empty() {
            return Err(CatalogError::InvalidInquiry(
                "productIds must list at least one laptop".to_string(),
            ));
        }
        Ok(())
    }

    pub fn into_inquiry(self, id: InquiryId, created_at: DateTime<Utc>) -> Inquiry {
        Inquiry {
            id,
            name: self.name,
            phone: self.phone,
            email: self.email,
            message: self.message.filter(|m| !m.trim().is_empty()),
            laptop_ids: self.laptop_ids.into_iter().map(RecordId::new).collect(),
            created_at,
        }
    }
}
