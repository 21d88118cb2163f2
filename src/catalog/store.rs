//! The catalog store abstraction and its in-memory implementation.

use crate::error::CatalogError;
use crate::types::{Inquiry, Laptop, LaptopPatch, NewInquiry, NewLaptop, RecordId};
use chrono::Utc;
use std::sync::Arc;

/// Owner of catalog data: laptops and buyer inquiries.
///
/// Readers get immutable snapshots, so a search never observes a half-applied
/// mutation. Mutations take `&mut self`; callers serialize them behind a lock.
pub trait CatalogStore: Send + Sync {
    /// Snapshot of every laptop, in catalog order.
    fn list(&self) -> Arc<[Laptop]>;

    /// Look up a single laptop.
    fn get(&self, id: &str) -> Option<Laptop>;

    fn create(&mut self, new: NewLaptop) -> Result<Laptop, CatalogError>;

    fn update(&mut self, id: &str, patch: LaptopPatch) -> Result<Laptop, CatalogError>;

    fn delete(&mut self, id: &str) -> Result<(), CatalogError>;

    /// Inquiries, newest first.
    fn inquiries(&self) -> Vec<Inquiry>;

    fn add_inquiry(&mut self, new: NewInquiry) -> Result<Inquiry, CatalogError>;
}

/// Catalog held entirely in memory.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    laptops: Arc<[Laptop]>,
    inquiries: Vec<Inquiry>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}

impl MemoryStore {
    pub fn new(laptops: Vec<Laptop>, inquiries: Vec<Inquiry>) -> Self {
        Self {
            laptops: laptops.into(),
            inquiries,
        }
    }

    pub fn with_laptops(laptops: Vec<Laptop>) -> Self {
        Self::new(laptops, Vec::new())
    }

    /// Raw laptop records in catalog order.
    pub(crate) fn laptop_records(&self) -> &[Laptop] {
        &self.laptops
    }

    /// Raw inquiry records in insertion order.
    pub(crate) fn inquiry_records(&self) -> &[Inquiry] {
        &self.inquiries
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.laptops.iter().position(|l| l.id.as_str() == id)
    }

    fn replace_laptops(&mut self, laptops: Vec<Laptop>) {
        self.laptops = laptops.into();
    }
}

impl CatalogStore for MemoryStore {
    fn list(&self) -> Arc<[Laptop]> {
        Arc::clone(&self.laptops)
    }

    fn get(&self, id: &str) -> Option<Laptop> {
        self.position(id).map(|idx| self.laptops[idx].clone())
    }

    fn create(&mut self, new: NewLaptop) -> Result<Laptop, CatalogError> {
        let laptop = Laptop::from_new(RecordId::generate(), new);
        laptop.validate()?;

        let mut laptops = self.laptops.to_vec();
        laptops.push(laptop.clone());
        self.replace_laptops(laptops);

        tracing::info!("Added laptop {} ({})", laptop.id, laptop.title());
        Ok(laptop)
    }

    fn update(&mut self, id: &str, patch: LaptopPatch) -> Result<Laptop, CatalogError> {
        let idx = self
            .position(id)
            .ok_or_else(|| CatalogError::LaptopNotFound(id.to_string()))?;

        let mut updated = self.laptops[idx].clone();
        updated.apply(patch);
        updated.validate()?;

        let mut laptops = self.laptops.to_vec();
        laptops[idx] = updated.clone();
        self.replace_laptops(laptops);

        tracing::info!("Updated laptop {}", id);
        Ok(updated)
    }

    fn delete(&mut self, id: &str) -> Result<(), CatalogError> {
        let idx = self
            .position(id)
            .ok_or_else(|| CatalogError::LaptopNotFound(id.to_string()))?;

        let mut laptops = self.laptops.to_vec();
        laptops.remove(idx);
        self.replace_laptops(laptops);

        tracing::info!("Deleted laptop {}", id);
        Ok(())
    }

    fn inquiries(&self) -> Vec<Inquiry> {
        // Reversed first so identical timestamps list the latest insert first.
        let mut inquiries: Vec<Inquiry> = self.inquiries.iter().rev().cloned().collect();
        inquiries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        inquiries
    }

    fn add_inquiry(&mut self, new: NewInquiry) -> Result<Inquiry, CatalogError> {
        new.validate()?;
        let unknown: Vec<String> = new
            .laptop_ids
            .iter()
            .filter(|id| self.position(id).is_none())
            .cloned()
            .collect();
        if !unknown.is_empty() {
            return Err(CatalogError::UnknownLaptops(unknown));
        }

        let inquiry = new.into_inquiry(RecordId::generate(), Utc::now());
        self.inquiries.push(inquiry.clone());

        tracing::info!(
            "Recorded inquiry {} for {} laptop(s)",
            inquiry.id,
            inquiry.laptop_ids.len()
        );
        Ok(inquiry)
    }
}
