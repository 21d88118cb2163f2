//! Shared service state: the catalog store, the result cache and admin auth.
//!
//! Searches run under a read lock on the store and fill the cache while still
//! holding it. Mutations take the write lock, apply the change to a staged copy,
//! write the snapshot file and only then swap the copy in. The cache is cleared
//! before the write lock is released, so a cached page is never older than the
//! catalog it was computed from.

use crate::auth::{AdminAuth, AdminToken};
use crate::catalog::{CatalogSnapshot, CatalogStore, MemoryStore, load_snapshot, save_snapshot};
use crate::config::CatalogConfig;
use crate::error::{AuthError, CatalogError};
use crate::search::{self, RawQuery, ResultPage, SortStrategy};
use crate::types::{Inquiry, Laptop, LaptopPatch, NewInquiry, NewLaptop};
use chrono::{DateTime, Duration, Utc};
use lru::LruCache;
use serde::Serialize;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

/// One fully specified search request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SearchRequestKey {
    pub raw: RawQuery,
    pub strategy: SortStrategy,
    pub page: i64,
    pub page_size: usize,
}

impl SearchRequestKey {
    fn fingerprint(&self) -> Option<u64> {
        serde_json::to_vec(self)
            .ok()
            .map(|bytes| xxhash_rust::xxh3::xxh3_64(&bytes))
    }
}

/// Back-office counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    pub laptops: usize,
    pub inquiries: usize,
    pub inquiries_last_24h: usize,
}

/// State shared by every tool call.
pub struct CatalogState {
    store: RwLock<MemoryStore>,

    /// Snapshot file every mutation is written to; `None` keeps the catalog in memory
    snapshot_path: Option<PathBuf>,

    /// Rendered result pages by request fingerprint; `None` when caching is off
    cache: Option<RwLock<LruCache<u64, Arc<ResultPage>>>>,

    auth: AdminAuth,

    default_page_size: usize,
}

impl std::fmt::Debug for CatalogState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogState")
            .field("snapshot_path", &self.snapshot_path)
            .field("caching", &self.cache.is_some())
            .field("default_page_size", &self.default_page_size)
            .finish_non_exhaustive()
    }
}

impl CatalogState {
    pub fn new(
        store: MemoryStore,
        auth: AdminAuth,
        cache_size: usize,
        default_page_size: usize,
    ) -> Self {
        Self {
            store: RwLock::new(store),
            snapshot_path: None,
            cache: NonZeroUsize::new(cache_size).map(|size| RwLock::new(LruCache::new(size))),
            auth,
            default_page_size,
        }
    }

    /// Persist every mutation to the snapshot file at `path`.
    pub fn with_snapshot_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.snapshot_path = Some(path.into());
        self
    }

    /// Open the catalog file at `path`, starting empty when it does not exist yet.
    pub async fn open(
        path: impl Into<PathBuf>,
        auth: AdminAuth,
        cache_size: usize,
        default_page_size: usize,
    ) -> Result<Self, CatalogError> {
        let path = path.into();
        let snapshot = load_snapshot(&path).await?;
        Ok(Self::new(snapshot.into(), auth, cache_size, default_page_size).with_snapshot_path(path))
    }

    /// Build state from configuration, opening the catalog file when one is set.
    pub async fn from_config(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let auth = AdminAuth::new(config.admin_password.clone());
        match config.catalog_path() {
            Some(path) => Self::open(path, auth, config.cache_size, config.page_size).await,
            None => {
                tracing::info!("No catalog file configured, using an in-memory catalog");
                Ok(Self::new(
                    MemoryStore::default(),
                    auth,
                    config.cache_size,
                    config.page_size,
                ))
            }
        }
    }

    pub fn default_page_size(&self) -> usize {
        self.default_page_size
    }

    /// Immutable snapshot of the current catalog.
    pub async fn snapshot(&self) -> Arc<[Laptop]> {
        self.store.read().await.list()
    }

    /// Run a search, serving repeated requests from the cache.
    pub async fn search(&self, key: &SearchRequestKey) -> Arc<ResultPage> {
        let store = self.store.read().await;
        let fingerprint = key.fingerprint();

        if let (Some(cache), Some(fingerprint)) = (&self.cache, fingerprint)
            && let Some(page) = cache.write().await.get(&fingerprint)
        {
            tracing::debug!("Cache hit for search {:016x}", fingerprint);
            return Arc::clone(page);
        }

        let laptops = store.list();
        let page = Arc::new(search::search(
            &laptops,
            &key.raw,
            key.strategy,
            key.page,
            key.page_size,
        ));

        if let (Some(cache), Some(fingerprint)) = (&self.cache, fingerprint) {
            cache.write().await.put(fingerprint, Arc::clone(&page));
        }
        page
    }

    /// Number of cached result pages.
    pub async fn cached_pages(&self) -> usize {
        match &self.cache {
            Some(cache) => cache.read().await.len(),
            None => 0,
        }
    }

    /// Drop every cached result page.
    pub async fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.write().await.clear();
        }
    }

    /// Apply a mutation to a copy of the store, write it out, then swap it in.
    ///
    /// The live store only changes once the snapshot file is written. The cache is
    /// cleared before the write lock is released, whatever the outcome.
    async fn commit<T>(
        &self,
        mutate: impl FnOnce(&mut MemoryStore) -> Result<T, CatalogError>,
    ) -> Result<T, CatalogError> {
        let mut store = self.store.write().await;
        let mut staged = store.clone();

        let result = match mutate(&mut staged) {
            Ok(value) => match &self.snapshot_path {
                Some(path) => save_snapshot(path, &CatalogSnapshot::from(&staged))
                    .await
                    .map(|()| value),
                None => Ok(value),
            },
            Err(e) => Err(e),
        };
        if result.is_ok() {
            *store = staged;
        }

        self.clear_cache().await;
        result
    }

    pub async fn laptop(&self, id: &str) -> Option<Laptop> {
        self.store.read().await.get(id)
    }

    /// Record an inquiry. Every referenced laptop must exist at the time of writing.
    pub async fn submit_inquiry(&self, new: NewInquiry) -> Result<Inquiry, CatalogError> {
        self.commit(|store| store.add_inquiry(new)).await
    }

    /// Exchange the admin password for a capability token.
    pub fn admin_login(&self, password: &str) -> Result<AdminToken, AuthError> {
        self.auth.login(password)
    }

    /// Check a presented token string.
    pub fn authorize(&self, token: &str) -> Result<AdminToken, AuthError> {
        self.auth.verify(token)
    }

    pub async fn inquiries(&self, _admin: &AdminToken) -> Vec<Inquiry> {
        self.store.read().await.inquiries()
    }

    pub async fn create_laptop(
        &self,
        _admin: &AdminToken,
        new: NewLaptop,
    ) -> Result<Laptop, CatalogError> {
        self.commit(|store| store.create(new)).await
    }

    pub async fn update_laptop(
        &self,
        _admin: &AdminToken,
        id: &str,
        patch: LaptopPatch,
    ) -> Result<Laptop, CatalogError> {
        self.commit(|store| store.update(id, patch)).await
    }

    pub async fn delete_laptop(&self, _admin: &AdminToken, id: &str) -> Result<(), CatalogError> {
        self.commit(|store| store.delete(id)).await
    }

    pub async fn stats(&self, _admin: &AdminToken) -> CatalogStats {
        let store = self.store.read().await;
        let inquiries = store.inquiries();
        CatalogStats {
            laptops: store.list().len(),
            inquiries: inquiries.len(),
            inquiries_last_24h: count_since(&inquiries, Utc::now() - Duration::hours(24)),
        }
    }
}

/// Inquiries created strictly after `since`.
fn count_since(inquiries: &[Inquiry], since: DateTime<Utc>) -> usize {
    inquiries.iter().filter(|i| i.created_at > since).count()
}
