//! Key-Value store backend.

use crate::{BlobStore, CacheError};

#[cfg(not(target_arch = "wasm32"))]
use crate::MemoryStore;

/// Blob store backed by Spin's Key-Value Store.
///
/// Outside of `wasm32` there is no Spin host to talk to, so the cache falls
/// back to an in-process map with the same semantics. Nothing survives the
/// process there; use [`FileStore`](crate::FileStore) for native builds that
/// need to keep the cart across restarts.
pub struct Cache {
    #[cfg(target_arch = "wasm32")]
    store: spin_sdk::key_value::Store,
    #[cfg(not(target_arch = "wasm32"))]
    store: MemoryStore,
}

impl Cache {
    /// Open the default Key-Value store.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cache = Cache::open_default()?;
    /// ```
    #[cfg(target_arch = "wasm32")]
    pub fn open_default() -> Result<Self, CacheError> {
        let store = spin_sdk::key_value::Store::open_default()
            .map_err(|e| CacheError::OpenError(e.to_string()))?;
        Ok(Self { store })
    }

    /// Open a named Key-Value store.
    #[cfg(target_arch = "wasm32")]
    pub fn open(name: &str) -> Result<Self, CacheError> {
        let store = spin_sdk::key_value::Store::open(name)
            .map_err(|e| CacheError::OpenError(format!("{}: {}", name, e)))?;
        Ok(Self { store })
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn open_default() -> Result<Self, CacheError> {
        Self::open("default")
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn open(name: &str) -> Result<Self, CacheError> {
        tracing::debug!(store = name, "opening in-process key-value store");
        Ok(Self {
            store: MemoryStore::new(),
        })
    }
}

#[cfg(target_arch = "wasm32")]
impl BlobStore for Cache {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        self.store
            .get(key)
            .map_err(|e| CacheError::StoreError(e.to_string()))
    }

    fn write(&self, key: &str, bytes: &[u8]) -> Result<(), CacheError> {
        self.store
            .set(key, bytes)
            .map_err(|e| CacheError::StoreError(e.to_string()))
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl BlobStore for Cache {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        self.store.read(key)
    }

    fn write(&self, key: &str, bytes: &[u8]) -> Result<(), CacheError> {
        self.store.write(key, bytes)
    }
}
