//! Blob storage for persisted cart snapshots.
//!
//! Every backend implements [`BlobStore`], a synchronous get/set store of
//! opaque bytes under string keys. The cart writes its whole snapshot under a
//! single key after each successful mutation and reads it once at startup.
//!
//! - [`Cache`]: Spin's Key-Value Store on `wasm32`, an in-process map elsewhere
//! - [`MemoryStore`]: cloneable in-process store, handy for tests
//! - [`FileStore`]: one file per key in a directory, written atomically
//!
//! # Example
//!
//! ```rust,ignore
//! use cart_cache::{BlobStore, Cache};
//!
//! let cache = Cache::open_default()?;
//! cache.write("@RocketShoes:cart", br#"{"version":1,"items":[]}"#)?;
//! let bytes = cache.read("@RocketShoes:cart")?;
//! ```

mod blob;
mod error;
mod file;
mod kv;

pub use blob::{BlobStore, MemoryStore};
pub use error::CacheError;
pub use file::FileStore;
pub use kv::Cache;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{BlobStore, Cache, CacheError, FileStore, MemoryStore};
}
