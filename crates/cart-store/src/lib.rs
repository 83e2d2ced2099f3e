//! Storefront shopping cart state store.
//!
//! This crate holds the client-side cart of a storefront and keeps it in
//! step with a persisted snapshot and the remote stock service:
//!
//! - **Cart**: ordered line items and the pure mutations applied to them
//! - **Catalog**: product and stock lookups behind async traits
//! - **Store**: [`CartStore`], the add/remove/update operations
//! - **Snapshot**: the versioned persisted form of the cart
//!
//! # Example
//!
//! Native builds persist through [`FileStore`](cart_cache::FileStore); on
//! wasm32 swap in `Cache::open_default()` to use the Spin key-value store.
//!
//! ```rust,ignore
//! use cart_store::prelude::*;
//! use std::sync::Arc;
//!
//! let config = CartConfig::load("cart.toml")?;
//! let services = CartServices::new(
//!     Arc::new(HttpInventory::from_config(&config)),
//!     Arc::new(FileStore::open("cart-data")?),
//!     Arc::new(NotificationLog::new()),
//! );
//! let store = CartStore::new(services, config);
//!
//! store.add_product(ProductId::new(1)).await;
//! store
//!     .update_product_amount(UpdateProductAmount::new(ProductId::new(1), 3))
//!     .await;
//! println!("Total: {}", store.total()?);
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod config;
pub mod notify;
pub mod snapshot;
pub mod store;

pub use error::{CartError, ErrorKind};
pub use ids::ProductId;
pub use money::Price;
pub use store::{CartServices, CartStore, UpdateProductAmount};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{CartError, ErrorKind};
    pub use crate::ids::ProductId;
    pub use crate::money::Price;

    // Cart
    pub use crate::cart::{Cart, CartLineItem};
    pub use crate::snapshot::SnapshotError;

    // Catalog
    pub use crate::catalog::{
        HttpInventory, Product, ProductCatalog, StaticInventory, Stock, StockService,
    };

    // Store
    pub use crate::config::{CartConfig, Messages, Operation};
    pub use crate::notify::{NotificationLog, NotificationSink};
    pub use crate::store::{CartServices, CartStore, UpdateProductAmount};

    pub use cart_cache::{BlobStore, Cache, FileStore, MemoryStore};
}
