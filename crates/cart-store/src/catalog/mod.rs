//! Product catalog and stock lookups.
//!
//! The cart only reads from the catalog. [`StockService`] and
//! [`ProductCatalog`] are the seams the store is built against;
//! [`HttpInventory`] talks to the storefront REST API and
//! [`StaticInventory`] serves fixed data in-process.

mod http;
mod memory;
mod product;
mod stock;

pub use http::HttpInventory;
pub use memory::StaticInventory;
pub use product::Product;
pub use stock::Stock;

use crate::error::CartError;
use crate::ids::ProductId;
use async_trait::async_trait;

/// Source of current stock levels.
#[async_trait]
pub trait StockService: Send + Sync {
    /// Get the available stock for a product.
    async fn stock(&self, product_id: ProductId) -> Result<Stock, CartError>;
}

/// Source of product details.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Get a product by id.
    async fn product(&self, product_id: ProductId) -> Result<Product, CartError>;
}
