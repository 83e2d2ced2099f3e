//! In-process catalog for development and testing.

use crate::catalog::{Product, ProductCatalog, Stock, StockService};
use crate::error::CartError;
use crate::ids::ProductId;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Catalog and stock served from memory.
///
/// Stock levels can be changed while a store is using the inventory, which
/// is how tests simulate other shoppers draining stock.
#[derive(Debug, Default)]
pub struct StaticInventory {
    products: RwLock<HashMap<ProductId, Product>>,
    stock: RwLock<HashMap<ProductId, i64>>,
}

impl StaticInventory {
    /// Create an empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a product with the given stock.
    pub fn with_product(self, product: Product, stock: i64) -> Self {
        self.insert(product, stock);
        self
    }

    /// Add or replace a product and its stock.
    pub fn insert(&self, product: Product, stock: i64) {
        let id = product.id;
        self.products
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, product);
        self.set_stock(id, stock);
    }

    /// Set the stock level of a product.
    pub fn set_stock(&self, product_id: ProductId, amount: i64) {
        self.stock
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(product_id, amount);
    }
}

#[async_trait]
impl StockService for StaticInventory {
    async fn stock(&self, product_id: ProductId) -> Result<Stock, CartError> {
        self.stock
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&product_id)
            .map(|amount| Stock::new(product_id, *amount))
            .ok_or(CartError::ProductNotFound(product_id))
    }
}

#[async_trait]
impl ProductCatalog for StaticInventory {
    async fn product(&self, product_id: ProductId) -> Result<Product, CartError> {
        self.products
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&product_id)
            .cloned()
            .ok_or(CartError::ProductNotFound(product_id))
    }
}
