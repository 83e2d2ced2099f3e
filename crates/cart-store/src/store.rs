//! The cart state store.
//!
//! [`CartStore`] owns the committed cart and keeps the persisted snapshot in
//! step with it. Mutations never return errors; failures are reported to
//! the shopper through the [`NotificationSink`] and leave the cart as it
//! was.
//!
//! Remote calls happen first. The cart is then re-validated and changed
//! under a write lock that is never held across an `.await`, so mutations
//! that interleave while waiting on the network all apply in turn.

use crate::cart::{Cart, CartLineItem};
use crate::catalog::{ProductCatalog, StockService};
use crate::config::{CartConfig, Operation};
use crate::error::CartError;
use crate::ids::ProductId;
use crate::money::Price;
use crate::notify::NotificationSink;
use crate::snapshot;
use cart_cache::BlobStore;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};
use tracing::{debug, instrument, warn};

/// Collaborators a [`CartStore`] talks to.
#[derive(Clone)]
pub struct CartServices {
    pub stock: Arc<dyn StockService>,
    pub catalog: Arc<dyn ProductCatalog>,
    pub storage: Arc<dyn BlobStore>,
    pub notifier: Arc<dyn NotificationSink>,
}

impl CartServices {
    /// Use one backend for both stock and product lookups.
    pub fn new<I>(
        inventory: Arc<I>,
        storage: Arc<dyn BlobStore>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self
    where
        I: StockService + ProductCatalog + 'static,
    {
        Self {
            stock: inventory.clone(),
            catalog: inventory,
            storage,
            notifier,
        }
    }
}

impl std::fmt::Debug for CartServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartServices").finish_non_exhaustive()
    }
}

/// Request to set a line's quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductAmount {
    pub product_id: ProductId,
    pub amount: i64,
}

impl UpdateProductAmount {
    pub fn new(product_id: ProductId, amount: i64) -> Self {
        Self { product_id, amount }
    }
}

/// Shopping cart with stock validation and persistence.
#[derive(Debug)]
pub struct CartStore {
    state: RwLock<Cart>,
    services: CartServices,
    config: CartConfig,
}

impl CartStore {
    /// Create a store, restoring the cart from the persisted snapshot.
    ///
    /// A missing, unreadable, or corrupt snapshot yields an empty cart. The
    /// stored blob is left alone until the next successful mutation.
    pub fn new(services: CartServices, config: CartConfig) -> Self {
        let cart = restore(services.storage.as_ref(), &config.storage_key);
        debug!(lines = cart.len(), key = %config.storage_key, "cart restored");

        Self {
            state: RwLock::new(cart),
            services,
            config,
        }
    }

    /// Snapshot of the committed cart.
    pub fn cart(&self) -> Cart {
        self.read().clone()
    }

    /// Committed line items in insertion order.
    pub fn items(&self) -> Vec<CartLineItem> {
        self.read().items().to_vec()
    }

    /// Check if the product has a line.
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.read().contains(product_id)
    }

    /// Total units in the cart, for the header badge.
    pub fn item_count(&self) -> Result<i64, CartError> {
        self.read().item_count()
    }

    /// Amount per product, for listing badges.
    pub fn amounts(&self) -> HashMap<ProductId, i64> {
        self.read().amounts()
    }

    /// Cart total.
    pub fn total(&self) -> Result<Price, CartError> {
        self.read().total()
    }

    pub fn config(&self) -> &CartConfig {
        &self.config
    }

    /// Add one unit of a product.
    ///
    /// Stock is always queried first. A product not yet in the cart is
    /// fetched from the catalog and appended with amount 1.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn add_product(&self, product_id: ProductId) {
        match self.try_add_product(product_id).await {
            Ok(amount) => debug!(amount, "product added"),
            Err(e) => self.report(Operation::Add, &e),
        }
    }

    /// Remove a product's line.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub fn remove_product(&self, product_id: ProductId) {
        match self.commit(|cart| cart.remove(product_id)) {
            Ok(line) => debug!(amount = line.amount, "product removed"),
            Err(e) => self.report(Operation::Remove, &e),
        }
    }

    /// Set the quantity of a product already in the cart.
    ///
    /// Amounts of zero or below are ignored without notifying; removal goes
    /// through [`CartStore::remove_product`].
    #[instrument(skip(self), fields(product_id = %update.product_id, amount = update.amount))]
    pub async fn update_product_amount(&self, update: UpdateProductAmount) {
        if update.amount <= 0 {
            debug!("ignoring non-positive amount");
            return;
        }

        match self.try_update_amount(update).await {
            Ok(()) => debug!("amount updated"),
            Err(e) => self.report(Operation::UpdateAmount, &e),
        }
    }

    async fn try_add_product(&self, product_id: ProductId) -> Result<i64, CartError> {
        let in_cart = self.contains(product_id);
        let stock = self.services.stock.stock(product_id).await?;

        let product = if in_cart {
            None
        } else {
            Some(self.services.catalog.product(product_id).await?)
        };

        let check_first = self.config.check_stock_on_first_add;
        self.commit(move |cart| {
            // Another add may have created the line while we were waiting, or a
            // remove may have dropped the one we saw.
            if let Some(line) = cart.get(product_id) {
                let requested = line.amount.checked_add(1).ok_or(CartError::Overflow)?;
                stock.ensure_available(requested)?;
                return cart.increment(product_id);
            }

            let product = product.ok_or(CartError::NotInCart(product_id))?;
            if check_first {
                stock.ensure_available(1)?;
            }
            cart.add_line(product)?;
            Ok(1)
        })
    }

    async fn try_update_amount(&self, update: UpdateProductAmount) -> Result<(), CartError> {
        let UpdateProductAmount { product_id, amount } = update;
        if !self.contains(product_id) {
            return Err(CartError::NotInCart(product_id));
        }

        let stock = self.services.stock.stock(product_id).await?;

        self.commit(move |cart| {
            stock.ensure_available(amount)?;
            cart.set_amount(product_id, amount)
        })
    }

    /// Apply `change` to a copy of the latest cart, persist it, then publish
    /// it. Nothing is published if any step fails.
    fn commit<T>(
        &self,
        change: impl FnOnce(&mut Cart) -> Result<T, CartError>,
    ) -> Result<T, CartError> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);

        let mut next = state.clone();
        let output = change(&mut next)?;

        let bytes = snapshot::encode(&next)?;
        self.services
            .storage
            .write(&self.config.storage_key, &bytes)?;

        *state = next;
        Ok(output)
    }

    fn report(&self, operation: Operation, error: &CartError) {
        warn!(
            operation = operation.as_str(),
            error = %error,
            "cart mutation failed"
        );
        let message = self.config.messages.for_failure(operation, error.kind());
        self.services.notifier.error(message);
    }

    fn read(&self) -> RwLockReadGuard<'_, Cart> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }
}

fn restore(storage: &dyn BlobStore, key: &str) -> Cart {
    let bytes = match storage.read(key) {
        Ok(Some(bytes)) => bytes,
        Ok(None) => return Cart::new(),
        Err(e) => {
            warn!(key, error = %e, "failed to read cart snapshot, starting empty");
            return Cart::new();
        }
    };

    snapshot::decode(&bytes).unwrap_or_else(|e| {
        warn!(key, error = %e, "discarding unreadable cart snapshot");
        Cart::new()
    })
}
