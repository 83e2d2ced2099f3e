//! Stock availability reported by the stock service.

use crate::error::CartError;
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// Units of a product currently available for purchase.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stock {
    /// Product the stock refers to.
    pub id: ProductId,
    /// Available units.
    pub amount: i64,
}

impl Stock {
    /// Create a stock record.
    pub fn new(id: ProductId, amount: i64) -> Self {
        Self { id, amount }
    }

    /// Check if a specific quantity is available.
    pub fn can_fulfill(&self, quantity: i64) -> bool {
        quantity <= self.amount
    }

    /// Fail with [`CartError::StockInsufficient`] unless `quantity` is available.
    pub fn ensure_available(&self, quantity: i64) -> Result<(), CartError> {
        if self.can_fulfill(quantity) {
            Ok(())
        } else {
            Err(CartError::StockInsufficient {
                product_id: self.id,
                requested: quantity,
                available: self.amount,
            })
        }
    }
}
