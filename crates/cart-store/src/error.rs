//! Cart error types.

use crate::ids::ProductId;
use crate::snapshot::SnapshotError;
use thiserror::Error;

/// Errors that can occur while validating or applying a cart mutation.
#[derive(Error, Debug)]
pub enum CartError {
    /// Requested quantity exceeds the stock the service reports.
    #[error("Insufficient stock for product {product_id}: requested {requested}, available {available}")]
    StockInsufficient {
        product_id: ProductId,
        requested: i64,
        available: i64,
    },

    /// Product is not in the cart.
    #[error("Product not in cart: {0}")]
    NotInCart(ProductId),

    /// Product already has a line in the cart.
    #[error("Product already in cart: {0}")]
    DuplicateProduct(ProductId),

    /// Catalog has no such product.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Quantity is not a positive integer.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in cart calculation")]
    Overflow,

    /// Product or stock service call failed.
    #[error("Service error: {0}")]
    ServiceError(String),

    /// Blob store read or write failed.
    #[error("Cache error: {0}")]
    CacheError(String),

    /// Snapshot could not be encoded or decoded.
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

/// What the user is told about a failed mutation.
///
/// Only stock exhaustion is distinguished; every other cause is reported as
/// a generic failure of the operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    StockInsufficient,
    OperationFailed,
}

impl CartError {
    /// Fold the error into the user-facing taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CartError::StockInsufficient { .. } => ErrorKind::StockInsufficient,
            _ => ErrorKind::OperationFailed,
        }
    }
}

impl From<cart_cache::CacheError> for CartError {
    fn from(e: cart_cache::CacheError) -> Self {
        CartError::CacheError(e.to_string())
    }
}

impl From<cart_data::FetchError> for CartError {
    fn from(e: cart_data::FetchError) -> Self {
        CartError::ServiceError(e.to_string())
    }
}
