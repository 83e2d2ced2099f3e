//! Cart and line item types.

use crate::catalog::Product;
use crate::error::CartError;
use crate::ids::ProductId;
use crate::money::Price;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A product in the cart together with its quantity.
///
/// Serialized flat: the product's attributes and `amount` share one object,
/// the shape storefront clients have always persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLineItem {
    #[serde(flatten)]
    pub product: Product,
    /// Quantity, always positive.
    pub amount: i64,
}

impl CartLineItem {
    /// Create a line with a single unit.
    pub fn new(product: Product) -> Self {
        Self { product, amount: 1 }
    }

    /// Identity key of the line.
    pub fn id(&self) -> ProductId {
        self.product.id
    }

    /// `price * amount`.
    pub fn subtotal(&self) -> Result<Price, CartError> {
        self.product
            .price
            .try_multiply(self.amount)
            .ok_or(CartError::Overflow)
    }
}

/// Ordered line items, at most one per product.
///
/// Mutators validate before touching anything, so a failed call leaves the
/// cart exactly as it was.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from lines, rejecting duplicate products and
    /// non-positive amounts.
    pub fn from_items(items: Vec<CartLineItem>) -> Result<Self, CartError> {
        let mut cart = Self::new();
        for item in items {
            if item.amount <= 0 {
                return Err(CartError::InvalidQuantity(item.amount));
            }
            if cart.contains(item.id()) {
                return Err(CartError::DuplicateProduct(item.id()));
            }
            cart.items.push(item);
        }
        Ok(cart)
    }

    /// Append a new line with amount 1.
    pub fn add_line(&mut self, product: Product) -> Result<(), CartError> {
        if self.contains(product.id) {
            return Err(CartError::DuplicateProduct(product.id));
        }
        self.items.push(CartLineItem::new(product));
        Ok(())
    }

    /// Add one unit to an existing line and return the new amount.
    pub fn increment(&mut self, product_id: ProductId) -> Result<i64, CartError> {
        let item = self.get_mut(product_id)?;
        item.amount = item.amount.checked_add(1).ok_or(CartError::Overflow)?;
        Ok(item.amount)
    }

    /// Set the amount of an existing line.
    pub fn set_amount(&mut self, product_id: ProductId, amount: i64) -> Result<(), CartError> {
        if amount <= 0 {
            return Err(CartError::InvalidQuantity(amount));
        }
        self.get_mut(product_id)?.amount = amount;
        Ok(())
    }

    /// Remove a line and return it.
    pub fn remove(&mut self, product_id: ProductId) -> Result<CartLineItem, CartError> {
        let index = self
            .items
            .iter()
            .position(|i| i.id() == product_id)
            .ok_or(CartError::NotInCart(product_id))?;
        Ok(self.items.remove(index))
    }

    /// Get a line by product.
    pub fn get(&self, product_id: ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|i| i.id() == product_id)
    }

    /// Check if the product has a line.
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.get(product_id).is_some()
    }

    /// Lines in insertion order.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CartLineItem> {
        self.items.iter()
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total units across all lines.
    pub fn item_count(&self) -> Result<i64, CartError> {
        self.items
            .iter()
            .try_fold(0i64, |acc, item| acc.checked_add(item.amount))
            .ok_or(CartError::Overflow)
    }

    /// Amount per product, as shown on product listing badges.
    pub fn amounts(&self) -> HashMap<ProductId, i64> {
        self.items.iter().map(|i| (i.id(), i.amount)).collect()
    }

    /// Sum of line subtotals.
    pub fn total(&self) -> Result<Price, CartError> {
        self.items.iter().try_fold(Price::zero(), |acc, item| {
            acc.try_add(&item.subtotal()?).ok_or(CartError::Overflow)
        })
    }

    fn get_mut(&mut self, product_id: ProductId) -> Result<&mut CartLineItem, CartError> {
        self.items
            .iter_mut()
            .find(|i| i.id() == product_id)
            .ok_or(CartError::NotInCart(product_id))
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartLineItem;
    type IntoIter = std::slice::Iter<'a, CartLineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: u64, cents: i64) -> Product {
        Product::new(ProductId::new(id), format!("Product {}", id), Price::from_cents(cents))
    }

    #[test]
    fn test_add_line() {
        let mut cart = Cart::new();
        cart.add_line(product(1, 1000)).unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(ProductId::new(1)).unwrap().amount, 1);
    }

    #[test]
    fn test_add_duplicate_rejected() {
        let mut cart = Cart::new();
        cart.add_line(product(1, 1000)).unwrap();

        let err = cart.add_line(product(1, 1000)).unwrap_err();
        assert!(matches!(err, CartError::DuplicateProduct(_)));
        assert_eq!(cart.item_count().unwrap(), 1);
    }

    #[test]
    fn test_increment() {
        let mut cart = Cart::new();
        cart.add_line(product(1, 1000)).unwrap();

        assert_eq!(cart.increment(ProductId::new(1)).unwrap(), 2);
        assert!(matches!(
            cart.increment(ProductId::new(2)),
            Err(CartError::NotInCart(_))
        ));
    }

    #[test]
    fn test_set_amount() {
        let mut cart = Cart::new();
        cart.add_line(product(3, 500)).unwrap();

        cart.set_amount(ProductId::new(3), 10).unwrap();
        assert_eq!(cart.get(ProductId::new(3)).unwrap().amount, 10);

        assert!(matches!(
            cart.set_amount(ProductId::new(3), 0),
            Err(CartError::InvalidQuantity(0))
        ));
        assert_eq!(cart.get(ProductId::new(3)).unwrap().amount, 10);
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut cart = Cart::new();
        for id in 1..=3 {
            cart.add_line(product(id, 100)).unwrap();
        }

        let removed = cart.remove(ProductId::new(2)).unwrap();
        assert_eq!(removed.id(), ProductId::new(2));

        let ids: Vec<u64> = cart.iter().map(|i| i.id().get()).collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(cart.remove(ProductId::new(2)).is_err());
    }

    #[test]
    fn test_totals() {
        let mut cart = Cart::new();
        cart.add_line(product(1, 17990)).unwrap();
        cart.add_line(product(2, 13990)).unwrap();
        cart.set_amount(ProductId::new(1), 2).unwrap();

        assert_eq!(cart.item_count().unwrap(), 3);
        assert_eq!(cart.total().unwrap(), Price::from_cents(2 * 17990 + 13990));
        assert_eq!(cart.amounts()[&ProductId::new(1)], 2);
    }

    #[test]
    fn test_item_count_overflow() {
        let mut big = CartLineItem::new(product(1, 100));
        big.amount = i64::MAX;
        let cart = Cart::from_items(vec![big, CartLineItem::new(product(2, 100))]).unwrap();

        assert!(matches!(cart.item_count(), Err(CartError::Overflow)));
        assert!(matches!(cart.total(), Err(CartError::Overflow)));
    }

    #[test]
    fn test_from_items_validates() {
        let line = CartLineItem::new(product(1, 100));
        assert!(Cart::from_items(vec![line.clone()]).is_ok());

        assert!(matches!(
            Cart::from_items(vec![line.clone(), line.clone()]),
            Err(CartError::DuplicateProduct(_))
        ));

        let mut empty = line;
        empty.amount = 0;
        assert!(matches!(
            Cart::from_items(vec![empty]),
            Err(CartError::InvalidQuantity(0))
        ));
    }

    #[test]
    fn test_line_serializes_flat() {
        let mut line = CartLineItem::new(product(1, 17990).with_image("tenis1.jpg"));
        line.amount = 2;

        let value = serde_json::to_value(&line).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": 1,
                "title": "Product 1",
                "price": 179.9,
                "image": "tenis1.jpg",
                "amount": 2
            })
        );

        let back: CartLineItem = serde_json::from_value(value).unwrap();
        assert_eq!(back, line);
        assert!(back.product.attributes.is_empty());
    }
}
