//! Shopping cart module.
//!
//! Contains the cart reducer and its line items.

mod cart;

pub use cart::{Cart, CartLineItem};
