//! Catalog product type.

use crate::ids::ProductId;
use crate::money::Price;
use serde::{Deserialize, Serialize};

/// A product as returned by the catalog.
///
/// Only the attributes the cart relies on are typed. Anything else the
/// catalog sends (brand, sizes, ...) is kept in `attributes` so that it
/// survives the round-trip through the persisted snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Unit price.
    pub price: Price,
    /// Image URL.
    #[serde(default)]
    pub image: String,
    /// Attributes not modelled above, preserved verbatim.
    #[serde(flatten)]
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

impl Product {
    /// Create a product with no image and no extra attributes.
    pub fn new(id: ProductId, title: impl Into<String>, price: Price) -> Self {
        Self {
            id,
            title: title.into(),
            price,
            image: String::new(),
            attributes: serde_json::Map::new(),
        }
    }

    /// Set the image URL.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_catalog_payload() {
        let json = r#"{
            "id": 1,
            "title": "Tênis de Caminhada Leve Confortável",
            "price": 179.9,
            "image": "https://rocketseat-cdn.s3-sa-east-1.amazonaws.com/modulo-redux/tenis1.jpg"
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();

        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.price.cents(), 17990);
        assert!(product.attributes.is_empty());
    }

    #[test]
    fn test_unknown_attributes_preserved() {
        let json = r#"{"id": 2, "title": "Shoe", "price": 139.9, "image": "", "brand": "Rocket", "sizes": [38, 39]}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.attributes["brand"], "Rocket");

        let back: serde_json::Value = serde_json::to_value(&product).unwrap();
        assert_eq!(back["sizes"], serde_json::json!([38, 39]));
        assert_eq!(back["price"], serde_json::json!(139.9));
    }

    #[test]
    fn test_missing_image_defaults() {
        let product: Product = serde_json::from_str(r#"{"id": 3, "title": "Shoe", "price": 10}"#).unwrap();
        assert_eq!(product.image, "");
        assert_eq!(product, Product::new(ProductId::new(3), "Shoe", Price::from_cents(1000)));
    }
}
