//! Catalog and stock over the storefront REST API.

use crate::catalog::{Product, ProductCatalog, Stock, StockService};
use crate::config::CartConfig;
use crate::error::CartError;
use crate::ids::ProductId;
use async_trait::async_trait;
use cart_data::{FetchClient, Response};
use tracing::instrument;

/// Reads `GET /stock/{id}` and `GET /products/{id}`.
#[derive(Debug, Clone)]
pub struct HttpInventory {
    client: FetchClient,
}

impl HttpInventory {
    /// Wrap an existing client. Paths are resolved against its base URL.
    pub fn new(client: FetchClient) -> Self {
        Self { client }
    }

    /// Build a client pointed at the configured API.
    pub fn from_config(config: &CartConfig) -> Self {
        Self::new(
            FetchClient::new()
                .with_base_url(config.api_base_url.as_str())
                .with_default_header("Accept", "application/json"),
        )
    }
}

#[async_trait]
impl StockService for HttpInventory {
    #[instrument(skip(self), fields(product_id = %product_id))]
    async fn stock(&self, product_id: ProductId) -> Result<Stock, CartError> {
        let response = self
            .client
            .get(format!("/stock/{}", product_id))
            .send()
            .await?;
        decode_stock(response)
    }
}

#[async_trait]
impl ProductCatalog for HttpInventory {
    #[instrument(skip(self), fields(product_id = %product_id))]
    async fn product(&self, product_id: ProductId) -> Result<Product, CartError> {
        let response = self
            .client
            .get(format!("/products/{}", product_id))
            .send()
            .await?;
        decode_product(product_id, response)
    }
}

fn decode_stock(response: Response) -> Result<Stock, CartError> {
    Ok(response.error_for_status()?.json()?)
}

fn decode_product(product_id: ProductId, response: Response) -> Result<Product, CartError> {
    if response.is_not_found() {
        return Err(CartError::ProductNotFound(product_id));
    }
    Ok(response.error_for_status()?.json()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str) -> Response {
        Response::new(status, body.as_bytes().to_vec())
    }

    #[test]
    fn test_decode_stock() {
        let stock = decode_stock(response(200, r#"{"id": 1, "amount": 3}"#)).unwrap();
        assert_eq!(stock, Stock::new(ProductId::new(1), 3));
    }

    #[test]
    fn test_decode_stock_http_error() {
        let err = decode_stock(response(503, "unavailable")).unwrap_err();
        assert!(matches!(err, CartError::ServiceError(_)));
    }

    #[test]
    fn test_decode_stock_bad_body() {
        let err = decode_stock(response(200, r#"{"amount": "lots"}"#)).unwrap_err();
        assert!(matches!(err, CartError::ServiceError(_)));
    }

    #[test]
    fn test_decode_product() {
        let body = r#"{"id": 2, "title": "Tênis VR Caminhada", "price": 139.9, "image": "tenis2.jpg"}"#;
        let product = decode_product(ProductId::new(2), response(200, body)).unwrap();
        assert_eq!(product.title, "Tênis VR Caminhada");
        assert_eq!(product.image, "tenis2.jpg");
    }

    #[test]
    fn test_decode_product_not_found() {
        let err = decode_product(ProductId::new(99), response(404, "{}")).unwrap_err();
        assert!(matches!(err, CartError::ProductNotFound(id) if id == ProductId::new(99)));
    }
}
