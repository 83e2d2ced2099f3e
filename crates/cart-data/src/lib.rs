//! HTTP client for the storefront API.
//!
//! Requests go out through Spin's outbound HTTP on `wasm32` and through
//! `reqwest` everywhere else. Responses are buffered and decoded as JSON.
//!
//! # Example
//!
//! ```rust,ignore
//! use cart_data::FetchClient;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Stock {
//!     id: u64,
//!     amount: i64,
//! }
//!
//! let client = FetchClient::new().with_base_url("http://localhost:3333");
//! let stock: Stock = client
//!     .get("/stock/1")
//!     .send()
//!     .await?
//!     .error_for_status()?
//!     .json()?;
//! ```

mod error;
mod request;
mod response;

pub use error::FetchError;
pub use response::Response;

use request::Request;
use std::collections::HashMap;

/// HTTP client for making outbound requests.
#[derive(Debug, Clone)]
pub struct FetchClient {
    base_url: Option<String>,
    default_headers: HashMap<String, String>,
    #[cfg(not(target_arch = "wasm32"))]
    http: reqwest::Client,
}

impl Default for FetchClient {
    fn default() -> Self {
        Self::new()
    }
}

impl FetchClient {
    /// Create a new HTTP client.
    pub fn new() -> Self {
        Self {
            base_url: None,
            default_headers: HashMap::new(),
            #[cfg(not(target_arch = "wasm32"))]
            http: reqwest::Client::new(),
        }
    }

    /// Create a client with a base URL that will be prepended to all requests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add a default header that will be included in all requests.
    pub fn with_default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// Create a GET request. Relative URLs are resolved against the base URL.
    pub fn get(&self, url: impl Into<String>) -> ClientRequestBuilder {
        let url = url.into();
        let full_url = match &self.base_url {
            Some(base) if !url.starts_with("http://") && !url.starts_with("https://") => {
                format!(
                    "{}/{}",
                    base.trim_end_matches('/'),
                    url.trim_start_matches('/')
                )
            }
            _ => url,
        };

        let mut request = Request::get(full_url);
        for (key, value) in &self.default_headers {
            request = request.header(key.clone(), value.clone());
        }

        ClientRequestBuilder {
            request,
            #[cfg(not(target_arch = "wasm32"))]
            http: self.http.clone(),
        }
    }
}

/// A request bound to a client.
pub struct ClientRequestBuilder {
    request: Request,
    #[cfg(not(target_arch = "wasm32"))]
    http: reqwest::Client,
}

impl ClientRequestBuilder {
    /// Send the request and return the buffered response.
    #[cfg(target_arch = "wasm32")]
    pub async fn send(self) -> Result<Response, FetchError> {
        use spin_sdk::http::{Method, Request as SpinRequest};

        tracing::debug!(url = %self.request.url, "sending request");

        let mut request = SpinRequest::builder();
        request.method(Method::Get);
        request.uri(&self.request.url);
        for (key, value) in &self.request.headers {
            request.header(key.as_str(), value.as_str());
        }

        let response: spin_sdk::http::Response = spin_sdk::http::send(request.build())
            .await
            .map_err(|e| FetchError::RequestError(e.to_string()))?;

        Ok(Response::new(*response.status(), response.into_body()))
    }

    /// Send the request and return the buffered response.
    #[cfg(not(target_arch = "wasm32"))]
    pub async fn send(self) -> Result<Response, FetchError> {
        tracing::debug!(url = %self.request.url, "sending request");

        let mut request = self.http.get(self.request.url.as_str());
        for (key, value) in &self.request.headers {
            request = request.header(key.as_str(), value.as_str());
        }

        let response = request
            .send()
            .await
            .map_err(|e| FetchError::RequestError(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::RequestError(e.to_string()))?
            .to_vec();

        Ok(Response::new(status, body))
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FetchClient, FetchError, Response};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_joining() {
        let client = FetchClient::new().with_base_url("http://localhost:3333/");

        assert_eq!(client.get("/stock/7").request.url, "http://localhost:3333/stock/7");
        assert_eq!(
            client.get("products/7").request.url,
            "http://localhost:3333/products/7"
        );
    }

    #[test]
    fn test_absolute_url_bypasses_base() {
        let client = FetchClient::new().with_base_url("http://localhost:3333");
        let req = client.get("https://cdn.example.com/stock/1");
        assert_eq!(req.request.url, "https://cdn.example.com/stock/1");
    }

    #[test]
    fn test_default_headers_applied() {
        let client = FetchClient::new().with_default_header("Accept", "application/json");
        let req = client.get("http://localhost:3333/stock/1");

        assert_eq!(req.request.headers["Accept"], "application/json");
    }
}
