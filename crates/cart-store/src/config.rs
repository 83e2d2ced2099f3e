//! Cart configuration.

use crate::error::ErrorKind;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Key the snapshot is stored under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "@RocketShoes:cart";

/// Base URL of the storefront API unless configured otherwise.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3333";

/// Cart store configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartConfig {
    /// Blob store key holding the snapshot.
    pub storage_key: String,
    /// Base URL for `/stock/{id}` and `/products/{id}`.
    pub api_base_url: String,
    /// Check stock before adding the first unit of a product. Off by
    /// default: a new line is added whatever the stock says, and only
    /// later increments are checked.
    pub check_stock_on_first_add: bool,
    /// Notification texts.
    pub messages: Messages,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            check_stock_on_first_add: false,
            messages: Messages::default(),
        }
    }
}

impl CartConfig {
    /// Load config from a file. `.json` files are parsed as JSON, anything
    /// else as TOML. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            Self::from_toml(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Parse a TOML document.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

/// Texts shown to the shopper when a mutation fails.
///
/// These are fixed per operation; the underlying cause never leaks into
/// them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub out_of_stock: String,
    pub add_failed: String,
    pub remove_failed: String,
    pub update_failed: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            out_of_stock: "Quantidade solicitada fora de estoque".to_string(),
            add_failed: "Erro na adição do produto".to_string(),
            remove_failed: "Erro na remoção do produto".to_string(),
            update_failed: "Erro na alteração de quantidade do produto".to_string(),
        }
    }
}

/// The three cart mutations, for picking a failure message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Add,
    Remove,
    UpdateAmount,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Remove => "remove",
            Operation::UpdateAmount => "update_amount",
        }
    }
}

impl Messages {
    /// Message for a failed operation.
    pub fn for_failure(&self, operation: Operation, kind: ErrorKind) -> &str {
        match (kind, operation) {
            (ErrorKind::StockInsufficient, _) => &self.out_of_stock,
            (ErrorKind::OperationFailed, Operation::Add) => &self.add_failed,
            (ErrorKind::OperationFailed, Operation::Remove) => &self.remove_failed,
            (ErrorKind::OperationFailed, Operation::UpdateAmount) => &self.update_failed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CartConfig::default();
        assert_eq!(config.storage_key, "@RocketShoes:cart");
        assert_eq!(config.api_base_url, "http://localhost:3333");
        assert!(!config.check_stock_on_first_add);
    }

    #[test]
    fn test_partial_toml() {
        let config = CartConfig::from_toml(
            r#"
            api_base_url = "https://api.rocketshoes.dev"

            [messages]
            out_of_stock = "Requested quantity is out of stock"
            "#,
        )
        .unwrap();

        assert_eq!(config.api_base_url, "https://api.rocketshoes.dev");
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(config.messages.out_of_stock, "Requested quantity is out of stock");
        assert_eq!(config.messages.remove_failed, "Erro na remoção do produto");
    }

    #[test]
    fn test_load_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.toml");
        std::fs::write(&path, "check_stock_on_first_add = true\n").unwrap();

        let config = CartConfig::load(&path).unwrap();
        assert!(config.check_stock_on_first_add);
        assert_eq!(config.messages, Messages::default());
    }

    #[test]
    fn test_load_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.json");
        std::fs::write(&path, r#"{"storage_key": "cart:test"}"#).unwrap();

        let config = CartConfig::load(&path).unwrap();
        assert_eq!(config.storage_key, "cart:test");
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.toml");
        std::fs::write(&path, "check_stock_on_first_add = \"yes\"").unwrap();

        let err = CartConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse TOML config"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = CartConfig::load("/nonexistent/cart.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_failure_messages() {
        let messages = Messages::default();
        assert_eq!(
            messages.for_failure(Operation::Remove, ErrorKind::StockInsufficient),
            "Quantidade solicitada fora de estoque"
        );
        assert_eq!(
            messages.for_failure(Operation::Add, ErrorKind::OperationFailed),
            "Erro na adição do produto"
        );
        assert_eq!(
            messages.for_failure(Operation::UpdateAmount, ErrorKind::OperationFailed),
            "Erro na alteração de quantidade do produto"
        );
    }
}
