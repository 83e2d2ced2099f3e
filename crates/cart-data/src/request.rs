//! Outbound GET request.

use std::collections::HashMap;

/// A resolved GET request waiting to be sent.
#[derive(Debug, Clone)]
pub(crate) struct Request {
    pub(crate) url: String,
    pub(crate) headers: HashMap<String, String>,
}

impl Request {
    pub(crate) fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: HashMap::new(),
        }
    }

    /// Add a header, replacing any previous value under the same name.
    pub(crate) fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }
}
