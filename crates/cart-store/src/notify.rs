//! User-facing error notifications.

use futures::channel::mpsc::UnboundedSender;
use std::sync::{Mutex, PoisonError};

/// Fire-and-forget sink for messages shown to the shopper (toasts).
pub trait NotificationSink: Send + Sync {
    /// Show an error message.
    fn error(&self, message: &str);
}

/// Forwards messages to a UI task. A closed receiver drops the message.
impl NotificationSink for UnboundedSender<String> {
    fn error(&self, message: &str) {
        if self.unbounded_send(message.to_string()).is_err() {
            tracing::debug!(dropped = message, "notification receiver gone");
        }
    }
}

/// Keeps every message in memory until drained.
#[derive(Debug, Default)]
pub struct NotificationLog {
    messages: Mutex<Vec<String>>,
}

impl NotificationLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages received so far.
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Remove and return all messages.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.messages.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// Check if nothing was received.
    pub fn is_empty(&self) -> bool {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }
}

impl NotificationSink for NotificationLog {
    fn error(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
    }
}
