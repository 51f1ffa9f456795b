//! notify::mock
//!
//! In-memory relay for tests.
//!
//! # Example
//!
//! ```
//! use groundwork::notify::{ContactMessage, MockRelay, NotificationRelay};
//!
//! # tokio_test::block_on(async {
//! let relay = MockRelay::new();
//! relay.send(&ContactMessage::new().param("phone", "555-0100")).await.unwrap();
//!
//! assert_eq!(relay.sent().len(), 1);
//! assert_eq!(relay.sent()[0].get("phone"), Some("555-0100"));
//! # });
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use super::traits::{ContactMessage, NotificationRelay, RelayError};

/// Mock relay recording every message.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping; clones share state.
#[derive(Debug, Clone, Default)]
pub struct MockRelay {
    inner: Arc<Mutex<MockRelayInner>>,
}

#[derive(Debug, Default)]
struct MockRelayInner {
    /// Delivered messages, oldest first.
    sent: Vec<ContactMessage>,
    /// Error returned by every send while set.
    fail_with: Option<RelayError>,
    /// Number of send attempts, including failures.
    attempts: usize,
}

impl MockRelay {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MockRelayInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Make every send fail with `err`.
    pub fn failing(self, err: RelayError) -> Self {
        self.lock().fail_with = Some(err);
        self
    }

    pub fn set_fail_with(&self, err: Option<RelayError>) {
        self.lock().fail_with = err;
    }

    /// Messages delivered so far.
    pub fn sent(&self) -> Vec<ContactMessage> {
        self.lock().sent.clone()
    }

    pub fn attempts(&self) -> usize {
        self.lock().attempts
    }
}

#[async_trait]
impl NotificationRelay for MockRelay {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn send(&self, message: &ContactMessage) -> Result<(), RelayError> {
        let mut inner = self.lock();
        inner.attempts += 1;
        if let Some(err) = &inner.fail_with {
            return Err(err.clone());
        }
        inner.sent.push(message.clone());
        Ok(())
    }
}
