//! pages::state
//!
//! Per-view load lifecycle.
//!
//! A view starts in `Loading`, issues one read on activation and settles in
//! `Loaded` or `Failed`. A failed view can be retried, which moves it back
//! to `Loading`. A view that is unmounted while its read is in flight
//! discards the result.
//!
//! ```text
//! Loading --ok--> Loaded
//!    |
//!    +--err--> Failed --retry--> Loading
//! ```

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use thiserror::Error;
use tracing::{debug, error};

use crate::store::StoreError;

/// State of a page view.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Loading,
    Loaded(T),
    Failed(ViewError),
}

impl<T> ViewState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            ViewState::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ViewError> {
        match self {
            ViewState::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// A failed load, as shown to the visitor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ViewError {
    /// Page-specific message shown to the visitor
    pub message: String,
    /// The underlying store error, for logs
    pub cause: String,
}

impl ViewError {
    pub fn new(message: impl Into<String>, cause: &StoreError) -> Self {
        Self {
            message: message.into(),
            cause: cause.to_string(),
        }
    }
}

/// What happened to a load's result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The result was stored in the view.
    Applied,
    /// The view was unmounted (or reloaded) before the result arrived.
    Discarded,
    /// The view was not in a state that allows loading.
    Skipped,
}

/// A page view holding its load state.
///
/// Clones share state, so a clone can be handed to the task performing the
/// read while the original is unmounted from elsewhere.
///
/// # Example
///
/// ```
/// use groundwork::pages::{LoadOutcome, PageView, ViewState};
/// use groundwork::store::StoreError;
///
/// # tokio_test::block_on(async {
/// let view: PageView<u32> = PageView::new("Failed to load");
/// assert!(view.state().is_loading());
///
/// let outcome = view.load(async { Ok::<_, StoreError>(3) }).await;
/// assert_eq!(outcome, LoadOutcome::Applied);
/// assert_eq!(view.state(), ViewState::Loaded(3));
/// # });
/// ```
#[derive(Debug)]
pub struct PageView<T> {
    inner: Arc<Mutex<ViewInner<T>>>,
    failure_message: &'static str,
}

#[derive(Debug)]
struct ViewInner<T> {
    state: ViewState<T>,
    mounted: bool,
    /// Bumped every time a read starts; stale reads are discarded.
    generation: u64,
}

impl<T> Clone for PageView<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            failure_message: self.failure_message,
        }
    }
}

impl<T: Clone> PageView<T> {
    /// A mounted view in `Loading`.
    ///
    /// `failure_message` is shown when the read fails.
    pub fn new(failure_message: &'static str) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ViewInner {
                state: ViewState::Loading,
                mounted: true,
                generation: 0,
            })),
            failure_message,
        }
    }

    fn lock(&self) -> MutexGuard<'_, ViewInner<T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current state.
    pub fn state(&self) -> ViewState<T> {
        self.lock().state.clone()
    }

    pub fn is_mounted(&self) -> bool {
        self.lock().mounted
    }

    pub fn failure_message(&self) -> &'static str {
        self.failure_message
    }

    /// Detach the view; in-flight results will be discarded.
    pub fn unmount(&self) {
        self.lock().mounted = false;
    }

    /// Issue the view's read on activation.
    ///
    /// Only the first activation reads; later calls are skipped.
    pub async fn load<F>(&self, read: F) -> LoadOutcome
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        let generation = {
            let mut inner = self.lock();
            if !inner.mounted || inner.generation > 0 {
                return LoadOutcome::Skipped;
            }
            inner.generation += 1;
            inner.generation
        };
        self.settle(generation, read.await)
    }

    /// Retry a failed read. Only a `Failed` view can be retried.
    pub async fn retry<F>(&self, read: F) -> LoadOutcome
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        let generation = {
            let mut inner = self.lock();
            if !inner.mounted || !matches!(inner.state, ViewState::Failed(_)) {
                return LoadOutcome::Skipped;
            }
            inner.state = ViewState::Loading;
            inner.generation += 1;
            inner.generation
        };
        self.settle(generation, read.await)
    }

    fn settle(&self, generation: u64, result: Result<T, StoreError>) -> LoadOutcome {
        let mut inner = self.lock();
        if !inner.mounted || inner.generation != generation {
            debug!(generation, "view no longer current, discarding result");
            return LoadOutcome::Discarded;
        }
        inner.state = match result {
            Ok(data) => ViewState::Loaded(data),
            Err(err) => {
                error!(error = %err, view = self.failure_message, "view load failed");
                ViewState::Failed(ViewError::new(self.failure_message, &err))
            }
        };
        LoadOutcome::Applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn failure_then_retry() {
        let view: PageView<&str> = PageView::new("Failed to load services");
        let outcome = view.load(async { Err(StoreError::RateLimited) }).await;
        assert_eq!(outcome, LoadOutcome::Applied);

        let err = view.state().error().cloned().unwrap();
        assert_eq!(err.message, "Failed to load services");
        assert_eq!(err.cause, "rate limited");

        let outcome = view.retry(async { Ok("services") }).await;
        assert_eq!(outcome, LoadOutcome::Applied);
        assert_eq!(view.state(), ViewState::Loaded("services"));
    }

    #[tokio::test]
    async fn second_activation_is_skipped() {
        let view: PageView<u8> = PageView::new("x");
        view.load(async { Ok(1) }).await;
        assert_eq!(view.load(async { Ok(2) }).await, LoadOutcome::Skipped);
        assert_eq!(view.state(), ViewState::Loaded(1));
    }

    #[tokio::test]
    async fn retry_requires_failure() {
        let view: PageView<u8> = PageView::new("x");
        assert_eq!(view.retry(async { Ok(1) }).await, LoadOutcome::Skipped);
        assert!(view.state().is_loading());
    }

    #[tokio::test]
    async fn unmount_during_read_discards() {
        let view: PageView<u8> = PageView::new("x");
        let handle = view.clone();
        let outcome = view
            .load(async move {
                handle.unmount();
                Ok(7)
            })
            .await;
        assert_eq!(outcome, LoadOutcome::Discarded);
        assert!(view.state().is_loading());
    }

    #[tokio::test]
    async fn unmounted_view_does_not_read() {
        let view: PageView<u8> = PageView::new("x");
        view.unmount();
        assert_eq!(view.load(async { Ok(1) }).await, LoadOutcome::Skipped);
    }
}
