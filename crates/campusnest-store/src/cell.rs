//! Observable state container shared by the domain stores.

use std::sync::atomic::{AtomicU64, Ordering};

use campusnest_client::ApiError;
use tokio::sync::watch;

/// Loading and error flags carried by every domain store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadStatus {
    pub loading: bool,
    pub error: Option<String>,
}

/// Implemented by each domain store's state so [`StoreCell`] can manage the
/// shared flags.
pub trait Tracked {
    fn status_mut(&mut self) -> &mut LoadStatus;
}

/// Holds one store's state and publishes every change to subscribers.
///
/// Readers take a [`StoreCell::snapshot`] or hold a `watch::Receiver` from
/// [`StoreCell::subscribe`] and re-render when it changes.
#[derive(Debug)]
pub struct StoreCell<S> {
    tx: watch::Sender<S>,
}

impl<S: Clone + Default + Tracked> StoreCell<S> {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(S::default());
        Self { tx }
    }

    /// A clone of the current state.
    #[must_use]
    pub fn snapshot(&self) -> S {
        self.tx.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<S> {
        self.tx.subscribe()
    }

    /// Applies `f` and notifies subscribers.
    pub fn update(&self, f: impl FnOnce(&mut S)) {
        self.tx.send_modify(f);
    }

    /// Marks an operation as started: loading on, previous error cleared.
    pub(crate) fn begin(&self) {
        self.update(|s| {
            let status = s.status_mut();
            status.loading = true;
            status.error = None;
        });
    }

    /// Ends an operation. On success `apply` writes the value; on failure the
    /// error is stored as a string. Loading is cleared either way. Returns
    /// whether the operation succeeded.
    pub(crate) fn settle<T>(
        &self,
        operation: &'static str,
        result: Result<T, ApiError>,
        apply: impl FnOnce(&mut S, T),
    ) -> bool {
        match result {
            Ok(value) => {
                self.update(|s| {
                    apply(s, value);
                    s.status_mut().loading = false;
                });
                true
            }
            Err(e) => {
                tracing::warn!(operation, error = %e, "store operation failed");
                let message = e.to_string();
                self.update(|s| {
                    let status = s.status_mut();
                    status.loading = false;
                    status.error = Some(message);
                });
                false
            }
        }
    }
}

impl<S: Clone + Default + Tracked> Default for StoreCell<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Monotonic counter deciding which in-flight fetch may write its result.
///
/// Each fetch takes a ticket; only the holder of the newest ticket applies
/// its response, so a slow earlier fetch can never overwrite a later one.
#[derive(Debug, Default)]
pub(crate) struct Generation(AtomicU64);

impl Generation {
    pub(crate) fn next(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub(crate) fn is_current(&self, ticket: u64) -> bool {
        self.0.load(Ordering::SeqCst) == ticket
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Default)]
    struct Counter {
        value: u32,
        status: LoadStatus,
    }

    impl Tracked for Counter {
        fn status_mut(&mut self) -> &mut LoadStatus {
            &mut self.status
        }
    }

    #[test]
    fn settle_success_applies_and_clears_loading() {
        let cell: StoreCell<Counter> = StoreCell::new();
        cell.begin();
        assert!(cell.snapshot().status.loading);

        let ok = cell.settle("test", Ok(7), |s, v| s.value = v);
        assert!(ok);
        let state = cell.snapshot();
        assert_eq!(state.value, 7);
        assert!(!state.status.loading);
        assert!(state.status.error.is_none());
    }

    #[test]
    fn settle_failure_records_message_and_keeps_value() {
        let cell: StoreCell<Counter> = StoreCell::new();
        cell.update(|s| s.value = 3);
        cell.begin();

        let err = ApiError::Status {
            status: 500,
            message: "boom".to_string(),
        };
        let ok = cell.settle("test", Err::<u32, _>(err), |s, v| s.value = v);
        assert!(!ok);
        let state = cell.snapshot();
        assert_eq!(state.value, 3);
        assert!(!state.status.loading);
        assert_eq!(state.status.error.as_deref(), Some("boom (HTTP 500)"));
    }

    #[test]
    fn begin_clears_previous_error() {
        let cell: StoreCell<Counter> = StoreCell::new();
        cell.update(|s| s.status.error = Some("old".to_string()));
        cell.begin();
        assert!(cell.snapshot().status.error.is_none());
    }

    #[test]
    fn subscribers_see_updates() {
        let cell: StoreCell<Counter> = StoreCell::new();
        let mut rx = cell.subscribe();
        cell.update(|s| s.value = 9);
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().value, 9);
    }

    #[test]
    fn only_newest_ticket_is_current() {
        let generation = Generation::default();
        let first = generation.next();
        assert!(generation.is_current(first));
        let second = generation.next();
        assert!(!generation.is_current(first));
        assert!(generation.is_current(second));
    }
}
