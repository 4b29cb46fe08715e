use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

/// Pull distance, in pixels, that triggers a refresh.
pub const PULL_THRESHOLD: f64 = 80.0;
/// Maximum displayed pull distance.
pub const MAX_PULL: f64 = 120.0;
const PULL_RESISTANCE: f64 = 0.5;

/// Result of asking the gate to refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome<T> {
    Completed(T),
    /// Another refresh was already in flight; the request was not started.
    Skipped,
    /// The view was replaced while the request was in flight; the result was
    /// discarded.
    Stale,
}

impl<T> RefreshOutcome<T> {
    pub fn completed(self) -> Option<T> {
        match self {
            RefreshOutcome::Completed(value) => Some(value),
            _ => None,
        }
    }
}

/// Collapses overlapping refresh triggers of one view into a single
/// in-flight request.
///
/// Only requests of the current view hold the gate: once the view is
/// replaced, a new refresh may start while the old one is still pending.
#[derive(Debug, Default)]
pub struct RefreshGate {
    /// Generation of the running refresh plus one; zero when idle.
    in_flight: AtomicU64,
    generation: AtomicU64,
}

impl RefreshGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a refresh of the current view is in flight.
    pub fn is_refreshing(&self) -> bool {
        self.in_flight.load(Ordering::Acquire) == self.generation() + 1
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Mark the current view as replaced. Requests started before this call
    /// resolve as [`RefreshOutcome::Stale`] and no longer block new ones.
    pub fn invalidate(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Run `refresh` unless another refresh of the current view is in flight.
    ///
    /// A skipped future is dropped without being polled.
    pub async fn run<F, T>(&self, refresh: F) -> RefreshOutcome<T>
    where
        F: Future<Output = T>,
    {
        let started = self.generation();
        let token = started + 1;
        let mut held = self.in_flight.load(Ordering::Acquire);
        loop {
            if held == token {
                debug!("refresh already in flight, skipping");
                return RefreshOutcome::Skipped;
            }
            match self.in_flight.compare_exchange(
                held,
                token,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => break,
                Err(actual) => held = actual,
            }
        }
        let _in_flight = InFlight {
            slot: &self.in_flight,
            token,
        };

        let value = refresh.await;
        if self.generation() != started {
            debug!(started, current = self.generation(), "discarding stale refresh");
            return RefreshOutcome::Stale;
        }
        RefreshOutcome::Completed(value)
    }
}

/// Releases the gate when the refresh finishes or is cancelled, unless a
/// newer view's refresh has taken it over.
struct InFlight<'a> {
    slot: &'a AtomicU64,
    token: u64,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let _ = self
            .slot
            .compare_exchange(self.token, 0, Ordering::AcqRel, Ordering::Relaxed);
    }
}

/// Pull-to-refresh gesture tracking.
#[derive(Debug, Clone, Default)]
pub struct PullGesture {
    start_y: Option<f64>,
    distance: f64,
}

impl PullGesture {
    /// Begin tracking a touch; ignored unless the list is scrolled to the top.
    pub fn start(&mut self, y: f64, at_top: bool) {
        self.start_y = at_top.then_some(y);
        self.distance = 0.0;
    }

    pub fn move_to(&mut self, y: f64) {
        if let Some(start) = self.start_y {
            let diff = y - start;
            if diff > 0.0 {
                self.distance = (diff * PULL_RESISTANCE).min(MAX_PULL);
            }
        }
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Indicator rotation progress in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        (self.distance / PULL_THRESHOLD).min(1.0)
    }

    /// End the touch; returns whether a refresh should fire.
    pub fn release(&mut self) -> bool {
        let triggered = self.start_y.is_some() && self.distance >= PULL_THRESHOLD;
        self.start_y = None;
        self.distance = 0.0;
        triggered
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio::sync::oneshot;

    use super::*;

    #[tokio::test]
    async fn test_overlapping_refresh_is_skipped() {
        let gate = Arc::new(RefreshGate::new());
        let (tx, rx) = oneshot::channel::<u32>();

        let first = {
            let gate = gate.clone();
            tokio::spawn(async move { gate.run(async { rx.await.unwrap() }).await })
        };
        tokio::task::yield_now().await;
        assert!(gate.is_refreshing());

        let second = gate.run(async { 1 }).await;
        assert_eq!(second, RefreshOutcome::Skipped);

        tx.send(5).unwrap();
        assert_eq!(first.await.unwrap(), RefreshOutcome::Completed(5));
        assert!(!gate.is_refreshing());

        assert_eq!(gate.run(async { 2 }).await.completed(), Some(2));
    }

    #[tokio::test]
    async fn test_result_after_invalidate_is_stale() {
        let gate = Arc::new(RefreshGate::new());
        let (tx, rx) = oneshot::channel::<u32>();

        let pending = {
            let gate = gate.clone();
            tokio::spawn(async move { gate.run(async { rx.await.unwrap() }).await })
        };
        tokio::task::yield_now().await;

        assert_eq!(gate.invalidate(), 1);
        tx.send(9).unwrap();
        assert_eq!(pending.await.unwrap(), RefreshOutcome::Stale);
    }

    #[tokio::test]
    async fn test_replaced_view_refreshes_while_old_request_pending() {
        let gate = Arc::new(RefreshGate::new());
        let (old_tx, old_rx) = oneshot::channel::<u32>();
        let old = {
            let gate = gate.clone();
            tokio::spawn(async move { gate.run(async { old_rx.await.unwrap() }).await })
        };
        tokio::task::yield_now().await;
        assert!(gate.is_refreshing());

        gate.invalidate();
        assert!(!gate.is_refreshing());

        let (new_tx, new_rx) = oneshot::channel::<u32>();
        let new = {
            let gate = gate.clone();
            tokio::spawn(async move { gate.run(async { new_rx.await.unwrap() }).await })
        };
        tokio::task::yield_now().await;
        assert!(gate.is_refreshing());

        old_tx.send(1).unwrap();
        assert_eq!(old.await.unwrap(), RefreshOutcome::Stale);
        assert!(gate.is_refreshing());
        assert_eq!(gate.run(async { 3 }).await, RefreshOutcome::Skipped);

        new_tx.send(2).unwrap();
        assert_eq!(new.await.unwrap(), RefreshOutcome::Completed(2));
        assert!(!gate.is_refreshing());
        assert_eq!(gate.run(async { 4 }).await.completed(), Some(4));
    }

    #[tokio::test]
    async fn test_fresh_refresh_completes_after_invalidate() {
        let gate = Arc::new(RefreshGate::new());
        let (tx, rx) = oneshot::channel::<u32>();
        let pending = {
            let gate = gate.clone();
            tokio::spawn(async move { gate.run(async { rx.await.unwrap() }).await })
        };
        tokio::task::yield_now().await;

        gate.invalidate();
        assert_eq!(gate.run(async { 42 }).await, RefreshOutcome::Completed(42));

        tx.send(7).unwrap();
        assert_eq!(pending.await.unwrap(), RefreshOutcome::Stale);
        assert!(!gate.is_refreshing());
    }

    #[tokio::test]
    async fn test_cancelled_refresh_releases_gate() {
        let gate = RefreshGate::new();
        let refresh = gate.run(std::future::pending::<()>());
        let timed_out = tokio::time::timeout(std::time::Duration::from_millis(5), refresh).await;
        assert!(timed_out.is_err());
        assert!(!gate.is_refreshing());
    }

    #[test]
    fn test_pull_gesture_threshold() {
        let mut pull = PullGesture::default();
        pull.start(100.0, true);
        pull.move_to(200.0);
        assert_eq!(pull.distance(), 50.0);
        assert!(!pull.release());

        pull.start(100.0, true);
        pull.move_to(400.0);
        assert_eq!(pull.distance(), MAX_PULL);
        assert_eq!(pull.progress(), 1.0);
        assert!(pull.release());
        assert_eq!(pull.distance(), 0.0);
    }

    #[test]
    fn test_pull_ignored_when_scrolled() {
        let mut pull = PullGesture::default();
        pull.start(0.0, false);
        pull.move_to(500.0);
        assert!(!pull.release());
    }
}
