use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, instrument};

use crate::lifecycle::{evaluate, CardState, MatchStatus};

/// How often a visible match card is re-evaluated.
pub const DEFAULT_TICK: Duration = Duration::from_secs(1);

/// Source of the current instant.
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> DateTime<Utc>;
}

/// The wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(|e| e.into_inner()) = now;
    }

    pub fn advance(&self, by: chrono::Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Periodically re-evaluates one match card and publishes its state.
///
/// The task stops on its own once the match has ended and is aborted when
/// the ticker is dropped.
pub struct StatusTicker {
    receiver: watch::Receiver<CardState>,
    handle: JoinHandle<()>,
}

impl StatusTicker {
    /// Start ticking every [`DEFAULT_TICK`].
    pub fn spawn<C: Clock>(kickoff: DateTime<Utc>, clock: C) -> Self {
        Self::spawn_with_period(kickoff, clock, DEFAULT_TICK)
    }

    pub fn spawn_with_period<C: Clock>(
        kickoff: DateTime<Utc>,
        clock: C,
        period: Duration,
    ) -> Self {
        let initial = evaluate(kickoff, clock.now());
        let (sender, receiver) = watch::channel(initial);
        let handle = tokio::spawn(run(kickoff, clock, period, sender));
        Self { receiver, handle }
    }

    /// The most recently published state.
    pub fn state(&self) -> CardState {
        *self.receiver.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<CardState> {
        self.receiver.clone()
    }

    /// Wait for the next state change; `None` once ticking has stopped.
    pub async fn changed(&mut self) -> Option<CardState> {
        self.receiver.changed().await.ok()?;
        Some(*self.receiver.borrow_and_update())
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for StatusTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[instrument(skip(clock, sender))]
async fn run<C: Clock>(
    kickoff: DateTime<Utc>,
    clock: C,
    period: Duration,
    sender: watch::Sender<CardState>,
) {
    let already_ended = sender.borrow().status == MatchStatus::Ended;
    if already_ended {
        return;
    }

    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // The first tick completes immediately and the initial state is already published.
    interval.tick().await;

    loop {
        interval.tick().await;
        let state = evaluate(kickoff, clock.now());
        sender.send_if_modified(|current| {
            if *current == state {
                return false;
            }
            if current.status != state.status {
                debug!(from = %current.status, to = %state.status, "match status changed");
            }
            *current = state;
            true
        });
        if state.status == MatchStatus::Ended || sender.is_closed() {
            break;
        }
    }
}
