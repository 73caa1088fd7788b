//! The live counter pushed over `/ws/count`.
//!
//! An independent periodic task applies a biased random-walk step to an
//! in-memory integer and broadcasts the new value to every subscriber.
//! The counter has no relationship to the resource store: it is seeded
//! to a random value at process start and lost on shutdown.
//!
//! Clients can also bump the counter by sending a `saw-one` frame; the
//! bumped value goes out with the next periodic broadcast.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use rand::Rng as _;
use tokio::sync::broadcast;
use tracing::debug;

/// Capacity of the counter broadcast channel.
const BROADCAST_CAPACITY: usize = 256;

/// The shared counter value plus its broadcast channel.
///
/// Cheap to clone; all clones observe the same value.
#[derive(Clone)]
pub struct Counter {
    value: Arc<AtomicI64>,
    events: broadcast::Sender<i64>,
}

impl Counter {
    /// Create a counter starting at `seed`.
    pub fn new(seed: i64) -> Self {
        let (events, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self {
            value: Arc::new(AtomicI64::new(seed)),
            events,
        }
    }

    /// Create a counter seeded to a random value in `[min, max)`.
    pub fn with_random_seed(min: i64, max: i64) -> Self {
        let seed = if min < max {
            rand::rng().random_range(min..max)
        } else {
            min
        };
        Self::new(seed)
    }

    /// The current counter value.
    pub fn value(&self) -> i64 {
        self.value.load(Ordering::Relaxed)
    }

    /// Handle a subscriber's `saw-one` event: add one to the counter.
    ///
    /// Returns the new value. The value is not broadcast here; it goes
    /// out with the next periodic step.
    pub fn saw_one(&self) -> i64 {
        self.value.fetch_add(1, Ordering::Relaxed).wrapping_add(1)
    }

    /// Apply one random-walk step: +1 with probability `up_probability`
    /// (clamped to `0.0..=1.0`), otherwise -1. Returns the new value.
    pub fn step(&self, up_probability: f64) -> i64 {
        let delta = if rand::rng().random_bool(up_probability.clamp(0.0, 1.0)) {
            1
        } else {
            -1
        };
        self.value.fetch_add(delta, Ordering::Relaxed).wrapping_add(delta)
    }

    /// Subscribe to counter broadcasts.
    pub fn subscribe(&self) -> broadcast::Receiver<i64> {
        self.events.subscribe()
    }

    /// Broadcast the current value to all subscribers.
    ///
    /// Returns the number of subscribers that received it; zero when no
    /// client is connected, which is not an error.
    pub fn broadcast(&self) -> usize {
        self.events.send(self.value()).unwrap_or(0)
    }
}

/// Drive the counter: step and broadcast on a fixed interval, forever.
///
/// Spawn this on a background task next to the HTTP server. Delivery is
/// fire-and-forget; a missing or slow subscriber never delays the walk.
pub async fn run(counter: Counter, interval: Duration, up_probability: f64) {
    // tokio::time::interval rejects a zero period.
    let mut ticker = tokio::time::interval(interval.max(Duration::from_millis(1)));
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        let value = counter.step(up_probability);
        let subscribers = counter.broadcast();
        debug!(value, subscribers, "counter step");
    }
}
