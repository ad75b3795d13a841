//! Clock abstraction for test determinism.
//!
//! The segmenter's snapshot cadence and clip timestamps depend on wall-clock
//! time. Threading a Clock through instead of calling `Instant::now()`
//! directly lets tests drive time explicitly.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// Clock trait for time abstraction.
pub trait Clock: Send + Sync {
    /// Get the current time.
    fn now(&self) -> Instant;
}

/// Real-time clock implementation.
#[derive(Default)]
pub struct RealClock;

impl RealClock {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for RealClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Virtual clock for deterministic testing.
pub struct TestClock {
    current_time: Mutex<Instant>,
}

impl Default for TestClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TestClock {
    pub fn new() -> Self {
        Self {
            current_time: Mutex::new(Instant::now()),
        }
    }

    pub fn new_with_start_time(start_time: Instant) -> Self {
        Self {
            current_time: Mutex::new(start_time),
        }
    }

    /// Advance the virtual clock by the specified duration.
    pub fn advance(&self, duration: Duration) {
        let mut time = self.current_time.lock();
        *time += duration;
    }

    /// Set the virtual clock to a specific time.
    pub fn set_time(&self, time: Instant) {
        let mut current = self.current_time.lock();
        *current = time;
    }
}

impl Clock for TestClock {
    fn now(&self) -> Instant {
        *self.current_time.lock()
    }
}

/// Thread-safe clock that can be shared across threads.
pub type SharedClock = Arc<dyn Clock + Send + Sync>;

/// Create a real-time clock.
pub fn real_clock() -> SharedClock {
    Arc::new(RealClock::new())
}

/// Create a test clock.
pub fn test_clock() -> Arc<TestClock> {
    Arc::new(TestClock::new())
}
