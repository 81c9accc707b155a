use std::time::{Duration, Instant};

use tracing::debug;

/// A repeating timer handle, the equivalent of a host `setInterval` id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interval {
    id: u64,
    period: Duration,
    next_due: Instant,
}

impl Interval {
    fn new(id: u64, period: Duration, now: Instant) -> Self {
        Interval { id, period, next_due: now + period }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn next_due(&self) -> Instant {
        self.next_due
    }
}

/// Owns the single interval that drives ticks.
#[derive(Debug, Default)]
pub struct GameLoop {
    handle: Option<Interval>,
    issued: u64,
}

impl GameLoop {
    pub fn new() -> Self {
        GameLoop { handle: None, issued: 0 }
    }

    pub fn get(&self) -> Option<&Interval> {
        self.handle.as_ref()
    }

    /// Installs a fresh interval, clearing any previous one first. Returns the new id.
    pub fn set(&mut self, period: Duration, now: Instant) -> u64 {
        if let Some(old) = self.clear() {
            debug!(id = old.id, "cleared previous interval");
        }

        self.issued += 1;
        self.handle = Some(Interval::new(self.issued, period, now));
        self.issued
    }

    pub fn clear(&mut self) -> Option<Interval> {
        self.handle.take()
    }

    /// How long the host may wait before the next tick is due, or `None` with no interval.
    pub fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        self.handle.as_ref().map(|h| h.next_due.saturating_duration_since(now))
    }

    /// Consumes one due tick. A host that fell behind gets a single tick, not a burst.
    pub fn fire(&mut self, now: Instant) -> bool {
        let handle = match self.handle.as_mut() {
            Some(h) => h,
            None => return false,
        };

        if now < handle.next_due {
            return false;
        }

        handle.next_due += handle.period;
        if handle.next_due <= now {
            handle.next_due = now + handle.period;
        }
        true
    }
}
