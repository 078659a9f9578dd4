use core::time::Duration;
use std::thread;

use time::macros::offset;
use time::{OffsetDateTime, UtcOffset};

/// The national market clock: AEST, fixed +10 h, no daylight saving.
pub const MARKET_OFFSET: UtcOffset = offset!(+10);

/// Single source of "now" and of blocking waits, so the scheduler runs
/// identically against the system clock and the test clock.
pub trait Clock {
    /// Seconds since the Unix epoch.
    fn epoch_seconds(&self) -> i64;

    /// Civil timestamp on the market clock, for records.
    fn now(&self) -> OffsetDateTime;

    /// Block for the given duration.
    fn sleep(&mut self, duration: Duration);
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn epoch_seconds(&self) -> i64 {
        OffsetDateTime::now_utc().unix_timestamp()
    }

    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc().to_offset(MARKET_OFFSET)
    }

    fn sleep(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// Deterministic clock for scheduler tests: sleeping advances time, and
/// every sleep is kept for assertions.
#[cfg(test)]
pub struct FakeClock {
    pub now: i64,
    pub sleeps: Vec<Duration>,
}

#[cfg(test)]
impl FakeClock {
    pub fn at_epoch(now: i64) -> FakeClock {
        FakeClock {
            now,
            sleeps: Vec::new(),
        }
    }
}

#[cfg(test)]
impl Clock for FakeClock {
    fn epoch_seconds(&self) -> i64 {
        self.now
    }

    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::from_unix_timestamp(self.now)
            .expect("test epoch in range")
            .to_offset(MARKET_OFFSET)
    }

    fn sleep(&mut self, duration: Duration) {
        self.sleeps.push(duration);
        self.now += duration.as_secs() as i64;
    }
}
