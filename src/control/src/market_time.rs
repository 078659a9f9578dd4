//! Market-aligned time arithmetic.
//!
//! The national market runs on Australian Eastern Standard Time, a fixed
//! +10 h offset with no daylight saving. A market day splits into 48
//! half-hour periods and each period into 6 five-minute sub periods.
//! Everything here is a pure function of the supplied timestamp, so the
//! control loop re-derives its coordinates from a fresh clock read on
//! every iteration and absorbs scheduling drift instead of accumulating
//! it.

/// Offset from UTC to AEST in seconds.
pub const AEST_OFFSET_SECS: i64 = 10 * 3600;

/// Half-hour periods in a market day.
pub const PERIODS_PER_DAY: usize = 48;

/// Five-minute sub periods in one half-hour period.
pub const SUBS_PER_PERIOD: u16 = 6;

const SECS_PER_DAY: i64 = 24 * 60 * 60;
const PERIOD_SECS: i64 = 30 * 60;
const SUB_SECS: i64 = 5 * 60;

/// Shift an epoch timestamp onto the AEST-aligned clock.
pub fn aest_seconds(epoch_seconds: i64) -> i64 {
    epoch_seconds + AEST_OFFSET_SECS
}

fn seconds_into_day(aest_seconds: i64) -> i64 {
    aest_seconds.rem_euclid(SECS_PER_DAY)
}

/// Half-hour market period, 1-48.
pub fn period_no(aest_seconds: i64) -> u8 {
    (seconds_into_day(aest_seconds) / PERIOD_SECS) as u8 + 1
}

/// Completed five-minute sub periods since local midnight, 0-287.
pub fn sub_count(aest_seconds: i64) -> u16 {
    (seconds_into_day(aest_seconds) / SUB_SECS) as u16
}

/// Five-minute sub period within the current period, 1-6.
pub fn sub_period_no(aest_seconds: i64) -> u8 {
    let period = period_no(aest_seconds) as u16;
    (sub_count(aest_seconds) - (period - 1) * SUBS_PER_PERIOD + 1) as u8
}

/// Seconds until the next multiple of `interval_seconds` on the aligned
/// clock. Always in (0, interval]: an instant already on a boundary
/// waits out the full interval rather than firing again immediately.
pub fn delay_to_next(aest_seconds: i64, interval_seconds: u32) -> u32 {
    let interval = i64::from(interval_seconds);
    (interval - aest_seconds.rem_euclid(interval)) as u32
}

/// Day-relative request window for a forecast: how many whole periods
/// before and after the provider's current one to return.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PriceWindow {
    pub previous: u8,
    pub next: u8,
}

impl PriceWindow {
    /// The three-period window whose middle entry is the price now.
    pub const NOW: PriceWindow = PriceWindow {
        previous: 1,
        next: 1,
    };

    /// The whole market day, anchored so that `period` falls inside it.
    pub fn full_day(period: u8) -> PriceWindow {
        PriceWindow {
            previous: period.saturating_sub(1),
            next: (PERIODS_PER_DAY as u8).saturating_sub(period),
        }
    }

    pub fn is_now_window(&self) -> bool {
        *self == PriceWindow::NOW
    }
}
