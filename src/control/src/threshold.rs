//! Threshold selection and the day-to-day duty adaptation.
//!
//! The controller operates the load in the N cheapest half hours of the
//! day. N is the threshold rank: sorting the day's forecast ascending
//! and taking the Nth price gives the cutoff every sub-period decision
//! compares against.

use crate::market_time::SUBS_PER_PERIOD;
use crate::state::{Price, INFEASIBLE_PRICE};

/// Sort a fetched forecast ascending in place.
pub fn sort_forecast(forecast: &mut [Price]) {
    forecast.sort_unstable();
}

/// Cutoff price at the given 1-based rank of an ascending forecast.
///
/// A rank beyond the available entries means the duty target asks for
/// more operating periods than the forecast holds, so the cutoff
/// saturates to [`INFEASIBLE_PRICE`] and every period qualifies. Rank 0
/// saturates the same way rather than panicking.
pub fn threshold_price(index: u16, sorted_forecast: &[Price]) -> Price {
    let Some(rank) = (index as usize).checked_sub(1) else {
        return INFEASIBLE_PRICE;
    };
    sorted_forecast.get(rank).copied().unwrap_or(INFEASIBLE_PRICE)
}

/// Recompute the threshold rank from yesterday's operation count.
///
/// A day that fell short of the default duty is compensated by aiming
/// the same distance above it tomorrow; a day that met or exceeded the
/// default falls back to the default. Over-delivery is never corrected
/// downwards. The sub-period count is converted back to a half-hour
/// rank with halves rounding up.
pub fn adapt_threshold_index(prior_day_op_count: u16, default_index: u16) -> u16 {
    let default_count = u32::from(default_index) * u32::from(SUBS_PER_PERIOD);
    let prior = u32::from(prior_day_op_count);

    let new_count = if prior <= default_count {
        2 * default_count - prior
    } else {
        default_count
    };

    ((new_count + u32::from(SUBS_PER_PERIOD) / 2) / u32::from(SUBS_PER_PERIOD)) as u16
}
