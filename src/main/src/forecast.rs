//! The forecast seam: what the loop asks for and what it gets back.

use log::warn;
use thiserror::Error;
use time::OffsetDateTime;

use control::{Price, PriceWindow};

use crate::records::{FetchFailureRecord, ForecastRecord, RecordSink};

mod replay;

pub use link_test::LinkTestForecast;
pub use replay::ReplayForecast;

/// Requested forecast resolution; the market settles half hourly.
pub const RESOLUTION_MINUTES: u16 = 30;

/// Fewer entries than this and a response is unusable for control.
pub const MIN_USABLE_FORECAST: usize = 3;

/// Day curves at least this long are worth a forecast record.
const MIN_LOGGED_FORECAST: usize = 6;

/// Substituted when the provider fails outright.
pub const FETCH_ERROR_PRICES: [i16; 9] = [101, 102, 103, 104, 105, 106, 107, 108, 109];

/// Substituted when the provider answers with too little data.
pub const SHORT_RESPONSE_PRICES: [i16; 9] = [200, 201, 202, 203, 204, 205, 206, 207, 208];

/// Why a forecast request produced nothing usable. An Ok-but-short
/// response is not an error; the call site handles it separately.
#[allow(dead_code)]
#[derive(Clone, Debug, Error)]
pub enum FetchError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("authorization rejected with status {0}")]
    Unauthorized(u16),
    #[error("malformed response body: {0}")]
    Malformed(String),
}

/// A source of half-hourly spot prices for day-relative windows.
///
/// Implementations resolve "the current period" themselves, exactly
/// like the live market endpoint whose request shape [`PriceWindow`]
/// mirrors.
pub trait ForecastProvider {
    fn fetch(
        &mut self,
        window: PriceWindow,
        resolution_minutes: u16,
    ) -> Result<Vec<Price>, FetchError>;
}

pub fn fallback_prices(values: &[i16]) -> Vec<Price> {
    values.iter().map(|v| Price::from(*v)).collect()
}

/// The single recovery point for every forecast request the loop makes.
///
/// A failed or degenerate fetch is logged, recorded through the sink,
/// and replaced with the matching fixed curve, so the caller always has
/// prices to act on and the loop has no error exit. Usable day curves
/// are recorded as received, before any sorting.
pub fn fetch_or_fallback(
    provider: &mut dyn ForecastProvider,
    window: PriceWindow,
    timestamp: OffsetDateTime,
    sink: &mut dyn RecordSink,
) -> Vec<Price> {
    match provider.fetch(window, RESOLUTION_MINUTES) {
        Ok(prices) if prices.len() >= MIN_USABLE_FORECAST => {
            if prices.len() >= MIN_LOGGED_FORECAST {
                sink.forecast(&ForecastRecord {
                    timestamp,
                    prices: prices.clone(),
                });
            }
            prices
        }
        Ok(prices) => {
            let substituted = fallback_prices(&SHORT_RESPONSE_PRICES);
            warn!(
                "forecast of {} entries is unusable; substituting the short-response curve",
                prices.len()
            );
            sink.fetch_failure(&FetchFailureRecord::new(
                timestamp,
                format!("degenerate forecast: {} entries", prices.len()),
                &substituted,
            ));
            substituted
        }
        Err(err) => {
            let substituted = fallback_prices(&FETCH_ERROR_PRICES);
            warn!("forecast fetch failed: {err}; substituting the fetch-error curve");
            sink.fetch_failure(&FetchFailureRecord::new(
                timestamp,
                err.to_string(),
                &substituted,
            ));
            substituted
        }
    }
}
