use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use time::OffsetDateTime;

use control::{aest_seconds, period_no, Price, PriceWindow};

use super::{FetchError, ForecastProvider};

/// One half-hourly interval of a recorded day, in the market endpoint's
/// JSON shape. Remaining fields of the record are ignored.
#[derive(Debug, Deserialize)]
struct IntervalRecord {
    #[serde(rename = "perKwh")]
    per_kwh: Price,
}

/// Replays a recorded day curve from disk, slicing the requested window
/// around the current period the way the live endpoint would.
pub struct ReplayForecast {
    curve: Vec<Price>,
}

impl ReplayForecast {
    pub fn from_file(path: impl AsRef<Path>) -> Result<ReplayForecast> {
        let body = fs::read_to_string(path.as_ref())
            .with_context(|| format!("reading replay curve {}", path.as_ref().display()))?;
        ReplayForecast::from_json(&body)
    }

    pub fn from_json(body: &str) -> Result<ReplayForecast> {
        let records: Vec<IntervalRecord> =
            serde_json::from_str(body).context("parsing replay curve")?;
        let curve: Vec<Price> = records.into_iter().map(|record| record.per_kwh).collect();
        anyhow::ensure!(!curve.is_empty(), "replay curve is empty");
        Ok(ReplayForecast { curve })
    }

    /// Window slice around `period`, clamped to the recorded day.
    fn slice(&self, period: u8, window: PriceWindow) -> Vec<Price> {
        let len = self.curve.len();
        let current = usize::from(period.saturating_sub(1)).min(len - 1);
        let start = current.saturating_sub(usize::from(window.previous));
        let end = (current + usize::from(window.next) + 1).min(len);
        self.curve[start..end].to_vec()
    }
}

impl ForecastProvider for ReplayForecast {
    fn fetch(
        &mut self,
        window: PriceWindow,
        _resolution_minutes: u16,
    ) -> Result<Vec<Price>, FetchError> {
        let now = OffsetDateTime::now_utc().unix_timestamp();
        let period = period_no(aest_seconds(now));
        Ok(self.slice(period, window))
    }
}
