//! Structured records the controller emits, and where they land.
//!
//! Long-term storage is someone else's job; the in-tree sinks put one
//! JSON object per line on the `records` log target, where journald or
//! a redirect can keep them.

use log::{error, info};
use serde::Serialize;
use time::OffsetDateTime;

use control::Price;

/// One control decision, emitted every sub period.
#[derive(Clone, Debug, Serialize)]
pub struct OperationRecord {
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub period: u8,
    pub thres_index: u16,
    pub thres_price: Price,
    pub price_now: Price,
    pub operate: bool,
    pub per_count: u8,
    pub op_count: u16,
}

/// A failed or degenerate forecast fetch and the curve substituted.
#[derive(Clone, Debug, Serialize)]
pub struct FetchFailureRecord {
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub reason: String,
    pub substituted: Vec<Price>,
}

impl FetchFailureRecord {
    pub fn new(timestamp: OffsetDateTime, reason: String, substituted: &[Price]) -> Self {
        FetchFailureRecord {
            timestamp,
            reason,
            substituted: substituted.to_vec(),
        }
    }
}

/// A usable day forecast exactly as received, before sorting.
#[derive(Clone, Debug, Serialize)]
pub struct ForecastRecord {
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub prices: Vec<Price>,
}

/// Where append-only records go.
pub trait RecordSink {
    fn operation(&mut self, record: &OperationRecord);
    fn fetch_failure(&mut self, record: &FetchFailureRecord);
    fn forecast(&mut self, record: &ForecastRecord);
}

/// Emits records as JSON lines through the `log` facade.
#[derive(Default)]
pub struct LogSink;

impl LogSink {
    pub fn new() -> LogSink {
        LogSink
    }

    fn emit<T: Serialize>(kind: &str, record: &T) {
        match serde_json::to_string(record) {
            Ok(line) => info!(target: "records", "{kind} {line}"),
            Err(err) => error!("failed to serialize {kind} record: {err}"),
        }
    }
}

impl RecordSink for LogSink {
    fn operation(&mut self, record: &OperationRecord) {
        LogSink::emit("operation", record);
    }

    fn fetch_failure(&mut self, record: &FetchFailureRecord) {
        LogSink::emit("fetch-failure", record);
    }

    fn forecast(&mut self, record: &ForecastRecord) {
        LogSink::emit("forecast", record);
    }
}

/// Captures records for assertions.
#[cfg(test)]
#[derive(Default)]
pub struct MemorySink {
    pub operations: Vec<OperationRecord>,
    pub fetch_failures: Vec<FetchFailureRecord>,
    pub forecasts: Vec<ForecastRecord>,
}

#[cfg(test)]
impl RecordSink for MemorySink {
    fn operation(&mut self, record: &OperationRecord) {
        self.operations.push(record.clone());
    }

    fn fetch_failure(&mut self, record: &FetchFailureRecord) {
        self.fetch_failures.push(record.clone());
    }

    fn forecast(&mut self, record: &ForecastRecord) {
        self.forecasts.push(record.clone());
    }
}
