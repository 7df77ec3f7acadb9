use std::fmt::{self, Debug};
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use crate::base::Reading;

mod event;
mod manager;
mod metrics;
mod sensor;
mod transaction;

pub use event::EventStream;
pub use manager::{BatchReport, FilterReport, StreamLine, StreamManager};
pub use metrics::StreamMetrics;
pub use sensor::SensorStream;
pub use transaction::TransactionStream;

pub type Batch = Vec<Reading>;

/// Filter criteria understood by the built-in streams
pub const HOT: &str = "hot";
pub const LARGE: &str = "large";
pub const ERROR: &str = "error";

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    #[error("{stream}: reading {key:?} needs a numeric value, got {value}")]
    ValidationFailed { stream: String, key: String, value: serde_json::Value },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamKind {
    Sensor,
    Transaction,
    Event,
}

impl StreamKind {
    pub fn stream(self, id: impl Into<String>) -> Box<dyn DataStream> {
        match self {
            StreamKind::Sensor => Box::new(SensorStream::new(id)),
            StreamKind::Transaction => Box::new(TransactionStream::new(id)),
            StreamKind::Event => Box::new(EventStream::new(id)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StreamKind::Sensor => "Sensor",
            StreamKind::Transaction => "Transaction",
            StreamKind::Event => "Event",
        }
    }

    /// What a single item of this stream is called in reports
    pub fn label(&self) -> &'static str {
        match self {
            StreamKind::Sensor => "readings",
            StreamKind::Transaction => "operations",
            StreamKind::Event => "events",
        }
    }

    pub fn category(&self) -> &'static str {
        match self {
            StreamKind::Sensor => "Environmental Data",
            StreamKind::Transaction => "Financial Data",
            StreamKind::Event => "System Events",
        }
    }
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per stream filter criteria used by [`StreamManager::filter_report`]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Criteria {
    pub sensor: String,
    pub transaction: String,
    pub event: String,
}

impl Criteria {
    pub fn get(&self, kind: StreamKind) -> &str {
        match kind {
            StreamKind::Sensor => &self.sensor,
            StreamKind::Transaction => &self.transaction,
            StreamKind::Event => &self.event,
        }
    }
}

impl Default for Criteria {
    fn default() -> Self {
        Criteria { sensor: HOT.to_owned(), transaction: LARGE.to_owned(), event: ERROR.to_owned() }
    }
}

/// Net amount of a transaction batch. Integer amounts are summed exactly,
/// a single fractional amount turns the whole sum into a float.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Flow {
    Units(i128),
    Fractional(f64),
}

impl Flow {
    /// Amount held by `reading`, exact for any json integer
    pub(crate) fn of(stream: &str, reading: &Reading) -> Result<Flow, Error> {
        let value = &reading.value;
        match value.as_i64().map(i128::from).or_else(|| value.as_u64().map(i128::from)) {
            Some(units) => Ok(Flow::Units(units)),
            None => numeric(stream, reading).map(Flow::Fractional),
        }
    }

    pub fn as_f64(&self) -> f64 {
        match *self {
            Flow::Units(n) => n as f64,
            Flow::Fractional(n) => n,
        }
    }
}

impl Add for Flow {
    type Output = Flow;

    fn add(self, other: Flow) -> Flow {
        match (self, other) {
            (Flow::Units(a), Flow::Units(b)) => Flow::Units(a + b),
            (a, b) => Flow::Fractional(a.as_f64() + b.as_f64()),
        }
    }
}

impl Sub for Flow {
    type Output = Flow;

    fn sub(self, other: Flow) -> Flow {
        match other {
            Flow::Units(b) => self + Flow::Units(-b),
            Flow::Fractional(b) => self + Flow::Fractional(-b),
        }
    }
}

impl fmt::Display for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Flow::Units(n) if *n > 0 => write!(f, "+{n}"),
            Flow::Units(n) => write!(f, "{n}"),
            Flow::Fractional(n) if *n > 0.0 => write!(f, "+{n}"),
            Flow::Fractional(n) => write!(f, "{n}"),
        }
    }
}

/// The derived figure each stream keeps for its latest batch
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Metric {
    AverageTemperature(f64),
    NetFlow(Flow),
    ErrorCount(usize),
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::AverageTemperature(t) => write!(f, "avg temp: {t}°C"),
            Metric::NetFlow(n) => write!(f, "net flow: {n} units"),
            Metric::ErrorCount(e) => write!(f, "{e} error detected"),
        }
    }
}

/// Snapshot of a stream after its most recent batch. Nothing here is
/// cumulative, see [`StreamMetrics`] for running totals.
#[derive(Debug, Clone, PartialEq)]
pub struct Stats {
    pub stream_type: StreamKind,
    pub total_count: usize,
    pub metric: Metric,
}

pub trait DataStream: Debug {
    fn stream_id(&self) -> &str;
    fn kind(&self) -> StreamKind;

    /// Aggregates `batch` into this stream's stats, replacing whatever the
    /// previous batch left. Returns the batch rendered for display. On error
    /// the stats are left untouched.
    fn process_batch(&mut self, batch: &[Reading]) -> Result<String, Error>;

    /// Keeps the items matching `criteria`. Criteria this stream doesn't know,
    /// or none at all, keep the batch as is.
    fn filter_data(&self, batch: &[Reading], criteria: Option<&str>) -> Batch;

    fn get_stats(&self) -> Stats;

    fn metrics(&self) -> &StreamMetrics;
}

/// Renders `[key:value, ...]`, or `[key, ...]` when values are left out
pub(crate) fn render(batch: &[Reading], with_values: bool) -> String {
    let items: Vec<String> = batch
        .iter()
        .map(|r| if with_values { r.to_string() } else { r.key.clone() })
        .collect();

    format!("[{}]", items.join(", "))
}

/// Numeric value of a reading the stream aggregates
pub(crate) fn numeric(stream: &str, reading: &Reading) -> Result<f64, Error> {
    reading.number().ok_or_else(|| Error::ValidationFailed {
        stream: stream.to_owned(),
        key: reading.key.clone(),
        value: reading.value.clone(),
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn render_with_and_without_values() {
        let batch = vec![Reading::new("tmp", 22.5), Reading::new("humidity", 65)];
        assert_eq!(render(&batch, true), "[tmp:22.5, humidity:65]");
        assert_eq!(render(&batch, false), "[tmp, humidity]");
        assert_eq!(render(&[], true), "[]");
    }

    #[test]
    fn kinds_build_matching_streams() {
        for kind in [StreamKind::Sensor, StreamKind::Transaction, StreamKind::Event] {
            let stream = kind.stream("ID");
            assert_eq!(stream.kind(), kind);
            assert_eq!(stream.stream_id(), "ID");
        }
    }

    #[test]
    fn net_flow_is_signed_when_positive() {
        assert_eq!(Metric::NetFlow(Flow::Units(25)).to_string(), "net flow: +25 units");
        assert_eq!(Metric::NetFlow(Flow::Units(-15)).to_string(), "net flow: -15 units");
        assert_eq!(Metric::NetFlow(Flow::Units(0)).to_string(), "net flow: 0 units");
        assert_eq!(Metric::NetFlow(Flow::Fractional(2.5)).to_string(), "net flow: +2.5 units");
    }

    #[test]
    fn flow_stays_exact_for_integers() {
        let big = Flow::Units(9007199254740993);
        assert_eq!(big - Flow::Units(0), Flow::Units(9007199254740993));
        assert_eq!(Flow::Units(100) - Flow::Units(150), Flow::Units(-50));
        assert_eq!(Flow::Units(1) + Flow::Fractional(0.5), Flow::Fractional(1.5));
    }

    #[test]
    fn default_criteria() {
        let criteria = Criteria::default();
        assert_eq!(criteria.get(StreamKind::Sensor), HOT);
        assert_eq!(criteria.get(StreamKind::Transaction), LARGE);
        assert_eq!(criteria.get(StreamKind::Event), ERROR);
    }
}
