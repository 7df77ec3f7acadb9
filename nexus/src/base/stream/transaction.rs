use log::debug;

use super::{render, Batch, DataStream, Error, Flow, Metric, Stats, StreamKind, StreamMetrics, LARGE};
use crate::base::Reading;

const BUY: &str = "buy";
const SELL: &str = "sell";
/// Operations worth at least this much pass the `large` filter
const LARGE_THRESHOLD: f64 = 100.0;

/// Financial operations, `buy` adds to the net flow and `sell` takes from it
#[derive(Debug)]
pub struct TransactionStream {
    id: String,
    total_count: usize,
    net_flow: Flow,
    metrics: StreamMetrics,
}

impl TransactionStream {
    pub fn new(id: impl Into<String>) -> TransactionStream {
        let id = id.into();
        let metrics = StreamMetrics::new(&id);
        TransactionStream { id, total_count: 0, net_flow: Flow::Units(0), metrics }
    }
}

impl DataStream for TransactionStream {
    fn stream_id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> StreamKind {
        StreamKind::Transaction
    }

    fn process_batch(&mut self, batch: &[Reading]) -> Result<String, Error> {
        let mut net_flow = Flow::Units(0);
        for reading in batch {
            match reading.key.as_str() {
                BUY => net_flow = net_flow + Flow::of(&self.id, reading)?,
                SELL => net_flow = net_flow - Flow::of(&self.id, reading)?,
                _ => {}
            }
        }

        self.net_flow = net_flow;
        self.total_count = batch.len();
        self.metrics.add_batch(batch.len());
        debug!("{}: {} operations, net flow = {}", self.id, self.total_count, self.net_flow);

        Ok(render(batch, true))
    }

    fn filter_data(&self, batch: &[Reading], criteria: Option<&str>) -> Batch {
        match criteria {
            Some(LARGE) => batch
                .iter()
                .filter(|r| r.number().is_some_and(|v| v >= LARGE_THRESHOLD))
                .cloned()
                .collect(),
            _ => batch.to_vec(),
        }
    }

    fn get_stats(&self) -> Stats {
        Stats {
            stream_type: self.kind(),
            total_count: self.total_count,
            metric: Metric::NetFlow(self.net_flow),
        }
    }

    fn metrics(&self) -> &StreamMetrics {
        &self.metrics
    }
}
