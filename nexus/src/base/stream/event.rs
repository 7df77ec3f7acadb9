use log::debug;

use super::{render, Batch, DataStream, Error, Metric, Stats, StreamKind, StreamMetrics, ERROR};
use crate::base::Reading;

/// System events keyed by what happened (`login`, `error`, `logout`, ..)
/// with a timestamp as value. Only the keys matter here.
#[derive(Debug)]
pub struct EventStream {
    id: String,
    total_count: usize,
    error_count: usize,
    metrics: StreamMetrics,
}

impl EventStream {
    pub fn new(id: impl Into<String>) -> EventStream {
        let id = id.into();
        let metrics = StreamMetrics::new(&id);
        EventStream { id, total_count: 0, error_count: 0, metrics }
    }
}

impl DataStream for EventStream {
    fn stream_id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> StreamKind {
        StreamKind::Event
    }

    fn process_batch(&mut self, batch: &[Reading]) -> Result<String, Error> {
        self.error_count = batch.iter().filter(|r| r.key == ERROR).count();
        self.total_count = batch.len();
        self.metrics.add_batch(batch.len());
        debug!("{}: {} events, {} errors", self.id, self.total_count, self.error_count);

        Ok(render(batch, false))
    }

    fn filter_data(&self, batch: &[Reading], criteria: Option<&str>) -> Batch {
        match criteria {
            Some(ERROR) => batch.iter().filter(|r| r.key == ERROR).cloned().collect(),
            _ => batch.to_vec(),
        }
    }

    fn get_stats(&self) -> Stats {
        Stats {
            stream_type: self.kind(),
            total_count: self.total_count,
            metric: Metric::ErrorCount(self.error_count),
        }
    }

    fn metrics(&self) -> &StreamMetrics {
        &self.metrics
    }
}
