use log::debug;

use super::{numeric, render, Batch, DataStream, Error, Metric, Stats, StreamKind, StreamMetrics, HOT};
use crate::base::{mean, Reading};

const TEMPERATURE: &str = "tmp";
/// Readings at or above this temperature pass the `hot` filter
const HOT_THRESHOLD: f64 = 30.0;

/// Environmental readings. Only `tmp` readings feed the average, other
/// keys (humidity, pressure, ..) are counted but otherwise ignored.
#[derive(Debug)]
pub struct SensorStream {
    id: String,
    total_count: usize,
    avg_tmp: f64,
    metrics: StreamMetrics,
}

impl SensorStream {
    pub fn new(id: impl Into<String>) -> SensorStream {
        let id = id.into();
        let metrics = StreamMetrics::new(&id);
        SensorStream { id, total_count: 0, avg_tmp: 0.0, metrics }
    }
}

impl DataStream for SensorStream {
    fn stream_id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> StreamKind {
        StreamKind::Sensor
    }

    fn process_batch(&mut self, batch: &[Reading]) -> Result<String, Error> {
        let temperatures = batch
            .iter()
            .filter(|r| r.key == TEMPERATURE)
            .map(|r| numeric(&self.id, r))
            .collect::<Result<Vec<f64>, Error>>()?;

        // A batch without temperatures averages to 0
        self.avg_tmp = mean(&temperatures).unwrap_or(0.0);
        self.total_count = batch.len();
        self.metrics.add_batch(batch.len());
        debug!("{}: {} readings, avg temp = {}", self.id, self.total_count, self.avg_tmp);

        Ok(render(batch, true))
    }

    fn filter_data(&self, batch: &[Reading], criteria: Option<&str>) -> Batch {
        match criteria {
            Some(HOT) => batch
                .iter()
                .filter(|r| r.key == TEMPERATURE && r.number().is_some_and(|t| t >= HOT_THRESHOLD))
                .cloned()
                .collect(),
            _ => batch.to_vec(),
        }
    }

    fn get_stats(&self) -> Stats {
        Stats {
            stream_type: self.kind(),
            total_count: self.total_count,
            metric: Metric::AverageTemperature(self.avg_tmp),
        }
    }

    fn metrics(&self) -> &StreamMetrics {
        &self.metrics
    }
}
