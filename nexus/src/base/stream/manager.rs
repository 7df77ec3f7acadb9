use std::fmt;

use log::{debug, trace};

use super::{Batch, Criteria, DataStream, Error, StreamKind};

/// One line of a [`BatchReport`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamLine {
    pub stream_id: String,
    pub kind: StreamKind,
    pub total_count: usize,
}

impl fmt::Display for StreamLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "- {} data: {} {} processed", self.kind, self.total_count, self.kind.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    pub batch: u64,
    pub lines: Vec<StreamLine>,
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Batch {} Results:", self.batch)?;
        for line in &self.lines {
            write!(f, "\n{line}")?;
        }

        Ok(())
    }
}

/// Number of items each kind of stream let through its filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterReport {
    pub sensor: usize,
    pub transaction: usize,
    pub event: usize,
}

impl FilterReport {
    fn add(&mut self, kind: StreamKind, count: usize) {
        match kind {
            StreamKind::Sensor => self.sensor += count,
            StreamKind::Transaction => self.transaction += count,
            StreamKind::Event => self.event += count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sensor == 0 && self.transaction == 0 && self.event == 0
    }
}

impl fmt::Display for FilterReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut clauses = vec![];
        if self.sensor > 0 {
            clauses.push(format!("{} high temperature readings", self.sensor));
        }
        if self.event > 0 {
            clauses.push(format!("{} critical sensor alerts", self.event));
        }
        if self.transaction > 0 {
            clauses.push(format!("{} large transactions", self.transaction));
        }

        if clauses.is_empty() {
            return write!(f, "Filtered results: none");
        }

        write!(f, "Filtered results: {}", clauses.join(", "))
    }
}

/// Drives a mixed set of streams through one interface. Keeps count of the
/// batches it has run so every report is numbered.
#[derive(Debug, Default)]
pub struct StreamManager {
    batch_count: u64,
    criteria: Criteria,
}

impl StreamManager {
    pub fn new(criteria: Criteria) -> Self {
        StreamManager { batch_count: 0, criteria }
    }

    pub fn batch_count(&self) -> u64 {
        self.batch_count
    }

    /// Processes every (stream, batch) pair in order. Fails on the first
    /// stream that rejects its batch, streams before it keep their new stats
    /// and the failed run doesn't use up a batch number.
    pub fn process_streams(
        &mut self,
        streams: &mut [(Box<dyn DataStream>, Batch)],
    ) -> Result<BatchReport, Error> {
        let mut lines = Vec::with_capacity(streams.len());

        for (stream, batch) in streams.iter_mut() {
            stream.process_batch(batch)?;
            let stats = stream.get_stats();
            lines.push(StreamLine {
                stream_id: stream.stream_id().to_owned(),
                kind: stats.stream_type,
                total_count: stats.total_count,
            });
        }

        // Only batches that went through get a number
        self.batch_count += 1;
        debug!("Processed batch {} across {} streams", self.batch_count, lines.len());
        Ok(BatchReport { batch: self.batch_count, lines })
    }

    /// Runs each stream's own filter with the criteria configured for its kind
    pub fn filter_report(&self, streams: &[(Box<dyn DataStream>, Batch)]) -> FilterReport {
        let mut report = FilterReport::default();
        for (stream, batch) in streams {
            let kind = stream.kind();
            let filtered = stream.filter_data(batch, Some(self.criteria.get(kind)));
            trace!("{}: {} of {} items passed filter", stream.stream_id(), filtered.len(), batch.len());
            report.add(kind, filtered.len());
        }

        report
    }
}
