/// Running totals for a stream, kept across batches. Unlike [`super::Stats`]
/// these only ever grow until [`StreamMetrics::reset`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StreamMetrics {
    stream: String,
    batch_count: u64,
    point_count: usize,
}

impl StreamMetrics {
    pub fn new(stream: &str) -> Self {
        StreamMetrics { stream: stream.to_owned(), ..Default::default() }
    }

    pub fn add_batch(&mut self, point_count: usize) {
        self.batch_count += 1;
        self.point_count += point_count;
    }

    pub fn stream(&self) -> &str {
        &self.stream
    }

    pub fn batch_count(&self) -> u64 {
        self.batch_count
    }

    pub fn point_count(&self) -> usize {
        self.point_count
    }

    pub fn reset(&mut self) {
        self.batch_count = 0;
        self.point_count = 0;
    }
}
