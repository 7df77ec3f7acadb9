use serde_json::Value;

use super::{Error, Processed, Processor, ProcessorKind};

/// Sums and averages a list of integers. Floats and bools are not integers
/// here, a single one makes the whole payload invalid.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumericProcessor;

/// Any json integer, negative or past `i64::MAX`
fn integer(value: &Value) -> Option<i128> {
    value.as_i64().map(i128::from).or_else(|| value.as_u64().map(i128::from))
}

impl NumericProcessor {
    fn integers(data: &Value) -> Option<Vec<i128>> {
        data.as_array()?.iter().map(integer).collect()
    }
}

impl Processor for NumericProcessor {
    fn kind(&self) -> ProcessorKind {
        ProcessorKind::Numeric
    }

    fn validate(&self, data: &Value) -> bool {
        Self::integers(data).is_some()
    }

    fn process(&self, data: &Value) -> Result<Processed, Error> {
        let values = Self::integers(data).ok_or(Error::ValidationFailed(self.kind()))?;
        if values.is_empty() {
            return Err(Error::EmptyInput);
        }

        let count = values.len();
        let sum: i128 = values.iter().sum();
        let avg = sum as f64 / count as f64;

        Ok(Processed::Numeric { count, sum, avg })
    }
}
