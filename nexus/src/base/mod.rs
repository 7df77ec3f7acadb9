use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub mod pipeline;
pub mod processor;
pub mod stream;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ReadingError {
    #[error("Reading must hold exactly one key, found {0}")]
    KeyCount(usize),
}

/// A single-key mapping such as `{"tmp": 22.5}`. Stream batches are
/// sequences of these; the key decides how a stream treats the value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct Reading {
    pub key: String,
    pub value: Value,
}

impl Reading {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Reading {
        Reading { key: key.into(), value: value.into() }
    }

    /// Numeric view of the value, `None` for strings, bools, etc
    pub fn number(&self) -> Option<f64> {
        self.value.as_f64()
    }
}

impl TryFrom<Map<String, Value>> for Reading {
    type Error = ReadingError;

    fn try_from(map: Map<String, Value>) -> Result<Self, Self::Error> {
        if map.len() != 1 {
            return Err(ReadingError::KeyCount(map.len()));
        }

        // Length checked above
        let (key, value) = map.into_iter().next().ok_or(ReadingError::KeyCount(0))?;
        Ok(Reading { key, value })
    }
}

impl From<Reading> for Map<String, Value> {
    fn from(reading: Reading) -> Self {
        let mut map = Map::with_capacity(1);
        map.insert(reading.key, reading.value);
        map
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Value::String(s) => write!(f, "{}:{s}", self.key),
            v => write!(f, "{}:{v}", self.key),
        }
    }
}

/// Arithmetic mean, `None` over an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    Some(values.iter().sum::<f64>() / values.len() as f64)
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    #[test]
    fn reading_from_single_key_object() {
        let reading: Reading = serde_json::from_value(json!({"tmp": 22.5})).unwrap();
        assert_eq!(reading, Reading::new("tmp", 22.5));
        assert_eq!(reading.number(), Some(22.5));
        assert_eq!(reading.to_string(), "tmp:22.5");

        let reading: Reading = serde_json::from_value(json!({"login": "09:15"})).unwrap();
        assert_eq!(reading.number(), None);
        assert_eq!(reading.to_string(), "login:09:15");
    }

    #[test]
    fn reading_rejects_multiple_keys() {
        let r = serde_json::from_value::<Reading>(json!({"buy": 1, "sell": 2}));
        assert!(r.is_err());

        let r = serde_json::from_value::<Reading>(json!({}));
        assert!(r.is_err());
    }

    #[test]
    fn reading_serializes_back_to_object() {
        let value = serde_json::to_value(Reading::new("sell", 150)).unwrap();
        assert_eq!(value, json!({"sell": 150}));
    }

    #[test]
    fn mean_of_values() {
        assert_eq!(mean(&[23.0, 21.0, 22.0, 22.5, 22.0]), Some(22.1));
        assert_eq!(mean(&[]), None);
    }
}
