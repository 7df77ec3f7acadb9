//! Processors validate, process and format payloads of one fixed kind. Callers
//! pick a processor through [`ProcessorKind`] and drive it with [`handle`],
//! which refuses to process anything that didn't validate.

use std::fmt::{self, Debug};

use log::{debug, trace};
use serde::{Deserialize, Serialize};
use serde_json::Value;

mod logs;
mod numeric;
mod text;

pub use logs::LogProcessor;
pub use numeric::NumericProcessor;
pub use text::TextProcessor;

/// Prefix every processor puts in front of its rendered result
pub const OUTPUT_PREFIX: &str = "Output: ";

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    #[error("{0} processor rejected the payload")]
    ValidationFailed(ProcessorKind),
    #[error("Can't average an empty payload")]
    EmptyInput,
    #[error("Unknown log level {0:?}")]
    UnknownLevel(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessorKind {
    Numeric,
    Text,
    Log,
}

impl ProcessorKind {
    pub fn processor(self) -> Box<dyn Processor> {
        match self {
            ProcessorKind::Numeric => Box::new(NumericProcessor),
            ProcessorKind::Text => Box::new(TextProcessor),
            ProcessorKind::Log => Box::new(LogProcessor),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessorKind::Numeric => "Numeric",
            ProcessorKind::Text => "Text",
            ProcessorKind::Log => "Log",
        }
    }
}

impl fmt::Display for ProcessorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured result of [`Processor::process`]. `Display` renders the
/// one-line summary that [`Processor::format_output`] wraps.
#[derive(Debug, Clone, PartialEq)]
pub enum Processed {
    Numeric { count: usize, sum: i128, avg: f64 },
    Text { characters: usize, words: usize },
    Log { prefix: &'static str, level: String, message: String },
}

impl fmt::Display for Processed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Processed::Numeric { count, sum, avg } => {
                write!(f, "Processed {count} numeric values, sum={sum}, avg={avg}")
            }
            Processed::Text { characters, words } => {
                write!(f, "Processed text: {characters} characters, {words} words")
            }
            Processed::Log { prefix, level, message } => {
                write!(f, "{prefix} {level} level detected:{message}")
            }
        }
    }
}

pub trait Processor: Debug {
    fn kind(&self) -> ProcessorKind;

    /// Checks the payload's shape. Cheap and side effect free
    fn validate(&self, data: &Value) -> bool;

    /// Computes the summary. Payloads that wouldn't validate are rejected
    /// with [`Error::ValidationFailed`] instead of being half processed.
    fn process(&self, data: &Value) -> Result<Processed, Error>;

    fn format_output(&self, result: &str) -> String {
        format!("{OUTPUT_PREFIX}{result}")
    }
}

/// Validates before processing. Invalid payloads come back as
/// [`Error::ValidationFailed`] so the caller can skip and carry on.
pub fn handle(processor: &dyn Processor, data: &Value) -> Result<Processed, Error> {
    if !processor.validate(data) {
        debug!("{} processor skipping payload {data}", processor.kind());
        return Err(Error::ValidationFailed(processor.kind()));
    }

    let processed = processor.process(data)?;
    trace!("{} processor => {processed}", processor.kind());
    Ok(processed)
}
