//! Tagged pipelines. Input arrives as a `(tag, content)` record, a
//! [`NexusManager`] hands it to the one [`Adapter`] registered for that tag,
//! and the adapter runs it through its stages in order.
//!
//!```text
//!                     ┌────────────┐   ┌───────────┐   ┌──────────┐   ┌───────────┐
//!  (tag, content) ───►│NexusManager├──►│Input stage├──►│Transform ├──►│Output     ├──► Summary
//!                     └─────┬──────┘   └───────────┘   │stage     │   │stage      │
//!                           │ no adapter for tag       └──────────┘   └───────────┘
//!                           ▼
//!                    NoAdapterForTag
//!```

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::Value;

mod adapter;
mod manager;
mod stage;

pub use adapter::{Adapter, PipelineBuilder, PipelineRun};
pub use manager::NexusManager;
pub use stage::{InputStage, OutputStage, Stage, StageOutput, Summary, TransformStage};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    #[error("Unsupported data format {0:?}")]
    UnsupportedFormat(String),
    #[error("No adapter registered for tag {0:?}")]
    NoAdapterForTag(String),
    #[error("An adapter for {0} data is already registered")]
    DuplicateAdapter(DataTag),
    #[error("Can't summarize an empty reading list")]
    EmptyInput,
    #[error("{0} content has an unexpected shape: {1}")]
    ValidationFailed(DataTag, &'static str),
    #[error("Field {0:?} missing in json content")]
    MissingField(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataTag {
    Json,
    Csv,
    Stream,
}

impl DataTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataTag::Json => "json",
            DataTag::Csv => "csv",
            DataTag::Stream => "stream",
        }
    }
}

impl fmt::Display for DataTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataTag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(DataTag::Json),
            "csv" => Ok(DataTag::Csv),
            "stream" => Ok(DataTag::Stream),
            tag => Err(Error::UnsupportedFormat(tag.to_owned())),
        }
    }
}

/// A `(tag, content)` record as it enters a pipeline. The tag is kept as
/// sent, stages resolve it and fail on tags they don't handle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tagged {
    pub tag: String,
    pub content: Value,
}

impl Tagged {
    pub fn new(tag: impl Into<String>, content: impl Into<Value>) -> Tagged {
        Tagged { tag: tag.into(), content: content.into() }
    }

    pub fn data_tag(&self) -> Result<DataTag, Error> {
        self.tag.parse()
    }
}
