//! nexus runs heterogeneous data through three families of polymorphic
//! components, each driven through a single interface:
//!
//! - [`Processor`]s validate and summarize numeric, text and log payloads.
//! - [`DataStream`]s aggregate batches of single-key readings, with a
//!   [`StreamManager`] driving a mixed set of them.
//! - [`Adapter`]s run `(tag, content)` records through input, transform and
//!   output stages, with a [`NexusManager`] picking the adapter by tag.
//!
//! The core returns structured results, the [`demo`] module narrates them.

pub mod base;
pub mod cli;
pub mod config;
pub mod demo;

pub use base::pipeline::{Adapter, DataTag, NexusManager, PipelineBuilder, Tagged};
pub use base::processor::{Processor, ProcessorKind};
pub use base::stream::{DataStream, StreamKind, StreamManager};
pub use base::Reading;
pub use crate::config::Config;
