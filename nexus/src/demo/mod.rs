//! Narration for the three demos. Everything here formats results the core
//! modules return, none of it computes anything on its own.

use std::{io::Write, str::FromStr};

use crate::base::{pipeline, stream};
use crate::config::Config;

mod pipelines;
mod processors;
mod streams;

pub use pipelines::run as pipelines;
pub use processors::run as processors;
pub use streams::run as streams;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Io error {0}")]
    Io(#[from] std::io::Error),
    #[error("Stream error {0}")]
    Stream(#[from] stream::Error),
    #[error("Pipeline error {0}")]
    Pipeline(#[from] pipeline::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Demo {
    Processors,
    Streams,
    Pipeline,
    All,
}

impl FromStr for Demo {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "processors" => Ok(Demo::Processors),
            "streams" => Ok(Demo::Streams),
            "pipeline" => Ok(Demo::Pipeline),
            "all" => Ok(Demo::All),
            d => Err(format!("unknown demo {d:?}, expected processors, streams, pipeline or all")),
        }
    }
}

pub fn run(demo: Demo, config: &Config, out: &mut impl Write) -> Result<(), Error> {
    match demo {
        Demo::Processors => processors(config, out),
        Demo::Streams => streams(config, out),
        Demo::Pipeline => pipelines(config, out),
        Demo::All => {
            processors(config, out)?;
            writeln!(out)?;
            streams(config, out)?;
            writeln!(out)?;
            pipelines(config, out)
        }
    }
}
