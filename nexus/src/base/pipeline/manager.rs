use log::{debug, error, info};

use super::{Adapter, Error, PipelineRun, Tagged};

/// Registry of adapters, at most one per tag
#[derive(Debug, Default)]
pub struct NexusManager {
    adapters: Vec<Adapter>,
}

impl NexusManager {
    pub fn new() -> Self {
        NexusManager { adapters: vec![] }
    }

    /// Registers `adapter`, refusing a second adapter for the same tag so
    /// dispatch never has to choose between two
    pub fn add_adapter(&mut self, adapter: Adapter) -> Result<(), Error> {
        if self.adapters.iter().any(|a| a.tag() == adapter.tag()) {
            return Err(Error::DuplicateAdapter(adapter.tag()));
        }

        info!("Registered pipeline {} for {} data", adapter.id(), adapter.tag());
        self.adapters.push(adapter);
        Ok(())
    }

    pub fn adapters(&self) -> &[Adapter] {
        &self.adapters
    }

    /// Adapter whose tag matches exactly. There is no fallback adapter.
    pub fn select(&self, tag: &str) -> Result<&Adapter, Error> {
        self.adapters
            .iter()
            .find(|a| a.tag().as_str() == tag)
            .ok_or_else(|| Error::NoAdapterForTag(tag.to_owned()))
    }

    pub fn process(&self, data: &Tagged) -> Result<PipelineRun, Error> {
        let adapter = self.select(&data.tag)?;
        debug!("Dispatching {} data to pipeline {}", data.tag, adapter.id());
        adapter.process(data)
    }

    /// Processes every input, logging failures and moving on to the next
    pub fn process_all(&self, inputs: &[Tagged]) -> Vec<Result<PipelineRun, Error>> {
        inputs
            .iter()
            .map(|data| {
                let run = self.process(data);
                if let Err(e) = &run {
                    error!("Pipeline failed for {} data. Error = {e}", data.tag);
                }

                run
            })
            .collect()
    }

    /// `Pipeline A -> Pipeline B -> ...` in registration order
    pub fn chain(&self) -> String {
        let names: Vec<String> = self.adapters.iter().map(|a| format!("Pipeline {}", a.id())).collect();
        names.join(" -> ")
    }
}
