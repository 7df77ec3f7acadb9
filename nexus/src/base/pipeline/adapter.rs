use log::{debug, info};

use super::{DataTag, Error, InputStage, OutputStage, Stage, StageOutput, Summary, Tagged, TransformStage};

/// Collects stages for an [`Adapter`]. Stages can only be attached here,
/// [`PipelineBuilder::build`] freezes them for the adapter's lifetime.
#[derive(Debug)]
pub struct PipelineBuilder {
    id: String,
    tag: DataTag,
    announce: bool,
    stages: Vec<Box<dyn Stage>>,
}

impl PipelineBuilder {
    pub fn new(id: impl Into<String>, tag: DataTag) -> PipelineBuilder {
        PipelineBuilder { id: id.into(), tag, announce: false, stages: vec![] }
    }

    /// Log each stage as it is attached
    pub fn announce_stages(mut self, announce: bool) -> Self {
        self.announce = announce;
        self
    }

    pub fn stage(mut self, stage: impl Stage + 'static) -> Self {
        self.stages.push(Box::new(stage));
        if self.announce {
            info!("Pipeline {}: stage {}: {}", self.id, self.stages.len(), stage_description(&self.stages));
        }

        self
    }

    /// Input, transform, output
    pub fn standard_stages(self) -> Self {
        self.stage(InputStage).stage(TransformStage).stage(OutputStage)
    }

    pub fn build(self) -> Adapter {
        debug!("Pipeline {} ready for {} data with {} stages", self.id, self.tag, self.stages.len());
        Adapter { id: self.id, tag: self.tag, stages: self.stages }
    }
}

fn stage_description(stages: &[Box<dyn Stage>]) -> &'static str {
    stages.last().map(|s| s.description()).unwrap_or_default()
}

/// A pipeline bound to one data tag
#[derive(Debug)]
pub struct Adapter {
    id: String,
    tag: DataTag,
    stages: Vec<Box<dyn Stage>>,
}

impl Adapter {
    pub fn json(id: impl Into<String>) -> Adapter {
        PipelineBuilder::new(id, DataTag::Json).standard_stages().build()
    }

    pub fn csv(id: impl Into<String>) -> Adapter {
        PipelineBuilder::new(id, DataTag::Csv).standard_stages().build()
    }

    pub fn stream(id: impl Into<String>) -> Adapter {
        PipelineBuilder::new(id, DataTag::Stream).standard_stages().build()
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn tag(&self) -> DataTag {
        self.tag
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// `Stage N: description` for every attached stage
    pub fn describe_stages(&self) -> Vec<String> {
        self.stages
            .iter()
            .enumerate()
            .map(|(i, stage)| format!("Stage {}: {}", i + 1, stage.description()))
            .collect()
    }

    /// Hands `data` to every stage in order. The first failing stage ends
    /// the run, nothing is retried.
    pub fn process(&self, data: &Tagged) -> Result<PipelineRun, Error> {
        let mut outputs = Vec::with_capacity(self.stages.len());
        for stage in self.stages.iter() {
            outputs.push(stage.process(data)?);
        }

        Ok(PipelineRun { adapter: self.id.clone(), tag: self.tag, outputs })
    }
}

/// Everything the stages of one run produced, in stage order
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineRun {
    pub adapter: String,
    pub tag: DataTag,
    pub outputs: Vec<StageOutput>,
}

impl PipelineRun {
    /// Summary of the last output stage, if the pipeline had one
    pub fn summary(&self) -> Option<&Summary> {
        self.outputs.iter().rev().find_map(|output| match output {
            StageOutput::Output { summary } => Some(summary),
            _ => None,
        })
    }
}
