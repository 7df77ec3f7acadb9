use std::io::Write;

use log::info;

use super::Error;
use crate::base::pipeline::{DataTag, NexusManager, PipelineBuilder, PipelineRun, StageOutput};
use crate::config::Config;

/// Stage count every configured adapter is built with
const STANDARD_STAGES: usize = 3;

fn heading(tag: &str) -> String {
    let name = match tag.parse::<DataTag>() {
        Ok(DataTag::Json) => "JSON",
        Ok(DataTag::Csv) => "CSV",
        Ok(DataTag::Stream) => "Stream",
        Err(_) => tag,
    };

    format!("Processing {name} data through pipeline...")
}

fn narrate(run: &PipelineRun, out: &mut impl Write) -> Result<(), Error> {
    for output in run.outputs.iter() {
        match output {
            StageOutput::Input { display: Some(display), .. } => writeln!(out, "Input: {display}")?,
            StageOutput::Input { display: None, .. } => {}
            StageOutput::Transform { enrichment, .. } => writeln!(out, "Transform: {enrichment}")?,
            StageOutput::Output { summary } => writeln!(out, "Output: {}: {summary}", summary.subject())?,
        }
    }

    Ok(())
}

pub fn run(config: &Config, out: &mut impl Write) -> Result<(), Error> {
    writeln!(out, "=== CODE NEXUS - ENTERPRISE PIPELINE SYSTEM ===")?;
    writeln!(out, "\nInitializing Nexus Manager...")?;
    let mut manager = NexusManager::new();

    writeln!(out, "\nCreating Data Processing Pipeline...")?;
    for (i, adapter) in config.pipeline.adapters.iter().enumerate() {
        // Stage wiring only gets announced once, for the first pipeline
        let announce = config.pipeline.announce_stages && i == 0;
        let adapter = PipelineBuilder::new(adapter.id.as_str(), adapter.tag)
            .announce_stages(announce)
            .standard_stages()
            .build();

        if announce {
            for stage in adapter.describe_stages() {
                writeln!(out, "{stage}")?;
            }
        }

        manager.add_adapter(adapter)?;
    }

    writeln!(out, "\n=== Multi-Format Data Processing ===")?;
    for data in config.demo.pipeline.iter() {
        writeln!(out, "\n{}", heading(&data.tag))?;
        let run = manager.process(data)?;
        narrate(&run, out)?;
    }

    writeln!(out, "\n=== Pipeline Chaining Demo ===")?;
    writeln!(out, "{}", manager.chain())?;
    writeln!(out, "Data flow: Raw -> Processed -> Analyzed -> Stored\n")?;
    writeln!(
        out,
        "Chain result: {} records processed through {STANDARD_STAGES}-stage pipeline",
        config.demo.pipeline.len()
    )?;

    writeln!(out, "\n=== Error Recovery Test ===")?;
    writeln!(out, "Simulating pipeline failure...")?;
    let runs = manager.process_all(&config.demo.recovery);
    let failed = runs.iter().filter(|run| run.is_err()).count();
    for run in runs.iter() {
        match run {
            Ok(run) => narrate(run, out)?,
            Err(e) => writeln!(out, "Error detected: {e}")?,
        }
    }

    if failed > 0 {
        info!("Recovered from {failed} failed inputs");
        writeln!(out, "Recovery successful: {failed} failed inputs skipped, processing resumed")?;
    }

    writeln!(out, "\nNexus Integration complete. All systems operational.")?;
    Ok(())
}
