use std::io::Write;

use log::warn;

use super::Error;
use crate::base::processor::{self, ProcessorKind};
use crate::config::Config;

fn verified(kind: ProcessorKind) -> &'static str {
    match kind {
        ProcessorKind::Numeric => "Numeric data verified",
        ProcessorKind::Text => "Text data verified",
        ProcessorKind::Log => "Log entry verified",
    }
}

pub fn run(config: &Config, out: &mut impl Write) -> Result<(), Error> {
    writeln!(out, "=== CODE NEXUS - DATA PROCESSOR FOUNDATION ===")?;

    for input in config.demo.processors.iter() {
        let processor = input.kind.processor();
        writeln!(out, "\nInitializing {} Processor...", input.kind)?;
        writeln!(out, "Processing data: {}", input.data)?;

        match processor::handle(processor.as_ref(), &input.data) {
            Ok(processed) => {
                writeln!(out, "Validation: {}", verified(input.kind))?;
                writeln!(out, "{}", processor.format_output(&processed.to_string()))?;
            }
            Err(e) => {
                warn!("{} processor failed: {e}", input.kind);
                writeln!(out, "Validation: {e}")?;
            }
        }
    }

    writeln!(out, "\n=== Polymorphic Processing Demo ===")?;
    writeln!(out, "Processing multiple data types through same interface...")?;
    for (i, input) in config.demo.polymorphic.iter().enumerate() {
        let processor = input.kind.processor();
        match processor::handle(processor.as_ref(), &input.data) {
            Ok(processed) => {
                writeln!(out, "Result {}: {}", i + 1, processor.format_output(&processed.to_string()))?
            }
            Err(e) => writeln!(out, "Result {}: skipped, {e}", i + 1)?,
        }
    }

    writeln!(out, "\nFoundation systems online. Nexus ready for advanced streams.")?;
    Ok(())
}
