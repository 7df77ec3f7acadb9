use serde_json::Value;

use super::{Error, Processed, Processor, ProcessorKind};

#[derive(Debug, Clone, Copy, Default)]
pub struct TextProcessor;

/// Pieces between single spaces. Runs of spaces count empty words and the
/// empty string is one empty word.
fn word_count(text: &str) -> usize {
    text.split(' ').count()
}

impl Processor for TextProcessor {
    fn kind(&self) -> ProcessorKind {
        ProcessorKind::Text
    }

    fn validate(&self, data: &Value) -> bool {
        data.is_string()
    }

    fn process(&self, data: &Value) -> Result<Processed, Error> {
        let text = data.as_str().ok_or(Error::ValidationFailed(self.kind()))?;

        Ok(Processed::Text { characters: text.chars().count(), words: word_count(text) })
    }
}
