use serde_json::Value;

use super::{Error, Processed, Processor, ProcessorKind};

/// Display prefix per log level
const LEVEL_PREFIXES: [(&str, &str); 2] = [("ERROR", "[ALERT]"), ("INFO", "[INFO]")];

fn prefix(level: &str) -> Option<&'static str> {
    LEVEL_PREFIXES.iter().find(|(l, _)| *l == level).map(|(_, prefix)| *prefix)
}

/// Handles lines shaped as `LEVEL: message`
#[derive(Debug, Clone, Copy, Default)]
pub struct LogProcessor;

impl Processor for LogProcessor {
    fn kind(&self) -> ProcessorKind {
        ProcessorKind::Log
    }

    fn validate(&self, data: &Value) -> bool {
        match data.as_str() {
            Some(line) => line.contains("ERROR") || line.contains("INFO"),
            None => false,
        }
    }

    fn process(&self, data: &Value) -> Result<Processed, Error> {
        let line = data.as_str().ok_or(Error::ValidationFailed(self.kind()))?;
        let (level, message) = line.split_once(':').unwrap_or((line, ""));
        let level = level.trim();
        let prefix = prefix(level).ok_or_else(|| Error::UnknownLevel(level.to_owned()))?;

        Ok(Processed::Log { prefix, level: level.to_owned(), message: message.to_owned() })
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    #[test]
    fn validates_lines_with_known_markers() {
        assert!(LogProcessor.validate(&json!("ERROR: Connection timeout")));
        assert!(LogProcessor.validate(&json!("INFO: System ready")));
        assert!(!LogProcessor.validate(&json!("DEBUG: noise")));
        assert!(!LogProcessor.validate(&json!(["ERROR"])));
    }

    #[test]
    fn error_lines_get_alert_prefix() {
        let processed = LogProcessor.process(&json!("ERROR: Connection timeout")).unwrap();
        assert_eq!(processed.to_string(), "[ALERT] ERROR level detected: Connection timeout");
    }

    #[test]
    fn info_lines_get_info_prefix() {
        let processed = LogProcessor.process(&json!("INFO: System ready")).unwrap();
        assert_eq!(
            processed,
            Processed::Log {
                prefix: "[INFO]",
                level: "INFO".to_owned(),
                message: " System ready".to_owned()
            }
        );
    }

    #[test]
    fn message_keeps_later_colons() {
        let processed = LogProcessor.process(&json!("ERROR: retry in 00:30")).unwrap();
        match processed {
            Processed::Log { message, .. } => assert_eq!(message, " retry in 00:30"),
            p => panic!("unexpected {p:?}"),
        }
    }

    #[test]
    fn unmapped_level_is_an_error() {
        // Valid (mentions ERROR) but the level token itself isn't mapped
        let line = json!("WARN: ERROR budget exceeded");
        assert!(LogProcessor.validate(&line));
        assert_eq!(LogProcessor.process(&line), Err(Error::UnknownLevel("WARN".to_owned())));
    }

    #[test]
    fn line_without_separator() {
        let processed = LogProcessor.process(&json!("ERROR")).unwrap();
        assert_eq!(processed.to_string(), "[ALERT] ERROR level detected:");
    }
}
