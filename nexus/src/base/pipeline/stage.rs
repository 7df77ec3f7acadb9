use std::fmt::{self, Debug};

use serde_json::Value;

use super::{DataTag, Error, Tagged};
use crate::base::mean;

/// Label shown for streamed readings, which have no printable header
const STREAM_LABEL: &str = "Real-time sensor stream";
/// Field holding the reading in json content
const VALUE_FIELD: &str = "value";

/// A single step of a pipeline. Stages keep no state between calls.
pub trait Stage: Debug {
    /// What the stage does, announced when it gets attached
    fn description(&self) -> &'static str;

    fn process(&self, data: &Tagged) -> Result<StageOutput, Error>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum StageOutput {
    /// The record as received. `display` is what the stage made of it,
    /// `None` for tags it doesn't recognize.
    Input { display: Option<String>, data: Tagged },
    Transform { enrichment: &'static str, transformed_data: Value },
    Output { summary: Summary },
}

/// Final figure an output stage produces
#[derive(Debug, Clone, PartialEq)]
pub enum Summary {
    /// Single json reading
    Reading { value: Value },
    /// Data rows in a csv blob, header excluded
    Records { count: usize },
    /// Streamed numeric readings
    Readings { count: usize, avg: f64 },
}

impl Summary {
    pub fn subject(&self) -> &'static str {
        match self {
            Summary::Reading { .. } => "Processed temperature reading",
            Summary::Records { .. } => "User activity logged",
            Summary::Readings { .. } => "Stream summary",
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Summary::Reading { value: Value::String(s) } => write!(f, "{s}°C (Normal range)"),
            Summary::Reading { value } => write!(f, "{value}°C (Normal range)"),
            Summary::Records { count } => write!(f, "{count} actions processed"),
            Summary::Readings { count, avg } => write!(f, "{count} readings, avg: {avg}°C"),
        }
    }
}

fn text(tag: DataTag, content: &Value) -> Result<&str, Error> {
    content.as_str().ok_or(Error::ValidationFailed(tag, "expected text"))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct InputStage;

impl Stage for InputStage {
    fn description(&self) -> &'static str {
        "Input validation and parsing"
    }

    fn process(&self, data: &Tagged) -> Result<StageOutput, Error> {
        let display = match data.data_tag() {
            Ok(DataTag::Csv) => {
                let blob = text(DataTag::Csv, &data.content)?;
                Some(blob.lines().next().unwrap_or_default().to_owned())
            }
            Ok(DataTag::Stream) => Some(STREAM_LABEL.to_owned()),
            Ok(DataTag::Json) => Some(data.content.to_string()),
            // Left for the transform stage to reject
            Err(_) => None,
        };

        Ok(StageOutput::Input { display, data: data.clone() })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TransformStage;

impl Stage for TransformStage {
    fn description(&self) -> &'static str {
        "Data transformation and enrichment"
    }

    fn process(&self, data: &Tagged) -> Result<StageOutput, Error> {
        let enrichment = match data.data_tag()? {
            DataTag::Json => "Enriched with metadata and validation",
            DataTag::Csv => "Parsed and structured data",
            DataTag::Stream => "Aggregated and filtered",
        };

        Ok(StageOutput::Transform { enrichment, transformed_data: data.content.clone() })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct OutputStage;

impl Stage for OutputStage {
    fn description(&self) -> &'static str {
        "Output formatting and delivery"
    }

    fn process(&self, data: &Tagged) -> Result<StageOutput, Error> {
        let summary = match data.data_tag()? {
            DataTag::Json => {
                let value = data.content.get(VALUE_FIELD).ok_or(Error::MissingField(VALUE_FIELD))?;
                Summary::Reading { value: value.clone() }
            }
            DataTag::Csv => {
                let blob = text(DataTag::Csv, &data.content)?;
                let count = blob.lines().skip(1).filter(|l| !l.trim().is_empty()).count();
                Summary::Records { count }
            }
            DataTag::Stream => {
                let readings = data
                    .content
                    .as_array()
                    .ok_or(Error::ValidationFailed(DataTag::Stream, "expected a list of readings"))?
                    .iter()
                    .map(|v| v.as_f64().ok_or(Error::ValidationFailed(DataTag::Stream, "non-numeric reading")))
                    .collect::<Result<Vec<f64>, Error>>()?;

                let avg = mean(&readings).ok_or(Error::EmptyInput)?;
                Summary::Readings { count: readings.len(), avg }
            }
        };

        Ok(StageOutput::Output { summary })
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    fn csv() -> Tagged {
        Tagged::new("csv", "user,action,timestamp\nhahchta,logout,07-02-2026-19:64")
    }

    #[test]
    fn input_displays_per_tag() {
        let out = InputStage.process(&csv()).unwrap();
        assert_eq!(
            out,
            StageOutput::Input { display: Some("user,action,timestamp".to_owned()), data: csv() }
        );

        let stream = Tagged::new("stream", json!([1.0]));
        match InputStage.process(&stream).unwrap() {
            StageOutput::Input { display, .. } => assert_eq!(display.as_deref(), Some(STREAM_LABEL)),
            o => panic!("unexpected {o:?}"),
        }

        let json = Tagged::new("json", json!({"value": 23.5}));
        match InputStage.process(&json).unwrap() {
            StageOutput::Input { display, .. } => {
                assert_eq!(display.as_deref(), Some(r#"{"value":23.5}"#))
            }
            o => panic!("unexpected {o:?}"),
        }
    }

    #[test]
    fn input_passes_unknown_tags_through() {
        let unknown = Tagged::new("unknown_type", json!([1, 2, 3, 4]));
        let out = InputStage.process(&unknown).unwrap();
        assert_eq!(out, StageOutput::Input { display: None, data: unknown });
    }

    #[test]
    fn transform_rejects_unknown_tags() {
        let unknown = Tagged::new("unknown_type", json!([1, 2, 3, 4]));
        assert_eq!(
            TransformStage.process(&unknown),
            Err(Error::UnsupportedFormat("unknown_type".to_owned()))
        );
    }

    #[test]
    fn transform_forwards_content() {
        let out = TransformStage.process(&csv()).unwrap();
        assert_eq!(
            out,
            StageOutput::Transform {
                enrichment: "Parsed and structured data",
                transformed_data: csv().content
            }
        );
    }

    #[test]
    fn output_reads_json_value() {
        let json = Tagged::new("json", json!({"sensor": "temp", "value": 23.5, "unit": "C"}));
        let out = OutputStage.process(&json).unwrap();
        let summary = Summary::Reading { value: json!(23.5) };
        assert_eq!(summary.to_string(), "23.5°C (Normal range)");
        assert_eq!(out, StageOutput::Output { summary });

        let text = Summary::Reading { value: json!("21.5") };
        assert_eq!(text.to_string(), "21.5°C (Normal range)");

        let missing = Tagged::new("json", json!({"sensor": "temp"}));
        assert_eq!(OutputStage.process(&missing), Err(Error::MissingField("value")));
    }

    #[test]
    fn output_counts_csv_records() {
        let out = OutputStage.process(&csv()).unwrap();
        assert_eq!(out, StageOutput::Output { summary: Summary::Records { count: 1 } });

        let trailing = Tagged::new("csv", "a,b\n1,2\n3,4\n");
        let out = OutputStage.process(&trailing).unwrap();
        assert_eq!(out, StageOutput::Output { summary: Summary::Records { count: 2 } });
    }

    #[test]
    fn output_averages_stream_readings() {
        let stream = Tagged::new("stream", json!([23, 21, 22, 22.5, 22]));
        let out = OutputStage.process(&stream).unwrap();
        let summary = Summary::Readings { count: 5, avg: 22.1 };
        assert_eq!(summary.to_string(), "5 readings, avg: 22.1°C");
        assert_eq!(out, StageOutput::Output { summary });
    }

    #[test]
    fn output_rejects_empty_or_bad_streams() {
        let empty = Tagged::new("stream", json!([]));
        assert_eq!(OutputStage.process(&empty), Err(Error::EmptyInput));

        let bad = Tagged::new("stream", json!([1, "two"]));
        assert!(matches!(
            OutputStage.process(&bad),
            Err(Error::ValidationFailed(DataTag::Stream, _))
        ));
    }
}
