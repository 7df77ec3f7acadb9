//! Configuration of the nexus binary. An embedded default is layered under
//! an optional user file and `NEXUS_` prefixed environment variables.

use config::{Environment, File, FileFormat};
use serde::Deserialize;
use serde_json::Value;

use crate::base::pipeline::{DataTag, Tagged};
use crate::base::processor::ProcessorKind;
use crate::base::stream::{Batch, Criteria, StreamKind};

pub const DEFAULT_CONFIG: &str = r#"
    [pipeline]
    # Log every stage while pipelines are assembled
    announce_stages = true
    adapters = [
        { id = "A", tag = "json" },
        { id = "B", tag = "csv" },
        { id = "C", tag = "stream" },
    ]

    # Criteria each kind of stream filters high priority data with
    [filters]
    sensor = "hot"
    transaction = "large"
    event = "error"

    [[demo.processors]]
    kind = "numeric"
    data = [1, 2, 3, 4, 5]

    [[demo.processors]]
    kind = "text"
    data = "Hello Nexus World"

    [[demo.processors]]
    kind = "log"
    data = "ERROR: Connection timeout"

    [[demo.polymorphic]]
    kind = "numeric"
    data = [1, 2, 3]

    [[demo.polymorphic]]
    kind = "text"
    data = "hello world"

    [[demo.polymorphic]]
    kind = "log"
    data = "INFO: System ready"

    [[demo.streams]]
    id = "SENSOR_001"
    kind = "sensor"
    batch = [{ tmp = 22.5 }, { humidity = 65 }, { pressure = 1013 }]

    [[demo.streams]]
    id = "TRANS_001"
    kind = "transaction"
    batch = [{ buy = 100 }, { sell = 150 }, { buy = 75 }]

    [[demo.streams]]
    id = "EVENT_001"
    kind = "event"
    batch = [
        { login = "2026-02-05 09:15:23" },
        { error = "2026-02-05 10:42:17" },
        { logout = "2026-02-05 17:30:45" },
    ]

    [[demo.mixed]]
    id = "SENSOR_002"
    kind = "sensor"
    batch = [{ tmp = 22.5 }, { humidity = 65 }, { pressure = 1013 }]

    [[demo.mixed]]
    id = "TRANS_002"
    kind = "transaction"
    batch = [{ buy = 150 }, { sell = 50 }, { buy = 75 }, { sell = 90 }]

    [[demo.mixed]]
    id = "EVENT_002"
    kind = "event"
    batch = [
        { login = "2026-02-05 09:15:23" },
        { error = "2026-02-05 10:42:17" },
        { error = "2026-02-06 02:52:10" },
        { logout = "2026-02-05 17:30:45" },
    ]

    [[demo.pipeline]]
    tag = "json"
    content = { sensor = "temp", value = 23.5, unit = "C" }

    [[demo.pipeline]]
    tag = "csv"
    content = "user,action,timestamp\nhahchta,logout,07-02-2026-19:64"

    [[demo.pipeline]]
    tag = "stream"
    content = [23.0, 21.0, 22.0, 22.5, 22.0]

    # Inputs no pipeline can handle, to exercise recovery
    [[demo.recovery]]
    tag = "unknown_type"
    content = [1, 2, 3, 4]
"#;

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct AdapterConfig {
    pub id: String,
    pub tag: DataTag,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    pub announce_stages: bool,
    pub adapters: Vec<AdapterConfig>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ProcessorInput {
    pub kind: ProcessorKind,
    pub data: Value,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct StreamInput {
    pub id: String,
    pub kind: StreamKind,
    pub batch: Batch,
}

/// Inputs the demos run with
#[derive(Debug, Clone, Deserialize, Default)]
pub struct DemoConfig {
    #[serde(default)]
    pub processors: Vec<ProcessorInput>,
    #[serde(default)]
    pub polymorphic: Vec<ProcessorInput>,
    #[serde(default)]
    pub streams: Vec<StreamInput>,
    #[serde(default)]
    pub mixed: Vec<StreamInput>,
    #[serde(default)]
    pub pipeline: Vec<Tagged>,
    #[serde(default)]
    pub recovery: Vec<Tagged>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub filters: Criteria,
    #[serde(default)]
    pub demo: DemoConfig,
}

impl Config {
    /// Default config, overridden by `path` if given and then by environment
    /// variables such as `NEXUS_PIPELINE__ANNOUNCE_STAGES=false`
    pub fn load(path: Option<&str>) -> Result<Config, config::ConfigError> {
        let mut builder =
            config::Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(path) = path {
            builder = builder.add_source(File::new(path, FileFormat::Toml));
        }

        builder
            .add_source(Environment::with_prefix("NEXUS").prefix_separator("_").separator("__"))
            .build()?
            .try_deserialize()
    }
}
