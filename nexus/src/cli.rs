use structopt::StructOpt;

use crate::config::Config;
use crate::demo::Demo;

#[derive(StructOpt, Debug)]
#[structopt(name = "nexus", about = "Polymorphic processors, streams and pipelines")]
pub struct CommandLine {
    /// Binary's version
    #[structopt(skip = env!("CARGO_PKG_VERSION"))]
    pub version: String,
    /// Path to config file
    #[structopt(short = "c", help = "Config file")]
    pub config: Option<String>,
    /// Demo to run: processors, streams, pipeline or all
    #[structopt(short = "d", long = "demo", default_value = "all")]
    pub demo: Demo,
    /// Log level / Verbosity (v: info, vv: debug, vvv: trace)
    #[structopt(short = "v", long = "verbose", parse(from_occurrences))]
    pub verbose: u8,
    /// List of modules to log
    #[structopt(short = "m", long = "modules")]
    pub modules: Vec<String>,
}

impl CommandLine {
    /// Env filter directives for the requested verbosity, scoped to
    /// `modules` when any were given
    pub fn log_filter(&self) -> String {
        let level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if self.modules.is_empty() {
            return format!("nexus={level}");
        }

        let directives: Vec<String> = self.modules.iter().map(|m| format!("{m}={level}")).collect();
        directives.join(",")
    }
}

pub fn initialize_logging(commandline: &CommandLine) -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt()
        .with_line_number(false)
        .with_file(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .with_env_filter(commandline.log_filter())
        .try_init()
        .map_err(|e| anyhow::anyhow!("Couldn't initialize logger: {e}"))
}

pub fn banner(commandline: &CommandLine, config: &Config) {
    const B: &str = r#"
    ░█▄░█░█▀▀░█░█░█░█░█▀▀
    ░█░▀█░█▀▀░▄▀▄░█░█░▀▀█
    ░▀░░▀░▀▀▀░▀░▀░▀▀▀░▀▀▀
    "#;

    println!("{B}");
    println!("    version: {}", commandline.version);
    println!("    demo: {:?}", commandline.demo);
    println!("    announce_stages: {}", config.pipeline.announce_stages);
    println!("    pipelines:");
    for adapter in config.pipeline.adapters.iter() {
        println!("        {} -> {}", adapter.id, adapter.tag);
    }
    println!(
        "    filters: sensor={}, transaction={}, event={}",
        config.filters.sensor, config.filters.transaction, config.filters.event
    );
    println!("\n");
}
