use anyhow::{Context, Error};
use structopt::StructOpt;
use tracing::info;

use nexus::cli::{banner, initialize_logging, CommandLine};
use nexus::{demo, Config};

fn main() -> Result<(), Error> {
    let commandline: CommandLine = StructOpt::from_args();
    initialize_logging(&commandline)?;

    let config = Config::load(commandline.config.as_deref())
        .with_context(|| format!("Couldn't load config {:?}", commandline.config))?;

    banner(&commandline, &config);
    info!("Running {:?} demo", commandline.demo);

    let stdout = std::io::stdout();
    demo::run(commandline.demo, &config, &mut stdout.lock())?;
    Ok(())
}
