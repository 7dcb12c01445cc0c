use brrtrouter_dsl::cli::{run_cli, Cli};
use brrtrouter_dsl::telemetry::{init_logging, LogConfig};
use clap::Parser;

fn main() -> anyhow::Result<()> {
    init_logging(&LogConfig::from_env())?;
    run_cli(Cli::parse())
}
