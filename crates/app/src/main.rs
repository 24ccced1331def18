use anyhow::Result;
use clap::Parser;
use gradecalc::cli::CliArgs;
use gradecalc::config::Config;
use gradecalc::runner;
use std::io;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = CliArgs::parse();
    let config = Config::from_cli_and_file(&args, args.config.clone())?;
    let (service, loaded) = runner::open_service(&config)?;

    match &args.command {
        Some(command) => runner::run_command(&service, command, &mut io::stdout().lock()),
        None => runner::run_tui(&config, service, loaded),
    }
}
