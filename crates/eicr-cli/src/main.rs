use clap::Parser;

mod bootstrap;
mod cli;
mod commands;
mod output;
mod ui;

use commands::Outcome;

/// Exit status for a `--strict` run whose report is not compliant.
const EXIT_NON_COMPLIANT: i32 = 2;

fn main() {
    match run() {
        Ok(Outcome::Done) => {}
        Ok(Outcome::NonCompliant) => std::process::exit(EXIT_NON_COMPLIANT),
        Err(error) => {
            eprintln!("eicr error: {error:#}");
            std::process::exit(1);
        }
    }
}

fn run() -> anyhow::Result<Outcome> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let config = bootstrap::load_config(cli.config.as_deref())?;
    let flags = cli.global_flags(&config);
    ui::init(&flags);

    commands::dispatch::dispatch(&cli.command, &config, &flags)
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("EICR_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
