mod autoplay;
mod cli;
mod commands;
mod shutdown;

use anyhow::Result;
use clap::Parser;
use cli::{Args, Command};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("beatclick_cli=info,beatclick_core=info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = commands::load_config(&args.config)?;

    match args.command {
        Command::Chart {
            beats,
            seed,
            output,
        } => commands::chart::run(&config, &beats, seed, output.as_deref()),
        Command::Replay {
            chart,
            trace,
            json,
            archive,
        } => commands::replay::run(&chart, &trace, json, archive.as_deref()),
        Command::Simulate {
            beats,
            accuracy,
            seed,
            coarse_clock,
            archive,
            totals,
        } => commands::simulate::run(
            &config,
            &beats,
            commands::simulate::SimulateOptions {
                accuracy,
                seed,
                coarse_clock,
                archive,
                totals,
            },
        ),
    }
}
