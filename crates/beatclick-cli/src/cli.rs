//! CLI argument definitions for beatclick.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "beatclick")]
#[command(about = "Beat-synchronized click and key rhythm game", version)]
pub struct Args {
    /// Game config (TOML); defaults apply when the file does not exist
    #[arg(long, global = true, value_name = "FILE", default_value = "beatclick.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build a chart from beat analysis output
    Chart {
        /// Beat analysis JSON (`beat_times`, `tempo_bpm`, `sample_rate`)
        #[arg(long, value_name = "FILE")]
        beats: PathBuf,
        /// Placement seed (overrides the config)
        #[arg(long)]
        seed: Option<u64>,
        /// Write the chart as JSON
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Replay an input trace against a chart
    Replay {
        /// Chart JSON written by `chart -o`
        #[arg(long, value_name = "FILE")]
        chart: PathBuf,
        /// Trace JSON (array of steps)
        #[arg(long, value_name = "FILE")]
        trace: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Archive the result as TSV/JSON session files in this directory
        #[arg(long, value_name = "DIR")]
        archive: Option<PathBuf>,
    },
    /// Play a chart in real time with an automatic player
    Simulate {
        /// Beat analysis JSON
        #[arg(long, value_name = "FILE")]
        beats: PathBuf,
        /// Probability that the player attempts each object (0.0 - 1.0)
        #[arg(long, default_value = "0.9")]
        accuracy: f64,
        /// Seed for placement and the player (overrides the config)
        #[arg(long)]
        seed: Option<u64>,
        /// Report playback position in whole seconds only
        #[arg(long)]
        coarse_clock: bool,
        /// Archive the result as TSV/JSON session files in this directory
        #[arg(long, value_name = "DIR")]
        archive: Option<PathBuf>,
        /// Score totals JSON, read before and written after the session
        #[arg(long, value_name = "FILE")]
        totals: Option<PathBuf>,
    },
}
