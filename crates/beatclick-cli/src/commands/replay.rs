//! Replay command: run a recorded trace against a chart.

use std::path::Path;

use anyhow::{Context, Result};
use beatclick_core::export::format_result_console;
use beatclick_core::{Chart, SessionManager, SessionResult, load_trace, replay};
use tracing::info;

pub fn run(
    chart_path: &Path,
    trace_path: &Path,
    json: bool,
    archive: Option<&Path>,
) -> Result<()> {
    let chart = Chart::load(chart_path)
        .with_context(|| format!("Failed to load chart from {}", chart_path.display()))?;
    let steps = load_trace(trace_path)
        .with_context(|| format!("Failed to load trace from {}", trace_path.display()))?;

    let outcome = replay(&chart, &steps)?;
    let result = SessionResult::new(chart.difficulty, chart.len(), outcome.score, outcome.state);

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        println!("{}", format_result_console(&result));
        if result.unresolved() > 0 {
            println!(
                "{} object(s) unresolved when the trace ended ({})",
                result.unresolved(),
                outcome.state
            );
        }
    }

    if let Some(dir) = archive {
        let mut manager = SessionManager::new(dir);
        let tsv = manager.start_tsv_session()?;
        manager.start_json_session()?;
        manager.record(&result)?;
        info!("Archived result to {:?}", tsv.parent().unwrap_or(dir));
    }

    Ok(())
}
