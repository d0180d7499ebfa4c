//! Chart command: build a chart from beat analysis output.

use std::path::Path;

use anyhow::{Context, Result};
use beatclick_core::{BeatFile, ChartBuilder, GameConfig, load_chart};
use tracing::info;

pub fn run(
    config: &GameConfig,
    beats: &Path,
    seed: Option<u64>,
    output: Option<&Path>,
) -> Result<()> {
    let builder = ChartBuilder::from_config(config).seed(seed.or(config.seed));
    let loaded = load_chart(&BeatFile::new(beats), &builder)
        .with_context(|| format!("Failed to build chart from {}", beats.display()))?;
    let chart = &loaded.chart;

    println!(
        "Chart: {} objects [{}], {:.1} BPM",
        chart.len(),
        chart.difficulty,
        loaded.tempo_bpm
    );
    if let (Some(first), Some(last)) = (chart.objects().first(), chart.objects().last()) {
        println!(
            "  {:.3}s - {:.3}s (last window closes at {:.3}s)",
            first.activation_time, last.activation_time, last.expiry_time
        );
    }
    for obj in chart.objects() {
        let key = obj
            .key_binding
            .map(|k| k.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  #{:<4} {:>8.3}s  ({:>6.1}, {:>6.1})  {}",
            obj.id, obj.activation_time, obj.position.x, obj.position.y, key
        );
    }

    if let Some(path) = output {
        chart.save(path)?;
        info!("Wrote chart to {:?}", path);
        eprintln!("Saved to: {}", path.display());
    }

    Ok(())
}
