//! Simulate command: real-time play against a simulated transport.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail, ensure};
use beatclick_core::chart::HitObjectState;
use beatclick_core::config::timing;
use beatclick_core::export::format_result_console;
use beatclick_core::{
    BeatFile, ChartBuilder, ChartLoader, GameConfig, GameMode, LoadedChart, PlaybackClock,
    ScoreTotals, SessionManager, SimulatedTransport, Transport, input_channel,
};
use tracing::{debug, info, warn};

use crate::autoplay::{AutoPlayer, AutoPlayerConfig};
use crate::shutdown::ShutdownSignal;

pub struct SimulateOptions {
    pub accuracy: f64,
    pub seed: Option<u64>,
    pub coarse_clock: bool,
    pub archive: Option<PathBuf>,
    pub totals: Option<PathBuf>,
}

pub fn run(config: &GameConfig, beats: &Path, options: SimulateOptions) -> Result<()> {
    ensure!(
        (0.0..=1.0).contains(&options.accuracy),
        "accuracy must be between 0.0 and 1.0, got {}",
        options.accuracy
    );

    let shutdown = setup_shutdown_handler()?;
    let seed = options.seed.or(config.seed);

    let Some(loaded) = load_in_background(config, beats, seed, &shutdown)? else {
        println!("Cancelled while loading.");
        return Ok(());
    };
    let chart = loaded.chart;
    println!(
        "Loaded {} objects [{}] at {:.1} BPM",
        chart.len(),
        chart.difficulty,
        loaded.tempo_bpm
    );

    let totals = match &options.totals {
        Some(path) if path.exists() => ScoreTotals::load(path)
            .with_context(|| format!("Failed to load totals from {}", path.display()))?,
        _ => ScoreTotals::default(),
    };

    let mut mode = GameMode::new().with_totals(totals);
    if let Some(dir) = &options.archive {
        let mut manager = SessionManager::new(dir);
        manager.start_tsv_session()?;
        manager.start_json_session()?;
        mode = mode.with_archive(manager);
    }

    let clock = PlaybackClock::new();
    let (input, receiver) = input_channel(clock.clone());
    let mut transport = SimulatedTransport::new(clock.clone())
        .with_duration(chart.last_expiry().unwrap_or_default() + 1.0);
    if options.coarse_clock {
        transport = transport.with_coarse_step(timing::COARSE_CLOCK_STEP_SECS);
    }

    let player = AutoPlayer::spawn(
        input,
        AutoPlayerConfig {
            accuracy: options.accuracy,
            max_reaction: config.hit_window * 0.6,
            seed: seed.map(|s| s.wrapping_add(1)),
        },
    )?;

    mode.start_session(&chart, receiver, clock)?;
    transport.play();
    println!("Playing... (Press Ctrl+C to cancel)");

    let interval = timing::tick_interval(config.tick_rate_hz);
    let mut last = Instant::now();
    let mut last_visible = usize::MAX;

    while mode.has_active_session() {
        if shutdown.wait(interval) {
            let result = mode.cancel_session(false)?;
            println!("\nSession cancelled at {:.1}s.", transport.position());
            println!("{}", format_result_console(&result));
            break;
        }

        let now = Instant::now();
        transport.advance(now.duration_since(last).as_secs_f64());
        last = now;

        let report = mode.tick()?;
        for transition in &report.transitions {
            if transition.to == HitObjectState::Active {
                if let Some(object) = chart.objects().get(transition.id) {
                    player.target(object.clone());
                }
            }
        }
        for event in &report.events {
            debug!("{:?}", event);
        }

        if let Some(session) = mode.session() {
            let visible = session.visible_count();
            if visible != last_visible {
                debug!("Circles: {}", visible);
                last_visible = visible;
            }
        }

        if report.completed {
            if let Some(result) = mode.results().last() {
                println!("{}", format_result_console(result));
            }
        } else if transport.is_finished() {
            bail!("Playback ended before the chart completed");
        }
    }

    transport.stop();
    player.finish();

    let totals = mode.exit_mode();
    println!(
        "Totals: {} session(s), {} hit, {} missed, best combo {}",
        totals.sessions, totals.hits, totals.misses, totals.best_max_combo
    );
    if let Some(path) = &options.totals {
        totals.save(path)?;
        info!("Saved totals to {:?}", path);
    }

    Ok(())
}

fn setup_shutdown_handler() -> Result<Arc<ShutdownSignal>> {
    let shutdown = Arc::new(ShutdownSignal::new());
    let shutdown_ctrlc = Arc::clone(&shutdown);
    ctrlc::set_handler(move || {
        shutdown_ctrlc.trigger();
    })?;
    Ok(shutdown)
}

/// Build the chart on the loader thread, polling so Ctrl+C stays responsive
fn load_in_background(
    config: &GameConfig,
    beats: &Path,
    seed: Option<u64>,
    shutdown: &ShutdownSignal,
) -> Result<Option<LoadedChart>> {
    let builder = ChartBuilder::from_config(config).seed(seed);
    let mut handle = ChartLoader::spawn(BeatFile::new(beats), builder)?;

    println!("Analyzing {}...", beats.display());
    loop {
        if let Some(result) = handle.try_take() {
            let loaded =
                result.with_context(|| format!("Failed to build chart from {}", beats.display()))?;
            return Ok(Some(loaded));
        }
        if shutdown.wait(Duration::from_millis(50)) {
            warn!("Shutdown requested during chart loading");
            return Ok(None);
        }
    }
}
