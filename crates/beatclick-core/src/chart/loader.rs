//! Background chart loading.
//!
//! Beat analysis is blocking work owned by an external analyzer. The loader
//! runs it together with chart building on a worker thread and hands the result
//! back through a handle the caller polls from its own loop.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread::{self, JoinHandle};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::chart::{Chart, ChartBuilder};
use crate::error::{Error, Result};

/// Finished output of beat detection for one track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeatAnalysis {
    /// Beat timestamps in seconds, ascending
    pub beat_times: Vec<f64>,
    /// Tempo estimate in beats per minute
    #[serde(default)]
    pub tempo_bpm: f64,
    /// Passed through untouched
    #[serde(default)]
    pub sample_rate: u32,
}

/// Source of beat analysis results.
///
/// `analyze` may block for as long as the analysis takes.
pub trait BeatSource {
    fn analyze(&self) -> Result<BeatAnalysis>;
}

impl BeatSource for BeatAnalysis {
    fn analyze(&self) -> Result<BeatAnalysis> {
        Ok(self.clone())
    }
}

/// Beat analysis stored as JSON on disk
#[derive(Debug, Clone)]
pub struct BeatFile {
    path: PathBuf,
}

impl BeatFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl BeatSource for BeatFile {
    fn analyze(&self) -> Result<BeatAnalysis> {
        let content = fs::read_to_string(&self.path)?;
        let analysis: BeatAnalysis = serde_json::from_str(&content)?;
        debug!(
            "Read {} beats from {:?} ({:.1} BPM)",
            analysis.beat_times.len(),
            self.path,
            analysis.tempo_bpm
        );
        Ok(analysis)
    }
}

/// Chart plus the analysis metadata it was built from
#[derive(Debug, Clone)]
pub struct LoadedChart {
    pub chart: Chart,
    pub tempo_bpm: f64,
    pub sample_rate: u32,
}

/// Run analysis and chart building synchronously.
pub fn load_chart<S: BeatSource + ?Sized>(
    source: &S,
    builder: &ChartBuilder,
) -> Result<LoadedChart> {
    let analysis = source.analyze()?;
    let chart = builder.build(&analysis.beat_times)?;
    Ok(LoadedChart {
        chart,
        tempo_bpm: analysis.tempo_bpm,
        sample_rate: analysis.sample_rate,
    })
}

/// Spawns chart loading onto a worker thread
pub struct ChartLoader;

impl ChartLoader {
    pub fn spawn<S>(source: S, builder: ChartBuilder) -> Result<ChartLoadHandle>
    where
        S: BeatSource + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let worker = thread::Builder::new()
            .name("chart-loader".to_string())
            .spawn(move || {
                let result = load_chart(&source, &builder);
                if let Err(e) = &result {
                    warn!("Chart loading failed: {}", e);
                }
                // Receiver may already be gone if the caller cancelled
                let _ = tx.send(result);
            })?;

        info!("Chart loading started");
        Ok(ChartLoadHandle {
            rx,
            worker: Some(worker),
            done: false,
        })
    }
}

/// Handle to a chart being loaded in the background
pub struct ChartLoadHandle {
    rx: Receiver<Result<LoadedChart>>,
    worker: Option<JoinHandle<()>>,
    done: bool,
}

impl ChartLoadHandle {
    /// Non-blocking poll. Returns `None` while the worker is still running.
    ///
    /// The result is yielded once; later calls return `None`.
    pub fn try_take(&mut self) -> Option<Result<LoadedChart>> {
        if self.done {
            return None;
        }
        match self.rx.try_recv() {
            Ok(result) => {
                self.finish();
                Some(result)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.finish();
                Some(Err(Error::ChartLoadFailed(
                    "loader thread exited without a result".to_string(),
                )))
            }
        }
    }

    /// Block until the worker finishes.
    pub fn wait(mut self) -> Result<LoadedChart> {
        if self.done {
            return Err(Error::ChartLoadFailed("result already taken".to_string()));
        }
        let result = self.rx.recv().unwrap_or_else(|_| {
            Err(Error::ChartLoadFailed(
                "loader thread exited without a result".to_string(),
            ))
        });
        self.finish();
        result
    }

    pub fn is_finished(&self) -> bool {
        self.done
            || self
                .worker
                .as_ref()
                .map(|w| w.is_finished())
                .unwrap_or(true)
    }

    fn finish(&mut self) {
        self.done = true;
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("Chart loader thread panicked");
            }
        }
    }
}
