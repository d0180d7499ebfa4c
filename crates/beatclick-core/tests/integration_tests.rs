//! Integration tests for beatclick-core
//!
//! These tests verify that chart building, the clock, input and the
//! scheduler work together correctly.

use beatclick_core::chart::{BeatAnalysis, Chart, ChartBuilder, ChartLoader, HitObjectState};
use beatclick_core::clock::{PlaybackClock, SimulatedTransport, Transport};
use beatclick_core::config::GameConfig;
use beatclick_core::input::input_channel;
use beatclick_core::play::{GameMode, GameSession, SessionState};
use beatclick_core::replay::{TraceStep, replay};
use beatclick_core::score::ScoreTotals;
use beatclick_core::session::SessionManager;

fn beats(count: usize, spacing: f64) -> Vec<f64> {
    (0..count).map(|i| 0.5 + i as f64 * spacing).collect()
}

fn seeded_chart(seed: u64) -> Chart {
    ChartBuilder::new()
        .seed(Some(seed))
        .build(&beats(40, 0.25))
        .unwrap()
}

/// Chart construction from beats
mod chart_building_tests {
    use super::*;

    #[test]
    fn test_same_seed_same_chart() {
        assert_eq!(seeded_chart(7), seeded_chart(7));
    }

    #[test]
    fn test_config_drives_builder() {
        let config = GameConfig::parse(
            r#"
difficulty = "Hard"
decimation = 2
alphabet = []
"#,
        )
        .unwrap();
        let chart = ChartBuilder::from_config(&config)
            .seed(Some(1))
            .build(&beats(10, 0.5))
            .unwrap();

        assert_eq!(chart.len(), 5);
        assert!(chart.objects().iter().all(|o| o.key_binding.is_none()));
        assert!(chart.objects().iter().all(|o| o.radius == 30.0));
    }

    #[test]
    fn test_chart_survives_save_and_load() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("chart.json");
        let chart = seeded_chart(3);
        chart.save(&path).unwrap();
        assert_eq!(Chart::load(&path).unwrap(), chart);
    }

    #[test]
    fn test_background_loader_delivers_chart() {
        let analysis = BeatAnalysis {
            beat_times: beats(20, 0.5),
            tempo_bpm: 120.0,
            sample_rate: 44100,
        };
        let handle = ChartLoader::spawn(analysis, ChartBuilder::new().seed(Some(9))).unwrap();
        let loaded = handle.wait().unwrap();
        assert_eq!(loaded.chart.len(), 4);
        assert_eq!(loaded.tempo_bpm, 120.0);
    }
}

/// Full sessions against a simulated transport
mod session_tests {
    use super::*;

    /// Plays the chart, hitting every object by pointer once it is on screen
    fn play_perfectly(chart: &Chart, dt: f64) -> GameSession {
        let clock = PlaybackClock::new();
        let (input, rx) = input_channel(clock.clone());
        let mut transport = SimulatedTransport::new(clock.clone());
        let mut session = GameSession::new(chart, rx, clock).unwrap();

        transport.play();
        session.start().unwrap();
        while session.state().is_active() {
            transport.advance(dt);
            let targets: Vec<_> = session.active_objects().map(|o| o.position).collect();
            for p in targets {
                input.pointer(p.x, p.y);
            }
            let report = session.tick().unwrap();
            assert!(report.score.max_combo >= report.score.combo);
        }
        session
    }

    #[test]
    fn test_perfect_play_is_full_combo() {
        let chart = seeded_chart(11);
        let session = play_perfectly(&chart, 1.0 / 60.0);
        let score = session.final_score().unwrap();

        assert_eq!(session.state(), SessionState::Completed);
        assert_eq!(score.hits as usize, chart.len());
        assert_eq!(score.misses, 0);
        assert_eq!(score.max_combo as usize, chart.len());
        assert!(
            session
                .objects()
                .iter()
                .all(|o| o.state == HitObjectState::Hit)
        );
    }

    #[test]
    fn test_idle_play_misses_everything() {
        let chart = seeded_chart(5);
        let clock = PlaybackClock::new();
        let (_input, rx) = input_channel(clock.clone());
        let mut transport = SimulatedTransport::new(clock.clone());
        let mut session = GameSession::new(&chart, rx, clock).unwrap();

        transport.play();
        session.start().unwrap();
        while session.state().is_active() {
            transport.advance(0.1);
            session.tick().unwrap();
        }

        let score = session.final_score().unwrap();
        assert_eq!(score.misses as usize, chart.len());
        assert_eq!(score.max_combo, 0);
    }

    #[test]
    fn test_coarse_clock_still_completes() {
        let chart = seeded_chart(2);
        let clock = PlaybackClock::new();
        let (_input, rx) = input_channel(clock.clone());
        let mut transport = SimulatedTransport::new(clock.clone()).with_coarse_step(1.0);
        let mut session = GameSession::new(&chart, rx, clock).unwrap();

        transport.play();
        session.start().unwrap();
        for _ in 0..10_000 {
            if !session.state().is_active() {
                break;
            }
            transport.advance(1.0 / 60.0);
            session.tick().unwrap();
        }
        assert_eq!(session.state(), SessionState::Completed);
        let score = session.final_score().unwrap();
        assert_eq!(score.resolved() as usize, chart.len());
    }

    #[test]
    fn test_game_mode_archives_completed_sessions() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut archive = SessionManager::new(dir.path());
        let tsv = archive.start_tsv_session().unwrap();

        let mut mode = GameMode::new().with_archive(archive);
        let chart = seeded_chart(4);
        for _ in 0..2 {
            let clock = PlaybackClock::new();
            let (_input, rx) = input_channel(clock.clone());
            let mut transport = SimulatedTransport::new(clock.clone());
            transport.play();
            mode.start_session(&chart, rx, clock).unwrap();
            while mode.has_active_session() {
                transport.advance(0.05);
                mode.tick().unwrap();
            }
        }

        let totals = mode.exit_mode();
        assert_eq!(totals.sessions, 2);
        assert_eq!(totals.misses as usize, chart.len() * 2);

        let content = std::fs::read_to_string(tsv).unwrap();
        assert_eq!(content.lines().count(), 3);

        let path = dir.path().join("totals.json");
        totals.save(&path).unwrap();
        assert_eq!(ScoreTotals::load(&path).unwrap(), totals);
    }
}

/// Properties that must hold for any input trace
mod property_tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_trace(rng: &mut StdRng, len: usize) -> Vec<TraceStep> {
        let mut time = 0.0;
        let mut steps = Vec::with_capacity(len);
        for _ in 0..len {
            let step = match rng.random_range(0..10) {
                0..=3 => {
                    time += rng.random_range(0.0..0.2);
                    TraceStep::Position { time }
                }
                4 => {
                    time = rng.random_range(0.0..12.0);
                    TraceStep::Seek { time }
                }
                5 => TraceStep::Pause,
                6 => TraceStep::Resume,
                7 => TraceStep::Pointer {
                    x: rng.random_range(0.0..800.0),
                    y: rng.random_range(0.0..600.0),
                },
                8 => TraceStep::Key {
                    symbol: ['W', 'A', 'S', 'D'][rng.random_range(0..4)].into(),
                },
                _ => TraceStep::Tick,
            };
            steps.push(step);
        }
        steps
    }

    #[test]
    fn test_replay_properties_hold_for_random_traces() {
        let chart = seeded_chart(21);
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..50 {
            let mut steps = random_trace(&mut rng, 300);
            // Always finish past the last window
            steps.push(TraceStep::Resume);
            steps.push(TraceStep::Seek { time: 100.0 });

            let outcome = replay(&chart, &steps).unwrap();
            let again = replay(&chart, &steps).unwrap();
            assert_eq!(outcome, again);

            assert_eq!(outcome.state, SessionState::Completed);
            assert_eq!(outcome.score.resolved() as usize, chart.len());
            assert!(outcome.score.max_combo >= outcome.score.combo);
            assert!(
                outcome
                    .object_states
                    .iter()
                    .all(|s| s.is_terminal())
            );

            let hits = outcome
                .object_states
                .iter()
                .filter(|s| **s == HitObjectState::Hit)
                .count();
            assert_eq!(hits, outcome.score.hits as usize);
        }
    }

    #[test]
    fn test_each_object_judged_at_most_once() {
        let chart = seeded_chart(8);
        let mut rng = StdRng::seed_from_u64(7);
        let steps = random_trace(&mut rng, 2000);
        let outcome = replay(&chart, &steps).unwrap();

        let mut seen = vec![0usize; chart.len()];
        for event in &outcome.events {
            if let Some(id) = event.object_id() {
                seen[id] += 1;
            }
        }
        assert!(seen.iter().all(|&n| n <= 1));
    }
}
