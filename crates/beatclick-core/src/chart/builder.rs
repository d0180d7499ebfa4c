use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::chart::{Chart, Difficulty, HitObject, KeySymbol, Point};
use crate::config::{GameConfig, PlayField, judgement};
use crate::error::{Error, Result};

/// Turns detected beat timestamps into a chart.
///
/// Every `decimation`-th beat (indices 0, d, 2d, ...) becomes a hit-object with
/// a random position inside the inset play-field and, unless the alphabet is
/// empty, a random key binding.
#[derive(Debug, Clone)]
pub struct ChartBuilder {
    decimation: u32,
    alphabet: Vec<KeySymbol>,
    hit_window: f64,
    difficulty: Difficulty,
    playfield: PlayField,
    seed: Option<u64>,
}

impl Default for ChartBuilder {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

impl ChartBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            decimation: config.decimation,
            alphabet: config.alphabet.clone(),
            hit_window: config.hit_window,
            difficulty: config.difficulty,
            playfield: config.playfield,
            seed: config.seed,
        }
    }

    pub fn decimation(mut self, decimation: u32) -> Self {
        self.decimation = decimation;
        self
    }

    pub fn alphabet<I, K>(mut self, alphabet: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<KeySymbol>,
    {
        self.alphabet = alphabet.into_iter().map(Into::into).collect();
        self
    }

    pub fn hit_window(mut self, hit_window: f64) -> Self {
        self.hit_window = hit_window;
        self
    }

    pub fn difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn playfield(mut self, playfield: PlayField) -> Self {
        self.playfield = playfield;
        self
    }

    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Build with the configured seed, or OS entropy when none is set.
    pub fn build(&self, beat_times: &[f64]) -> Result<Chart> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        self.build_with_rng(beat_times, &mut rng)
    }

    /// Build drawing positions and key bindings from the given random source.
    pub fn build_with_rng<R: Rng + ?Sized>(
        &self,
        beat_times: &[f64],
        rng: &mut R,
    ) -> Result<Chart> {
        if self.decimation == 0 {
            return Err(Error::InvalidDecimation(self.decimation));
        }
        if beat_times.is_empty() {
            return Err(Error::EmptyChart);
        }

        let radius = self.difficulty.radius();
        let ((min_x, max_x), (min_y, max_y)) = self.playfield.placement_bounds(radius)?;

        let objects: Vec<HitObject> = beat_times
            .iter()
            .step_by(self.decimation as usize)
            .enumerate()
            .map(|(id, &time)| {
                let position = Point::new(
                    rng.random_range(min_x..=max_x),
                    rng.random_range(min_y..=max_y),
                );
                let key_binding = self.alphabet.choose(&mut *rng).copied();
                HitObject::new(id, position, radius, time, self.hit_window, key_binding)
            })
            .collect();

        let chart = Chart::from_objects(self.difficulty, objects);
        chart.validate()?;

        info!(
            "Built chart: {} objects from {} beats (every {}), difficulty {}",
            chart.len(),
            beat_times.len(),
            self.decimation,
            self.difficulty
        );
        for obj in chart.objects() {
            debug!(
                "Object {}: ({:.0}, {:.0}) r={} at {:.3}s key={:?}",
                obj.id,
                obj.position.x,
                obj.position.y,
                obj.radius,
                obj.activation_time,
                obj.key_binding
            );
        }

        Ok(chart)
    }
}

/// Build a chart with default geometry and timing.
pub fn build(beat_times: &[f64], decimation: u32, alphabet: &[KeySymbol]) -> Result<Chart> {
    ChartBuilder::new()
        .decimation(decimation)
        .alphabet(alphabet.iter().copied())
        .build(beat_times)
}

/// Default key alphabet
pub fn default_alphabet() -> Vec<KeySymbol> {
    judgement::ALPHABET.iter().copied().map(KeySymbol::new).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn beats(n: usize) -> Vec<f64> {
        (0..n).map(|i| i as f64 * 0.5).collect()
    }

    #[test]
    fn test_decimation_selects_every_fifth_beat() {
        let beat_times = beats(25);
        let chart = ChartBuilder::new().seed(Some(1)).build(&beat_times).unwrap();
        assert_eq!(chart.len(), 5);
        let times: Vec<f64> = chart.objects().iter().map(|o| o.activation_time).collect();
        assert_eq!(
            times,
            vec![beat_times[0], beat_times[5], beat_times[10], beat_times[15], beat_times[20]]
        );
    }

    #[test]
    fn test_decimation_partial_tail() {
        let chart = ChartBuilder::new().decimation(5).seed(Some(1)).build(&beats(6)).unwrap();
        assert_eq!(chart.len(), 2);
        let chart = ChartBuilder::new().decimation(1).seed(Some(1)).build(&beats(6)).unwrap();
        assert_eq!(chart.len(), 6);
    }

    #[test]
    fn test_empty_beats() {
        let err = ChartBuilder::new().build(&[]).unwrap_err();
        assert!(err.is_empty_chart());
    }

    #[test]
    fn test_zero_decimation() {
        let err = ChartBuilder::new().decimation(0).build(&beats(3)).unwrap_err();
        assert!(matches!(err, Error::InvalidDecimation(0)));
    }

    #[test]
    fn test_unsorted_beats_rejected() {
        let err = ChartBuilder::new()
            .decimation(1)
            .seed(Some(1))
            .build(&[1.0, 0.5])
            .unwrap_err();
        assert!(matches!(err, Error::InvalidChart { index: 1, .. }));
    }

    #[test]
    fn test_positions_inside_inset_field() {
        let field = PlayField::default();
        let chart = ChartBuilder::new()
            .decimation(1)
            .seed(Some(42))
            .build(&beats(500))
            .unwrap();
        let radius = Difficulty::Normal.radius();
        let inset = field.margin.max(radius);
        for obj in chart.objects() {
            assert!(obj.position.x >= inset && obj.position.x <= field.width - inset);
            assert!(obj.position.y >= inset && obj.position.y <= field.height - inset);
            assert_eq!(obj.radius, radius);
            assert_eq!(obj.expiry_time, obj.activation_time + 1.0);
        }
    }

    #[test]
    fn test_key_bindings_from_alphabet() {
        let alphabet = default_alphabet();
        let chart = ChartBuilder::new()
            .decimation(1)
            .seed(Some(3))
            .build(&beats(100))
            .unwrap();
        for obj in chart.objects() {
            let key = obj.key_binding.unwrap();
            assert!(alphabet.contains(&key));
        }
    }

    #[test]
    fn test_empty_alphabet_is_pointer_only() {
        let chart = ChartBuilder::new()
            .alphabet(Vec::<KeySymbol>::new())
            .seed(Some(3))
            .build(&beats(20))
            .unwrap();
        assert!(chart.objects().iter().all(|o| o.key_binding.is_none()));
    }

    #[test]
    fn test_same_seed_same_chart() {
        let a = ChartBuilder::new().seed(Some(9)).build(&beats(50)).unwrap();
        let b = ChartBuilder::new().seed(Some(9)).build(&beats(50)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_injected_rng() {
        let mut rng_a = StdRng::seed_from_u64(5);
        let mut rng_b = StdRng::seed_from_u64(5);
        let builder = ChartBuilder::new();
        let a = builder.build_with_rng(&beats(30), &mut rng_a).unwrap();
        let b = builder.build_with_rng(&beats(30), &mut rng_b).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_free_build_function() {
        let chart = build(&beats(10), 2, &[KeySymbol::new('j')]).unwrap();
        assert_eq!(chart.len(), 5);
        assert!(
            chart
                .objects()
                .iter()
                .all(|o| o.key_binding == Some(KeySymbol::new('J')))
        );
    }
}
