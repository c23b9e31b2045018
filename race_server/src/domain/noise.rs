// Injectable randomness for per-tick progress noise.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of symmetric noise added to each competitor's progress.
pub trait NoiseSource: Send {
    /// Returns a sample in `[-half_width, half_width]`.
    fn sample(&mut self, half_width: f64) -> f64;
}

/// Uniform noise seeded from OS entropy.
pub struct ThreadNoise {
    rng: StdRng,
}

impl ThreadNoise {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Default for ThreadNoise {
    fn default() -> Self {
        Self::new()
    }
}

impl NoiseSource for ThreadNoise {
    fn sample(&mut self, half_width: f64) -> f64 {
        uniform(&mut self.rng, half_width)
    }
}

/// Uniform noise from a fixed seed, for reproducible races.
pub struct SeededNoise {
    rng: StdRng,
}

impl SeededNoise {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl NoiseSource for SeededNoise {
    fn sample(&mut self, half_width: f64) -> f64 {
        uniform(&mut self.rng, half_width)
    }
}

/// Always returns the same offset. Mostly useful in tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedNoise(pub f64);

impl NoiseSource for FixedNoise {
    fn sample(&mut self, _half_width: f64) -> f64 {
        self.0
    }
}

/// Picks seeded noise when a seed is configured, entropy otherwise.
pub fn noise_from_seed(seed: Option<u64>) -> Box<dyn NoiseSource> {
    match seed {
        Some(seed) => Box::new(SeededNoise::new(seed)),
        None => Box::new(ThreadNoise::new()),
    }
}

fn uniform(rng: &mut StdRng, half_width: f64) -> f64 {
    if half_width.is_nan() || half_width <= 0.0 {
        return 0.0;
    }
    rng.gen_range(-half_width..=half_width)
}
