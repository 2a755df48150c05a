//! Seeded generator on top of the abstractions of the standard "rand" crate.

use crate::numeric::Float;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

// Select random number generation engine in use
#[cfg(feature = "f32")]
type Engine = rand_xoshiro::Xoshiro128Plus;
#[cfg(not(feature = "f32"))]
type Engine = rand_xoshiro::Xoshiro256Plus;

/// Facade which exposes the few distributions the simulation needs
#[derive(Clone, Debug)]
pub struct RandGenerator {
    rng: Engine,
}
//
impl RandGenerator {
    /// Spawn a new random number generator from a seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Engine::seed_from_u64(seed),
        }
    }

    /// Sample a normal distribution of given mean and standard deviation
    ///
    /// Computed as `mean + sigma * z` with z drawn from the standard normal
    /// distribution, so a null sigma yields the mean exactly and a negative
    /// sigma is accepted as-is. Exactly one standard normal variate is
    /// consumed per call.
    ///
    pub fn gaussian(&mut self, mean: Float, sigma: Float) -> Float {
        let z: Float = self.rng.sample(StandardNormal);
        mean + sigma * z
    }
}
