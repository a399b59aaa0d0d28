use std::ops::Range;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::{Body, Vector2};
use crate::utils::BarnesHutError;

/// Parameters for generating random starting conditions.
///
/// # Examples
///
/// ```
/// use rs_barnes_hut::simulation::{seeded_bodies, RandomBodiesConfig};
///
/// let config = RandomBodiesConfig { bound: 10.0, ..RandomBodiesConfig::default() };
/// let bodies = seeded_bodies(100, &config, 42).unwrap();
///
/// assert_eq!(bodies.len(), 100);
/// assert!(bodies.iter().all(|b| b.position.x.abs() <= 10.0 && b.position.y.abs() <= 10.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RandomBodiesConfig {
    /// Positions are drawn from `[-bound, bound)` on both axes.
    pub bound: f64,
    pub mass_range: Range<f64>,
    /// Upper limit of a drawn velocity component.
    pub velocity_limit: f64,
    /// Chance, per axis, that a body starts moving along that axis.
    pub velocity_probability: f64,
}

impl Default for RandomBodiesConfig {
    fn default() -> Self {
        RandomBodiesConfig {
            bound: 100.0,
            mass_range: 10.0..1e4,
            velocity_limit: 1.0,
            velocity_probability: 0.1,
        }
    }
}

impl RandomBodiesConfig {
    pub fn validate(&self) -> Result<(), BarnesHutError> {
        if !self.bound.is_finite() || self.bound <= 0.0 {
            return Err(BarnesHutError::InvalidConfig(format!("bound must be positive, got {}", self.bound)));
        }
        let Range { start, end } = self.mass_range;
        if !start.is_finite() || !end.is_finite() || start < 0.0 || start >= end {
            return Err(BarnesHutError::InvalidConfig(format!("mass range {}..{} is empty or negative", start, end)));
        }
        if !self.velocity_limit.is_finite() || self.velocity_limit < 0.0 {
            return Err(BarnesHutError::InvalidConfig(format!("velocity limit must be non-negative, got {}", self.velocity_limit)));
        }
        if !(0.0..=1.0).contains(&self.velocity_probability) {
            return Err(BarnesHutError::InvalidConfig(format!("velocity probability must lie in [0, 1], got {}", self.velocity_probability)));
        }
        Ok(())
    }
}

fn velocity_component<R: Rng>(config: &RandomBodiesConfig, rng: &mut R) -> f64 {
    if config.velocity_limit > 0.0 && rng.random_bool(config.velocity_probability) {
        rng.random_range(0.0..config.velocity_limit)
    } else {
        0.0
    }
}

/// Generates `count` bodies with ids `0..count`, drawing from `rng`.
pub fn random_bodies<R: Rng>(
    count: usize,
    config: &RandomBodiesConfig,
    rng: &mut R,
) -> Result<Vec<Body>, BarnesHutError> {
    config.validate()?;
    (0..count)
        .map(|id| {
            let position = Vector2::new(
                rng.random_range(-config.bound..config.bound),
                rng.random_range(-config.bound..config.bound),
            );
            let mass = rng.random_range(config.mass_range.clone());
            let velocity = Vector2::new(velocity_component(config, rng), velocity_component(config, rng));
            Ok(Body::new(id, position, mass)?.with_velocity(velocity))
        })
        .collect()
}

/// Same as [`random_bodies`] with a [`StdRng`] seeded from `seed`, for reproducible runs.
pub fn seeded_bodies(count: usize, config: &RandomBodiesConfig, seed: u64) -> Result<Vec<Body>, BarnesHutError> {
    let mut rng = StdRng::seed_from_u64(seed);
    random_bodies(count, config, &mut rng)
}
