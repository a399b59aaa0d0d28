use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::simulation::{random_bodies, seeded_bodies, RandomBodiesConfig};
use crate::utils::BarnesHutError;

#[test]
fn test_defaults() {
    let config = RandomBodiesConfig::default();
    assert_eq!(config.bound, 100.0);
    assert_eq!(config.mass_range, 10.0..1e4);
    assert_eq!(config.velocity_limit, 1.0);
    assert_eq!(config.velocity_probability, 0.1);
    assert!(config.validate().is_ok());
}

#[test]
fn test_bodies_respect_config() {
    let config = RandomBodiesConfig::default();
    let bodies = seeded_bodies(1000, &config, 99).unwrap();
    assert_eq!(bodies.len(), 1000);
    for (i, body) in bodies.iter().enumerate() {
        assert_eq!(body.id, i);
        assert!(body.position.x >= -100.0 && body.position.x < 100.0);
        assert!(body.position.y >= -100.0 && body.position.y < 100.0);
        assert!(config.mass_range.contains(&body.mass));
        assert!(body.velocity.x >= 0.0 && body.velocity.x < 1.0);
        assert!(body.velocity.y >= 0.0 && body.velocity.y < 1.0);
        assert!(!body.is_static);
    }

    // Roughly one body in ten starts moving along each axis.
    let moving = bodies.iter().filter(|b| b.velocity.x != 0.0).count();
    assert!(moving > 40 && moving < 180, "{} bodies moving along x", moving);
}

#[test]
fn test_same_seed_same_bodies() {
    let config = RandomBodiesConfig::default();
    assert_eq!(seeded_bodies(50, &config, 1).unwrap(), seeded_bodies(50, &config, 1).unwrap());
    assert_ne!(seeded_bodies(50, &config, 1).unwrap(), seeded_bodies(50, &config, 2).unwrap());
}

#[test]
fn test_custom_rng() {
    let config = RandomBodiesConfig { velocity_probability: 0.0, ..RandomBodiesConfig::default() };
    let mut rng = StdRng::seed_from_u64(5);
    let bodies = random_bodies(20, &config, &mut rng).unwrap();
    assert!(bodies.iter().all(|b| b.velocity.x == 0.0 && b.velocity.y == 0.0));
}

#[test]
fn test_invalid_config() {
    let empty_mass = RandomBodiesConfig { mass_range: 5.0..5.0, ..RandomBodiesConfig::default() };
    assert!(matches!(seeded_bodies(1, &empty_mass, 0), Err(BarnesHutError::InvalidConfig(_))));

    let bad_bound = RandomBodiesConfig { bound: 0.0, ..RandomBodiesConfig::default() };
    assert!(bad_bound.validate().is_err());

    let bad_probability = RandomBodiesConfig { velocity_probability: 1.5, ..RandomBodiesConfig::default() };
    assert!(bad_probability.validate().is_err());
}
