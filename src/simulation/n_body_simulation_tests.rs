use approx::assert_relative_eq;

use crate::models::{Body, Vector2};
use crate::simulation::{seeded_bodies, RandomBodiesConfig, Simulation};
use crate::utils::{BarnesHutError, SimulationConfig, TreeConfig};

fn body(id: usize, x: f64, y: f64, mass: f64) -> Body {
    Body::new(id, Vector2::new(x, y), mass).expect("valid body")
}

fn inverse_square(time_step: f64) -> SimulationConfig {
    SimulationConfig::new(Some(time_step), Some(1.0), Some(2.0), None, None)
}

#[test]
fn test_new_derives_world_from_bodies() {
    let bodies = vec![body(0, 4.0, -2.0, 1.0), body(1, -1.0, 3.0, 1.0)];
    let sim = Simulation::new(bodies, TreeConfig::default(), SimulationConfig::default()).unwrap();
    // 1.5 * 4 + 10
    assert_eq!(sim.world().half_extent, 16.0);
    assert_eq!(sim.world().center, Vector2::zero());
    assert_eq!(sim.steps(), 0);
    assert_eq!(sim.total_mass(), 2.0);
}

#[test]
fn test_invalid_config_rejected() {
    let config = SimulationConfig::new(Some(0.0), None, None, None, None);
    let result = Simulation::new(vec![body(0, 0.0, 0.0, 1.0)], TreeConfig::default(), config);
    assert!(matches!(result, Err(BarnesHutError::InvalidConfig(_))));
}

#[test]
fn test_compute_forces_skips_static_bodies() {
    let bodies = vec![body(0, -1.0, 0.0, 1.0), body(1, 1.0, 0.0, 2.0).as_static()];
    let mut sim = Simulation::new(bodies, TreeConfig::default(), inverse_square(0.01)).unwrap();
    let forces = sim.compute_forces().unwrap().to_vec();
    assert_relative_eq!(forces[0].x, 0.5);
    assert_eq!(forces[1], Vector2::zero());
}

#[test]
fn test_step_is_symplectic_euler() {
    let bodies = vec![body(0, -1.0, 0.0, 2.0), body(1, 1.0, 0.0, 2.0)];
    let dt = 0.1;
    let mut sim = Simulation::new(bodies, TreeConfig::default(), inverse_square(dt)).unwrap();
    sim.step().unwrap();

    // F = 2 * 2 / 4 = 1, a = 0.5, v = 0.05, x = -1 + 0.005
    let moved = &sim.bodies()[0];
    assert_relative_eq!(moved.acceleration.x, 0.5, max_relative = 1e-12);
    assert_relative_eq!(moved.velocity.x, 0.05, max_relative = 1e-12);
    assert_relative_eq!(moved.position.x, -0.995, max_relative = 1e-12);
    assert_relative_eq!(sim.bodies()[1].position.x, 0.995, max_relative = 1e-12);
    assert_eq!(sim.steps(), 1);
}

#[test]
fn test_massless_body_does_not_accelerate() {
    let bodies = vec![
        body(0, -1.0, 0.0, 0.0).with_velocity(Vector2::new(0.0, 1.0)),
        body(1, 1.0, 0.0, 5.0),
    ];
    let mut sim = Simulation::new(bodies, TreeConfig::default(), inverse_square(0.5)).unwrap();
    sim.step().unwrap();
    let ghost = &sim.bodies()[0];
    assert_eq!(ghost.acceleration, Vector2::zero());
    assert_eq!(ghost.position, Vector2::new(-1.0, 0.5));
}

#[test]
fn test_bounds_follow_bodies() {
    let bodies = vec![body(0, 0.0, 0.0, 1.0).with_velocity(Vector2::new(100.0, 0.0))];
    let mut sim = Simulation::new(bodies, TreeConfig::default(), SimulationConfig::default()).unwrap();
    let before = sim.world().half_extent;
    for _ in 0..10 {
        sim.step().unwrap();
    }
    let after = sim.update_bounds().unwrap();
    assert!(after.half_extent > before);
    assert!(after.contains(sim.bodies()[0].position));
}

#[test]
fn test_run_writes_one_frame_per_step() {
    let bodies = seeded_bodies(30, &RandomBodiesConfig::default(), 12).unwrap();
    let mass = bodies.iter().map(|b| b.mass).sum::<f64>();
    let mut sim = Simulation::new(bodies, TreeConfig::default(), SimulationConfig::default()).unwrap();

    let mut out = Vec::new();
    sim.run(3, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    let frames: Vec<&str> = text.split("\n\n").filter(|f| !f.is_empty()).collect();
    assert_eq!(frames.len(), 3);
    assert!(frames.iter().all(|f| f.lines().count() == 30));
    assert!(text.ends_with(&sim.frame()));
    assert_eq!(sim.steps(), 3);
    assert_relative_eq!(sim.total_mass(), mass);
}

#[test]
fn test_momentum_is_roughly_conserved() {
    let config = RandomBodiesConfig { bound: 20.0, velocity_limit: 0.0, ..RandomBodiesConfig::default() };
    let bodies = seeded_bodies(64, &config, 4).unwrap();
    let sim_config = SimulationConfig::new(Some(1e-4), Some(1e-3), Some(2.0), None, None);
    let mut sim = Simulation::new(bodies, TreeConfig::default().with_theta(0.3), sim_config).unwrap();
    for _ in 0..5 {
        sim.step().unwrap();
    }
    let momentum: Vector2 = sim.bodies().iter().map(|b| b.velocity * b.mass).sum();
    let scale: f64 = sim.bodies().iter().map(|b| (b.velocity * b.mass).magnitude()).sum();
    assert!(momentum.magnitude() < 0.05 * scale);
}

#[test]
fn test_arena_grows_when_exhausted() {
    // Close pairs need a long chain of splits each, far more than four slots per body.
    let bodies: Vec<Body> = (0..10)
        .flat_map(|i| {
            let x = i as f64;
            [body(2 * i, x, -x, 1.0), body(2 * i + 1, x + 1e-6, -x, 1.0)]
        })
        .collect();
    let mut sim = Simulation::new(bodies, TreeConfig::default(), SimulationConfig::default()).unwrap();
    let initial = sim.tree().arena().capacity();

    sim.step().expect("the arena should grow instead of failing");
    assert_eq!(sim.tree().inserted(), 20);
    assert!(sim.tree().arena().capacity() > initial);
}
