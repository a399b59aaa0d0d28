//! A step-by-step n-body driver built on [`BarnesHutTree`].
//!
//! Every step re-derives the world region from the current positions, rebuilds the tree,
//! queries one force per moving body and advances the bodies with symplectic Euler
//! (`v += a * dt`, then `x += v * dt`).
//!
//! # Example
//!
//! ```
//! use rs_barnes_hut::simulation::{seeded_bodies, RandomBodiesConfig, Simulation};
//! use rs_barnes_hut::utils::{SimulationConfig, TreeConfig};
//!
//! let bodies = seeded_bodies(200, &RandomBodiesConfig::default(), 7).unwrap();
//! let mut sim = Simulation::new(bodies, TreeConfig::default(), SimulationConfig::default())
//!     .expect("Failed to create simulation");
//!
//! let mut frames = Vec::new();
//! sim.run(5, &mut frames).expect("Simulation failed");
//!
//! assert_eq!(sim.steps(), 5);
//! assert!(!frames.is_empty());
//! ```
use std::io::Write;
use std::path::Path;

use log::{debug, info, warn};

use crate::barnes_hut::BarnesHutTree;
use crate::models::{Body, BoundingRegion, Vector2};
use crate::simulation::{format_frame, load_bodies, write_frame};
use crate::utils::{BarnesHutError, SimulationConfig, TreeConfig};

/// How many times a step may double the arena before giving up.
const MAX_ARENA_GROWTH: usize = 4;

#[derive(Debug, Clone)]
pub struct Simulation {
    bodies: Vec<Body>,
    forces: Vec<Vector2>,
    tree: BarnesHutTree,
    config: SimulationConfig,
    world: BoundingRegion,
    steps: usize,
}

impl Simulation {
    /// Creates a simulation over `bodies`.
    ///
    /// # Errors
    ///
    /// Returns [`BarnesHutError::InvalidConfig`] if either config does not validate.
    pub fn new(bodies: Vec<Body>, tree_config: TreeConfig, config: SimulationConfig) -> Result<Self, BarnesHutError> {
        config.validate()?;
        let tree = BarnesHutTree::for_bodies(bodies.len(), tree_config)?;
        let world = BoundingRegion::containing(&bodies, config.bounds_scale, config.bounds_margin)?;
        info!(
            "Created simulation: {} bodies, theta {}, dt {}, {} arena nodes",
            bodies.len(),
            tree_config.theta,
            config.time_step,
            tree.arena().capacity()
        );
        Ok(Simulation {
            forces: vec![Vector2::zero(); bodies.len()],
            bodies,
            tree,
            config,
            world,
            steps: 0,
        })
    }

    /// Creates a simulation from a particle file.
    pub fn from_file<P: AsRef<Path>>(path: P, tree_config: TreeConfig, config: SimulationConfig) -> Result<Self, BarnesHutError> {
        Self::new(load_bodies(path)?, tree_config, config)
    }

    /// Re-derives the world region so that it covers every finite body.
    pub fn update_bounds(&mut self) -> Result<BoundingRegion, BarnesHutError> {
        self.world = BoundingRegion::containing(&self.bodies, self.config.bounds_scale, self.config.bounds_margin)?;
        Ok(self.world)
    }

    fn build_tree(&mut self) -> Result<(), BarnesHutError> {
        let mut growth = 0;
        loop {
            match self.tree.build(&self.bodies, self.world) {
                Err(BarnesHutError::OutOfCapacity { capacity }) if growth < MAX_ARENA_GROWTH => {
                    let grown = capacity.saturating_mul(2);
                    warn!("Arena of {} nodes exhausted, growing to {}", capacity, grown);
                    self.tree = BarnesHutTree::new(grown, *self.tree.config())?;
                    growth += 1;
                }
                result => return result,
            }
        }
    }

    /// Rebuilds the tree and computes the net force on every body.
    ///
    /// Static bodies get a zero force. The returned slice is indexed like [`bodies`](Simulation::bodies).
    pub fn compute_forces(&mut self) -> Result<&[Vector2], BarnesHutError> {
        self.update_bounds()?;
        self.build_tree()?;
        self.forces = self
            .tree
            .forces_on(&self.bodies, self.config.force_constant, self.config.distance_exponent)?;
        Ok(&self.forces)
    }

    /// Advances every moving body by one time step.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_barnes_hut::models::{Body, Vector2};
    /// use rs_barnes_hut::simulation::Simulation;
    /// use rs_barnes_hut::utils::{SimulationConfig, TreeConfig};
    ///
    /// let bodies = vec![
    ///     Body::new(0, Vector2::new(-1.0, 0.0), 1.0).unwrap(),
    ///     Body::new(1, Vector2::new(1.0, 0.0), 1.0).unwrap().as_static(),
    /// ];
    /// let mut sim = Simulation::new(bodies, TreeConfig::default(), SimulationConfig::default()).unwrap();
    /// sim.step().expect("Step failed");
    ///
    /// // The moving body is pulled toward the static one, which stays put.
    /// assert!(sim.bodies()[0].position.x > -1.0);
    /// assert_eq!(sim.bodies()[1].position, Vector2::new(1.0, 0.0));
    /// ```
    pub fn step(&mut self) -> Result<(), BarnesHutError> {
        self.compute_forces()?;
        let dt = self.config.time_step;
        for (body, &force) in self.bodies.iter_mut().zip(self.forces.iter()) {
            if body.is_static {
                continue;
            }
            body.acceleration = if body.mass > 0.0 { force / body.mass } else { Vector2::zero() };
            body.velocity += body.acceleration * dt;
            body.position += body.velocity * dt;
        }
        self.steps += 1;
        Ok(())
    }

    /// Runs `steps` steps, writing a frame to `writer` after each one.
    pub fn run<W: Write>(&mut self, steps: usize, writer: &mut W) -> Result<(), BarnesHutError> {
        info!("Starting simulation: {} steps", steps);
        let interval = (steps / 10).max(1);
        for i in 0..steps {
            self.step()?;
            write_frame(writer, &self.bodies)?;
            if (i + 1) % interval == 0 {
                info!("Step {}/{} complete", i + 1, steps);
            }
            debug!("Step {}: {} tree nodes, depth {}", self.steps, self.tree.node_count(), self.tree.depth());
        }
        writer.flush()?;
        info!("Simulation finished after {} steps", self.steps);
        Ok(())
    }

    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().map(|b| b.mass).sum()
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// The current state in the frame format written by [`run`](Simulation::run).
    pub fn frame(&self) -> String {
        format_frame(&self.bodies)
    }

    /// World region used by the most recent step.
    pub fn world(&self) -> BoundingRegion {
        self.world
    }

    pub fn tree(&self) -> &BarnesHutTree {
        &self.tree
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Number of completed steps.
    pub fn steps(&self) -> usize {
        self.steps
    }
}
