//! A Barnes-Hut quadtree for approximating 2D n-body forces.
//!
//! - [`models`]: vectors, bounding regions and bodies
//! - [`barnes_hut`]: the node arena, tree construction and force queries
//! - [`simulation`]: a stepping driver, brute-force reference and particle files (feature `simulation`)
//! - [`utils`]: configuration, errors and logging setup
pub mod utils;
pub mod models;
pub mod barnes_hut;
pub mod simulation;
