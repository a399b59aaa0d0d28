#[cfg(feature = "simulation")]
mod brute_force;
#[cfg(feature = "simulation")]
mod particle_io;
#[cfg(feature = "simulation")]
mod random;
#[cfg(feature = "simulation")]
mod n_body_simulation;

#[cfg(feature = "simulation")]
pub use brute_force::*;
#[cfg(feature = "simulation")]
pub use particle_io::*;
#[cfg(feature = "simulation")]
pub use random::*;
#[cfg(feature = "simulation")]
pub use n_body_simulation::*;

#[cfg(test)]
#[cfg(feature = "simulation")]
mod particle_io_tests;
#[cfg(test)]
#[cfg(feature = "simulation")]
mod random_tests;
#[cfg(test)]
#[cfg(feature = "simulation")]
mod n_body_simulation_tests;
