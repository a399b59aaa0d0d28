use crate::utils;

pub const DEFAULT_TREE_CONFIG: utils::TreeConfig = utils::TreeConfig {
    theta: 0.5,
    softening: 1e-3,
    nudge_epsilon: 1e-6,
    coincidence_tolerance: 1e-9,
    capacity_factor: 4,
};

pub const DEFAULT_SIMULATION_CONFIG: utils::SimulationConfig = utils::SimulationConfig {
    time_step: 0.01,
    force_constant: 1.0,
    distance_exponent: 1.0,
    bounds_scale: 1.5,
    bounds_margin: 10.0,
};
