// src/utils/constants_config.rs
use crate::utils::{
    DEFAULT_SIMULATION_CONFIG,
    DEFAULT_TREE_CONFIG,
    errors::BarnesHutError
};

/// Tuning knobs for building and querying a Barnes-Hut tree.
///
/// # Examples
///
/// ```
/// use rs_barnes_hut::utils::TreeConfig;
///
/// // Only override theta, keep the rest at their defaults.
/// let config = TreeConfig::new(Some(0.3), None, None, None, None);
/// assert_eq!(config.theta, 0.3);
/// assert_eq!(config.capacity_factor, 4);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeConfig {
    /// Acceptance threshold for the span/distance test. Smaller is more accurate and slower.
    pub theta: f64,
    /// Minimum separation used in the force law.
    pub softening: f64,
    /// Offset applied along x to a body that lands on top of another one.
    pub nudge_epsilon: f64,
    /// Two bodies closer than this are treated as coincident.
    pub coincidence_tolerance: f64,
    /// Arena slots reserved per body.
    pub capacity_factor: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        DEFAULT_TREE_CONFIG
    }
}

impl TreeConfig {
    pub fn new(
        theta: Option<f64>,
        softening: Option<f64>,
        nudge_epsilon: Option<f64>,
        coincidence_tolerance: Option<f64>,
        capacity_factor: Option<usize>,
    ) -> Self {
        let default = DEFAULT_TREE_CONFIG;
        Self {
            theta: theta.unwrap_or(default.theta),
            softening: softening.unwrap_or(default.softening),
            nudge_epsilon: nudge_epsilon.unwrap_or(default.nudge_epsilon),
            coincidence_tolerance: coincidence_tolerance.unwrap_or(default.coincidence_tolerance),
            capacity_factor: capacity_factor.unwrap_or(default.capacity_factor),
        }
    }

    /// Returns a copy of this config with a different theta.
    pub fn with_theta(mut self, theta: f64) -> Self {
        self.theta = theta;
        self
    }

    /// Checks that every value is in range.
    ///
    /// A theta of zero is allowed and disables approximation entirely.
    pub fn validate(&self) -> Result<(), BarnesHutError> {
        if !self.theta.is_finite() || self.theta < 0.0 {
            return Err(BarnesHutError::InvalidConfig(format!("theta must be finite and non-negative, got {}", self.theta)));
        }
        if !self.softening.is_finite() || self.softening < 0.0 {
            return Err(BarnesHutError::InvalidConfig(format!("softening must be finite and non-negative, got {}", self.softening)));
        }
        if !self.nudge_epsilon.is_finite() || self.nudge_epsilon <= 0.0 {
            return Err(BarnesHutError::InvalidConfig(format!("nudge epsilon must be positive, got {}", self.nudge_epsilon)));
        }
        if !self.coincidence_tolerance.is_finite() || self.coincidence_tolerance < 0.0 {
            return Err(BarnesHutError::InvalidConfig(format!("coincidence tolerance must be non-negative, got {}", self.coincidence_tolerance)));
        }
        // The nudge has to push a body past the tolerance, otherwise it would be nudged again on every split.
        if self.nudge_epsilon <= self.coincidence_tolerance {
            return Err(BarnesHutError::InvalidConfig("nudge epsilon must exceed the coincidence tolerance".to_string()));
        }
        if self.capacity_factor < Self::MIN_CAPACITY_FACTOR {
            return Err(BarnesHutError::InvalidConfig(format!(
                "capacity factor must be at least {}, got {}",
                Self::MIN_CAPACITY_FACTOR,
                self.capacity_factor
            )));
        }
        Ok(())
    }

    /// Smallest accepted number of arena slots per body.
    pub const MIN_CAPACITY_FACTOR: usize = 4;

    /// Extra slots on top of `capacity_factor` per body. Two bodies a hair apart, but not
    /// coincident, keep splitting until a quadrant boundary falls between them, which can take a
    /// few dozen levels.
    pub const SPLIT_RESERVE: usize = 256;

    /// Number of arena slots needed for `body_count` bodies.
    pub fn capacity_for(&self, body_count: usize) -> usize {
        body_count
            .saturating_mul(self.capacity_factor)
            .saturating_add(Self::SPLIT_RESERVE)
    }
}

/// Policy parameters owned by the simulation driver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    pub time_step: f64,
    pub force_constant: f64,
    /// 1 for a linear falloff, 2 for inverse-square, and so on.
    pub distance_exponent: f64,
    pub bounds_scale: f64,
    pub bounds_margin: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        DEFAULT_SIMULATION_CONFIG
    }
}

impl SimulationConfig {
    pub fn new(
        time_step: Option<f64>,
        force_constant: Option<f64>,
        distance_exponent: Option<f64>,
        bounds_scale: Option<f64>,
        bounds_margin: Option<f64>,
    ) -> Self {
        let default = DEFAULT_SIMULATION_CONFIG;
        Self {
            time_step: time_step.unwrap_or(default.time_step),
            force_constant: force_constant.unwrap_or(default.force_constant),
            distance_exponent: distance_exponent.unwrap_or(default.distance_exponent),
            bounds_scale: bounds_scale.unwrap_or(default.bounds_scale),
            bounds_margin: bounds_margin.unwrap_or(default.bounds_margin),
        }
    }

    pub fn validate(&self) -> Result<(), BarnesHutError> {
        if !self.time_step.is_finite() || self.time_step <= 0.0 {
            return Err(BarnesHutError::InvalidConfig(format!("time step must be positive, got {}", self.time_step)));
        }
        if !self.force_constant.is_finite() {
            return Err(BarnesHutError::InvalidConfig("force constant must be finite".to_string()));
        }
        if !self.distance_exponent.is_finite() {
            return Err(BarnesHutError::InvalidConfig("distance exponent must be finite".to_string()));
        }
        if !self.bounds_scale.is_finite() || self.bounds_scale < 1.0 {
            return Err(BarnesHutError::InvalidConfig(format!("bounds scale must be at least 1, got {}", self.bounds_scale)));
        }
        if !self.bounds_margin.is_finite() || self.bounds_margin <= 0.0 {
            return Err(BarnesHutError::InvalidConfig(format!("bounds margin must be positive, got {}", self.bounds_margin)));
        }
        Ok(())
    }
}
