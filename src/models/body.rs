use crate::models::Vector2;
use crate::utils::BarnesHutError;

/// A point mass taking part in the simulation.
///
/// The tree only reads `id`, `position` and `mass`. Velocity, acceleration, charge and the
/// static flag belong to whoever integrates the bodies.
///
/// # Examples
///
/// ```
/// use rs_barnes_hut::models::{Body, Vector2};
///
/// let body = Body::new(7, Vector2::new(1.0, 2.0), 3.0)
///     .expect("Failed to create body")
///     .with_velocity(Vector2::new(0.5, 0.0))
///     .with_charge(-1.0);
///
/// assert_eq!(body.id, 7);
/// assert_eq!(body.mass, 3.0);
/// assert_eq!(body.charge, -1.0);
/// assert!(!body.is_static);
/// assert_eq!(body.acceleration, Vector2::zero());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    /// Stable identity, also used to exclude a body's force on itself.
    pub id: usize,
    pub position: Vector2,
    pub velocity: Vector2,
    pub acceleration: Vector2,
    pub mass: f64,
    /// Carried through for Coulomb-style drivers; the tree ignores it.
    pub charge: f64,
    /// Static bodies attract others but are never moved.
    pub is_static: bool,
}

impl Body {
    /// Creates a body at rest.
    ///
    /// # Errors
    ///
    /// Returns [`BarnesHutError::InvalidMass`] if `mass` is negative or not finite.
    pub fn new(id: usize, position: Vector2, mass: f64) -> Result<Self, BarnesHutError> {
        if !mass.is_finite() || mass < 0.0 {
            return Err(BarnesHutError::InvalidMass);
        }
        Ok(Body {
            id,
            position,
            velocity: Vector2::zero(),
            acceleration: Vector2::zero(),
            mass,
            charge: 0.0,
            is_static: false,
        })
    }

    pub fn with_velocity(mut self, velocity: Vector2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_charge(mut self, charge: f64) -> Self {
        self.charge = charge;
        self
    }

    /// Marks the body as fixed in place.
    pub fn as_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Position and mass are both finite.
    pub fn is_well_formed(&self) -> bool {
        self.position.is_finite() && self.mass.is_finite()
    }
}
