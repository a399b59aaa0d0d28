//! Exact O(N²) force summation.
//!
//! Uses the same force law and softening floor as [`BarnesHutTree::force_on`], so a tree
//! queried with theta 0 agrees with these functions up to rounding.
//!
//! [`BarnesHutTree::force_on`]: crate::barnes_hut::BarnesHutTree::force_on
use crate::models::{Body, Vector2};
use crate::utils::BarnesHutError;

/// Force exerted on `target` by `source`.
fn pair_force(target: &Body, source: &Body, force_constant: f64, distance_exponent: f64, softening: f64) -> Vector2 {
    let delta = source.position - target.position;
    let d = delta.magnitude().max(softening);
    let magnitude = force_constant * target.mass * source.mass / d.powf(distance_exponent);
    delta.normalized() * magnitude
}

/// Sums the force on `body` from every other body in `bodies`.
///
/// Bodies sharing `body.id` are skipped, as are bodies with a non-finite position or mass.
///
/// # Errors
///
/// Returns [`BarnesHutError::DegenerateQuery`] if `body` itself is not finite.
///
/// # Examples
///
/// ```
/// use rs_barnes_hut::models::{Body, Vector2};
/// use rs_barnes_hut::simulation::pairwise_force_on;
///
/// let bodies = vec![
///     Body::new(0, Vector2::new(0.0, 0.0), 1.0).unwrap(),
///     Body::new(1, Vector2::new(2.0, 0.0), 4.0).unwrap(),
/// ];
/// let force = pairwise_force_on(&bodies[0], &bodies, 1.0, 2.0, 1e-3).unwrap();
/// assert!((force.x - 1.0).abs() < 1e-12);
/// assert_eq!(force.y, 0.0);
/// ```
pub fn pairwise_force_on(
    body: &Body,
    bodies: &[Body],
    force_constant: f64,
    distance_exponent: f64,
    softening: f64,
) -> Result<Vector2, BarnesHutError> {
    if !body.is_well_formed() {
        return Err(BarnesHutError::DegenerateQuery { id: body.id });
    }
    Ok(bodies
        .iter()
        .filter(|other| other.id != body.id && other.is_well_formed())
        .map(|other| pair_force(body, other, force_constant, distance_exponent, softening))
        .sum())
}

/// Computes the force on every body, visiting each pair once.
///
/// The result is indexed like `bodies`. Non-finite bodies receive and exert no force.
pub fn pairwise_forces(bodies: &[Body], force_constant: f64, distance_exponent: f64, softening: f64) -> Vec<Vector2> {
    let mut forces = vec![Vector2::zero(); bodies.len()];
    for i in 0..bodies.len() {
        if !bodies[i].is_well_formed() {
            continue;
        }
        for j in (i + 1)..bodies.len() {
            if !bodies[j].is_well_formed() {
                continue;
            }
            let f = pair_force(&bodies[i], &bodies[j], force_constant, distance_exponent, softening);
            forces[i] += f;
            forces[j] -= f;
        }
    }
    forces
}
