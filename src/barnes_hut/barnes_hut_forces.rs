use crate::barnes_hut::{BarnesHutTree, NodeId, QuadNode};
use crate::models::{Body, Vector2};
use crate::utils::BarnesHutError;

/// A pseudo-body a force query interacts with: either a single body or an accepted cluster.
///
/// # Examples
///
/// ```
/// use rs_barnes_hut::barnes_hut::Interaction;
/// use rs_barnes_hut::models::Vector2;
///
/// // A distant cluster collapsed into one point
/// let cluster = Interaction { mass: 5.0, center_of_mass: Vector2::new(10.0, 0.0), is_cluster: true };
/// assert!(cluster.is_cluster);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interaction {
    pub mass: f64,
    pub center_of_mass: Vector2,
    /// True when an internal node passed the acceptance test, false for a single body.
    pub is_cluster: bool,
}

impl BarnesHutTree {
    /// Computes the approximate net force on `body` from everything in the tree.
    ///
    /// A node is treated as one pseudo-body if it is a leaf, or if its span divided by the
    /// distance to its center of mass is below the configured theta. Otherwise its four
    /// children are visited. Bodies in an accepted leaf are summed one by one, skipping `body`
    /// itself (matched by id).
    ///
    /// The force magnitude is `force_constant * m_body * m_node / d^distance_exponent`, with
    /// `d` floored at the configured softening distance.
    ///
    /// # Arguments
    ///
    /// * `body` - The body to compute force on
    /// * `force_constant` - Scales the force law (G for gravity, k for Coulomb-style forces)
    /// * `distance_exponent` - 1 for a linear falloff, 2 for inverse-square
    ///
    /// # Errors
    ///
    /// Returns [`BarnesHutError::DegenerateQuery`] if `body` has a non-finite position or mass.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_barnes_hut::barnes_hut::BarnesHutTree;
    /// use rs_barnes_hut::models::{Body, BoundingRegion, Vector2};
    /// use rs_barnes_hut::utils::TreeConfig;
    ///
    /// let bodies = vec![
    ///     Body::new(0, Vector2::new(1.0, 0.0), 1.0).unwrap(),
    ///     Body::new(1, Vector2::new(-1.0, 0.0), 1.0).unwrap(),
    /// ];
    /// let world = BoundingRegion::new(Vector2::zero(), 2.0).unwrap();
    /// let mut tree = BarnesHutTree::for_bodies(bodies.len(), TreeConfig::default()).unwrap();
    /// tree.build(&bodies, world).unwrap();
    ///
    /// // A body halfway between the two feels no net force.
    /// let midpoint = Body::new(99, Vector2::zero(), 1.0).unwrap();
    /// let force = tree.force_on(&midpoint, 1.0, 2.0).unwrap();
    /// assert!(force.x.abs() < 1e-12);
    ///
    /// // Body 0 is pulled toward body 1, two units away.
    /// let force = tree.force_on(&bodies[0], 1.0, 2.0).unwrap();
    /// assert!((force.x + 0.25).abs() < 1e-12);
    /// ```
    pub fn force_on(
        &self,
        body: &Body,
        force_constant: f64,
        distance_exponent: f64,
    ) -> Result<Vector2, BarnesHutError> {
        if !body.is_well_formed() {
            return Err(BarnesHutError::DegenerateQuery { id: body.id });
        }
        Ok(match self.root_id() {
            Some(root) => self.force_from(root, body, force_constant, distance_exponent),
            None => Vector2::zero(),
        })
    }

    fn force_from(&self, node: NodeId, body: &Body, force_constant: f64, distance_exponent: f64) -> Vector2 {
        let Some(n) = self.arena.get(node) else {
            return Vector2::zero();
        };
        if n.total_mass() == 0.0 {
            return Vector2::zero();
        }

        match n.children() {
            Some(children) if !self.accepts(n, body) => children
                .iter()
                .map(|&child| self.force_from(child, body, force_constant, distance_exponent))
                .sum(),
            Some(_) => self.point_force(body, n.center_of_mass(), n.total_mass(), force_constant, distance_exponent),
            None => self
                .occupants(node)
                .filter(|o| o.id != body.id)
                .map(|o| self.point_force(body, o.position, o.mass, force_constant, distance_exponent))
                .sum(),
        }
    }

    /// Opening criterion: leaves always pass, internal nodes pass when span / distance < theta.
    fn accepts(&self, node: &QuadNode, body: &Body) -> bool {
        node.is_leaf() || node.region().span() / (node.center_of_mass() - body.position).magnitude() < self.config.theta
    }

    fn point_force(&self, body: &Body, position: Vector2, mass: f64, force_constant: f64, distance_exponent: f64) -> Vector2 {
        let delta = position - body.position;
        let d = delta.magnitude().max(self.config.softening);
        let magnitude = force_constant * body.mass * mass / d.powf(distance_exponent);
        delta.normalized() * magnitude
    }

    /// Computes [`force_on`](BarnesHutTree::force_on) for every body, in order.
    ///
    /// Static bodies get a zero force without being queried.
    pub fn forces_on(
        &self,
        bodies: &[Body],
        force_constant: f64,
        distance_exponent: f64,
    ) -> Result<Vec<Vector2>, BarnesHutError> {
        bodies
            .iter()
            .map(|body| {
                if body.is_static {
                    Ok(Vector2::zero())
                } else {
                    self.force_on(body, force_constant, distance_exponent)
                }
            })
            .collect()
    }

    /// Collects the pseudo-bodies a force query on `body` would interact with.
    ///
    /// Follows the same acceptance rule and self-exclusion as
    /// [`force_on`](BarnesHutTree::force_on). A larger theta yields fewer, coarser interactions.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_barnes_hut::barnes_hut::BarnesHutTree;
    /// use rs_barnes_hut::models::{Body, BoundingRegion, Vector2};
    /// use rs_barnes_hut::utils::TreeConfig;
    ///
    /// let bodies = vec![
    ///     Body::new(0, Vector2::new(0.1, 0.1), 1.0).unwrap(),
    ///     Body::new(1, Vector2::new(0.2, 0.1), 1.0).unwrap(),
    /// ];
    /// let world = BoundingRegion::new(Vector2::zero(), 1.0).unwrap();
    /// let mut tree = BarnesHutTree::for_bodies(bodies.len(), TreeConfig::default()).unwrap();
    /// tree.build(&bodies, world).unwrap();
    ///
    /// let mut worklist = Vec::new();
    /// tree.collect_interactions(&bodies[0], &mut worklist).unwrap();
    /// // Only the other body remains once the query body is excluded.
    /// assert_eq!(worklist.len(), 1);
    /// assert_eq!(worklist[0].mass, 1.0);
    /// ```
    pub fn collect_interactions(&self, body: &Body, worklist: &mut Vec<Interaction>) -> Result<(), BarnesHutError> {
        if !body.is_well_formed() {
            return Err(BarnesHutError::DegenerateQuery { id: body.id });
        }
        if let Some(root) = self.root_id() {
            self.collect_from(root, body, worklist);
        }
        Ok(())
    }

    fn collect_from(&self, node: NodeId, body: &Body, worklist: &mut Vec<Interaction>) {
        let Some(n) = self.arena.get(node) else {
            return;
        };
        if n.total_mass() == 0.0 {
            return;
        }

        match n.children() {
            Some(children) if !self.accepts(n, body) => {
                for &child in children.iter() {
                    self.collect_from(child, body, worklist);
                }
            }
            Some(_) => worklist.push(Interaction {
                mass: n.total_mass(),
                center_of_mass: n.center_of_mass(),
                is_cluster: true,
            }),
            None => worklist.extend(self.occupants(node).filter(|o| o.id != body.id).map(|o| Interaction {
                mass: o.mass,
                center_of_mass: o.position,
                is_cluster: false,
            })),
        }
    }
}
