//! Quadtree construction for the Barnes-Hut approximation.
//!
//! The tree is rebuilt from scratch every simulation step. All nodes live in a [`NodeArena`]
//! owned by the tree, so a rebuild is a cursor reset followed by one insertion per body.
//!
//! # Example
//!
//! ```
//! use rs_barnes_hut::barnes_hut::BarnesHutTree;
//! use rs_barnes_hut::models::{Body, BoundingRegion, Vector2};
//! use rs_barnes_hut::utils::TreeConfig;
//!
//! let bodies = vec![
//!     Body::new(0, Vector2::new(0.1, 0.1), 1.0).unwrap(),
//!     Body::new(1, Vector2::new(-0.5, 0.5), 2.0).unwrap(),
//!     Body::new(2, Vector2::new(0.4, -0.2), 1.5).unwrap(),
//! ];
//! let world = BoundingRegion::new(Vector2::zero(), 1.0).unwrap();
//!
//! let mut tree = BarnesHutTree::for_bodies(bodies.len(), TreeConfig::default()).unwrap();
//! tree.build(&bodies, world).expect("Failed to build tree");
//!
//! let root = tree.root().unwrap();
//! assert!((root.total_mass() - 4.5).abs() < 1e-12);
//! ```
use log::{debug, trace, warn};

use crate::barnes_hut::{NodeArena, NodeId, Occupant, QuadNode};
use crate::models::{Body, BoundingRegion};
use crate::utils::{BarnesHutError, TreeConfig};

/// A Barnes-Hut quadtree over one step's worth of bodies.
///
/// Build it with [`build`](BarnesHutTree::build), then query it with
/// [`force_on`](BarnesHutTree::force_on). The next `build` discards the previous tree.
#[derive(Debug, Clone)]
pub struct BarnesHutTree {
    pub(crate) arena: NodeArena,
    pub(crate) config: TreeConfig,
    root: Option<NodeId>,
    world: Option<BoundingRegion>,
    inserted: usize,
    skipped: usize,
}

impl BarnesHutTree {
    /// Creates an empty tree whose arena holds `capacity` nodes.
    ///
    /// # Errors
    ///
    /// Returns [`BarnesHutError::InvalidConfig`] if `config` does not validate or the capacity
    /// is zero.
    pub fn new(capacity: usize, config: TreeConfig) -> Result<Self, BarnesHutError> {
        config.validate()?;
        Ok(BarnesHutTree {
            arena: NodeArena::with_capacity(capacity)?,
            config,
            root: None,
            world: None,
            inserted: 0,
            skipped: 0,
        })
    }

    /// Creates an empty tree sized with [`TreeConfig::capacity_for`].
    pub fn for_bodies(body_count: usize, config: TreeConfig) -> Result<Self, BarnesHutError> {
        Self::new(config.capacity_for(body_count), config)
    }

    /// Rebuilds the tree over `bodies`.
    ///
    /// Bodies outside `world`, and bodies with a non-finite position or mass, are skipped and
    /// take no part in this step's force calculation. The skip count is available from
    /// [`skipped`](BarnesHutTree::skipped).
    ///
    /// # Arguments
    ///
    /// * `bodies` - The bodies to insert, in order
    /// * `world` - The region covered by the root node
    ///
    /// # Errors
    ///
    /// Returns [`BarnesHutError::OutOfCapacity`] if the arena runs out of nodes. The tree is
    /// left empty in that case.
    pub fn build(&mut self, bodies: &[Body], world: BoundingRegion) -> Result<(), BarnesHutError> {
        self.arena.reset();
        self.root = None;
        self.world = Some(world);
        self.inserted = 0;
        self.skipped = 0;

        let root = self.arena.allocate(world)?;
        for body in bodies {
            if !body.is_well_formed() || !world.contains(body.position) {
                self.skipped += 1;
                continue;
            }
            self.insert(root, Occupant::from(body))?;
            self.inserted += 1;
        }
        self.root = Some(root);

        if self.skipped > 0 {
            warn!(
                "{} of {} bodies were skipped (outside the world region or non-finite)",
                self.skipped,
                bodies.len()
            );
        }
        debug!(
            "Built tree: {} bodies, {} nodes ({} of {} arena bytes)",
            self.inserted,
            self.arena.len(),
            self.arena.used(),
            self.arena.capacity() * std::mem::size_of::<QuadNode>()
        );
        Ok(())
    }

    fn slot(&self, id: NodeId) -> Result<&QuadNode, BarnesHutError> {
        self.arena.get(id).ok_or(BarnesHutError::StaleHandle { index: id.index() })
    }

    fn slot_mut(&mut self, id: NodeId) -> Result<&mut QuadNode, BarnesHutError> {
        self.arena.get_mut(id).ok_or(BarnesHutError::StaleHandle { index: id.index() })
    }

    /// Inserts one body below `node`.
    fn insert(&mut self, node: NodeId, incoming: Occupant) -> Result<(), BarnesHutError> {
        let current = *self.slot(node)?;

        match (current.children(), current.occupant()) {
            (Some(children), _) => {
                self.slot_mut(node)?.accumulate(incoming.position, incoming.mass);
                let quadrant = current.region().quadrant_of(incoming.position);
                self.insert(children[quadrant.index()], incoming)
            }
            (None, None) => {
                self.slot_mut(node)?.settle(incoming);
                Ok(())
            }
            (None, Some(resident)) => self.split(node, current, resident, incoming),
        }
    }

    /// Turns an occupied leaf into an internal node holding both bodies.
    ///
    /// A body coinciding with the resident is nudged along x. If the nudge does not carry it
    /// into a different quadrant, it is stacked onto the leaf instead, so coincident bodies
    /// cost one slot each wherever they sit.
    fn split(
        &mut self,
        node: NodeId,
        leaf: QuadNode,
        resident: Occupant,
        mut incoming: Occupant,
    ) -> Result<(), BarnesHutError> {
        let region = leaf.region();
        let tolerance = self.config.coincidence_tolerance;
        if resident.position.distance_squared(incoming.position) <= tolerance * tolerance {
            incoming.position.x += self.config.nudge_epsilon;
            if region.quadrant_of(resident.position) == region.quadrant_of(incoming.position) {
                debug!("Body {} coincides with body {} at {}, stacking", incoming.id, resident.id, resident.position);
                return self.stack(node, incoming);
            }
            debug!(
                "Body {} coincides with body {} at {}, nudged by {}",
                incoming.id, resident.id, resident.position, self.config.nudge_epsilon
            );
        }

        let quads = region.subdivide();
        let children = [
            self.arena.allocate(quads[0])?,
            self.arena.allocate(quads[1])?,
            self.arena.allocate(quads[2])?,
            self.arena.allocate(quads[3])?,
        ];
        trace!("Split node {} (half extent {}) for bodies {} and {}", node.index(), region.half_extent, resident.id, incoming.id);
        self.slot_mut(node)?.subdivide(children);

        // The resident moves down together with anything stacked on it.
        let quadrant = region.quadrant_of(resident.position);
        self.slot_mut(children[quadrant.index()])?.adopt(&leaf);
        let quadrant = region.quadrant_of(incoming.position);
        self.insert(children[quadrant.index()], incoming)?;

        // The node still carries the resident's mass from when it was a leaf.
        self.slot_mut(node)?.accumulate(incoming.position, incoming.mass);
        Ok(())
    }

    /// Pushes a coincident body onto the stack of the leaf `node`.
    fn stack(&mut self, node: NodeId, incoming: Occupant) -> Result<(), BarnesHutError> {
        let leaf = *self.slot(node)?;
        let slot = self.arena.allocate(leaf.region())?;
        let member = self.slot_mut(slot)?;
        member.settle(incoming);
        member.link(leaf.stacked());

        let head = self.slot_mut(node)?;
        head.link(Some(slot));
        head.accumulate(incoming.position, incoming.mass);
        Ok(())
    }

    /// Iterates over every body stored in the leaf `id`: its occupant, then its stack.
    ///
    /// Yields nothing for internal nodes, empty leaves and handles from an earlier build.
    pub fn occupants(&self, id: NodeId) -> Occupants<'_> {
        Occupants { arena: &self.arena, next: Some(id) }
    }

    /// Changes the acceptance threshold used by later queries.
    pub fn set_theta(&mut self, theta: f64) -> Result<(), BarnesHutError> {
        let config = self.config.with_theta(theta);
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    pub fn root_id(&self) -> Option<NodeId> {
        self.root
    }

    /// The root of the last successful build.
    pub fn root(&self) -> Option<&QuadNode> {
        self.root.and_then(|id| self.arena.get(id))
    }

    /// Looks up a node of the current tree.
    pub fn node(&self, id: NodeId) -> Option<&QuadNode> {
        self.arena.get(id)
    }

    /// World region of the last build.
    pub fn world(&self) -> Option<BoundingRegion> {
        self.world
    }

    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Number of bodies stored by the last build.
    pub fn inserted(&self) -> usize {
        self.inserted
    }

    /// Number of bodies the last build left out.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Number of levels in the tree; a lone root counts as one.
    pub fn depth(&self) -> usize {
        match self.root {
            Some(root) => self.depth_below(root),
            None => 0,
        }
    }

    fn depth_below(&self, node: NodeId) -> usize {
        match self.arena.get(node).and_then(|n| n.children()) {
            Some(children) => 1 + children.iter().map(|&c| self.depth_below(c)).max().unwrap_or(0),
            None => 1,
        }
    }
}

/// Iterator over the bodies of one leaf, returned by [`BarnesHutTree::occupants`].
#[derive(Debug, Clone)]
pub struct Occupants<'a> {
    arena: &'a NodeArena,
    next: Option<NodeId>,
}

impl Iterator for Occupants<'_> {
    type Item = Occupant;

    fn next(&mut self) -> Option<Occupant> {
        let node = self.arena.get(self.next?)?;
        self.next = node.stacked();
        node.occupant()
    }
}
