use crate::barnes_hut::NodeId;
use crate::models::{Body, BoundingRegion, Vector2};

/// The body stored directly in an unsubdivided leaf.
///
/// `position` is the position the body was inserted at, which differs from the body's own
/// position only when it was nudged away from a coincident neighbour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Occupant {
    pub id: usize,
    pub position: Vector2,
    pub mass: f64,
}

impl From<&Body> for Occupant {
    fn from(body: &Body) -> Self {
        Occupant { id: body.id, position: body.position, mass: body.mass }
    }
}

/// A quadtree node living in a [`NodeArena`](crate::barnes_hut::NodeArena) slot.
///
/// A node is either a leaf (no children, an occupant plus any bodies stacked on top of it) or
/// internal (exactly four children, never an occupant). Its mass and center of mass always
/// describe everything stored beneath it.
///
/// Bodies that coincide with a leaf's occupant, and that a nudge does not move into another
/// quadrant, are stacked: each sits in a spare arena slot linked from the leaf through `stacked`.
/// The stack moves down with the occupant when the leaf splits.
#[derive(Debug, Clone, Copy)]
pub struct QuadNode {
    region: BoundingRegion,
    total_mass: f64,
    center_of_mass: Vector2,
    occupant: Option<Occupant>,
    stacked: Option<NodeId>,
    children: Option<[NodeId; 4]>,
}

impl QuadNode {
    /// A placeholder for slots that have never been handed out.
    pub(crate) fn vacant() -> Self {
        QuadNode {
            region: BoundingRegion { center: Vector2::zero(), half_extent: 1.0 },
            total_mass: 0.0,
            center_of_mass: Vector2::zero(),
            occupant: None,
            stacked: None,
            children: None,
        }
    }

    /// Turns the slot into an empty leaf covering `region`, discarding whatever it held before.
    pub(crate) fn init(&mut self, region: BoundingRegion) {
        self.region = region;
        self.total_mass = 0.0;
        self.center_of_mass = Vector2::zero();
        self.occupant = None;
        self.stacked = None;
        self.children = None;
    }

    /// Folds one more body into the aggregate.
    ///
    /// Every insertion path updates mass and center of mass through here.
    pub(crate) fn accumulate(&mut self, position: Vector2, mass: f64) {
        let total = self.total_mass + mass;
        if self.total_mass == 0.0 {
            self.center_of_mass = position;
        } else if total > 0.0 {
            self.center_of_mass = (self.center_of_mass * self.total_mass + position * mass) / total;
        }
        self.total_mass = total;
    }

    /// Stores a body in an empty leaf.
    pub(crate) fn settle(&mut self, occupant: Occupant) {
        debug_assert!(self.is_leaf() && self.occupant.is_none());
        self.occupant = Some(occupant);
        self.accumulate(occupant.position, occupant.mass);
    }

    /// Links the next member of a stack.
    pub(crate) fn link(&mut self, next: Option<NodeId>) {
        self.stacked = next;
    }

    /// Takes over everything `leaf` held: occupant, stack and aggregates.
    pub(crate) fn adopt(&mut self, leaf: &QuadNode) {
        self.total_mass = leaf.total_mass;
        self.center_of_mass = leaf.center_of_mass;
        self.occupant = leaf.occupant;
        self.stacked = leaf.stacked;
    }

    /// Makes the node internal. Its occupant and stack move to a child through
    /// [`adopt`](QuadNode::adopt).
    pub(crate) fn subdivide(&mut self, children: [NodeId; 4]) {
        self.children = Some(children);
        self.occupant = None;
        self.stacked = None;
    }

    pub fn region(&self) -> BoundingRegion {
        self.region
    }

    pub fn total_mass(&self) -> f64 {
        self.total_mass
    }

    /// Meaningless while `total_mass` is zero.
    pub fn center_of_mass(&self) -> Vector2 {
        self.center_of_mass
    }

    pub fn occupant(&self) -> Option<Occupant> {
        self.occupant
    }

    /// First slot of the stack of coincident bodies sharing this leaf.
    pub fn stacked(&self) -> Option<NodeId> {
        self.stacked
    }

    /// Child handles in NW, NE, SW, SE order, or `None` for a leaf.
    pub fn children(&self) -> Option<[NodeId; 4]> {
        self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    pub fn is_empty(&self) -> bool {
        self.is_leaf() && self.occupant.is_none()
    }
}
