use std::ops::{Index, IndexMut};

use log::trace;

use crate::barnes_hut::QuadNode;
use crate::models::BoundingRegion;
use crate::utils::BarnesHutError;

/// Handle to a node slot in a [`NodeArena`].
///
/// A handle remembers the arena epoch it was issued in, so handles left over from before a
/// [`NodeArena::reset`] no longer resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: u32,
    epoch: u32,
}

impl NodeId {
    /// Position of the slot in the arena.
    pub fn index(self) -> usize {
        self.index as usize
    }
}

/// A fixed-capacity pool of quadtree nodes with a bump cursor.
///
/// Nodes are never freed one at a time. [`reset`](NodeArena::reset) rewinds the cursor in O(1)
/// and leaves the old slot contents in place; every slot is re-initialised when it is allocated
/// again.
///
/// # Examples
///
/// ```
/// use rs_barnes_hut::barnes_hut::NodeArena;
/// use rs_barnes_hut::models::{BoundingRegion, Vector2};
/// use rs_barnes_hut::utils::BarnesHutError;
///
/// let region = BoundingRegion::new(Vector2::zero(), 1.0).unwrap();
/// let mut arena = NodeArena::with_capacity(2).unwrap();
///
/// let first = arena.allocate(region).unwrap();
/// let second = arena.allocate(region).unwrap();
/// assert_ne!(first, second);
/// assert_eq!(arena.len(), 2);
///
/// // The pool is full.
/// assert_eq!(arena.allocate(region), Err(BarnesHutError::OutOfCapacity { capacity: 2 }));
///
/// // Resetting invalidates every handle handed out so far.
/// arena.reset();
/// assert_eq!(arena.used(), 0);
/// assert!(arena.get(first).is_none());
/// ```
#[derive(Debug, Clone)]
pub struct NodeArena {
    slots: Vec<QuadNode>,
    cursor: usize,
    epoch: u32,
}

impl NodeArena {
    /// Creates an arena with room for exactly `capacity` nodes.
    ///
    /// # Errors
    ///
    /// Returns [`BarnesHutError::InvalidConfig`] for a zero capacity, or one that does not fit
    /// in a 32-bit node index.
    pub fn with_capacity(capacity: usize) -> Result<Self, BarnesHutError> {
        if capacity == 0 || capacity > u32::MAX as usize {
            return Err(BarnesHutError::InvalidConfig(format!("arena capacity out of range: {}", capacity)));
        }
        Ok(NodeArena {
            slots: vec![QuadNode::vacant(); capacity],
            cursor: 0,
            epoch: 0,
        })
    }

    /// Creates an arena sized for `body_count` bodies with `safety_factor` slots per body.
    pub fn for_bodies(body_count: usize, safety_factor: usize) -> Result<Self, BarnesHutError> {
        Self::with_capacity(body_count.saturating_mul(safety_factor))
    }

    /// Hands out the next free slot, initialised as an empty leaf over `region`.
    ///
    /// # Errors
    ///
    /// Returns [`BarnesHutError::OutOfCapacity`] once every slot has been handed out.
    pub fn allocate(&mut self, region: BoundingRegion) -> Result<NodeId, BarnesHutError> {
        if self.cursor == self.slots.len() {
            return Err(BarnesHutError::OutOfCapacity { capacity: self.slots.len() });
        }
        let index = self.cursor;
        self.slots[index].init(region);
        self.cursor += 1;
        Ok(NodeId { index: index as u32, epoch: self.epoch })
    }

    /// Rewinds the cursor. Existing handles stop resolving.
    pub fn reset(&mut self) {
        trace!("Resetting node arena ({} of {} slots in use)", self.cursor, self.slots.len());
        self.cursor = 0;
        self.epoch = self.epoch.wrapping_add(1);
    }

    /// Bytes currently handed out.
    pub fn used(&self) -> usize {
        self.cursor * std::mem::size_of::<QuadNode>()
    }

    /// Number of nodes handed out since the last reset.
    pub fn len(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.cursor == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn resolves(&self, id: NodeId) -> bool {
        id.epoch == self.epoch && id.index() < self.cursor
    }

    /// Looks up a node, or `None` if the handle predates the last reset.
    pub fn get(&self, id: NodeId) -> Option<&QuadNode> {
        if self.resolves(id) {
            self.slots.get(id.index())
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut QuadNode> {
        if self.resolves(id) {
            self.slots.get_mut(id.index())
        } else {
            None
        }
    }
}

impl Index<NodeId> for NodeArena {
    type Output = QuadNode;

    fn index(&self, id: NodeId) -> &QuadNode {
        match self.get(id) {
            Some(node) => node,
            None => panic!("stale node handle {:?} (arena epoch {})", id, self.epoch),
        }
    }
}

impl IndexMut<NodeId> for NodeArena {
    fn index_mut(&mut self, id: NodeId) -> &mut QuadNode {
        let epoch = self.epoch;
        match self.get_mut(id) {
            Some(node) => node,
            None => panic!("stale node handle {:?} (arena epoch {})", id, epoch),
        }
    }
}
