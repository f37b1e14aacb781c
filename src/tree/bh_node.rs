use crate::arena::Handle;
use crate::models::{Bounds2D, Quadrant, Vector2};
use crate::utils::MAX_TREE_DEPTH;

/// Handle to a node living in the per-tick node arena.
pub type NodeId = Handle<BhNode>;

/// A node of the Barnes-Hut quadtree.
///
/// Each quadrant of a node is in exactly one of three states:
/// - empty: no occupancy bit, no child
/// - direct: occupancy bit set, `bodies[q]` holds a body index
/// - partitioned: `children[q]` holds a child node covering that quadrant
///
/// `center_of_mass` and `total_mass` aggregate every body reachable from the
/// node, direct or through descendants.
///
/// Nodes at `MAX_TREE_DEPTH` and below are buckets: they no longer split
/// space, fill slots in order, and chain overflow into `children[0]`, a node
/// with the same bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BhNode {
    pub bounds: Bounds2D,
    pub occupancy: u8,
    pub bodies: [Option<usize>; 4],
    pub children: [Option<NodeId>; 4],
    pub center_of_mass: Vector2,
    pub total_mass: f64,
    pub depth: usize,
}

impl BhNode {
    /// An empty node over `bounds`: no bodies, no children, zero mass.
    pub fn new(bounds: Bounds2D, depth: usize) -> Self {
        BhNode {
            bounds,
            occupancy: 0,
            bodies: [None; 4],
            children: [None; 4],
            center_of_mass: Vector2::ZERO,
            total_mass: 0.0,
            depth,
        }
    }

    pub fn is_partitioned(&self) -> bool {
        self.children.iter().any(Option::is_some)
    }

    pub fn is_bucket(&self) -> bool {
        self.depth >= MAX_TREE_DEPTH
    }

    pub fn is_occupied(&self, q: Quadrant) -> bool {
        self.occupancy & q.bit() != 0
    }

    pub fn direct_body(&self, q: Quadrant) -> Option<usize> {
        self.bodies[q.index()]
    }

    pub fn child(&self, q: Quadrant) -> Option<NodeId> {
        self.children[q.index()]
    }

    /// Body indices stored directly in this node, in slot order.
    pub fn direct_bodies(&self) -> impl Iterator<Item = usize> + '_ {
        self.bodies.iter().flatten().copied()
    }

    pub fn direct_body_count(&self) -> usize {
        self.occupancy.count_ones() as usize
    }

    pub(crate) fn absorb(&mut self, position: Vector2, mass: f64) {
        let new_mass = self.total_mass + mass;
        self.center_of_mass = (self.center_of_mass * self.total_mass + position * mass) * (1.0 / new_mass);
        self.total_mass = new_mass;
    }

    pub(crate) fn place(&mut self, slot: usize, index: usize) {
        self.bodies[slot] = Some(index);
        self.occupancy |= 1 << slot;
    }

    pub(crate) fn evict(&mut self, slot: usize) -> Option<usize> {
        self.occupancy &= !(1 << slot);
        self.bodies[slot].take()
    }
}
