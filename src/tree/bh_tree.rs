//! Barnes-Hut quadtree over an externally owned body array.
//!
//! The tree stores body indices, never bodies, and all of its nodes live in
//! one generation of an [`Arena`]. It is rebuilt from the body array every
//! tick; the borrow it holds on the arena keeps the arena from being reset
//! while the tree is alive.
//!
//! Insertion is displace-and-descend: a quadrant holds one body directly
//! until a second body lands in it, at which point the occupant is evicted,
//! the child for that quadrant is created and both bodies are inserted into
//! the child. Aggregate mass and center of mass are updated incrementally on
//! the way down.
//!
//! # Example
//!
//! ```
//! use rs_bhsim::arena::Arena;
//! use rs_bhsim::models::{Body, Bounds2D, Vector2};
//! use rs_bhsim::tree::BhTree;
//!
//! let bodies: Vec<Body> = [(10.0, 10.0), (90.0, 10.0), (10.0, 90.0), (90.0, 90.0)]
//!     .iter()
//!     .map(|&(x, y)| Body::new(Vector2::new(x, y), Vector2::ZERO, Vector2::ZERO, 1.0, 0).unwrap())
//!     .collect();
//!
//! let mut arena = Arena::create(64 * 1024).unwrap();
//! let tree = BhTree::build(&mut arena, &bodies, Bounds2D::from_size(100.0, 100.0)).unwrap();
//! let root = tree.root_node();
//!
//! assert_eq!(root.occupancy, 0b1111);
//! assert!(!root.is_partitioned());
//! assert_eq!(root.total_mass, 4.0);
//! assert_eq!(root.center_of_mass, Vector2::new(50.0, 50.0));
//! ```
use log::{debug, trace, warn};
use crate::arena::Arena;
use crate::errors::PhysicsError;
use crate::models::{Body, Bounds2D};
use crate::tree::{BhNode, BodyVisitor, NodeFn, NodeId, NodeVisitor};

/// Allocates an empty node covering `bounds`.
pub fn create_node(arena: &mut Arena<BhNode>, bounds: Bounds2D) -> NodeId {
    arena.alloc(BhNode::new(bounds, 0))
}

/// Inserts `bodies[index]` below `node`.
///
/// Returns `Ok(false)` when the body lies outside the node's bounds; such
/// bodies are not tracked. Running out of arena while splitting is fatal.
///
/// # Errors
///
/// Returns `PhysicsError::StaleHandle` if `node` belongs to an earlier arena
/// generation, and `PhysicsError::CalculationError` for an out-of-range index.
pub fn insert(
    arena: &mut Arena<BhNode>,
    node: NodeId,
    bodies: &[Body],
    index: usize,
) -> Result<bool, PhysicsError> {
    if index >= bodies.len() {
        return Err(PhysicsError::CalculationError(format!(
            "body index {} out of range for {} bodies",
            index,
            bodies.len()
        )));
    }
    insert_at(arena, node, bodies, index)
}

fn insert_at(
    arena: &mut Arena<BhNode>,
    node_id: NodeId,
    bodies: &[Body],
    index: usize,
) -> Result<bool, PhysicsError> {
    let body = &bodies[index];
    let node = arena.get_mut(node_id)?;
    if !node.bounds.contains(body.position) {
        return Ok(false);
    }
    node.absorb(body.position, body.mass);

    if node.is_bucket() {
        return insert_into_bucket(arena, node_id, bodies, index);
    }

    let q = node.bounds.quadrant_of(body.position);
    let slot = q.index();
    trace!("body {} -> depth {} {:?}", index, node.depth, q);

    if let Some(child) = node.children[slot] {
        return insert_at(arena, child, bodies, index);
    }
    let Some(occupant) = node.evict(slot) else {
        node.place(slot, index);
        return Ok(true);
    };

    // Second body in this quadrant: split it once and push both down.
    let child_node = BhNode::new(node.bounds.quadrant_bounds(q), node.depth + 1);
    let child = arena.alloc(child_node);
    arena.get_mut(node_id)?.children[slot] = Some(child);
    insert_at(arena, child, bodies, occupant)?;
    insert_at(arena, child, bodies, index)
}

fn insert_into_bucket(
    arena: &mut Arena<BhNode>,
    node_id: NodeId,
    bodies: &[Body],
    index: usize,
) -> Result<bool, PhysicsError> {
    let node = arena.get_mut(node_id)?;
    if let Some(slot) = node.bodies.iter().position(Option::is_none) {
        node.place(slot, index);
        return Ok(true);
    }
    let overflow = match node.children[0] {
        Some(overflow) => overflow,
        None => {
            debug!(
                "bucket at depth {} full, chaining overflow for body {}",
                node.depth, index
            );
            let overflow_node = BhNode::new(node.bounds, node.depth + 1);
            let overflow = arena.alloc(overflow_node);
            arena.get_mut(node_id)?.children[0] = Some(overflow);
            overflow
        }
    };
    insert_at(arena, overflow, bodies, index)
}

/// Size and shape of a built tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TreeStats {
    pub node_count: usize,
    pub max_depth: usize,
    pub body_count: usize,
}

/// A quadtree built over one body array in one arena generation.
pub struct BhTree<'a> {
    arena: &'a Arena<BhNode>,
    root: NodeId,
    root_node: &'a BhNode,
    retained: usize,
    dropped: usize,
}

impl<'a> BhTree<'a> {
    /// Builds a tree spanning `domain` and inserts every body of `bodies`.
    ///
    /// Bodies outside `domain` are dropped silently (a count is logged).
    ///
    /// # Errors
    ///
    /// Returns `PhysicsError::ArenaNotReset` if the arena still holds a
    /// previous generation, or `PhysicsError::InvalidDomain` for a degenerate domain.
    ///
    /// # Panics
    ///
    /// Panics if the arena runs out of capacity while building.
    pub fn build(
        arena: &'a mut Arena<BhNode>,
        bodies: &[Body],
        domain: Bounds2D,
    ) -> Result<Self, PhysicsError> {
        if arena.used() != 0 {
            return Err(PhysicsError::ArenaNotReset { used: arena.used() });
        }
        domain.validate()?;

        let root = create_node(arena, domain);
        let mut retained = 0;
        for index in 0..bodies.len() {
            if insert_at(arena, root, bodies, index)? {
                retained += 1;
            }
        }
        let dropped = bodies.len() - retained;
        if dropped > 0 {
            warn!("{} of {} bodies outside the domain were not inserted", dropped, bodies.len());
        }
        debug!(
            "tree built: {} bodies, {} nodes, {} of {} arena bytes",
            retained,
            arena.len(),
            arena.used(),
            arena.capacity()
        );

        let arena: &'a Arena<BhNode> = arena;
        let root_node = arena.get(root)?;
        Ok(BhTree {
            arena,
            root,
            root_node,
            retained,
            dropped,
        })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The root node. Always present for a built tree.
    pub fn root_node(&self) -> &'a BhNode {
        self.root_node
    }

    /// Looks up a node. Handles from other arena generations are rejected.
    pub fn node(&self, id: NodeId) -> Result<&'a BhNode, PhysicsError> {
        self.arena.get(id)
    }

    pub(crate) fn resolve(&self, id: NodeId) -> Option<&'a BhNode> {
        self.arena.get(id).ok()
    }

    pub fn bounds(&self) -> Bounds2D {
        self.root_node().bounds
    }

    /// Number of bodies reachable from the root.
    pub fn retained_count(&self) -> usize {
        self.retained
    }

    /// Number of bodies that fell outside the domain.
    pub fn dropped_count(&self) -> usize {
        self.dropped
    }

    /// Runs `visitor` over the whole tree.
    pub fn walk<V: NodeVisitor>(&self, visitor: &mut V) {
        self.walk_from(self.root, visitor);
    }

    /// Runs `visitor` over the subtree rooted at `start`: the node hook, the
    /// node's direct bodies, each present child in quadrant order, then the
    /// closing hook.
    pub fn walk_from<V: NodeVisitor>(&self, start: NodeId, visitor: &mut V) {
        let Some(node) = self.resolve(start) else {
            return;
        };
        if !visitor.enter_node(node) {
            return;
        }
        for index in node.direct_bodies() {
            visitor.visit_body(index);
        }
        for &child in node.children.iter().flatten() {
            self.walk_from(child, visitor);
        }
        visitor.leave_node(node);
    }

    /// Calls `f` with the index of every body in the tree.
    pub fn for_each_body<F: FnMut(usize)>(&self, f: F) {
        self.walk(&mut BodyVisitor(f));
    }

    pub fn body_indices(&self) -> Vec<usize> {
        let mut indices = Vec::with_capacity(self.retained);
        self.collect_subtree_bodies(self.root, &mut indices);
        indices
    }

    /// Clears `out` and fills it with every body index below `node`.
    pub fn collect_subtree_bodies(&self, node: NodeId, out: &mut Vec<usize>) {
        out.clear();
        self.walk_from(node, &mut BodyVisitor(|index| out.push(index)));
    }

    /// Calls `f` on every node, parents before children. Used for debug
    /// drawing of node rectangles and centers of mass.
    pub fn visit_nodes<F: FnMut(&BhNode)>(&self, mut f: F) {
        self.walk(&mut NodeFn(|node: &BhNode| {
            f(node);
            true
        }));
    }

    /// The deepest node whose bounds contain all four corners of `bbox`.
    ///
    /// Falls back to the root when the box is not inside the domain. Bodies
    /// stored in sibling subtrees are not reachable from the result, which
    /// is how locality-limited collision search trades accuracy for speed.
    pub fn least_bounding_node(&self, bbox: &Bounds2D) -> NodeId {
        let mut current = self.root;
        while let Some(node) = self.resolve(current) {
            if node.is_bucket() {
                break;
            }
            let next = node.children.iter().flatten().copied().find(|&child| {
                self.resolve(child)
                    .is_some_and(|child| child.bounds.contains_box(bbox))
            });
            match next {
                Some(child) => current = child,
                None => break,
            }
        }
        current
    }

    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats::default();
        self.visit_nodes(|node| {
            stats.node_count += 1;
            stats.max_depth = stats.max_depth.max(node.depth);
            stats.body_count += node.direct_body_count();
        });
        stats
    }
}
