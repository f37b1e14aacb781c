//! Discrete-step collision response between circles.
use log::trace;
use crate::models::{body_pair_mut, Body, Geometry, Vector2};
use crate::tree::BhTree;

/// Resolves an overlap between two circle bodies.
///
/// When the circles overlap, an impulse along the contact normal with
/// coefficient of restitution `restitution` is applied if the bodies are
/// approaching, then both bodies are pushed apart along the normal so the
/// overlap is removed, each moving in proportion to its inverse mass.
///
/// Returns `true` when the bodies overlapped. Bodies without circle geometry
/// never collide.
///
/// # Examples
///
/// ```
/// use rs_bhsim::interactions::pairwise_impulsive_collision;
/// use rs_bhsim::models::{Body, Geometry, Vector2};
///
/// let circle = Geometry::Circle { radius: 1.0 };
/// let mut a = Body::new(Vector2::new(0.0, 0.0), Vector2::new(1.0, 0.0), Vector2::ZERO, 1.0, 0)
///     .unwrap().with_geometry(circle).unwrap();
/// let mut b = Body::new(Vector2::new(1.5, 0.0), Vector2::new(-1.0, 0.0), Vector2::ZERO, 1.0, 0)
///     .unwrap().with_geometry(circle).unwrap();
///
/// assert!(pairwise_impulsive_collision(&mut a, &mut b, 1.0));
/// assert_eq!(a.velocity, Vector2::new(-1.0, 0.0));
/// assert_eq!(b.velocity, Vector2::new(1.0, 0.0));
/// assert_eq!(b.position.x - a.position.x, 2.0);
/// ```
pub fn pairwise_impulsive_collision(a: &mut Body, b: &mut Body, restitution: f64) -> bool {
    let (Geometry::Circle { radius: ra }, Geometry::Circle { radius: rb }) = (a.geometry, b.geometry) else {
        return false;
    };
    let diff = b.position - a.position;
    let overlap = ra + rb - diff.magnitude();
    if overlap <= 0.0 {
        return false;
    }
    // coincident centers have no direction, push apart along +x
    let normal = diff.try_normalize().unwrap_or(Vector2::new(1.0, 0.0));
    let inv_a = 1.0 / a.mass;
    let inv_b = 1.0 / b.mass;
    let inv_sum = inv_a + inv_b;

    let approach = (b.velocity - a.velocity).dot(normal);
    if approach < 0.0 {
        let impulse = -(1.0 + restitution) * approach / inv_sum;
        a.velocity -= normal * (impulse * inv_a);
        b.velocity += normal * (impulse * inv_b);
    }

    a.position -= normal * (overlap * inv_a / inv_sum);
    b.position += normal * (overlap * inv_b / inv_sum);
    true
}

/// Resolves collisions for every circle body held by the tree.
///
/// Candidates for a body are the bodies below the least bounding node of its
/// bounding box in the tree built at the start of the tick. Positions moved
/// by earlier corrections in the same pass are not re-inserted, so a body
/// pushed into a sibling node can miss a partner there until the next tick.
/// `candidates` is scratch space reused between calls.
///
/// Returns the number of overlapping pairs resolved.
pub fn resolve_collisions(
    tree: &BhTree,
    bodies: &mut [Body],
    restitution: f64,
    candidates: &mut Vec<usize>,
) -> usize {
    let mut contacts = 0;
    for i in tree.body_indices() {
        if !matches!(bodies[i].geometry, Geometry::Circle { .. }) {
            continue;
        }
        let node = tree.least_bounding_node(&bodies[i].bounding_box());
        tree.collect_subtree_bodies(node, candidates);
        for &j in candidates.iter() {
            if let Some((a, b)) = body_pair_mut(bodies, i, j) {
                if pairwise_impulsive_collision(a, b, restitution) {
                    trace!("contact between bodies {} and {}", i, j);
                    contacts += 1;
                }
            }
        }
    }
    contacts
}
