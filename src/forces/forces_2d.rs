//! Gravitational forces accumulated into body accelerations.
//!
//! All functions add to `Body::acceleration`; clearing it is the caller's
//! job once per tick. With zero softening the inverse-square law is left
//! unguarded: two coincident bodies produce non-finite accelerations.
use crate::models::{body_pair_mut, Body, Vector2};
use crate::tree::{BhTree, NodeId};
use crate::utils::{GravityMode, SimulationConstants};

/// A fixed attractor that pulls bodies but is not moved by them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sink {
    pub position: Vector2,
    pub mass: f64,
}

/// A mass lumped at a point, either a single body or a whole subtree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApproxNode {
    pub mass: f64,
    pub center_of_mass: Vector2,
}

/// Acceleration per unit of attracting mass felt at `at` from `toward`:
/// `g * d / (|d|^2 + softening^2)^(3/2)` with `d = toward - at`.
fn pull(at: Vector2, toward: Vector2, g: f64, softening: f64) -> Vector2 {
    let d = toward - at;
    let dist_sq = d.magnitude_squared() + softening * softening;
    d * (g / (dist_sq * dist_sq.sqrt()))
}

/// Force exerted on body `a` by body `b`. The force on `b` is its negation.
///
/// # Examples
///
/// ```
/// use rs_bhsim::forces::gravity_force;
/// use rs_bhsim::models::Vector2;
///
/// let f = gravity_force(Vector2::ZERO, 2.0, Vector2::new(2.0, 0.0), 3.0, 1.0, 0.0);
/// assert_eq!(f, Vector2::new(1.5, 0.0));
/// ```
pub fn gravity_force(
    position_a: Vector2,
    mass_a: f64,
    position_b: Vector2,
    mass_b: f64,
    g: f64,
    softening: f64,
) -> Vector2 {
    pull(position_a, position_b, g, softening) * (mass_a * mass_b)
}

/// Applies mutual gravity to a pair: equal and opposite forces, each turned
/// into acceleration by the body's own mass.
pub fn pairwise_gravity(a: &mut Body, b: &mut Body, g: f64, softening: f64) {
    let force = gravity_force(a.position, a.mass, b.position, b.mass, g, softening);
    a.acceleration += force * (1.0 / a.mass);
    b.acceleration -= force * (1.0 / b.mass);
}

/// Applies gravity between the bodies held by the tree, in the mode chosen
/// by `constants.gravity_mode`.
pub fn apply_gravity(tree: &BhTree, bodies: &mut [Body], constants: &SimulationConstants) {
    let g = constants.gravitational_constant;
    let softening = constants.softening;
    match constants.gravity_mode {
        GravityMode::Exact => {
            let indices = tree.body_indices();
            for (n, &i) in indices.iter().enumerate() {
                for &j in &indices[n + 1..] {
                    if let Some((a, b)) = body_pair_mut(bodies, i, j) {
                        pairwise_gravity(a, b, g, softening);
                    }
                }
            }
        }
        GravityMode::BarnesHut => {
            let indices = tree.body_indices();
            let mut worklist = Vec::new();
            let accelerations: Vec<(usize, Vector2)> = indices
                .iter()
                .map(|&i| {
                    worklist.clear();
                    collect_approx_nodes(tree, tree.root(), bodies, i, constants.theta, &mut worklist);
                    (i, approx_acceleration(bodies[i].position, &worklist, g, softening))
                })
                .collect();
            for (i, acceleration) in accelerations {
                bodies[i].acceleration += acceleration;
            }
        }
    }
}

/// Collects the point masses body `index` interacts with under the opening
/// criterion `node_width / distance < theta`.
///
/// A node containing the body is always opened, so the body never attracts
/// itself through an aggregate.
pub fn collect_approx_nodes(
    tree: &BhTree,
    node: NodeId,
    bodies: &[Body],
    index: usize,
    theta: f64,
    worklist: &mut Vec<ApproxNode>,
) {
    let Ok(current) = tree.node(node) else {
        return;
    };
    if current.total_mass <= 0.0 {
        return;
    }
    let position = bodies[index].position;
    if !current.bounds.contains(position) {
        let distance = current.center_of_mass.distance_to(position);
        let width = current.bounds.width().max(current.bounds.height());
        if width < theta * distance {
            worklist.push(ApproxNode {
                mass: current.total_mass,
                center_of_mass: current.center_of_mass,
            });
            return;
        }
    }
    for other in current.direct_bodies().filter(|&other| other != index) {
        worklist.push(ApproxNode {
            mass: bodies[other].mass,
            center_of_mass: bodies[other].position,
        });
    }
    for &child in current.children.iter().flatten() {
        collect_approx_nodes(tree, child, bodies, index, theta, worklist);
    }
}

/// Acceleration at `position` from a worklist of point masses.
pub fn approx_acceleration(position: Vector2, worklist: &[ApproxNode], g: f64, softening: f64) -> Vector2 {
    worklist.iter().fold(Vector2::ZERO, |acc, node| {
        acc + pull(position, node.center_of_mass, g, softening) * node.mass
    })
}

/// Pulls every body held by the tree toward `sink`.
pub fn apply_sink_force(tree: &BhTree, bodies: &mut [Body], sink: &Sink, g: f64, softening: f64) {
    tree.for_each_body(|index| {
        let body = &mut bodies[index];
        body.acceleration += pull(body.position, sink.position, g, softening) * sink.mass;
    });
}
