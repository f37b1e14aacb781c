//! Velocity-Verlet integration split into two passes per tick.
//!
//! The position pass runs before forces are accumulated, the velocity pass
//! after, so each body's acceleration reflects the positions of the current
//! tick when its velocity is advanced.
use crate::models::{Body, Vector2};
use crate::tree::BhTree;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrationPhase {
    /// `position += velocity * dt + 0.5 * acceleration * dt^2`
    Position,
    /// `velocity += 0.5 * acceleration * dt`
    Velocity,
}

/// Advances one body by one phase.
///
/// # Examples
///
/// ```
/// use rs_bhsim::integrator::{integrate_body, IntegrationPhase};
/// use rs_bhsim::models::{Body, Vector2};
///
/// let mut body = Body::new(Vector2::ZERO, Vector2::new(1.0, 0.0), Vector2::new(0.0, 2.0), 1.0, 0).unwrap();
/// integrate_body(&mut body, 1.0, IntegrationPhase::Position);
/// assert_eq!(body.position, Vector2::new(1.0, 1.0));
/// integrate_body(&mut body, 1.0, IntegrationPhase::Velocity);
/// assert_eq!(body.velocity, Vector2::new(1.0, 1.0));
/// ```
pub fn integrate_body(body: &mut Body, dt: f64, phase: IntegrationPhase) {
    match phase {
        IntegrationPhase::Position => {
            body.position += body.velocity * dt + body.acceleration * (0.5 * dt * dt);
        }
        IntegrationPhase::Velocity => {
            body.velocity += body.acceleration * (0.5 * dt);
        }
    }
}

/// Advances every body reachable from the tree by one phase. Bodies dropped
/// from the tree are left untouched.
pub fn integrate(tree: &BhTree, bodies: &mut [Body], dt: f64, phase: IntegrationPhase) {
    tree.for_each_body(|index| integrate_body(&mut bodies[index], dt, phase));
}

/// Zeroes the acceleration of every body reachable from the tree.
pub fn clear_forces(tree: &BhTree, bodies: &mut [Body]) {
    tree.for_each_body(|index| bodies[index].acceleration = Vector2::ZERO);
}
