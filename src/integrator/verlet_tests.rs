use approx::assert_relative_eq;
use crate::arena::Arena;
use crate::integrator::{clear_forces, integrate, integrate_body, IntegrationPhase};
use crate::models::{Body, Bounds2D, Vector2};
use crate::tree::{BhNode, BhTree};

fn moving_body(x: f64, y: f64) -> Body {
    Body::new(Vector2::new(x, y), Vector2::new(2.0, -1.0), Vector2::new(0.0, 4.0), 1.0, 0).unwrap()
}

#[test]
fn test_position_phase_uses_velocity_and_acceleration() {
    let mut body = moving_body(10.0, 10.0);
    integrate_body(&mut body, 0.5, IntegrationPhase::Position);
    // 10 + 2*0.5, 10 - 0.5 + 0.5*4*0.25
    assert_relative_eq!(body.position, Vector2::new(11.0, 10.0));
    assert_eq!(body.velocity, Vector2::new(2.0, -1.0));
}

#[test]
fn test_velocity_phase_is_half_kick() {
    let mut body = moving_body(10.0, 10.0);
    integrate_body(&mut body, 0.5, IntegrationPhase::Velocity);
    assert_relative_eq!(body.velocity, Vector2::new(2.0, 0.0));
    assert_eq!(body.position, Vector2::new(10.0, 10.0));
}

#[test]
fn test_integrate_skips_bodies_outside_tree() {
    let mut bodies = vec![moving_body(10.0, 10.0), moving_body(150.0, 10.0)];
    let mut arena: Arena<BhNode> = Arena::create(64 * 1024).unwrap();
    let tree = BhTree::build(&mut arena, &bodies, Bounds2D::from_size(100.0, 100.0)).unwrap();

    integrate(&tree, &mut bodies, 1.0, IntegrationPhase::Position);
    assert_relative_eq!(bodies[0].position, Vector2::new(12.0, 11.0));
    assert_eq!(bodies[1].position, Vector2::new(150.0, 10.0));
}

#[test]
fn test_clear_forces() {
    let mut bodies = vec![moving_body(10.0, 10.0), moving_body(60.0, 60.0)];
    let mut arena: Arena<BhNode> = Arena::create(64 * 1024).unwrap();
    let tree = BhTree::build(&mut arena, &bodies, Bounds2D::from_size(100.0, 100.0)).unwrap();

    clear_forces(&tree, &mut bodies);
    assert!(bodies.iter().all(|b| b.acceleration == Vector2::ZERO));
}
