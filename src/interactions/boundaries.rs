use crate::models::{Body, Bounds2D};
use crate::tree::BhTree;
use crate::utils::BoundaryMode;

/// Largest float strictly below `value`.
fn just_below(value: f64) -> f64 {
    if value > 0.0 {
        f64::from_bits(value.to_bits() - 1)
    } else if value < 0.0 {
        f64::from_bits(value.to_bits() + 1)
    } else {
        -f64::from_bits(1)
    }
}

/// Keeps one body inside `domain`.
///
/// `Reflect` treats the domain edges as perfectly elastic walls: when the
/// body's circle touches or crosses an edge, the position is clamped so the
/// circle rests against it and the velocity component on that axis is
/// pointed back inside. `Toroidal` wraps the position and keeps the velocity.
///
/// # Examples
///
/// ```
/// use rs_bhsim::interactions::apply_boundary;
/// use rs_bhsim::models::{Body, Bounds2D, Geometry, Vector2};
/// use rs_bhsim::utils::BoundaryMode;
///
/// let mut body = Body::new(Vector2::new(-1.0, 50.0), Vector2::new(-10.0, 0.0), Vector2::ZERO, 1.0, 0)
///     .unwrap()
///     .with_geometry(Geometry::Circle { radius: 5.0 })
///     .unwrap();
/// apply_boundary(&mut body, &Bounds2D::from_size(100.0, 100.0), BoundaryMode::Reflect);
/// assert_eq!(body.position.x, 5.0);
/// assert_eq!(body.velocity.x, 10.0);
/// ```
pub fn apply_boundary(body: &mut Body, domain: &Bounds2D, mode: BoundaryMode) {
    match mode {
        BoundaryMode::Reflect => {
            let r = body.radius();
            let (x, vx) = reflect_axis(body.position.x, body.velocity.x, r, domain.min.x, domain.max.x);
            let (y, vy) = reflect_axis(body.position.y, body.velocity.y, r, domain.min.y, domain.max.y);
            body.position.x = x;
            body.position.y = y;
            body.velocity.x = vx;
            body.velocity.y = vy;
        }
        BoundaryMode::Toroidal => {
            body.position.x = wrap_axis(body.position.x, domain.min.x, domain.max.x);
            body.position.y = wrap_axis(body.position.y, domain.min.y, domain.max.y);
        }
    }
}

fn reflect_axis(position: f64, velocity: f64, radius: f64, min: f64, max: f64) -> (f64, f64) {
    if position - radius <= min {
        (min + radius, velocity.abs())
    } else if position + radius >= max {
        let clamped = max - radius;
        // the upper edge itself is outside the half-open domain
        let clamped = if clamped < max { clamped } else { just_below(max) };
        (clamped, -velocity.abs())
    } else {
        (position, velocity)
    }
}

fn wrap_axis(position: f64, min: f64, max: f64) -> f64 {
    let span = max - min;
    let offset = (position - min).rem_euclid(span);
    if offset >= span {
        min
    } else {
        min + offset
    }
}

/// Applies [`apply_boundary`] to every body held by the tree.
pub fn apply_boundaries(tree: &BhTree, bodies: &mut [Body], domain: &Bounds2D, mode: BoundaryMode) {
    tree.for_each_body(|index| apply_boundary(&mut bodies[index], domain, mode));
}
