//! Seeded body layouts for tests, benches and demos.
use std::f64::consts::PI;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use crate::errors::PhysicsError;
use crate::models::{Body, Bounds2D, Geometry, Rgba, Vector2};

fn random_color(rng: &mut StdRng) -> Rgba {
    rng.random::<u32>() | 0xFF
}

fn geometry_for(radius: f64) -> Geometry {
    if radius > 0.0 {
        Geometry::Circle { radius }
    } else {
        Geometry::None
    }
}

/// `count` bodies spread uniformly over `domain`, with masses in `[1, 10)`,
/// speeds in `[0, max_speed)` in random directions, and circle geometry of
/// `radius` (no geometry when `radius` is zero). The same seed always yields
/// the same bodies.
///
/// # Errors
///
/// Returns `PhysicsError::InvalidDomain` for a degenerate domain and
/// `PhysicsError::InvalidRadius` for a negative radius.
///
/// # Examples
///
/// ```
/// use rs_bhsim::models::Bounds2D;
/// use rs_bhsim::simulation::random_cloud;
///
/// let domain = Bounds2D::from_size(100.0, 100.0);
/// let a = random_cloud(42, 10, &domain, 1.0, 0.5).unwrap();
/// let b = random_cloud(42, 10, &domain, 1.0, 0.5).unwrap();
/// assert_eq!(a, b);
/// assert!(a.iter().all(|body| domain.contains(body.position)));
/// ```
pub fn random_cloud(
    seed: u64,
    count: usize,
    domain: &Bounds2D,
    max_speed: f64,
    radius: f64,
) -> Result<Vec<Body>, PhysicsError> {
    domain.validate()?;
    if radius < 0.0 || !radius.is_finite() {
        return Err(PhysicsError::InvalidRadius);
    }
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let position = Vector2::new(
                rng.random_range(domain.min.x..domain.max.x),
                rng.random_range(domain.min.y..domain.max.y),
            );
            let angle = 2.0 * PI * rng.random::<f64>();
            let speed = max_speed * rng.random::<f64>();
            let velocity = Vector2::new(angle.cos(), angle.sin()) * speed;
            let mass = 1.0 + 9.0 * rng.random::<f64>();
            Body::new(position, velocity, Vector2::ZERO, mass, random_color(&mut rng))?
                .with_geometry(geometry_for(radius))
        })
        .collect()
}

/// One resting body at the center of each quadrant of `domain`'s outer ring:
/// at 10% and 90% of the width and height, in SW, SE, NW, NE order.
pub fn quadrant_layout(domain: &Bounds2D, mass: f64, radius: f64) -> Result<Vec<Body>, PhysicsError> {
    domain.validate()?;
    let at = |fx: f64, fy: f64| {
        Vector2::new(domain.min.x + fx * domain.width(), domain.min.y + fy * domain.height())
    };
    [(0.1, 0.1), (0.9, 0.1), (0.1, 0.9), (0.9, 0.9)]
        .iter()
        .map(|&(fx, fy)| {
            Body::new(at(fx, fy), Vector2::ZERO, Vector2::ZERO, mass, 0xFFFFFFFF)?
                .with_geometry(geometry_for(radius))
        })
        .collect()
}

/// A disk of `count` light bodies around a heavy central body, each given
/// the circular orbital speed `sqrt(g * central_mass / r)` around the center.
/// The central body is the first element.
pub fn orbiting_disk(
    seed: u64,
    count: usize,
    center: Vector2,
    disk_radius: f64,
    central_mass: f64,
    g: f64,
) -> Result<Vec<Body>, PhysicsError> {
    if disk_radius <= 0.0 || !disk_radius.is_finite() {
        return Err(PhysicsError::InvalidRadius);
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let mut bodies = Vec::with_capacity(count + 1);
    bodies.push(Body::new(center, Vector2::ZERO, Vector2::ZERO, central_mass, 0xFFFF00FF)?);
    for _ in 0..count {
        // keep bodies off the center itself
        let r = disk_radius * (0.1 + 0.9 * rng.random::<f64>().sqrt());
        let angle = 2.0 * PI * rng.random::<f64>();
        let offset = Vector2::new(angle.cos(), angle.sin()) * r;
        let speed = (g * central_mass / r).sqrt();
        let velocity = Vector2::new(-angle.sin(), angle.cos()) * speed;
        let mass = 0.1 + 0.9 * rng.random::<f64>();
        bodies.push(Body::new(center + offset, velocity, Vector2::ZERO, mass, random_color(&mut rng))?);
    }
    Ok(bodies)
}
