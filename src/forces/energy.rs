use crate::models::{Body, Vector2};

/// Total kinetic energy `sum(0.5 * m * v^2)`.
pub fn kinetic_energy(bodies: &[Body]) -> f64 {
    bodies.iter().map(Body::kinetic_energy).sum()
}

/// Total gravitational potential energy `-sum(g * m_i * m_j / r_ij)` over
/// distinct pairs. Coincident pairs are skipped.
pub fn potential_energy(bodies: &[Body], g: f64) -> f64 {
    let mut energy = 0.0;
    for (i, a) in bodies.iter().enumerate() {
        for b in &bodies[i + 1..] {
            let r = a.position.distance_to(b.position);
            if r > 0.0 {
                energy -= g * a.mass * b.mass / r;
            }
        }
    }
    energy
}

pub fn total_energy(bodies: &[Body], g: f64) -> f64 {
    kinetic_energy(bodies) + potential_energy(bodies, g)
}

/// Total linear momentum `sum(m * v)`.
pub fn total_momentum(bodies: &[Body]) -> Vector2 {
    bodies.iter().fold(Vector2::ZERO, |acc, body| acc + body.momentum())
}
