use crate::errors::PhysicsError;
use crate::models::{Bounds2D, Vector2};

/// Packed `0xRRGGBBAA` color, read only by renderers.
pub type Rgba = u32;

/// Collision geometry bound to a body.
///
/// The tree and the resolvers only ever ask for a bounding radius, so new
/// shapes can be added here without touching them.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Geometry {
    #[default]
    None,
    Circle { radius: f64 },
}

impl Geometry {
    /// Radius of the smallest circle around the body's position enclosing the shape.
    pub fn bounding_radius(&self) -> f64 {
        match *self {
            Geometry::None => 0.0,
            Geometry::Circle { radius } => radius,
        }
    }
}

/// A simulated point mass.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub position: Vector2,
    pub velocity: Vector2,
    pub acceleration: Vector2,
    pub mass: f64,
    pub color: Rgba,
    pub geometry: Geometry,
}

impl Body {
    /// Creates a body with no geometry bound. Collision geometry is attached
    /// afterwards with [`Body::bind_geometry`].
    ///
    /// # Errors
    ///
    /// Returns `PhysicsError::InvalidMass` if `mass` is not a positive finite number.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_bhsim::models::{Body, Geometry, Vector2};
    ///
    /// let mut body = Body::new(
    ///     Vector2::new(10.0, 10.0),
    ///     Vector2::new(1.0, 0.0),
    ///     Vector2::ZERO,
    ///     2.0,
    ///     0xFF0000FF,
    /// ).expect("valid body");
    /// assert_eq!(body.geometry, Geometry::None);
    ///
    /// body.bind_geometry(Geometry::Circle { radius: 5.0 }).expect("valid radius");
    /// assert_eq!(body.radius(), 5.0);
    /// ```
    pub fn new(
        position: Vector2,
        velocity: Vector2,
        acceleration: Vector2,
        mass: f64,
        color: Rgba,
    ) -> Result<Self, PhysicsError> {
        if mass <= 0.0 || !mass.is_finite() {
            return Err(PhysicsError::InvalidMass);
        }
        Ok(Body {
            position,
            velocity,
            acceleration,
            mass,
            color,
            geometry: Geometry::None,
        })
    }

    pub fn bind_geometry(&mut self, geometry: Geometry) -> Result<(), PhysicsError> {
        if let Geometry::Circle { radius } = geometry {
            if radius <= 0.0 || !radius.is_finite() {
                return Err(PhysicsError::InvalidRadius);
            }
        }
        self.geometry = geometry;
        Ok(())
    }

    /// Builder form of [`Body::bind_geometry`].
    pub fn with_geometry(mut self, geometry: Geometry) -> Result<Self, PhysicsError> {
        self.bind_geometry(geometry)?;
        Ok(self)
    }

    /// Bounding radius of the bound geometry, zero when none is bound.
    pub fn radius(&self) -> f64 {
        self.geometry.bounding_radius()
    }

    pub fn bounding_box(&self) -> Bounds2D {
        Bounds2D::around_circle(self.position, self.radius())
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.magnitude_squared()
    }

    pub fn momentum(&self) -> Vector2 {
        self.velocity.scale(self.mass)
    }
}

/// Mutable access to two distinct bodies of the same array.
///
/// Returns `None` when `i == j` or either index is out of range.
pub fn body_pair_mut(bodies: &mut [Body], i: usize, j: usize) -> Option<(&mut Body, &mut Body)> {
    if i == j || i >= bodies.len() || j >= bodies.len() {
        return None;
    }
    if i < j {
        let (head, tail) = bodies.split_at_mut(j);
        Some((&mut head[i], &mut tail[0]))
    } else {
        let (head, tail) = bodies.split_at_mut(i);
        Some((&mut tail[0], &mut head[j]))
    }
}
