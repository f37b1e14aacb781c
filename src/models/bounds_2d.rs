use crate::errors::PhysicsError;
use crate::models::Vector2;

/// One of the four quadrants of a rectangle, indexed `x_half + 2 * y_half`
/// with y growing upward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Quadrant {
    SouthWest = 0,
    SouthEast = 1,
    NorthWest = 2,
    NorthEast = 3,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::SouthWest,
        Quadrant::SouthEast,
        Quadrant::NorthWest,
        Quadrant::NorthEast,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Occupancy flag for this quadrant.
    pub fn bit(self) -> u8 {
        1 << self.index()
    }

    pub fn from_index(index: usize) -> Option<Quadrant> {
        Quadrant::ALL.get(index).copied()
    }
}

/// An axis-aligned rectangle given by its min and max corners.
///
/// Containment is half-open: `min <= p < max` on both axes, so a point on a
/// shared edge belongs to exactly one of the rectangles meeting there.
///
/// # Examples
///
/// ```
/// use rs_bhsim::models::{Bounds2D, Vector2};
///
/// let domain = Bounds2D::from_size(100.0, 100.0);
/// assert!(domain.contains(Vector2::new(0.0, 99.9)));
/// assert!(!domain.contains(Vector2::new(100.0, 50.0))); // right edge excluded
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds2D {
    pub min: Vector2,
    pub max: Vector2,
}

impl Bounds2D {
    pub fn new(min: Vector2, max: Vector2) -> Self {
        Bounds2D { min, max }
    }

    /// Rectangle spanning `[0, width) x [0, height)`, e.g. a viewport.
    pub fn from_size(width: f64, height: f64) -> Self {
        Bounds2D::new(Vector2::ZERO, Vector2::new(width, height))
    }

    /// Axis-aligned box enclosing a circle.
    pub fn around_circle(center: Vector2, radius: f64) -> Self {
        let r = Vector2::new(radius, radius);
        Bounds2D::new(center - r, center + r)
    }

    pub fn validate(&self) -> Result<(), PhysicsError> {
        let finite = [self.min.x, self.min.y, self.max.x, self.max.y]
            .iter()
            .all(|c| c.is_finite());
        if !finite || self.max.x <= self.min.x || self.max.y <= self.min.y {
            return Err(PhysicsError::InvalidDomain);
        }
        Ok(())
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn midpoint(&self) -> Vector2 {
        (self.min + self.max).scale(0.5)
    }

    pub fn contains(&self, p: Vector2) -> bool {
        p.x >= self.min.x && p.x < self.max.x && p.y >= self.min.y && p.y < self.max.y
    }

    /// True when all four corners of `other` lie inside `self`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_bhsim::models::{Bounds2D, Vector2};
    ///
    /// let outer = Bounds2D::from_size(10.0, 10.0);
    /// assert!(outer.contains_box(&Bounds2D::new(Vector2::new(1.0, 1.0), Vector2::new(2.0, 2.0))));
    /// assert!(!outer.contains_box(&Bounds2D::new(Vector2::new(9.0, 1.0), Vector2::new(11.0, 2.0))));
    /// ```
    pub fn contains_box(&self, other: &Bounds2D) -> bool {
        other.corners().iter().all(|&corner| self.contains(corner))
    }

    pub fn corners(&self) -> [Vector2; 4] {
        [
            self.min,
            Vector2::new(self.max.x, self.min.y),
            Vector2::new(self.min.x, self.max.y),
            self.max,
        ]
    }

    /// Quadrant of `p` by midpoint comparison, consistent with half-open containment:
    /// a coordinate equal to the midpoint falls in the upper half.
    ///
    /// Sending such a coordinate to the lower half instead would place the
    /// body in a child whose `[min, mid)` range excludes it, and the child
    /// insert would then drop it.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_bhsim::models::{Bounds2D, Quadrant, Vector2};
    ///
    /// let b = Bounds2D::from_size(100.0, 100.0);
    /// assert_eq!(b.quadrant_of(Vector2::new(10.0, 10.0)), Quadrant::SouthWest);
    /// assert_eq!(b.quadrant_of(Vector2::new(90.0, 10.0)), Quadrant::SouthEast);
    /// assert_eq!(b.quadrant_of(Vector2::new(10.0, 90.0)), Quadrant::NorthWest);
    /// assert_eq!(b.quadrant_of(Vector2::new(90.0, 90.0)), Quadrant::NorthEast);
    /// assert_eq!(b.quadrant_of(Vector2::new(50.0, 50.0)), Quadrant::NorthEast);
    /// ```
    pub fn quadrant_of(&self, p: Vector2) -> Quadrant {
        let mid = self.midpoint();
        let east = usize::from(p.x >= mid.x);
        let north = usize::from(p.y >= mid.y);
        match east + 2 * north {
            0 => Quadrant::SouthWest,
            1 => Quadrant::SouthEast,
            2 => Quadrant::NorthWest,
            _ => Quadrant::NorthEast,
        }
    }

    /// The sub-rectangle covering quadrant `q`.
    pub fn quadrant_bounds(&self, q: Quadrant) -> Bounds2D {
        let mid = self.midpoint();
        match q {
            Quadrant::SouthWest => Bounds2D::new(self.min, mid),
            Quadrant::SouthEast => Bounds2D::new(
                Vector2::new(mid.x, self.min.y),
                Vector2::new(self.max.x, mid.y),
            ),
            Quadrant::NorthWest => Bounds2D::new(
                Vector2::new(self.min.x, mid.y),
                Vector2::new(mid.x, self.max.y),
            ),
            Quadrant::NorthEast => Bounds2D::new(mid, self.max),
        }
    }
}
