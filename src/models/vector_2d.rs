use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use approx::{AbsDiffEq, RelativeEq};

pub trait FromCoordinates<T> {
    /// Creates a new instance of the struct from the given coordinates.
    /// # Example
    /// ```
    /// use rs_bhsim::models::{FromCoordinates, Vector2};
    ///
    /// let v = Vector2::from_coord((1.0, 2.0));
    /// assert_eq!(v.x, 1.0);
    /// assert_eq!(v.y, 2.0);
    /// ```
    fn from_coord(position: T) -> Self;
}

pub trait ToCoordinates<T> {
    /// Converts the struct to a tuple of coordinates.
    /// # Example
    /// ```
    /// use rs_bhsim::models::{ToCoordinates, Vector2};
    ///
    /// let v = Vector2::new(1.0, 2.0);
    /// assert_eq!(v.to_coord(), (1.0, 2.0));
    /// ```
    fn to_coord(&self) -> T;
}

/// A 2D vector value type. Every operation returns a new value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub const ZERO: Vector2 = Vector2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Vector2 { x, y }
    }

    /// Dot product of two vectors.
    /// # Example
    /// ```
    /// use rs_bhsim::models::Vector2;
    /// assert_eq!(Vector2::new(1.0, 2.0).dot(Vector2::new(3.0, 4.0)), 11.0);
    /// ```
    pub fn dot(self, other: Vector2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn magnitude_squared(self) -> f64 {
        self.dot(self)
    }

    /// Euclidean length.
    /// # Example
    /// ```
    /// use rs_bhsim::models::Vector2;
    /// assert_eq!(Vector2::new(3.0, 4.0).magnitude(), 5.0);
    /// ```
    pub fn magnitude(self) -> f64 {
        self.magnitude_squared().sqrt()
    }

    pub fn scale(self, factor: f64) -> Vector2 {
        Vector2::new(self.x * factor, self.y * factor)
    }

    /// Returns the unit vector pointing the same way, or `None` for the zero vector.
    /// # Example
    /// ```
    /// use rs_bhsim::models::Vector2;
    ///
    /// let n = Vector2::new(0.0, 2.0).try_normalize().unwrap();
    /// assert_eq!(n, Vector2::new(0.0, 1.0));
    /// assert!(Vector2::ZERO.try_normalize().is_none());
    /// ```
    pub fn try_normalize(self) -> Option<Vector2> {
        let mag = self.magnitude();
        if mag == 0.0 || !mag.is_finite() {
            return None;
        }
        Some(self.scale(1.0 / mag))
    }

    /// Unit vector, with the zero vector mapping to itself.
    pub fn normalize(self) -> Vector2 {
        self.try_normalize().unwrap_or(Vector2::ZERO)
    }

    /// Projection of `self` onto `onto`. Projecting onto the zero vector yields zero.
    /// # Example
    /// ```
    /// use rs_bhsim::models::Vector2;
    ///
    /// let p = Vector2::new(2.0, 3.0).project_onto(Vector2::new(5.0, 0.0));
    /// assert_eq!(p, Vector2::new(2.0, 0.0));
    /// ```
    pub fn project_onto(self, onto: Vector2) -> Vector2 {
        let denom = onto.magnitude_squared();
        if denom == 0.0 {
            return Vector2::ZERO;
        }
        onto.scale(self.dot(onto) / denom)
    }

    pub fn distance_to(self, other: Vector2) -> f64 {
        (other - self).magnitude()
    }
}

impl Add for Vector2 {
    type Output = Vector2;

    fn add(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, rhs: Vector2) {
        *self = *self + rhs;
    }
}

impl Sub for Vector2 {
    type Output = Vector2;

    fn sub(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vector2 {
    fn sub_assign(&mut self, rhs: Vector2) {
        *self = *self - rhs;
    }
}

impl Mul<f64> for Vector2 {
    type Output = Vector2;

    fn mul(self, rhs: f64) -> Vector2 {
        self.scale(rhs)
    }
}

impl Mul<Vector2> for f64 {
    type Output = Vector2;

    fn mul(self, rhs: Vector2) -> Vector2 {
        rhs.scale(self)
    }
}

impl Neg for Vector2 {
    type Output = Vector2;

    fn neg(self) -> Vector2 {
        Vector2::new(-self.x, -self.y)
    }
}

impl FromCoordinates<(f64, f64)> for Vector2 {
    fn from_coord(position: (f64, f64)) -> Self {
        Vector2::new(position.0, position.1)
    }
}

impl ToCoordinates<(f64, f64)> for Vector2 {
    fn to_coord(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

impl AbsDiffEq for Vector2 {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon) && self.y.abs_diff_eq(&other.y, epsilon)
    }
}

impl RelativeEq for Vector2 {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
    }
}
