// src/utils/constants_config.rs
use crate::utils::{DEFAULT_SIMULATION_CONSTANTS, PhysicsError};

/// How pairwise gravity is accumulated over the tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GravityMode {
    /// Every retained pair interacts once, symmetrically.
    Exact,
    /// Distant nodes act through their aggregate mass at their center of mass
    /// when `node_width / distance < theta`.
    BarnesHut,
}

/// What happens to a body reaching the edge of the simulation domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundaryMode {
    /// Perfectly elastic wall: the circle is clamped inside the wall and the
    /// violated velocity component is pointed back into the domain.
    Reflect,
    /// The domain wraps around on both axes.
    Toroidal,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConstants {
    pub gravitational_constant: f64,
    /// Coefficient of restitution for impulsive collisions, in `[0, 1]`.
    pub restitution: f64,
    /// Added as `softening^2` to every squared separation in gravity. Zero keeps
    /// the unguarded inverse-square law.
    pub softening: f64,
    /// Barnes-Hut opening angle.
    pub theta: f64,
    /// Byte budget of the per-tick node arena.
    pub arena_capacity: usize,
    pub gravity_mode: GravityMode,
    pub boundary_mode: BoundaryMode,
}

impl Default for SimulationConstants {
    fn default() -> Self {
        DEFAULT_SIMULATION_CONSTANTS
    }
}

impl SimulationConstants {
    /// Builds a set of constants, taking defaults for anything left as `None`.
    ///
    /// # Example
    /// ```
    /// use rs_bhsim::utils::SimulationConstants;
    ///
    /// let constants = SimulationConstants::new(Some(1.0), Some(0.9), None, None, None);
    /// assert_eq!(constants.gravitational_constant, 1.0);
    /// assert_eq!(constants.restitution, 0.9);
    /// assert_eq!(constants.softening, 0.0);
    /// ```
    pub fn new(
        gravitational_constant: Option<f64>,
        restitution: Option<f64>,
        softening: Option<f64>,
        theta: Option<f64>,
        arena_capacity: Option<usize>,
    ) -> Self {
        let default = DEFAULT_SIMULATION_CONSTANTS;
        Self {
            gravitational_constant: gravitational_constant.unwrap_or(default.gravitational_constant),
            restitution: restitution.unwrap_or(default.restitution),
            softening: softening.unwrap_or(default.softening),
            theta: theta.unwrap_or(default.theta),
            arena_capacity: arena_capacity.unwrap_or(default.arena_capacity),
            gravity_mode: default.gravity_mode,
            boundary_mode: default.boundary_mode,
        }
    }

    pub fn with_gravity_mode(mut self, mode: GravityMode) -> Self {
        self.gravity_mode = mode;
        self
    }

    pub fn with_boundary_mode(mut self, mode: BoundaryMode) -> Self {
        self.boundary_mode = mode;
        self
    }

    pub fn validate(&self) -> Result<(), PhysicsError> {
        if !self.gravitational_constant.is_finite() || self.gravitational_constant < 0.0 {
            return Err(PhysicsError::InvalidCoefficient);
        }
        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(PhysicsError::InvalidCoefficient);
        }
        if !self.softening.is_finite() || self.softening < 0.0 {
            return Err(PhysicsError::InvalidCoefficient);
        }
        if !self.theta.is_finite() || self.theta < 0.0 {
            return Err(PhysicsError::InvalidCoefficient);
        }
        if self.arena_capacity == 0 {
            return Err(PhysicsError::InvalidCapacity);
        }
        Ok(())
    }
}
