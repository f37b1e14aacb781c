use std::fmt;
use std::error::Error;

/// Represents errors that can occur while building or stepping a simulation.
#[derive(Debug, Clone, PartialEq)]
pub enum PhysicsError {
    /// Indicates an invalid mass value (e.g., negative or zero mass).
    InvalidMass,
    /// Indicates an invalid radius for a bound geometry.
    InvalidRadius,
    /// Indicates an invalid time step (non-positive or not finite).
    InvalidTimeStep,
    /// Indicates an invalid coefficient value (e.g., restitution outside [0, 1]).
    InvalidCoefficient,
    /// Indicates a simulation domain whose max corner is not strictly above its min corner.
    InvalidDomain,
    /// Indicates an arena capacity too small to hold a single allocation.
    InvalidCapacity,
    /// A tree build was requested against an arena that still holds a previous generation.
    ArenaNotReset { used: usize },
    /// A non-fatal allocation probe found the arena out of room.
    ArenaExhausted { requested: usize, used: usize, capacity: usize },
    /// A node handle from an earlier arena generation was dereferenced.
    StaleHandle { handle_generation: u32, arena_generation: u32 },
    /// A general error for calculations that produce invalid results.
    CalculationError(String),
}

impl fmt::Display for PhysicsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PhysicsError::InvalidMass => write!(f, "Invalid mass value"),
            PhysicsError::InvalidRadius => write!(f, "Invalid radius value"),
            PhysicsError::InvalidTimeStep => write!(f, "Invalid time step"),
            PhysicsError::InvalidCoefficient => write!(f, "Invalid coefficient value"),
            PhysicsError::InvalidDomain => write!(f, "Invalid simulation domain"),
            PhysicsError::InvalidCapacity => write!(f, "Invalid arena capacity"),
            PhysicsError::ArenaNotReset { used } => {
                write!(f, "Arena must be reset before building a tree ({} bytes in use)", used)
            }
            PhysicsError::ArenaExhausted { requested, used, capacity } => write!(
                f,
                "Arena exhausted: requested {} bytes with {} of {} in use",
                requested, used, capacity
            ),
            PhysicsError::StaleHandle { handle_generation, arena_generation } => write!(
                f,
                "Stale node handle: generation {} used against arena generation {}",
                handle_generation, arena_generation
            ),
            PhysicsError::CalculationError(msg) => write!(f, "Calculation error: {}", msg),
        }
    }
}

impl Error for PhysicsError {}
