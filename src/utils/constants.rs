use crate::utils::{BoundaryMode, GravityMode, SimulationConstants};

/// Deepest level at which a tree node is still split into quadrants. Below it
/// nodes hold bodies in any free slot and chain overflow into a same-bounds child.
pub const MAX_TREE_DEPTH: usize = 48;

pub const DEFAULT_SIMULATION_CONSTANTS: SimulationConstants = SimulationConstants {
    gravitational_constant: 0.9,
    restitution: 0.33,
    softening: 0.0,
    theta: 0.5,
    arena_capacity: 8 * 1024 * 1024,
    gravity_mode: GravityMode::Exact,
    boundary_mode: BoundaryMode::Reflect,
};
