//! The per-tick driver tying the arena, the tree, and the force layers together.
//!
//! A [`Simulation`] owns the body array, the simulation domain and one node
//! arena. Every call to [`Simulation::step`] rebuilds the tree from the
//! current bodies and runs the stages of [`TickStage::ORDER`] once. Wall
//! clock time is the caller's concern: `dt` is always the fixed physics step.
//!
//! # Example
//!
//! ```
//! use rs_bhsim::models::Bounds2D;
//! use rs_bhsim::simulation::{quadrant_layout, Simulation};
//! use rs_bhsim::utils::SimulationConstants;
//!
//! let domain = Bounds2D::from_size(100.0, 100.0);
//! let bodies = quadrant_layout(&domain, 1.0, 2.0).unwrap();
//! let mut sim = Simulation::new(bodies, domain, SimulationConstants::default()).unwrap();
//!
//! let report = sim.step(1.0 / 60.0).unwrap();
//! assert_eq!(report.retained, 4);
//! assert_eq!(sim.ticks(), 1);
//! ```
use log::{debug, trace};
use crate::arena::Arena;
use crate::errors::PhysicsError;
use crate::forces::{apply_gravity, apply_sink_force, kinetic_energy, potential_energy, total_momentum, Sink};
use crate::integrator::{clear_forces, integrate, IntegrationPhase};
use crate::interactions::{apply_boundaries, resolve_collisions};
use crate::models::{Body, Bounds2D, Vector2};
use crate::tree::{BhNode, BhTree};
use crate::utils::{BoundaryMode, SimulationConstants};

/// The stages of one tick, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickStage {
    ResetArena,
    BuildTree,
    ClearForces,
    IntegratePosition,
    ApplyBoundaries,
    ResolveCollisions,
    ApplyForces,
    IntegrateVelocity,
}

impl TickStage {
    pub const ORDER: [TickStage; 8] = [
        TickStage::ResetArena,
        TickStage::BuildTree,
        TickStage::ClearForces,
        TickStage::IntegratePosition,
        TickStage::ApplyBoundaries,
        TickStage::ResolveCollisions,
        TickStage::ApplyForces,
        TickStage::IntegrateVelocity,
    ];
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    /// Bodies inside the domain, and so advanced this tick.
    pub retained: usize,
    /// Bodies outside the domain, left untouched this tick.
    pub dropped: usize,
    pub contacts: usize,
    pub nodes: usize,
    pub arena_bytes: usize,
}

pub struct Simulation {
    bodies: Vec<Body>,
    domain: Bounds2D,
    constants: SimulationConstants,
    arena: Arena<BhNode>,
    sink: Option<Sink>,
    candidates: Vec<usize>,
    ticks: u64,
}

impl Simulation {
    /// # Errors
    ///
    /// Returns the validation error of `constants` or `domain`, or
    /// `PhysicsError::InvalidCapacity` if the arena budget cannot hold a node.
    pub fn new(
        bodies: Vec<Body>,
        domain: Bounds2D,
        constants: SimulationConstants,
    ) -> Result<Self, PhysicsError> {
        constants.validate()?;
        domain.validate()?;
        let arena = Arena::create(constants.arena_capacity)?;
        debug!(
            "simulation created: {} bodies, domain {:?}, {:?} gravity, {:?} boundaries",
            bodies.len(),
            domain,
            constants.gravity_mode,
            constants.boundary_mode
        );
        Ok(Simulation {
            bodies,
            domain,
            constants,
            arena,
            sink: None,
            candidates: Vec::new(),
            ticks: 0,
        })
    }

    /// Advances every body inside the domain by one fixed step `dt`.
    ///
    /// # Errors
    ///
    /// Returns `PhysicsError::InvalidTimeStep` if `dt` is not a positive
    /// finite number.
    ///
    /// # Panics
    ///
    /// Panics if building the tree exhausts the arena.
    pub fn step(&mut self, dt: f64) -> Result<TickReport, PhysicsError> {
        if dt <= 0.0 || !dt.is_finite() {
            return Err(PhysicsError::InvalidTimeStep);
        }
        let constants = self.constants;
        let bodies = &mut self.bodies;

        // The tree borrows the arena for the rest of the tick, so the two
        // setup stages run ahead of the loop.
        self.arena.reset();
        let tree = BhTree::build(&mut self.arena, bodies, self.domain)?;

        let mut contacts = 0;
        for stage in TickStage::ORDER {
            match stage {
                TickStage::ResetArena | TickStage::BuildTree => {}
                TickStage::ClearForces => clear_forces(&tree, bodies),
                TickStage::IntegratePosition => integrate(&tree, bodies, dt, IntegrationPhase::Position),
                TickStage::ApplyBoundaries => apply_boundaries(&tree, bodies, &self.domain, constants.boundary_mode),
                TickStage::ResolveCollisions => {
                    contacts = resolve_collisions(&tree, bodies, constants.restitution, &mut self.candidates);
                    // positional correction can push a body across a wrapping edge
                    if contacts > 0 && constants.boundary_mode == BoundaryMode::Toroidal {
                        apply_boundaries(&tree, bodies, &self.domain, BoundaryMode::Toroidal);
                    }
                }
                TickStage::ApplyForces => {
                    apply_gravity(&tree, bodies, &constants);
                    if let Some(sink) = &self.sink {
                        apply_sink_force(&tree, bodies, sink, constants.gravitational_constant, constants.softening);
                    }
                }
                TickStage::IntegrateVelocity => integrate(&tree, bodies, dt, IntegrationPhase::Velocity),
            }
        }
        let (retained, dropped) = (tree.retained_count(), tree.dropped_count());

        let report = TickReport {
            retained,
            dropped,
            contacts,
            nodes: self.arena.len(),
            arena_bytes: self.arena.used(),
        };
        self.ticks += 1;
        trace!("tick {}: {:?}", self.ticks, report);
        Ok(report)
    }

    /// Runs `steps` ticks of `dt` and returns the report of the last one.
    pub fn simulate(&mut self, steps: usize, dt: f64) -> Result<TickReport, PhysicsError> {
        let mut report = TickReport::default();
        for _ in 0..steps {
            report = self.step(dt)?;
        }
        Ok(report)
    }

    /// Builds a tree over the current bodies and hands it to `f`, for debug
    /// drawing or queries between ticks. The tree is discarded afterwards.
    pub fn with_tree<R>(&mut self, f: impl FnOnce(&BhTree, &[Body]) -> R) -> Result<R, PhysicsError> {
        self.arena.reset();
        let tree = BhTree::build(&mut self.arena, &self.bodies, self.domain)?;
        Ok(f(&tree, &self.bodies))
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    /// Appends a body and returns its index.
    pub fn add_body(&mut self, body: Body) -> usize {
        self.bodies.push(body);
        self.bodies.len() - 1
    }

    pub fn domain(&self) -> Bounds2D {
        self.domain
    }

    pub fn constants(&self) -> &SimulationConstants {
        &self.constants
    }

    pub fn sink(&self) -> Option<&Sink> {
        self.sink.as_ref()
    }

    pub fn set_sink(&mut self, sink: Option<Sink>) {
        self.sink = sink;
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn kinetic_energy(&self) -> f64 {
        kinetic_energy(&self.bodies)
    }

    pub fn potential_energy(&self) -> f64 {
        potential_energy(&self.bodies, self.constants.gravitational_constant)
    }

    pub fn total_energy(&self) -> f64 {
        self.kinetic_energy() + self.potential_energy()
    }

    pub fn momentum(&self) -> Vector2 {
        total_momentum(&self.bodies)
    }
}
