// rs_bhsim_wasm/src/lib.rs
// Browser-facing wrapper: the renderer reads flat buffers and drives `step`.

use js_sys::{Float64Array, Uint32Array};
use wasm_bindgen::prelude::*;
use rs_bhsim::errors::PhysicsError;
use rs_bhsim::models::{Body, Bounds2D, Geometry, Vector2};
use rs_bhsim::simulation::{random_cloud, Simulation};
use rs_bhsim::utils::{BoundaryMode, GravityMode, SimulationConstants};

fn to_js(e: PhysicsError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen]
pub struct WasmSimulation {
    sim: Simulation,
}

#[wasm_bindgen]
impl WasmSimulation {
    /// An empty simulation over `[0, width) x [0, height)`.
    #[wasm_bindgen(constructor)]
    pub fn new(
        width: f64,
        height: f64,
        gravitational_constant: f64,
        restitution: f64,
        barnes_hut: bool,
        toroidal: bool,
    ) -> Result<WasmSimulation, JsValue> {
        let constants = SimulationConstants::new(Some(gravitational_constant), Some(restitution), None, None, None)
            .with_gravity_mode(if barnes_hut { GravityMode::BarnesHut } else { GravityMode::Exact })
            .with_boundary_mode(if toroidal { BoundaryMode::Toroidal } else { BoundaryMode::Reflect });
        let sim = Simulation::new(Vec::new(), Bounds2D::from_size(width, height), constants).map_err(to_js)?;
        Ok(Self { sim })
    }

    /// Adds a body; a zero radius leaves it without collision geometry.
    #[wasm_bindgen]
    pub fn add_body(
        &mut self,
        x: f64,
        y: f64,
        vx: f64,
        vy: f64,
        mass: f64,
        radius: f64,
        color: u32,
    ) -> Result<usize, JsValue> {
        let mut body = Body::new(Vector2::new(x, y), Vector2::new(vx, vy), Vector2::ZERO, mass, color)
            .map_err(to_js)?;
        if radius > 0.0 {
            body.bind_geometry(Geometry::Circle { radius }).map_err(to_js)?;
        }
        Ok(self.sim.add_body(body))
    }

    /// Adds `count` seeded random bodies spread over the domain.
    #[wasm_bindgen]
    pub fn add_random_bodies(&mut self, seed: u64, count: usize, max_speed: f64, radius: f64) -> Result<(), JsValue> {
        let domain = self.sim.domain();
        for body in random_cloud(seed, count, &domain, max_speed, radius).map_err(to_js)? {
            self.sim.add_body(body);
        }
        Ok(())
    }

    /// Runs one fixed physics step and returns the number of contacts resolved.
    #[wasm_bindgen]
    pub fn step(&mut self, dt: f64) -> Result<usize, JsValue> {
        self.sim.step(dt).map(|report| report.contacts).map_err(to_js)
    }

    #[wasm_bindgen(getter)]
    pub fn body_count(&self) -> usize {
        self.sim.bodies().len()
    }

    #[wasm_bindgen(getter)]
    pub fn ticks(&self) -> f64 {
        self.sim.ticks() as f64
    }

    /// Interleaved `x, y` pairs, one per body.
    #[wasm_bindgen]
    pub fn positions(&self) -> Float64Array {
        let flat: Vec<f64> = self.sim.bodies().iter().flat_map(|b| [b.position.x, b.position.y]).collect();
        Float64Array::from(flat.as_slice())
    }

    #[wasm_bindgen]
    pub fn radii(&self) -> Float64Array {
        let flat: Vec<f64> = self.sim.bodies().iter().map(Body::radius).collect();
        Float64Array::from(flat.as_slice())
    }

    /// Packed `0xRRGGBBAA` colors, one per body.
    #[wasm_bindgen]
    pub fn colors(&self) -> Uint32Array {
        let flat: Vec<u32> = self.sim.bodies().iter().map(|b| b.color).collect();
        Uint32Array::from(flat.as_slice())
    }

    /// Seven values per tree node for debug drawing:
    /// `min_x, min_y, max_x, max_y, com_x, com_y, total_mass`.
    #[wasm_bindgen]
    pub fn node_rects(&mut self) -> Result<Float64Array, JsValue> {
        let flat = self
            .sim
            .with_tree(|tree, _| {
                let mut flat = Vec::new();
                tree.visit_nodes(|node| {
                    flat.extend_from_slice(&[
                        node.bounds.min.x,
                        node.bounds.min.y,
                        node.bounds.max.x,
                        node.bounds.max.y,
                        node.center_of_mass.x,
                        node.center_of_mass.y,
                        node.total_mass,
                    ])
                });
                flat
            })
            .map_err(to_js)?;
        Ok(Float64Array::from(flat.as_slice()))
    }

    #[wasm_bindgen]
    pub fn total_energy(&self) -> f64 {
        self.sim.total_energy()
    }

    /// Writes a one-line summary of the simulation to the browser console.
    #[wasm_bindgen]
    pub fn log_summary(&self) {
        let momentum = self.sim.momentum();
        web_sys::console::log_1(&JsValue::from_str(&format!(
            "tick {}: {} bodies, energy {:.3}, momentum ({:.3}, {:.3})",
            self.sim.ticks(),
            self.sim.bodies().len(),
            self.sim.total_energy(),
            momentum.x,
            momentum.y
        )));
    }
}
