// demos/bouncing_bodies.rs
//
// Headless driver: a fixed-timestep accumulator feeding simulated frame
// times into the simulation, printing energy and momentum as it goes.
// Run with `RUST_LOG=debug` to see arena and tree summaries.

use log::info;
use rs_bhsim::errors::PhysicsError;
use rs_bhsim::models::{Bounds2D, ToCoordinates, Vector2};
use rs_bhsim::forces::Sink;
use rs_bhsim::simulation::{random_cloud, Simulation};
use rs_bhsim::utils::{GravityMode, SimulationConstants};

const PHYSICS_DT: f64 = 1.0 / 120.0;
const MAX_STEPS_PER_FRAME: usize = 8;

fn main() -> Result<(), PhysicsError> {
    env_logger::init();

    let domain = Bounds2D::from_size(800.0, 600.0);
    let bodies = random_cloud(2024, 300, &domain, 40.0, 3.0)?;
    let constants = SimulationConstants::new(Some(0.9), Some(0.8), Some(2.0), Some(0.5), None)
        .with_gravity_mode(GravityMode::BarnesHut);
    let mut sim = Simulation::new(bodies, domain, constants)?;
    sim.set_sink(Some(Sink { position: Vector2::new(400.0, 300.0), mass: 5_000.0 }));

    println!("Initial state:");
    println!("Kinetic energy: {:.3}", sim.kinetic_energy());
    println!("Total energy: {:.3}", sim.total_energy());
    let (px, py) = sim.momentum().to_coord();
    println!("Momentum: ({:.3}, {:.3})", px, py);

    // uneven frame times, as a renderer would report them
    let frame_times = [1.0 / 60.0, 1.0 / 45.0, 1.0 / 75.0, 1.0 / 30.0];
    let mut accumulator = 0.0;
    let mut contacts = 0;
    for frame in 0..600 {
        accumulator += frame_times[frame % frame_times.len()];
        let mut steps = 0;
        while accumulator >= PHYSICS_DT && steps < MAX_STEPS_PER_FRAME {
            contacts += sim.step(PHYSICS_DT)?.contacts;
            accumulator -= PHYSICS_DT;
            steps += 1;
        }

        if frame % 120 == 0 {
            let stats = sim.with_tree(|tree, _| tree.stats())?;
            info!("frame {}: {} ticks, {:?}", frame, sim.ticks(), stats);
            println!(
                "frame {:>3}: ticks={} nodes={} depth={} energy={:.3} contacts={}",
                frame,
                sim.ticks(),
                stats.node_count,
                stats.max_depth,
                sim.total_energy(),
                contacts
            );
        }
    }

    println!("\nFinal state:");
    println!("Kinetic energy: {:.3}", sim.kinetic_energy());
    println!("Total energy: {:.3}", sim.total_energy());
    let (px, py) = sim.momentum().to_coord();
    println!("Momentum: ({:.3}, {:.3})", px, py);
    Ok(())
}
