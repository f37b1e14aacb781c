use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use log::debug;
use rs_bhsim::arena::Arena;
use rs_bhsim::models::Bounds2D;
use rs_bhsim::simulation::{random_cloud, Simulation};
use rs_bhsim::tree::{BhNode, BhTree};
use rs_bhsim::utils::{GravityMode, SimulationConstants};

const SIZES: [usize; 3] = [1_000, 10_000, 50_000];

pub fn bench_tree_build(c: &mut Criterion) {
    let _ = env_logger::try_init();
    let mut group = c.benchmark_group("tree_build");
    group.measurement_time(std::time::Duration::from_secs(5));
    group.sample_size(50);
    let domain = Bounds2D::from_size(1920.0, 1080.0);
    let mut arena: Arena<BhNode> = Arena::create(64 * 1024 * 1024).unwrap();

    for &n in &SIZES {
        let bodies = random_cloud(42, n, &domain, 10.0, 1.0).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(n), &bodies, |b, bodies| {
            b.iter(|| {
                arena.reset();
                let tree = BhTree::build(&mut arena, bodies, domain).unwrap();
                tree.retained_count()
            })
        });
        debug!("{} bodies -> {} nodes", n, arena.len());
    }
    group.finish();
}

pub fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");
    group.measurement_time(std::time::Duration::from_secs(5));
    group.sample_size(20);
    let domain = Bounds2D::from_size(1920.0, 1080.0);

    for mode in [GravityMode::Exact, GravityMode::BarnesHut] {
        let bodies = random_cloud(7, 2_000, &domain, 10.0, 1.0).unwrap();
        let constants = SimulationConstants::new(None, None, Some(1.0), None, None).with_gravity_mode(mode);
        let mut sim = Simulation::new(bodies, domain, constants).unwrap();
        group.bench_function(format!("{:?}", mode), |b| b.iter(|| sim.step(1.0 / 60.0).unwrap()));
    }
    group.finish();
}

criterion_group!(benches, bench_tree_build, bench_tick);
criterion_main!(benches);
