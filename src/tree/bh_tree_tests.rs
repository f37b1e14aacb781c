use approx::assert_relative_eq;
use crate::arena::Arena;
use crate::errors::PhysicsError;
use crate::models::{Body, Bounds2D, Geometry, Quadrant, Vector2};
use crate::simulation::random_cloud;
use crate::tree::{create_node, insert, BhNode, BhTree, NodeId};
use crate::utils::MAX_TREE_DEPTH;

fn body_at(x: f64, y: f64, mass: f64) -> Body {
    Body::new(Vector2::new(x, y), Vector2::ZERO, Vector2::ZERO, mass, 0xFFFFFFFF).unwrap()
}

fn quadrant_bodies() -> Vec<Body> {
    vec![
        body_at(10.0, 10.0, 1.0),
        body_at(90.0, 10.0, 1.0),
        body_at(10.0, 90.0, 1.0),
        body_at(90.0, 90.0, 1.0),
    ]
}

fn domain() -> Bounds2D {
    Bounds2D::from_size(100.0, 100.0)
}

fn node_arena() -> Arena<BhNode> {
    Arena::create(256 * 1024).unwrap()
}

/// Checks the aggregate of every node against the bodies reachable from it
/// and returns `(mass, mass-weighted position sum)` of the subtree.
fn check_aggregates(tree: &BhTree, id: NodeId, bodies: &[Body]) -> (f64, Vector2) {
    let node = tree.node(id).unwrap();
    let mut mass = 0.0;
    let mut moment = Vector2::ZERO;
    for index in node.direct_bodies() {
        mass += bodies[index].mass;
        moment += bodies[index].position * bodies[index].mass;
    }
    for &child in node.children.iter().flatten() {
        let (child_mass, child_moment) = check_aggregates(tree, child, bodies);
        mass += child_mass;
        moment += child_moment;
    }
    assert_relative_eq!(node.total_mass, mass, max_relative = 1e-9);
    if mass > 0.0 {
        assert_relative_eq!(node.center_of_mass, moment * (1.0 / mass), epsilon = 1e-7);
    }
    (mass, moment)
}

fn structure(tree: &BhTree) -> Vec<(Bounds2D, u8, usize, [Option<usize>; 4])> {
    let mut nodes = Vec::new();
    tree.visit_nodes(|node| nodes.push((node.bounds, node.occupancy, node.depth, node.bodies)));
    nodes
}

#[test]
fn test_one_body_per_quadrant_fills_root() {
    let bodies = quadrant_bodies();
    let mut arena = node_arena();
    let tree = BhTree::build(&mut arena, &bodies, domain()).unwrap();
    let root = tree.root_node();

    assert_eq!(root.occupancy, 0b1111);
    assert!(!root.is_partitioned());
    assert!(root.children.iter().all(Option::is_none));
    assert_eq!(root.total_mass, 4.0);
    assert_relative_eq!(root.center_of_mass, Vector2::new(50.0, 50.0));
    assert_eq!(root.direct_body(Quadrant::SouthWest), Some(0));
    assert_eq!(root.direct_body(Quadrant::SouthEast), Some(1));
    assert_eq!(root.direct_body(Quadrant::NorthWest), Some(2));
    assert_eq!(root.direct_body(Quadrant::NorthEast), Some(3));
    assert_eq!(tree.stats().node_count, 1);
}

#[test]
fn test_second_body_in_quadrant_splits_once() {
    let mut bodies = quadrant_bodies();
    bodies.push(body_at(40.0, 40.0, 1.0));
    let mut arena = node_arena();
    let tree = BhTree::build(&mut arena, &bodies, domain()).unwrap();
    let root = tree.root_node();

    assert!(root.is_partitioned());
    assert!(!root.is_occupied(Quadrant::SouthWest));
    assert_eq!(root.direct_body(Quadrant::SouthWest), None);
    assert_eq!(root.occupancy, 0b1110);
    assert_eq!(root.total_mass, 5.0);

    let sw = tree.node(root.child(Quadrant::SouthWest).unwrap()).unwrap();
    assert_eq!(sw.bounds, Bounds2D::from_size(50.0, 50.0));
    assert_eq!(sw.depth, 1);
    assert!(!sw.is_partitioned());
    assert_eq!(sw.direct_body(Quadrant::SouthWest), Some(0));
    assert_eq!(sw.direct_body(Quadrant::NorthEast), Some(4));
    assert_eq!(sw.total_mass, 2.0);
    assert_relative_eq!(sw.center_of_mass, Vector2::new(25.0, 25.0));

    assert_eq!(tree.stats(), crate::tree::TreeStats { node_count: 2, max_depth: 1, body_count: 5 });
}

#[test]
fn test_close_pair_splits_until_separated() {
    let bodies = vec![body_at(10.0, 10.0, 1.0), body_at(20.0, 20.0, 3.0)];
    let mut arena = node_arena();
    let tree = BhTree::build(&mut arena, &bodies, domain()).unwrap();

    // [0,50) keeps both in SW, [0,25) separates them.
    let stats = tree.stats();
    assert_eq!(stats.node_count, 3);
    assert_eq!(stats.max_depth, 2);
    check_aggregates(&tree, tree.root(), &bodies);
}

#[test]
fn test_mass_invariant_holds_for_random_cloud() {
    let bodies = random_cloud(7, 500, &domain(), 5.0, 1.0).unwrap();
    let mut arena = node_arena();
    let tree = BhTree::build(&mut arena, &bodies, domain()).unwrap();

    let (mass, _) = check_aggregates(&tree, tree.root(), &bodies);
    let expected: f64 = bodies.iter().map(|b| b.mass).sum();
    assert_relative_eq!(mass, expected, max_relative = 1e-9);
}

#[test]
fn test_every_body_reachable_exactly_once() {
    let bodies = random_cloud(11, 300, &domain(), 0.0, 0.5).unwrap();
    let mut arena = node_arena();
    let tree = BhTree::build(&mut arena, &bodies, domain()).unwrap();

    let mut seen = vec![0usize; bodies.len()];
    tree.for_each_body(|index| seen[index] += 1);
    assert!(seen.iter().all(|&count| count == 1), "counts: {:?}", seen);
    assert_eq!(tree.retained_count(), bodies.len());
    assert_eq!(tree.stats().body_count, bodies.len());
}

#[test]
fn test_out_of_domain_bodies_are_dropped() {
    let mut bodies = quadrant_bodies();
    bodies.push(body_at(-5.0, 50.0, 1.0));
    bodies.push(body_at(100.0, 50.0, 1.0)); // max edge is excluded
    let mut arena = node_arena();
    let tree = BhTree::build(&mut arena, &bodies, domain()).unwrap();

    assert_eq!(tree.retained_count(), 4);
    assert_eq!(tree.dropped_count(), 2);
    assert_eq!(tree.root_node().total_mass, 4.0);
    let mut indices = tree.body_indices();
    indices.sort_unstable();
    assert_eq!(indices, vec![0, 1, 2, 3]);
}

#[test]
fn test_insert_outside_node_is_noop() {
    let bodies = vec![body_at(150.0, 150.0, 1.0)];
    let mut arena = node_arena();
    let root = create_node(&mut arena, domain());
    assert!(!insert(&mut arena, root, &bodies, 0).unwrap());
    let node = arena.get(root).unwrap();
    assert_eq!(node.total_mass, 0.0);
    assert_eq!(node.occupancy, 0);
}

#[test]
fn test_insert_rejects_bad_index() {
    let bodies = quadrant_bodies();
    let mut arena = node_arena();
    let root = create_node(&mut arena, domain());
    assert!(matches!(
        insert(&mut arena, root, &bodies, 4),
        Err(PhysicsError::CalculationError(_))
    ));
}

#[test]
fn test_build_rejects_dirty_arena() {
    let bodies = quadrant_bodies();
    let mut arena = node_arena();
    arena.alloc(BhNode::new(domain(), 0));
    let used = arena.used();
    assert_eq!(
        BhTree::build(&mut arena, &bodies, domain()).err(),
        Some(PhysicsError::ArenaNotReset { used })
    );
}

#[test]
fn test_build_rejects_degenerate_domain() {
    let bodies = quadrant_bodies();
    let mut arena = node_arena();
    let flat = Bounds2D::new(Vector2::ZERO, Vector2::new(100.0, 0.0));
    assert_eq!(
        BhTree::build(&mut arena, &bodies, flat).err(),
        Some(PhysicsError::InvalidDomain)
    );
}

#[test]
fn test_rebuild_after_reset_matches_fresh_arena() {
    let bodies = random_cloud(3, 200, &domain(), 1.0, 1.0).unwrap();

    let mut reused = node_arena();
    let first = structure(&BhTree::build(&mut reused, &bodies, domain()).unwrap());
    reused.reset();
    assert_eq!(reused.used(), 0);
    let second = structure(&BhTree::build(&mut reused, &bodies, domain()).unwrap());

    let mut fresh = node_arena();
    let third = structure(&BhTree::build(&mut fresh, &bodies, domain()).unwrap());

    assert_eq!(first, second);
    assert_eq!(second, third);
}

#[test]
fn test_handles_go_stale_after_reset() {
    let bodies = quadrant_bodies();
    let mut arena = node_arena();
    let root = BhTree::build(&mut arena, &bodies, domain()).unwrap().root();
    arena.reset();
    assert!(matches!(arena.get(root), Err(PhysicsError::StaleHandle { .. })));
}

#[test]
fn test_coincident_bodies_end_in_bucket() {
    let bodies = vec![body_at(10.0, 10.0, 1.0), body_at(10.0, 10.0, 2.0), body_at(10.0, 10.0, 3.0)];
    let mut arena = node_arena();
    let tree = BhTree::build(&mut arena, &bodies, domain()).unwrap();

    let stats = tree.stats();
    assert_eq!(stats.max_depth, MAX_TREE_DEPTH);
    assert_eq!(stats.node_count, MAX_TREE_DEPTH + 1);
    assert_eq!(stats.body_count, 3);

    let mut seen = vec![0usize; bodies.len()];
    tree.for_each_body(|index| seen[index] += 1);
    assert_eq!(seen, vec![1, 1, 1]);
    assert_eq!(tree.root_node().total_mass, 6.0);
    check_aggregates(&tree, tree.root(), &bodies);
}

#[test]
fn test_full_bucket_chains_overflow() {
    let bodies: Vec<Body> = (0..6).map(|_| body_at(70.0, 30.0, 1.0)).collect();
    let mut arena = node_arena();
    let tree = BhTree::build(&mut arena, &bodies, domain()).unwrap();

    let stats = tree.stats();
    assert_eq!(stats.body_count, 6);
    assert_eq!(stats.max_depth, MAX_TREE_DEPTH + 1);
    let mut deepest = None;
    tree.visit_nodes(|node| {
        if node.depth == MAX_TREE_DEPTH + 1 {
            deepest = Some(*node);
        }
    });
    let overflow = deepest.unwrap();
    assert_eq!(overflow.direct_body_count(), 2);
    assert_eq!(overflow.total_mass, 2.0);
    check_aggregates(&tree, tree.root(), &bodies);
}

#[test]
fn test_least_bounding_node_descends_while_contained() {
    let mut bodies = quadrant_bodies();
    bodies.push(body_at(40.0, 40.0, 1.0));
    for body in bodies.iter_mut() {
        body.bind_geometry(Geometry::Circle { radius: 2.0 }).unwrap();
    }
    let mut arena = node_arena();
    let tree = BhTree::build(&mut arena, &bodies, domain()).unwrap();
    let sw = tree.root_node().child(Quadrant::SouthWest).unwrap();

    assert_eq!(tree.least_bounding_node(&bodies[0].bounding_box()), sw);
    // no child exists for the south-east quadrant
    assert_eq!(tree.least_bounding_node(&bodies[1].bounding_box()), tree.root());

    let straddling = Bounds2D::new(Vector2::new(45.0, 10.0), Vector2::new(55.0, 20.0));
    assert_eq!(tree.least_bounding_node(&straddling), tree.root());

    let mut candidates = Vec::new();
    tree.collect_subtree_bodies(sw, &mut candidates);
    candidates.sort_unstable();
    assert_eq!(candidates, vec![0, 4]);
}

#[test]
fn test_body_on_midpoint_survives_split() {
    let bodies = vec![body_at(50.0, 50.0, 1.0), body_at(75.0, 75.0, 1.0)];
    let mut arena = node_arena();
    let tree = BhTree::build(&mut arena, &bodies, domain()).unwrap();

    assert_eq!(tree.dropped_count(), 0);
    let ne = tree.node(tree.root_node().child(Quadrant::NorthEast).unwrap()).unwrap();
    assert_eq!(ne.bounds, Bounds2D::new(Vector2::new(50.0, 50.0), Vector2::new(100.0, 100.0)));
    assert_eq!(ne.direct_body(Quadrant::SouthWest), Some(0));
    check_aggregates(&tree, tree.root(), &bodies);
}
