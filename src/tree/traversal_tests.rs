use crate::arena::Arena;
use crate::models::{Body, Bounds2D, Vector2};
use crate::tree::{BhNode, BhTree, BodyVisitor, NodeFn, NodeVisitor};

fn body_at(x: f64, y: f64) -> Body {
    Body::new(Vector2::new(x, y), Vector2::ZERO, Vector2::ZERO, 1.0, 0).unwrap()
}

/// Records the order of hook calls.
#[derive(Default)]
struct Recorder {
    events: Vec<String>,
    skip_depth: Option<usize>,
}

impl NodeVisitor for Recorder {
    fn enter_node(&mut self, node: &BhNode) -> bool {
        self.events.push(format!("enter {}", node.depth));
        self.skip_depth != Some(node.depth)
    }

    fn visit_body(&mut self, index: usize) {
        self.events.push(format!("body {}", index));
    }

    fn leave_node(&mut self, node: &BhNode) {
        self.events.push(format!("leave {}", node.depth));
    }
}

fn bodies() -> Vec<Body> {
    // SW splits into a child holding 0 and 2, 1 stays in the root's NE slot
    vec![body_at(10.0, 10.0), body_at(90.0, 90.0), body_at(40.0, 40.0)]
}

#[test]
fn test_walk_visits_bodies_before_children() {
    let bodies = bodies();
    let mut arena: Arena<BhNode> = Arena::create(64 * 1024).unwrap();
    let tree = BhTree::build(&mut arena, &bodies, Bounds2D::from_size(100.0, 100.0)).unwrap();

    let mut recorder = Recorder::default();
    tree.walk(&mut recorder);
    assert_eq!(
        recorder.events,
        vec!["enter 0", "body 1", "enter 1", "body 0", "body 2", "leave 1", "leave 0"]
    );
}

#[test]
fn test_enter_node_false_prunes_subtree() {
    let bodies = bodies();
    let mut arena: Arena<BhNode> = Arena::create(64 * 1024).unwrap();
    let tree = BhTree::build(&mut arena, &bodies, Bounds2D::from_size(100.0, 100.0)).unwrap();

    let mut recorder = Recorder { skip_depth: Some(1), ..Default::default() };
    tree.walk(&mut recorder);
    assert_eq!(recorder.events, vec!["enter 0", "body 1", "enter 1", "leave 0"]);
}

#[test]
fn test_closure_adapters() {
    let bodies = bodies();
    let mut arena: Arena<BhNode> = Arena::create(64 * 1024).unwrap();
    let tree = BhTree::build(&mut arena, &bodies, Bounds2D::from_size(100.0, 100.0)).unwrap();

    let mut indices = Vec::new();
    tree.walk(&mut BodyVisitor(|index| indices.push(index)));
    assert_eq!(indices, vec![1, 0, 2]);

    let mut depths = Vec::new();
    tree.walk(&mut NodeFn(|node: &BhNode| {
        depths.push(node.depth);
        node.depth == 0
    }));
    assert_eq!(depths, vec![0, 1]);
}

#[test]
fn test_visit_nodes_exposes_debug_geometry() {
    let bodies = bodies();
    let mut arena: Arena<BhNode> = Arena::create(64 * 1024).unwrap();
    let tree = BhTree::build(&mut arena, &bodies, Bounds2D::from_size(100.0, 100.0)).unwrap();

    let mut rects = Vec::new();
    tree.visit_nodes(|node| rects.push((node.bounds, node.center_of_mass, node.total_mass)));
    assert_eq!(rects.len(), 2);
    assert_eq!(rects[0].0, Bounds2D::from_size(100.0, 100.0));
    assert_eq!(rects[1].0, Bounds2D::from_size(50.0, 50.0));
    assert_eq!(rects[1].1, Vector2::new(25.0, 25.0));
    assert_eq!(rects[1].2, 2.0);
}
