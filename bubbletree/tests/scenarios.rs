// End-to-end planning scenarios on a toy 2-D world
use bubbletree::environment::{CollisionOracle, Obstacle, PointWorld};
use bubbletree::space::{
    HaltonGenerator, LinearSampleSpace, SampleGenerator, SampleSpace, UniformGenerator,
};
use bubbletree::tree::{BubbleTree, PlannerTree, StepTree, TreeState};
use bubbletree::{Configuration, PlanError, PlannerParams};

const UNIT_SQUARE: [(f64, f64); 2] = [(0.0, 1.0), (0.0, 1.0)];

fn params() -> PlannerParams {
    PlannerParams::default()
        .with_knn_num(5)
        .with_max_connect_param(16)
        .with_min_clearance(0.001)
        .with_step_size(0.01)
}

fn point(x: f64, y: f64) -> Configuration {
    Configuration::from_vec(vec![x, y])
}

fn obstacle_world(params: &PlannerParams) -> PointWorld {
    PointWorld::new(2, params.min_clearance)
        .with_obstacle(Obstacle::sphere(vec![0.5, 0.5], 0.1))
        .unwrap()
}

fn wall_world(params: &PlannerParams) -> PointWorld {
    PointWorld::new(2, params.min_clearance)
        .with_obstacle(Obstacle::band(0, 0.45, 0.55))
        .unwrap()
}

fn uniform_pool(seed: u64, count: usize) -> LinearSampleSpace {
    let mut generator = UniformGenerator::new(&UNIT_SQUARE, seed).unwrap();
    LinearSampleSpace::from_points(2, generator.sample_space(count)).unwrap()
}

fn halton_pool(count: usize) -> LinearSampleSpace {
    let mut generator = HaltonGenerator::new(&UNIT_SQUARE, 1).unwrap();
    LinearSampleSpace::from_points(2, generator.sample_space(count)).unwrap()
}

fn assert_clear_path(path: &[Configuration]) {
    assert_eq!(path[0], point(0.0, 0.0), "path must start at the start");
    assert_eq!(path[path.len() - 1], point(1.0, 1.0), "path must end at the goal");
    for waypoint in path {
        let distance = (waypoint - point(0.5, 0.5)).norm();
        assert!(distance > 0.1, "waypoint {:?} lies inside the obstacle", waypoint);
    }
}

#[test]
fn test_bubble_tree_around_obstacle() {
    let params = params();
    let mut tree = BubbleTree::new(
        halton_pool(50),
        obstacle_world(&params),
        point(0.0, 0.0),
        point(1.0, 1.0),
        &params,
    )
    .unwrap();

    tree.build_tree().expect("small obstacle should not block a 50 point pool");
    assert_eq!(tree.state(), TreeState::Succeeded);
    assert_clear_path(&tree.generate_path().unwrap());

    let chain = tree.sample_chain().unwrap();
    assert!(chain.len() <= tree.core().space().size());
}

#[test]
fn test_bubble_tree_uniform_pool() {
    let params = params();
    let mut tree = BubbleTree::new(
        uniform_pool(7, 50),
        obstacle_world(&params),
        point(0.0, 0.0),
        point(1.0, 1.0),
        &params,
    )
    .unwrap();

    tree.build_tree().expect("small obstacle should not block a 50 point pool");
    assert_clear_path(&tree.generate_path().unwrap());
    assert!(tree.stats().expansions >= 2);
}

#[test]
fn test_step_tree_around_obstacle() {
    let params = params();
    let mut tree = StepTree::new(
        halton_pool(50),
        obstacle_world(&params),
        point(0.0, 0.0),
        point(1.0, 1.0),
        &params,
    )
    .unwrap();

    tree.build_tree().expect("small obstacle should not block a 50 point pool");
    let path = tree.generate_path().unwrap();
    assert_clear_path(&path);
    assert_eq!(path.len(), tree.path_indices().unwrap().len());
    assert_eq!(tree.stats().bubble_count, 0);
}

#[test]
fn test_start_inside_obstacle() {
    let params = params();
    let mut tree = BubbleTree::new(
        halton_pool(50),
        obstacle_world(&params),
        point(0.5, 0.5),
        point(1.0, 1.0),
        &params,
    )
    .unwrap();

    assert!(matches!(tree.build_tree(), Err(PlanError::CollisionAtStart)));
    assert_eq!(tree.stats().expansions, 0);
    assert_eq!(tree.stats().frontier_pops, 0);
    assert_eq!(tree.core().oracle().bubble_count(), 1);
    assert!(tree.generate_path().is_err());
}

#[test]
fn test_wall_separates_start_and_goal() {
    let params = params();
    let mut tree = BubbleTree::new(
        uniform_pool(3, 60),
        wall_world(&params),
        point(0.0, 0.0),
        point(1.0, 1.0),
        &params,
    )
    .unwrap();

    assert!(matches!(tree.build_tree(), Err(PlanError::NoPath)));
    assert_eq!(tree.state(), TreeState::Failed);
    assert!(tree.core().frontier().is_empty());
    assert!(tree.stats().rejected_edges > 0);
    assert!(matches!(tree.generate_path(), Err(PlanError::NoPath)));

    // Nothing on the far side of the wall was ever linked in
    for index in 0..tree.core().space().size() {
        if let Some(bubble) = tree.bubble_of(index) {
            if bubble.center()[0] > 0.55 {
                assert!(bubble.parent.is_none());
            }
        }
    }
}

#[test]
fn test_step_tree_wall_separates_start_and_goal() {
    let params = params();
    let mut tree = StepTree::new(
        uniform_pool(3, 60),
        wall_world(&params),
        point(0.0, 0.0),
        point(1.0, 1.0),
        &params,
    )
    .unwrap();

    assert!(matches!(tree.build_tree(), Err(PlanError::NoPath)));
    assert!(tree.path_indices().is_err());
}

#[test]
fn test_bubbles_use_fewer_oracle_calls_than_steps() {
    let params = params().with_max_connect_param(128);
    let mut bubble = BubbleTree::new(
        halton_pool(50),
        obstacle_world(&params),
        point(0.0, 0.0),
        point(1.0, 1.0),
        &params,
    )
    .unwrap();
    let mut step = StepTree::new(
        halton_pool(50),
        obstacle_world(&params),
        point(0.0, 0.0),
        point(1.0, 1.0),
        &params,
    )
    .unwrap();

    bubble.build_tree().unwrap();
    step.build_tree().unwrap();
    assert!(bubble.stats().bubble_count < step.stats().collision_count);
}
