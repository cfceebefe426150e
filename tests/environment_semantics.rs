//! Reset and step semantics of the maze environment.

use qmaze::{Action, Cell, Grid, MazeConfig, MazeEnvironment, Position};

fn open_grid(size: usize) -> Grid {
    let mut grid = Grid::open(size);
    grid.set(grid.goal(), Cell::Goal);
    grid
}

#[test]
fn reset_always_returns_start_on_valid_grid() {
    let config = MazeConfig {
        size: 5,
        complexity: 0.4,
    };
    let mut env = MazeEnvironment::with_seed(config, 17).unwrap();

    for _ in 0..10 {
        let start = env.reset().unwrap();
        assert_eq!(start, Position::new(0, 0));
        assert_eq!(env.grid().get(start), Cell::Open);
        assert_eq!(env.grid().get(env.goal()), Cell::Goal);
        assert!(env.grid().has_path());
    }
}

#[test]
fn seeded_environments_generate_identical_mazes() {
    let config = MazeConfig {
        size: 6,
        complexity: 0.3,
    };
    let mut a = MazeEnvironment::with_seed(config, 99).unwrap();
    let mut b = MazeEnvironment::with_seed(config, 99).unwrap();

    assert_eq!(a.grid(), b.grid());
    a.reset().unwrap();
    b.reset().unwrap();
    assert_eq!(a.grid(), b.grid());
}

#[test]
fn collision_leaves_position_unchanged() {
    let mut grid = open_grid(3);
    grid.set(Position::new(1, 0), Cell::Wall);
    let mut env = MazeEnvironment::with_grid(grid);

    // Wall below, edge above and to the left
    for action in [Action::Down, Action::Up, Action::Left] {
        let step = env.step(action);
        assert_eq!(step.position, Position::new(0, 0));
        assert_eq!(step.reward, -5.0);
        assert!(!step.done);
        assert_eq!(env.position(), Position::new(0, 0));
    }
}

#[test]
fn open_moves_cost_one() {
    let mut env = MazeEnvironment::with_grid(open_grid(4));

    let step = env.step(Action::Right);
    assert_eq!(step.position, Position::new(0, 1));
    assert_eq!(step.reward, -1.0);
    assert!(!step.done);

    let step = env.step(Action::Down);
    assert_eq!(step.position, Position::new(1, 1));
    assert_eq!(step.reward, -1.0);
    assert!(!step.done);
}

#[test]
fn reaching_the_goal_terminates_with_bonus() {
    let mut env = MazeEnvironment::with_grid(open_grid(2));

    let step = env.step(Action::Right);
    assert!(!step.done);
    let step = env.step(Action::Down);
    assert_eq!(step.position, Position::new(1, 1));
    assert_eq!(step.reward, 100.0);
    assert!(step.done);
}

#[test]
fn stepping_around_the_full_perimeter() {
    let mut env = MazeEnvironment::with_grid(open_grid(3));

    // Right across the top, down the edge: last move lands on the goal
    env.step(Action::Right);
    env.step(Action::Right);
    env.step(Action::Down);
    let step = env.step(Action::Down);
    assert_eq!(step.position, Position::new(2, 2));
    assert!(step.done);
}
