//! Maze environment with reset/step semantics
//!
//! The environment owns the current maze and the agent's position. It exposes
//! the classic episodic interface: `reset` regenerates the maze and puts the
//! agent back at the start, `step` applies one action and returns the
//! resulting transition. Rewards: -1 for a valid move, -5 for walking into a
//! wall or the grid edge (position unchanged), +100 for reaching the goal.
//!
//! The environment performs no I/O; anything worth displaying travels through
//! the values `reset` and `step` return.

use std::fmt;

use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    maze::{self, Cell, Grid, Position},
};

/// Reward for a valid move onto an open cell
pub const STEP_REWARD: f64 = -1.0;
/// Reward for an out-of-bounds or wall-blocked move
pub const COLLISION_REWARD: f64 = -5.0;
/// Reward for reaching the goal cell
pub const GOAL_REWARD: f64 = 100.0;

/// One of the four grid moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Up,
    Right,
    Down,
    Left,
}

impl Action {
    /// All actions in index order
    pub const ALL: [Action; 4] = [Action::Up, Action::Right, Action::Down, Action::Left];

    /// Row/col delta applied by this action
    pub fn delta(self) -> (isize, isize) {
        match self {
            Action::Up => (-1, 0),
            Action::Right => (0, 1),
            Action::Down => (1, 0),
            Action::Left => (0, -1),
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Look an action up by its index
    ///
    /// # Errors
    ///
    /// Returns `InvalidAction` for indices outside 0..4.
    pub fn from_index(index: usize) -> Result<Action> {
        Action::ALL
            .get(index)
            .copied()
            .ok_or(Error::InvalidAction { index })
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Up => "up",
            Action::Right => "right",
            Action::Down => "down",
            Action::Left => "left",
        };
        write!(f, "{name}")
    }
}

/// Maze layout parameters
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MazeConfig {
    /// Grid dimension (N for an NxN maze)
    pub size: usize,

    /// Fraction of cells marked as walls, in [0, 1)
    pub complexity: f64,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            size: 6,
            complexity: 0.3,
        }
    }
}

/// Result of applying one action
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// Agent position after the move (unchanged on collision)
    pub position: Position,
    /// Reward for the transition
    pub reward: f64,
    /// Whether the goal was reached
    pub done: bool,
}

/// How an episode ended, from the training loop's point of view
///
/// Exhausting the step budget is an expected outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EpisodeOutcome {
    /// The agent reached the goal
    Success,
    /// The per-episode step budget ran out
    TimedOut,
}

impl fmt::Display for EpisodeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EpisodeOutcome::Success => "success",
            EpisodeOutcome::TimedOut => "timed_out",
        };
        write!(f, "{name}")
    }
}

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Grid maze environment
pub struct MazeEnvironment {
    config: MazeConfig,
    grid: Grid,
    position: Position,
    rng: StdRng,
}

impl MazeEnvironment {
    /// Create an environment and generate its first maze
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` when the config is rejected by the
    /// generator (size < 2 or complexity outside [0, 1)).
    pub fn new(config: MazeConfig) -> Result<Self> {
        Self::build(config, build_rng(None))
    }

    /// Create an environment with a deterministic maze sequence
    pub fn with_seed(config: MazeConfig, seed: u64) -> Result<Self> {
        Self::build(config, StdRng::seed_from_u64(seed))
    }

    fn build(config: MazeConfig, mut rng: StdRng) -> Result<Self> {
        let grid = maze::generate(config.size, config.complexity, &mut rng)?;
        let position = grid.start();
        Ok(Self {
            config,
            grid,
            position,
            rng,
        })
    }

    /// Create an environment over a fixed, caller-built grid
    ///
    /// Useful for exercising step semantics on a known layout. A later
    /// `reset` discards the grid and generates a fresh maze from `config`.
    pub fn with_grid(grid: Grid) -> Self {
        let config = MazeConfig {
            size: grid.size(),
            complexity: 0.0,
        };
        let position = grid.start();
        Self {
            config,
            grid,
            position,
            rng: build_rng(None),
        }
    }

    /// Reseed the maze generator (affects subsequent resets)
    pub fn set_rng_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Discard the current maze, generate a fresh one, and move the agent
    /// back to the start
    ///
    /// Returns the starting position.
    pub fn reset(&mut self) -> Result<Position> {
        self.grid = maze::generate(self.config.size, self.config.complexity, &mut self.rng)?;
        self.position = self.grid.start();
        Ok(self.position)
    }

    /// Apply one action and return the resulting transition
    ///
    /// Collisions with walls or the grid edge leave the position unchanged;
    /// they are reported through the reward, never as an error.
    pub fn step(&mut self, action: Action) -> Step {
        let (dr, dc) = action.delta();
        let candidate = self
            .position
            .row
            .checked_add_signed(dr)
            .zip(self.position.col.checked_add_signed(dc))
            .filter(|&(row, col)| row < self.config.size && col < self.config.size)
            .map(|(row, col)| Position::new(row, col));

        match candidate {
            Some(next) if self.grid.get(next) != Cell::Wall => {
                self.position = next;
                if next == self.grid.goal() {
                    Step {
                        position: next,
                        reward: GOAL_REWARD,
                        done: true,
                    }
                } else {
                    Step {
                        position: next,
                        reward: STEP_REWARD,
                        done: false,
                    }
                }
            }
            _ => Step {
                position: self.position,
                reward: COLLISION_REWARD,
                done: false,
            },
        }
    }

    pub fn config(&self) -> &MazeConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn goal(&self) -> Position {
        self.grid.goal()
    }
}
