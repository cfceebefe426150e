//! Q-table for tabular temporal difference learning

use serde::{Deserialize, Serialize};

use crate::{env::Action, maze::Position};

/// Q-table mapping (position, action) pairs to value estimates
///
/// Stored as a flat `grid_size x grid_size x 4` array of f64, initialized to
/// zero, with explicit index arithmetic rather than a keyed map: every state
/// of an NxN maze is known up front.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QTable {
    grid_size: usize,
    values: Vec<f64>,
}

impl QTable {
    /// Create a zero-initialized Q-table for an NxN maze
    pub fn new(grid_size: usize) -> Self {
        Self {
            grid_size,
            values: vec![0.0; grid_size * grid_size * Action::ALL.len()],
        }
    }

    fn index(&self, state: Position, action: Action) -> usize {
        debug_assert!(state.row < self.grid_size && state.col < self.grid_size);
        (state.row * self.grid_size + state.col) * Action::ALL.len() + action.index()
    }

    /// Get the Q-value for a state-action pair
    pub fn get(&self, state: Position, action: Action) -> f64 {
        self.values[self.index(state, action)]
    }

    /// Set the Q-value for a state-action pair
    pub fn set(&mut self, state: Position, action: Action, value: f64) {
        let index = self.index(state, action);
        self.values[index] = value;
    }

    /// Maximum Q-value over all actions in a state
    pub fn max_q(&self, state: Position) -> f64 {
        Action::ALL
            .into_iter()
            .map(|action| self.get(state, action))
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Greedy action for a state, breaking ties by lowest action index
    pub fn greedy_action(&self, state: Position) -> Action {
        let mut best = Action::ALL[0];
        let mut best_q = self.get(state, best);
        for action in Action::ALL.into_iter().skip(1) {
            let q = self.get(state, action);
            if q > best_q {
                best = action;
                best_q = q;
            }
        }
        best
    }

    /// Reset all Q-values to zero
    pub fn reset(&mut self) {
        self.values.fill(0.0);
    }
}
