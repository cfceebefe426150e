//! Tabular Q-learning agent with an ε-greedy policy

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};

use crate::{env::Action, maze::Position, q_learning::q_table::QTable};

/// Initial exploration rate
pub const DEFAULT_EPSILON: f64 = 1.0;
/// Multiplicative epsilon decay applied once per update
pub const DEFAULT_EPSILON_DECAY: f64 = 0.99;
/// Exploration rate floor
pub const DEFAULT_MIN_EPSILON: f64 = 0.01;
/// Learning rate α
pub const DEFAULT_LEARNING_RATE: f64 = 0.1;
/// Discount factor γ
pub const DEFAULT_DISCOUNT_FACTOR: f64 = 0.95;

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Q-learning agent (off-policy TD control)
///
/// Owns the Q-table and the exploration schedule. Epsilon decays
/// multiplicatively on every update call, down to a fixed floor, so the
/// agent shifts from exploration to exploitation as training progresses.
#[derive(Debug, Clone)]
pub struct QLearningAgent {
    q_table: QTable,
    epsilon: f64,
    initial_epsilon: f64,
    epsilon_decay: f64,
    min_epsilon: f64,
    learning_rate: f64,
    discount_factor: f64,
    rng: StdRng,
    rng_seed: Option<u64>,
}

impl QLearningAgent {
    /// Create an agent for an NxN maze with the standard hyperparameters
    pub fn new(grid_size: usize) -> Self {
        Self {
            q_table: QTable::new(grid_size),
            epsilon: DEFAULT_EPSILON,
            initial_epsilon: DEFAULT_EPSILON,
            epsilon_decay: DEFAULT_EPSILON_DECAY,
            min_epsilon: DEFAULT_MIN_EPSILON,
            learning_rate: DEFAULT_LEARNING_RATE,
            discount_factor: DEFAULT_DISCOUNT_FACTOR,
            rng: build_rng(None),
            rng_seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self.rng_seed = Some(seed);
        self
    }

    pub fn set_rng_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
        self.rng_seed = Some(seed);
    }

    /// ε-greedy action selection
    ///
    /// Explores with a uniformly random action with probability ε, otherwise
    /// exploits the greedy action for the state.
    pub fn select_action(&mut self, state: Position) -> Action {
        if self.rng.random::<f64>() < self.epsilon {
            *Action::ALL.choose(&mut self.rng).unwrap()
        } else {
            self.q_table.greedy_action(state)
        }
    }

    /// Greedy action for a state (pure exploitation, ε ignored)
    pub fn greedy_action(&self, state: Position) -> Action {
        self.q_table.greedy_action(state)
    }

    /// Apply the Bellman update for one transition, then decay epsilon
    ///
    /// `Q(s,a) ← (1-α)·Q(s,a) + α·(r + γ·max_a' Q(s',a'))`
    ///
    /// The decay happens unconditionally once per call, not per episode.
    pub fn update(&mut self, state: Position, action: Action, reward: f64, next_state: Position) {
        let old_value = self.q_table.get(state, action);
        let next_max = self.q_table.max_q(next_state);
        let new_value = (1.0 - self.learning_rate) * old_value
            + self.learning_rate * (reward + self.discount_factor * next_max);
        self.q_table.set(state, action, new_value);

        self.decay_epsilon();
    }

    fn decay_epsilon(&mut self) {
        self.epsilon = (self.epsilon * self.epsilon_decay).max(self.min_epsilon);
    }

    /// Current exploration rate
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    /// Clear the Q-table and restore the initial exploration schedule
    pub fn reset(&mut self) {
        self.q_table.reset();
        self.epsilon = self.initial_epsilon;
        self.rng = build_rng(self.rng_seed);
    }
}
