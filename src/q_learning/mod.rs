//! Tabular Q-learning
//!
//! Off-policy temporal difference control over maze positions. The Q-table
//! is a dense position-by-action array, exactly sized for the maze, and the
//! agent follows an ε-greedy policy whose exploration rate decays with every
//! Bellman update it applies.

pub mod agent;
pub mod q_table;

pub use agent::QLearningAgent;
pub use q_table::QTable;
