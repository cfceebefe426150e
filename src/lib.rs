//! Tabular Q-learning on randomly generated grid mazes
//!
//! This crate provides:
//! - Maze generation with a guaranteed-solvable layout
//! - An episodic maze environment with reset/step semantics
//! - A tabular Q-learning agent with an ε-greedy policy
//! - Training and evaluation pipelines with composable observers

pub mod cli;
pub mod env;
pub mod error;
pub mod maze;
pub mod pipeline;
pub mod ports;
pub mod q_learning;

pub use env::{Action, EpisodeOutcome, MazeConfig, MazeEnvironment, Step};
pub use error::{Error, Result};
pub use maze::{Cell, Grid, Position};
pub use pipeline::{TrainingConfig, TrainingPipeline, TrainingResult};
pub use q_learning::{QLearningAgent, QTable};
