//! Training and evaluation pipeline abstractions
//!
//! This module provides composable pipelines for:
//! - Training the Q-learning agent over repeated episodes
//! - Evaluating learned policies with exploration switched off
//! - Recording observations during training

pub mod evaluation;
pub mod observers;
pub mod training;

pub use evaluation::{EvaluationConfig, EvaluationPipeline, EvaluationResult};
pub use observers::{
    EpisodeRecord, JsonlObserver, MetricsObserver, ProgressObserver, VerboseObserver,
};
pub use training::{SUCCESS_WINDOW, TrainingConfig, TrainingPipeline, TrainingResult};

pub use crate::ports::Observer;
