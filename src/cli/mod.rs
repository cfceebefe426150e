//! CLI infrastructure for the qmaze trainer
//!
//! This module provides the command-line interface for training agents on
//! generated mazes and inspecting generator output.

pub mod commands;
pub mod output;
