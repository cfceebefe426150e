//! Maze generation and grid representation
//!
//! A maze is a square grid of Open, Wall, and Goal cells. The generator
//! scatters walls at a configurable density and then forces a monotone
//! staircase path open, so every maze it returns is solvable by construction.

pub mod generator;
pub mod grid;

pub use generator::generate;
pub use grid::{Cell, Grid, Position};
